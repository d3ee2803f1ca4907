//! Best-effort side fetches: the thumbnail image and auto-generated subtitles.
//!
//! File names inside the video folder are left to the downloader's own
//! output templating, so they match what the tool would produce on its own.

use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::metadata::VideoMetadata;
use std::path::Path;

/// Placeholder language entry meaning "the video's own spoken language".
pub const AUTO_DETECT: &str = "orig";

const OUTPUT_TEMPLATE: &str = "%(title)s [%(id)s].%(ext)s";

/// Splits a comma-separated language list, dropping empty entries.
/// An empty list resolves to the auto-detect placeholder.
pub fn split_languages(raw: &str) -> Vec<String> {
    let langs: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect();

    if langs.is_empty() {
        vec![AUTO_DETECT.to_string()]
    } else {
        langs
    }
}

/// Replaces each auto-detect placeholder with the subtitle key of the
/// video's original language, preserving order and explicit entries.
pub fn resolve_languages(langs: &[String], meta: &VideoMetadata) -> Vec<String> {
    langs
        .iter()
        .map(|lang| {
            if lang == AUTO_DETECT {
                meta.original_language()
            } else {
                lang.clone()
            }
        })
        .collect()
}

/// Downloads the video thumbnail image into the folder.
pub async fn download_thumbnail(url: &str, folder: &Path) -> Result<()> {
    let template = output_template(folder)?;
    let executor = Executor::downloader([
        "--skip-download",
        "--write-thumbnail",
        "-o",
        template.as_str(),
        url,
    ]);
    executor.execute().await?;

    Ok(())
}

/// Downloads auto-generated subtitles in SRT format for the given languages.
pub async fn download_subtitles(url: &str, folder: &Path, langs: &[String]) -> Result<()> {
    let template = output_template(folder)?;
    let joined = langs.join(",");
    let executor = Executor::downloader([
        "--skip-download",
        "--write-auto-subs",
        "--sub-langs",
        joined.as_str(),
        "--sub-format",
        "srt",
        "--convert-subs",
        "srt",
        "-o",
        template.as_str(),
        url,
    ]);
    executor.execute().await?;

    Ok(())
}

fn output_template(folder: &Path) -> Result<String> {
    let template = folder.join(OUTPUT_TEMPLATE);
    template
        .to_str()
        .map(str::to_string)
        .ok_or_else(|| Error::Path(format!("{:?} is not valid UTF-8", template)))
}
