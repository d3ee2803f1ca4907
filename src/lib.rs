use {
    crate::error::{Error, Result},
    crate::fetcher::{AUTO_DETECT, download_subtitles, download_thumbnail, resolve_languages, split_languages},
    crate::files::{print_contents, video_folder},
    crate::metadata::fetch_metadata,
    log::warn,
    regex::Regex,
    std::path::PathBuf,
};

pub mod error;
pub mod executor;
pub mod fetcher;
pub mod files;
pub mod metadata;

/// Everything one backup run needs to know.
#[derive(Debug, Clone)]
pub struct BackupOptions {
    pub url: String,
    pub langs: String,
    pub output_dir: PathBuf,
}

/// Archives the metadata, thumbnail and auto-subtitles of a single video.
///
/// The video stream itself is never downloaded. Metadata fetch failure is
/// fatal; thumbnail and subtitle failures are warnings, since those are
/// best-effort enrichments.
pub async fn run_backup(options: BackupOptions) -> Result<()> {
    if !is_fetchable_url(&options.url) {
        return Err(Error::InvalidUrl(options.url));
    }
    which::which(executor::DOWNLOADER_BIN)
        .map_err(|_| Error::MissingBinary(executor::DOWNLOADER_BIN.to_string()))?;

    let mut langs = split_languages(&options.langs);

    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("  Video Backup");
    println!("{}", rule);
    println!("  URL:    {}", options.url);
    println!("  Langs:  {}", langs.join(", "));
    println!("  Base:   {}", options.output_dir.display());
    println!("{}", rule);

    println!("\n[1/3] Fetching metadata...");
    let meta = fetch_metadata(&options.url).await?;

    if langs.iter().any(|lang| lang == AUTO_DETECT) {
        let orig = meta.original_language();
        langs = resolve_languages(&langs, &meta);
        println!("  Auto-detected original language subtitle: {}", orig);
    }

    let folder = video_folder(&options.output_dir, &meta)?;
    println!("\n  Output folder: {}\n", folder.display());

    println!("[2/3] Saving metadata...");
    let json_path = meta.save_json(&folder)?;
    println!("✓  Metadata saved → {}", json_path.display());
    let summary_path = meta.save_summary(&folder)?;
    println!("✓  Info summary saved → {}", summary_path.display());

    println!("\n[3/3] Downloading subtitles + thumbnail...");
    match download_subtitles(&options.url, &folder, &langs).await {
        Ok(()) => println!("✓  Subtitles downloaded for: {}", langs.join(",")),
        Err(e) => warn!("Subtitle download may have had issues: {}", e),
    }
    match download_thumbnail(&options.url, &folder).await {
        Ok(()) => println!("✓  Thumbnail downloaded."),
        Err(e) => warn!("Thumbnail download may have had issues: {}", e),
    }

    println!("\n{}", rule);
    println!("  Backup complete!");
    println!("  Files in: {}", folder.display());
    println!("{}", rule);
    print_contents(&folder)?;

    Ok(())
}

const URL_PATTERN: &str = r"^https?://\S+$";

fn is_fetchable_url(url: &str) -> bool {
    let re = Regex::new(URL_PATTERN).unwrap();
    re.is_match(url.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(is_fetchable_url("https://www.youtube.com/watch?v=abc123def45"));
        assert!(is_fetchable_url("http://example.com/video"));
        assert!(is_fetchable_url("  https://youtu.be/abc123def45  "));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_fetchable_url("ftp://example.com/video"));
        assert!(!is_fetchable_url("watch?v=abc123def45"));
        assert!(!is_fetchable_url("https:// spaced.example.com"));
        assert!(!is_fetchable_url(""));
    }
}
