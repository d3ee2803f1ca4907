//! Fetching and persisting the metadata dump of a video.
//!
//! The downloader returns one JSON object per video. Its schema is not under
//! our control and any field may be missing, so the mapping stays untyped
//! and every accessor carries a fallback.

use crate::error::Result;
use crate::executor::Executor;
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Substituted in the summary for fields the platform did not report.
pub const MISSING: &str = "N/A";

/// The untyped key-value metadata mapping of a single video.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata(Value);

/// Fetches the full JSON metadata for a video without downloading it.
///
/// # Errors
///
/// A failed invocation is fatal to the whole run, so the error carries the
/// downloader's own diagnostics.
pub async fn fetch_metadata(url: &str) -> Result<VideoMetadata> {
    let executor = Executor::downloader(["--dump-json", "--skip-download", url]);
    let output = executor.execute().await?;

    VideoMetadata::from_json(&output.stdout)
}

impl VideoMetadata {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(raw)?))
    }

    /// Returns the field as a string slice, if present and textual.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Renders the field for the summary, falling back to [`MISSING`].
    /// Numeric fields such as view counts are rendered in decimal.
    pub fn display_field(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            _ => MISSING.to_string(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    /// Returns the subtitle key of the auto-caption matching the spoken
    /// language, e.g. `en-orig`.
    ///
    /// The platform marks that track as `<lang>-orig`. When the metadata
    /// does not name a language, `en` is assumed.
    pub fn original_language(&self) -> String {
        let lang = self.str_field("language").unwrap_or("en");
        format!("{}-orig", lang)
    }

    /// Writes the raw mapping to `metadata.json`, pretty-printed.
    pub fn save_json(&self, folder: &Path) -> Result<PathBuf> {
        let out = folder.join("metadata.json");
        debug!("Writing metadata dump to {:?}", out);

        let mut rendered = serde_json::to_string_pretty(&self.0)?;
        rendered.push('\n');
        fs::write(&out, rendered)?;

        Ok(out)
    }

    /// Writes the human-readable summary to `info.txt`.
    pub fn save_summary(&self, folder: &Path) -> Result<PathBuf> {
        let out = folder.join("info.txt");
        debug!("Writing info summary to {:?}", out);

        let lines = [
            format!("Title:       {}", self.display_field("title")),
            format!("Channel:     {}", self.display_field("channel")),
            format!("Uploader:    {}", self.display_field("uploader")),
            format!("Upload date: {}", self.display_field("upload_date")),
            format!("Duration:    {}", self.display_field("duration_string")),
            format!("View count:  {}", self.display_field("view_count")),
            format!("Like count:  {}", self.display_field("like_count")),
            format!("Video ID:    {}", self.display_field("id")),
            format!("URL:         {}", self.display_field("webpage_url")),
            format!("Description:\n{}", self.display_field("description")),
        ];
        fs::write(&out, lines.join("\n") + "\n")?;

        Ok(out)
    }
}
