//! Folder naming and the final on-disk report.

use crate::error::Result;
use crate::metadata::VideoMetadata;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Longest folder name we will create, in characters.
const MAX_NAME_CHARS: usize = 200;

/// Makes a video title safe to use as a folder name.
///
/// Strips characters that are invalid or awkward in file paths, collapses
/// whitespace runs, trims, and caps the length. Applying it twice yields
/// the same result as applying it once.
pub fn sanitize_title(name: &str) -> String {
    let illegal = Regex::new(r#"[<>:"/\\|?*]"#).unwrap();
    let whitespace = Regex::new(r"\s+").unwrap();

    let stripped = illegal.replace_all(name, "");
    let collapsed = whitespace.replace_all(&stripped, " ");
    let capped: String = collapsed.trim().chars().take(MAX_NAME_CHARS).collect();

    // The cap can land right after a space.
    capped.trim_end().to_string()
}

/// Creates and returns the per-video output directory, named after the
/// sanitized title. Falls back to the video id, then to `untitled`.
pub fn video_folder(base: &Path, meta: &VideoMetadata) -> Result<PathBuf> {
    let raw = meta
        .title()
        .filter(|title| !title.is_empty())
        .or_else(|| meta.id())
        .unwrap_or("untitled");

    let mut name = sanitize_title(raw);
    if name.is_empty() {
        name = "untitled".to_string();
    }

    let folder = base.join(name);
    std::fs::create_dir_all(&folder)?;
    Ok(folder)
}

/// Renders a byte count the way the final report shows it.
pub fn human_size(bytes: u64) -> String {
    if bytes > 1_000_000 {
        format!("{:.1} MB", bytes as f64 / 1_000_000.0)
    } else if bytes > 1_000 {
        format!("{:.1} KB", bytes as f64 / 1_000.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Prints the folder contents sorted by name, with sizes.
pub fn print_contents(folder: &Path) -> Result<()> {
    let mut entries = std::fs::read_dir(folder)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let size = entry.metadata()?.len();
        println!(
            "  {:>10}  {}",
            human_size(size),
            entry.file_name().to_string_lossy()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_path_characters() {
        assert_eq!(sanitize_title("Test: Video?"), "Test Video");
        assert_eq!(sanitize_title(r#"a<b>c:d"e/f\g|h?i*j"#), "abcdefghij");
    }

    #[test]
    fn never_emits_a_forbidden_character() {
        let sanitized = sanitize_title("w<h>a:t\" a/ t\\i|t?l*e \t with \n everything");
        for forbidden in ['<', '>', ':', '"', '/', '\\', '|', '?', '*'] {
            assert!(
                !sanitized.contains(forbidden),
                "'{}' found in '{}'",
                forbidden,
                sanitized
            );
        }
    }

    #[test]
    fn collapses_and_trims_whitespace() {
        assert_eq!(sanitize_title("  a \t\t b \n c  "), "a b c");
    }

    #[test]
    fn caps_the_length() {
        let long = "x".repeat(1000);
        assert_eq!(sanitize_title(&long).chars().count(), 200);
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "Test: Video?",
            "  spaced \t out  ",
            &format!("{} tail", "word ".repeat(60)),
            r#"</|\>*?: "#,
        ];
        for input in inputs {
            let once = sanitize_title(input);
            assert_eq!(sanitize_title(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn folder_named_after_sanitized_title() {
        let base = tempfile::tempdir().unwrap();
        let meta = VideoMetadata::new(json!({"title": "Test: Video?", "id": "abc123"}));

        let folder = video_folder(base.path(), &meta).unwrap();

        assert_eq!(folder, base.path().join("Test Video"));
        assert!(folder.is_dir());
    }

    #[test]
    fn folder_falls_back_to_id_then_untitled() {
        let base = tempfile::tempdir().unwrap();

        let no_title = VideoMetadata::new(json!({"id": "abc123"}));
        assert_eq!(
            video_folder(base.path(), &no_title).unwrap(),
            base.path().join("abc123")
        );

        let nothing = VideoMetadata::new(json!({}));
        assert_eq!(
            video_folder(base.path(), &nothing).unwrap(),
            base.path().join("untitled")
        );

        // A title that sanitizes to nothing must not resolve to the base dir.
        let unusable = VideoMetadata::new(json!({"title": "???"}));
        assert_eq!(
            video_folder(base.path(), &unusable).unwrap(),
            base.path().join("untitled")
        );
    }

    #[test]
    fn size_tiers() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2_048), "2.0 KB");
        assert_eq!(human_size(3_500_000), "3.5 MB");
    }
}
