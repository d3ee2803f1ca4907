use clap::Parser;
use log::error;
use std::path::PathBuf;
use ytbackup::{BackupOptions, run_backup};

/// Archive metadata, thumbnail and auto-subtitles for a video without
/// downloading the video stream itself.
#[derive(Parser, Clone)]
#[command(version)]
pub struct Cli {
    /// Source video URL
    pub url: String,

    /// Comma-separated subtitle language codes ('orig' = auto-detect original language)
    #[arg(long = "langs", short, default_value = "orig")]
    pub langs: String,

    /// Base output directory (default: same directory as the executable)
    #[arg(long = "output-dir", short)]
    pub output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Cli::parse();

    let output_dir = args.output_dir.unwrap_or_else(default_output_dir);

    let options = BackupOptions {
        url: args.url,
        langs: args.langs,
        output_dir,
    };

    if let Err(e) = run_backup(options).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// The directory holding the executable, so backups land next to the tool
/// unless told otherwise. Falls back to the working directory.
fn default_output_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}
