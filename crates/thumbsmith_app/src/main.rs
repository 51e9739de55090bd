use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

mod app;
mod effects;
mod logging;
mod persistence;
mod render;

/// Summarize a YouTube video and generate thumbnail candidates for it.
#[derive(Parser, Debug)]
#[command(name = "thumbsmith")]
#[command(about, long_about = None)]
struct Args {
    /// YouTube video URL (watch, youtu.be, embed, or mobile form).
    video_url: String,

    /// Ask for a human figure in generated thumbnails.
    #[arg(long)]
    include_human: bool,

    /// Ask for text overlays in generated thumbnails.
    #[arg(long)]
    include_text: bool,

    /// Generate new thumbnail candidates after the summary.
    #[arg(short, long)]
    generate: bool,

    /// Save every generated thumbnail to the downloads directory
    /// (implies --generate).
    #[arg(short, long)]
    download: bool,

    /// Base URL of the summarizer backend.
    #[arg(long)]
    backend: Option<String>,

    /// Directory for downloaded thumbnails and saved settings.
    #[arg(long, default_value = "downloads")]
    downloads_dir: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    app::run(args)
}
