use clap::Parser;

#[derive(Parser)]
#[command(
    name = "tubedigest",
    about = "Download a YouTube video, remove silence, transcribe, and summarize",
    version,
    long_about = "A batch pipeline for one video: resolves the URL to an audio track with \
yt-dlp, strips silent spans and re-encodes at 32 kbps, transcribes the trimmed audio with \
Whisper, and writes a timestamped highlight summary under videos/<Title>/."
)]
pub struct Cli {
    /// Video URL to process
    #[arg(value_name = "URL")]
    pub url: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long)]
    pub quiet: bool,
}
