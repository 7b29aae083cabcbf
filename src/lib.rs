//! Tubedigest - download a YouTube video, strip the silence, transcribe, summarize
//!
//! This library implements a single-pass batch pipeline: a video URL is resolved to
//! a local audio track with yt-dlp, silent spans are removed and the result is
//! re-encoded at a low bitrate, the trimmed audio is transcribed with Whisper, and
//! a timestamped highlight summary is written next to the transcript under a fixed
//! per-video folder layout.

pub mod audio;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod layout;
pub mod pipeline;
pub mod summary;
pub mod transcribe;
pub mod utils;

pub use cli::Cli;
pub use config::{ModelSize, PipelineConfig, SilenceConfig};
pub use fetch::{FetchedAudio, Fetcher, YtDlpFetcher};
pub use layout::VideoLayout;
pub use pipeline::{JobReport, ProcessingPipeline};
pub use summary::{EverySegment, Highlight, HighlightPolicy, IntervalSampling, Summarizer};
pub use transcribe::{Segment, Transcriber, Transcript, WhisperCliTranscriber};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to the pipeline, one variant per stage
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Audio processing failed: {0}")]
    AudioProcessing(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),
}
