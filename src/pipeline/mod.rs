use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::audio::{FfmpegSilenceTrimmer, Trimmer};
use crate::config::PipelineConfig;
use crate::fetch::{Fetcher, YtDlpFetcher};
use crate::layout::VideoLayout;
use crate::summary::Summarizer;
use crate::transcribe::{Transcriber, WhisperCliTranscriber};
use crate::utils::{format_duration, sanitize_filename, validate_and_normalize_url};
use crate::Result;

/// Paths and counts reported after a completed job
#[derive(Debug)]
pub struct JobReport {
    pub title: String,
    pub audio_path: PathBuf,
    pub transcript_path: PathBuf,
    pub summary_path: PathBuf,
    pub segment_count: usize,
}

/// Drives one job through its stages in order: fetching, trimming,
/// transcribing, summarizing, persisting. Any stage failure aborts the rest;
/// files already written stay where they are.
pub struct ProcessingPipeline {
    config: PipelineConfig,
    fetcher: Box<dyn Fetcher>,
    trimmer: Box<dyn Trimmer>,
    transcriber: Box<dyn Transcriber>,
    summarizer: Summarizer,
    temp_dir: TempDir,
}

impl ProcessingPipeline {
    /// Create a pipeline wired to the real external tools
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let fetcher = Box::new(YtDlpFetcher::new(config.audio_bitrate_kbps));
        let trimmer = Box::new(FfmpegSilenceTrimmer::new(
            config.silence,
            config.sample_rate,
            config.audio_bitrate_kbps,
        ));
        let transcriber = Box::new(WhisperCliTranscriber::new(config.model));
        let summarizer = Summarizer::new(Box::new(crate::summary::IntervalSampling {
            interval_secs: config.highlight_interval_secs,
        }));

        Self::with_stages(config, fetcher, trimmer, transcriber, summarizer)
    }

    /// Create a pipeline from explicit stage implementations, the seam used by
    /// tests to substitute fakes for the external tools
    pub fn with_stages(
        config: PipelineConfig,
        fetcher: Box<dyn Fetcher>,
        trimmer: Box<dyn Trimmer>,
        transcriber: Box<dyn Transcriber>,
        summarizer: Summarizer,
    ) -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temporary directory")?;

        Ok(Self {
            config,
            fetcher,
            trimmer,
            transcriber,
            summarizer,
            temp_dir,
        })
    }

    /// Run the full pipeline for one URL
    pub async fn run(&self, url: &str) -> Result<JobReport> {
        let url = validate_and_normalize_url(url)?;

        // Fetching
        tracing::info!("Downloading audio from {}", url);
        let progress = spinner("Downloading audio with yt-dlp...");
        let fetched = self.fetcher.fetch(&url, self.temp_dir.path()).await?;
        progress.finish_with_message("Download complete");

        let safe_title = sanitize_filename(&fetched.title);
        tracing::info!("Processing \"{}\" as {}", fetched.title, safe_title);

        // The per-title folder is only created once the fetch has succeeded,
        // so a bad URL leaves the videos root untouched
        let layout = VideoLayout::new(&self.config.videos_root, &safe_title);
        layout.prepare()?;

        // Trimming
        tracing::info!("Removing silence");
        let report = self
            .trimmer
            .trim(&fetched.audio_path, layout.audio_path())
            .await?;
        tracing::info!(
            "Original duration: {}, after silence removal: {} ({:.1}% reduction)",
            format_duration(report.original_secs),
            format_duration(report.trimmed_secs),
            report.reduction_pct()
        );

        // Transcribing
        tracing::info!("Transcribing audio");
        let progress = spinner("Transcribing with Whisper...");
        let transcript = self.transcriber.transcribe(layout.audio_path()).await?;
        progress.finish_with_message("Transcription complete");

        // Summarizing and persisting
        layout.write_transcript(&transcript)?;
        let summary = self.summarizer.render(&fetched.title, &transcript);
        layout.write_summary(&summary)?;

        Ok(JobReport {
            title: safe_title,
            audio_path: layout.audio_path().to_path_buf(),
            transcript_path: layout.transcript_path().to_path_buf(),
            summary_path: layout.summary_path().to_path_buf(),
            segment_count: transcript.len(),
        })
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    progress.set_message(message);
    progress
}
