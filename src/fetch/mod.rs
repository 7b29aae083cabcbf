use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use uuid::Uuid;

use crate::{PipelineError, Result};

/// A downloaded audio track and the title it was published under
#[derive(Debug, Clone)]
pub struct FetchedAudio {
    /// Path to the downloaded MP3 track
    pub audio_path: PathBuf,

    /// Video title as reported by the platform, not yet filesystem-safe
    pub title: String,
}

/// Resolves a video URL to a local audio track
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Download the best available audio for `url` into `dest_dir`
    async fn fetch(&self, url: &str, dest_dir: &Path) -> Result<FetchedAudio>;
}

/// Fetcher backed by the yt-dlp command-line tool
pub struct YtDlpFetcher {
    yt_dlp_path: String,
    audio_quality: String,
}

impl YtDlpFetcher {
    pub fn new(bitrate_kbps: u32) -> Self {
        Self {
            yt_dlp_path: "yt-dlp".to_string(),
            audio_quality: format!("{}K", bitrate_kbps),
        }
    }

    /// Check if yt-dlp is available
    pub async fn check_availability(&self) -> Result<bool> {
        let output = Command::new(&self.yt_dlp_path)
            .arg("--version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        Ok(matches!(output, Ok(out) if out.status.success()))
    }

    /// Get video metadata using yt-dlp without downloading anything
    async fn probe_title(&self, url: &str) -> Result<String> {
        tracing::debug!("Probing video info for: {}", url);

        let output = Command::new(&self.yt_dlp_path)
            .args(["--dump-json", "--no-playlist", url])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| PipelineError::Fetch(format!("failed to run yt-dlp: {}", e)))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(PipelineError::Fetch(format!("yt-dlp probe failed: {}", error)).into());
        }

        let info: Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| PipelineError::Fetch(format!("unreadable yt-dlp metadata: {}", e)))?;

        Ok(info["title"].as_str().unwrap_or("video").to_string())
    }

    /// Download and extract audio directly with yt-dlp
    async fn download_audio(&self, url: &str, output_path: &Path) -> Result<()> {
        tracing::debug!("Downloading audio to: {}", output_path.display());

        // yt-dlp replaces %(ext)s with the post-extraction extension
        let template = output_path.with_extension("%(ext)s");

        let output = Command::new(&self.yt_dlp_path)
            .arg("--output")
            .arg(&template)
            .args([
                "--format",
                "bestaudio/best",
                "--extract-audio",
                "--audio-format",
                "mp3",
                "--audio-quality",
                &self.audio_quality,
                "--no-playlist",
                "--no-warnings",
                url,
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| PipelineError::Fetch(format!("failed to run yt-dlp: {}", e)))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(PipelineError::Fetch(format!("yt-dlp download failed: {}", error)).into());
        }

        Ok(())
    }
}

#[async_trait]
impl Fetcher for YtDlpFetcher {
    async fn fetch(&self, url: &str, dest_dir: &Path) -> Result<FetchedAudio> {
        if !self.check_availability().await? {
            return Err(PipelineError::Fetch(
                "yt-dlp is not available. Please install it: https://github.com/yt-dlp/yt-dlp"
                    .to_string(),
            )
            .into());
        }

        let title = self.probe_title(url).await?;
        tracing::info!("Resolved title: {}", title);

        let filename = format!("audio_{}.mp3", &Uuid::new_v4().to_string()[..8]);
        let audio_path = dest_dir.join(filename);

        self.download_audio(url, &audio_path).await?;

        // yt-dlp reports success even when post-processing picks a surprising
        // output name, so verify the track really landed where expected
        if !audio_path.exists() {
            return Err(PipelineError::Fetch(format!(
                "audio file not found after download: {}",
                audio_path.display()
            ))
            .into());
        }

        Ok(FetchedAudio { audio_path, title })
    }
}
