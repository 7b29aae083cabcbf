use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::config::ModelSize;
use crate::{PipelineError, Result};

/// One transcript unit: a span of the trimmed audio timeline and its text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds, relative to the trimmed track
    pub start: f64,

    /// End time in seconds, relative to the trimmed track
    pub end: f64,

    /// Transcribed text for the span
    pub text: String,
}

/// An ordered sequence of segments covering the trimmed audio timeline.
///
/// Serializes transparently as a bare JSON array of segments, which is also the
/// persisted transcript format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    pub segments: Vec<Segment>,
}

impl Transcript {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// End of the last segment, in seconds
    pub fn duration(&self) -> f64 {
        self.segments.last().map(|s| s.end).unwrap_or(0.0)
    }

    /// All segment texts joined with single spaces
    pub fn full_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Converts an audio asset into an ordered transcript
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &Path) -> Result<Transcript>;
}

/// Shape of the JSON document the whisper CLI writes
#[derive(Debug, Deserialize)]
struct WhisperOutput {
    segments: Vec<WhisperSegment>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    start: f64,
    end: f64,
    text: String,
}

/// Transcriber backed by the OpenAI whisper command-line tool
pub struct WhisperCliTranscriber {
    whisper_path: String,
    model: ModelSize,
}

impl WhisperCliTranscriber {
    pub fn new(model: ModelSize) -> Self {
        Self {
            whisper_path: "whisper".to_string(),
            model,
        }
    }
}

#[async_trait]
impl Transcriber for WhisperCliTranscriber {
    async fn transcribe(&self, audio: &Path) -> Result<Transcript> {
        let scratch = tempfile::tempdir()
            .map_err(|e| PipelineError::Transcription(format!("no scratch dir: {}", e)))?;

        tracing::info!("Loading Whisper model ({})", self.model);

        let output = Command::new(&self.whisper_path)
            .arg(audio)
            .args(["--model", self.model.as_str()])
            .args(["--output_format", "json"])
            .arg("--output_dir")
            .arg(scratch.path())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| PipelineError::Transcription(format!("failed to run whisper: {}", e)))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(
                PipelineError::Transcription(format!("whisper failed: {}", error)).into(),
            );
        }

        // Whisper names its output after the input file's stem
        let stem = audio
            .file_stem()
            .ok_or_else(|| PipelineError::Transcription("audio path has no file name".into()))?;
        let json_path = scratch.path().join(stem).with_extension("json");

        let json_content = fs_err::read_to_string(&json_path)
            .map_err(|e| PipelineError::Transcription(format!("missing whisper output: {}", e)))?;
        let parsed: WhisperOutput = serde_json::from_str(&json_content)
            .map_err(|e| PipelineError::Transcription(format!("unreadable whisper output: {}", e)))?;

        let segments = parsed
            .segments
            .into_iter()
            .map(|s| Segment {
                start: s.start,
                end: s.end,
                text: s.text.trim().to_string(),
            })
            .collect();

        let transcript = Transcript::new(segments);
        tracing::info!("Transcribed {} segments", transcript.len());

        Ok(transcript)
    }
}
