use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one pipeline invocation.
///
/// There is no configuration file: these are in-source defaults, passed explicitly
/// into the job driver so tests can tune individual stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Silence removal parameters
    pub silence: SilenceConfig,

    /// Whisper model size used for transcription
    pub model: ModelSize,

    /// Bitrate of the trimmed audio artifact, in kbps
    pub audio_bitrate_kbps: u32,

    /// Sample rate used for decoding and re-encoding, in Hz
    pub sample_rate: u32,

    /// Root directory that per-video folders are created under
    pub videos_root: PathBuf,

    /// Seconds between sampled highlights in the summary document
    pub highlight_interval_secs: f64,
}

/// Parameters for amplitude-based silence span detection
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SilenceConfig {
    /// Minimum length of a quiet run to treat as a cut point, in milliseconds
    pub min_silence_ms: u32,

    /// Amplitude threshold below which a window counts as silent, in dBFS
    pub threshold_db: f64,

    /// Silence retained at each boundary of a kept span, in milliseconds
    pub padding_ms: u32,
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            min_silence_ms: 1000,
            threshold_db: -40.0,
            padding_ms: 200,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            silence: SilenceConfig::default(),
            model: ModelSize::default(),
            audio_bitrate_kbps: 32,
            sample_rate: 16000,
            videos_root: PathBuf::from("videos"),
            highlight_interval_secs: 60.0,
        }
    }
}

/// Whisper model size, trading speed for accuracy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Tiny,
    #[default]
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }
}

impl std::fmt::Display for ModelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
