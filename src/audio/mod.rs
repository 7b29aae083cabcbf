use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::config::SilenceConfig;
use crate::{PipelineError, Result};

pub mod silence;

use silence::{assemble, detect_silent_spans, plan_keep_spans, DetectorParams};

/// Durations before and after silence removal, for reporting
#[derive(Debug, Clone, Copy)]
pub struct TrimReport {
    pub original_secs: f64,
    pub trimmed_secs: f64,
}

impl TrimReport {
    /// Share of the original track that was removed, in percent
    pub fn reduction_pct(&self) -> f64 {
        if self.original_secs <= 0.0 {
            0.0
        } else {
            (self.original_secs - self.trimmed_secs) / self.original_secs * 100.0
        }
    }
}

/// Removes low-energy spans from an audio asset and re-encodes the result
#[async_trait]
pub trait Trimmer: Send + Sync {
    /// Trim `input` and write the compressed result to `output`
    async fn trim(&self, input: &Path, output: &Path) -> Result<TrimReport>;
}

/// Trimmer that decodes and re-encodes with ffmpeg and detects silence on the
/// raw samples in between
pub struct FfmpegSilenceTrimmer {
    ffmpeg_path: String,
    silence: SilenceConfig,
    sample_rate: u32,
    bitrate_kbps: u32,
}

impl FfmpegSilenceTrimmer {
    pub fn new(silence: SilenceConfig, sample_rate: u32, bitrate_kbps: u32) -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            silence,
            sample_rate,
            bitrate_kbps,
        }
    }

    /// Decode any compressed input to 16-bit mono PCM at the working sample rate
    async fn decode_to_wav(&self, input: &Path, wav_path: &Path) -> Result<()> {
        let output = Command::new(&self.ffmpeg_path)
            .args(["-y", "-i"])
            .arg(input)
            .args(["-vn", "-acodec", "pcm_s16le", "-ac", "1", "-ar"])
            .arg(self.sample_rate.to_string())
            .arg(wav_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| PipelineError::AudioProcessing(format!("failed to run ffmpeg: {}", e)))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(
                PipelineError::AudioProcessing(format!("ffmpeg decode failed: {}", error)).into(),
            );
        }

        Ok(())
    }

    /// Encode a scratch WAV to the final low-bitrate MP3 artifact
    async fn encode_to_mp3(&self, wav_path: &Path, output: &Path) -> Result<()> {
        let output_cmd = Command::new(&self.ffmpeg_path)
            .args(["-y", "-i"])
            .arg(wav_path)
            .args(["-acodec", "libmp3lame", "-b:a"])
            .arg(format!("{}k", self.bitrate_kbps))
            .args(["-ar"])
            .arg(self.sample_rate.to_string())
            .arg(output)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| PipelineError::AudioProcessing(format!("failed to run ffmpeg: {}", e)))?;

        if !output_cmd.status.success() {
            let error = String::from_utf8_lossy(&output_cmd.stderr);
            return Err(
                PipelineError::AudioProcessing(format!("ffmpeg encode failed: {}", error)).into(),
            );
        }

        Ok(())
    }

    fn read_samples(&self, wav_path: &Path) -> Result<Vec<i16>> {
        let mut reader = hound::WavReader::open(wav_path)
            .map_err(|e| PipelineError::AudioProcessing(format!("unreadable audio: {}", e)))?;

        reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PipelineError::AudioProcessing(format!("corrupt audio samples: {}", e)).into())
    }

    fn write_samples(&self, wav_path: &Path, samples: &[i16]) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(wav_path, spec)
            .map_err(|e| PipelineError::AudioProcessing(format!("cannot write audio: {}", e)))?;
        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| PipelineError::AudioProcessing(format!("cannot write audio: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| PipelineError::AudioProcessing(format!("cannot write audio: {}", e)))?;

        Ok(())
    }

    fn detector_params(&self) -> DetectorParams {
        let per_ms = self.sample_rate as usize / 1000;
        DetectorParams {
            // 10 ms RMS windows
            window_len: per_ms * 10,
            min_silence_len: per_ms * self.silence.min_silence_ms as usize,
            threshold_db: self.silence.threshold_db,
        }
    }
}

#[async_trait]
impl Trimmer for FfmpegSilenceTrimmer {
    async fn trim(&self, input: &Path, output: &Path) -> Result<TrimReport> {
        let scratch = tempfile::tempdir()
            .map_err(|e| PipelineError::AudioProcessing(format!("no scratch dir: {}", e)))?;
        let decoded = scratch.path().join("decoded.wav");
        let trimmed = scratch.path().join("trimmed.wav");

        self.decode_to_wav(input, &decoded).await?;
        let samples = self.read_samples(&decoded)?;

        let params = self.detector_params();
        let silent = detect_silent_spans(&samples, &params);
        let padding = self.sample_rate as usize / 1000 * self.silence.padding_ms as usize;
        let keep = plan_keep_spans(&silent, samples.len(), padding);
        let kept = assemble(&samples, &keep);

        tracing::debug!(
            "Silence detection: {} silent spans, {} kept spans",
            silent.len(),
            keep.len()
        );

        self.write_samples(&trimmed, &kept)?;
        self.encode_to_mp3(&trimmed, output).await?;

        Ok(TrimReport {
            original_secs: samples.len() as f64 / self.sample_rate as f64,
            trimmed_secs: kept.len() as f64 / self.sample_rate as f64,
        })
    }
}
