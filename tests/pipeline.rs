//! End-to-end driver tests with fake stage implementations standing in for
//! yt-dlp, ffmpeg, and whisper.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use tubedigest::audio::{TrimReport, Trimmer};
use tubedigest::fetch::{FetchedAudio, Fetcher};
use tubedigest::summary::{EverySegment, Summarizer};
use tubedigest::transcribe::{Segment, Transcriber, Transcript};
use tubedigest::{PipelineConfig, ProcessingPipeline, Result};

struct FakeFetcher {
    title: String,
    fail: bool,
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, _url: &str, dest_dir: &Path) -> Result<FetchedAudio> {
        if self.fail {
            anyhow::bail!("Fetch failed: video unavailable");
        }
        let audio_path = dest_dir.join("audio_test.mp3");
        fs_err::write(&audio_path, b"raw-audio")?;
        Ok(FetchedAudio {
            audio_path,
            title: self.title.clone(),
        })
    }
}

struct FakeTrimmer;

#[async_trait]
impl Trimmer for FakeTrimmer {
    async fn trim(&self, input: &Path, output: &Path) -> Result<TrimReport> {
        fs_err::copy(input, output)?;
        Ok(TrimReport {
            original_secs: 600.0,
            trimmed_secs: 595.4,
        })
    }
}

struct FakeTranscriber {
    transcript: Transcript,
}

#[async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(&self, _audio: &Path) -> Result<Transcript> {
        Ok(self.transcript.clone())
    }
}

fn abc_transcript() -> Transcript {
    Transcript::new(vec![
        Segment {
            start: 0.0,
            end: 2.0,
            text: "a".to_string(),
        },
        Segment {
            start: 2.0,
            end: 4.0,
            text: "b".to_string(),
        },
        Segment {
            start: 4.0,
            end: 6.0,
            text: "c".to_string(),
        },
    ])
}

fn pipeline_with_root(root: PathBuf, title: &str, fail_fetch: bool) -> ProcessingPipeline {
    let config = PipelineConfig {
        videos_root: root,
        ..PipelineConfig::default()
    };
    ProcessingPipeline::with_stages(
        config,
        Box::new(FakeFetcher {
            title: title.to_string(),
            fail: fail_fetch,
        }),
        Box::new(FakeTrimmer),
        Box::new(FakeTranscriber {
            transcript: abc_transcript(),
        }),
        Summarizer::new(Box::new(EverySegment)),
    )
    .unwrap()
}

#[tokio::test]
async fn full_run_writes_the_three_artifacts() {
    let root = tempfile::tempdir().unwrap();
    let videos_root = root.path().join("videos");
    let pipeline = pipeline_with_root(videos_root.clone(), "My Video: Part 1", false);

    let report = pipeline.run("https://example.com/watch?v=abc").await.unwrap();

    assert_eq!(report.title, "My_Video_Part_1");
    assert_eq!(report.segment_count, 3);
    assert!(videos_root
        .join("My_Video_Part_1/audio/My_Video_Part_1_processed_audio.mp3")
        .is_file());
    assert!(videos_root
        .join("My_Video_Part_1/transcriptions/My_Video_Part_1_transcription.json")
        .is_file());
    assert!(videos_root
        .join("My_Video_Part_1/summaries/My_Video_Part_1_summary.md")
        .is_file());
}

#[tokio::test]
async fn persisted_transcript_round_trips() {
    let root = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with_root(root.path().join("videos"), "Title", false);

    let report = pipeline.run("https://example.com/v").await.unwrap();

    let raw = fs_err::read_to_string(&report.transcript_path).unwrap();
    let restored: Transcript = serde_json::from_str(&raw).unwrap();
    assert_eq!(restored, abc_transcript());
}

#[tokio::test]
async fn summary_contains_highlights_and_full_text() {
    let root = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with_root(root.path().join("videos"), "Demo", false);

    let report = pipeline.run("https://example.com/v").await.unwrap();

    let summary = fs_err::read_to_string(&report.summary_path).unwrap();
    assert!(summary.contains("# Video Summary: Demo"));
    assert_eq!(summary.matches("- [").count(), 3);
    assert!(summary.contains("- [00:00] — a"));
    assert!(summary.contains("**[00:04]** c"));
}

#[tokio::test]
async fn rerunning_the_same_title_reuses_the_folder() {
    let root = tempfile::tempdir().unwrap();
    let videos_root = root.path().join("videos");
    let pipeline = pipeline_with_root(videos_root.clone(), "Same Title", false);

    pipeline.run("https://example.com/v").await.unwrap();
    pipeline.run("https://example.com/v").await.unwrap();

    let entries: Vec<_> = fs_err::read_dir(&videos_root).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn fetch_failure_leaves_the_videos_root_untouched() {
    let root = tempfile::tempdir().unwrap();
    let videos_root = root.path().join("videos");
    let pipeline = pipeline_with_root(videos_root.clone(), "Never Created", true);

    let err = pipeline.run("https://example.com/v").await.unwrap_err();
    assert!(err.to_string().contains("Fetch failed"));
    assert!(!videos_root.exists());
}

#[tokio::test]
async fn invalid_url_is_rejected_before_any_work() {
    let root = tempfile::tempdir().unwrap();
    let videos_root = root.path().join("videos");
    let pipeline = pipeline_with_root(videos_root.clone(), "Whatever", false);

    assert!(pipeline.run("not-a-url").await.is_err());
    assert!(pipeline.run("ftp://example.com/v").await.is_err());
    assert!(!videos_root.exists());
}
