use std::path::{Path, PathBuf};

use crate::transcribe::Transcript;
use crate::{PipelineError, Result};

/// The fixed per-video directory tree under the videos root:
///
/// ```text
/// <root>/<Title>/audio/<Title>_processed_audio.mp3
/// <root>/<Title>/transcriptions/<Title>_transcription.json
/// <root>/<Title>/summaries/<Title>_summary.md
/// ```
///
/// All per-video folders are siblings directly under the root. Path math is
/// pure; nothing touches the filesystem until `prepare` is called.
#[derive(Debug, Clone)]
pub struct VideoLayout {
    video_dir: PathBuf,
    audio_path: PathBuf,
    transcript_path: PathBuf,
    summary_path: PathBuf,
}

impl VideoLayout {
    pub fn new(root: &Path, safe_title: &str) -> Self {
        let video_dir = root.join(safe_title);
        Self {
            audio_path: video_dir
                .join("audio")
                .join(format!("{}_processed_audio.mp3", safe_title)),
            transcript_path: video_dir
                .join("transcriptions")
                .join(format!("{}_transcription.json", safe_title)),
            summary_path: video_dir
                .join("summaries")
                .join(format!("{}_summary.md", safe_title)),
            video_dir,
        }
    }

    pub fn video_dir(&self) -> &Path {
        &self.video_dir
    }

    pub fn audio_path(&self) -> &Path {
        &self.audio_path
    }

    pub fn transcript_path(&self) -> &Path {
        &self.transcript_path
    }

    pub fn summary_path(&self) -> &Path {
        &self.summary_path
    }

    /// Create the three stage subfolders. Idempotent: reprocessing a title
    /// reuses the same folders and overwrites outputs in place.
    pub fn prepare(&self) -> Result<()> {
        for path in [&self.audio_path, &self.transcript_path, &self.summary_path] {
            let parent = path
                .parent()
                .ok_or_else(|| PipelineError::Persistence("artifact path has no parent".into()))?;
            fs_err::create_dir_all(parent)
                .map_err(|e| PipelineError::Persistence(e.to_string()))?;
        }
        Ok(())
    }

    /// Persist the transcript as a pretty-printed JSON array
    pub fn write_transcript(&self, transcript: &Transcript) -> Result<()> {
        let json = serde_json::to_string_pretty(transcript)
            .map_err(|e| PipelineError::Persistence(e.to_string()))?;
        fs_err::write(&self.transcript_path, json)
            .map_err(|e| PipelineError::Persistence(e.to_string()))?;
        Ok(())
    }

    /// Persist the rendered summary document
    pub fn write_summary(&self, summary: &str) -> Result<()> {
        fs_err::write(&self.summary_path, summary)
            .map_err(|e| PipelineError::Persistence(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcribe::{Segment, Transcript};

    #[test]
    fn test_paths_follow_the_fixed_layout() {
        let layout = VideoLayout::new(Path::new("videos"), "My_Video");
        assert_eq!(
            layout.audio_path(),
            Path::new("videos/My_Video/audio/My_Video_processed_audio.mp3")
        );
        assert_eq!(
            layout.transcript_path(),
            Path::new("videos/My_Video/transcriptions/My_Video_transcription.json")
        );
        assert_eq!(
            layout.summary_path(),
            Path::new("videos/My_Video/summaries/My_Video_summary.md")
        );
    }

    #[test]
    fn test_prepare_creates_exactly_three_subfolders() {
        let root = tempfile::tempdir().unwrap();
        let layout = VideoLayout::new(root.path(), "Title");
        layout.prepare().unwrap();

        let mut subdirs: Vec<String> = fs_err::read_dir(layout.video_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        subdirs.sort();
        assert_eq!(subdirs, vec!["audio", "summaries", "transcriptions"]);
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let layout = VideoLayout::new(root.path(), "Title");
        layout.prepare().unwrap();
        layout.prepare().unwrap();

        let entries: Vec<_> = fs_err::read_dir(root.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_titles_are_siblings_under_the_root() {
        let root = tempfile::tempdir().unwrap();
        for title in ["One", "Two", "Three"] {
            VideoLayout::new(root.path(), title).prepare().unwrap();
        }

        let entries: Vec<_> = fs_err::read_dir(root.path()).unwrap().collect();
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_transcript_write_and_read_back() {
        let root = tempfile::tempdir().unwrap();
        let layout = VideoLayout::new(root.path(), "Title");
        layout.prepare().unwrap();

        let transcript = Transcript::new(vec![Segment {
            start: 0.0,
            end: 1.5,
            text: "hello".to_string(),
        }]);
        layout.write_transcript(&transcript).unwrap();

        let raw = fs_err::read_to_string(layout.transcript_path()).unwrap();
        let restored: Transcript = serde_json::from_str(&raw).unwrap();
        assert_eq!(restored, transcript);
    }

    #[test]
    fn test_rewriting_overwrites_in_place() {
        let root = tempfile::tempdir().unwrap();
        let layout = VideoLayout::new(root.path(), "Title");
        layout.prepare().unwrap();

        layout.write_summary("first").unwrap();
        layout.write_summary("second").unwrap();
        assert_eq!(
            fs_err::read_to_string(layout.summary_path()).unwrap(),
            "second"
        );
    }
}
