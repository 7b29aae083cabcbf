use crate::transcribe::{Segment, Transcript};
use crate::utils::{format_hms, format_timestamp};

/// A selected (timestamp, text) pair surfaced in the summary as a navigation aid
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    /// Start time of the source segment, in seconds on the trimmed timeline
    pub timestamp: f64,

    /// Text of the source segment
    pub text: String,
}

/// Strategy for picking which segments become highlights.
///
/// Implementations must return highlights in transcript order, each taken from
/// an actual segment, so the result is always an ordered subsequence of the
/// transcript's timestamps.
pub trait HighlightPolicy: Send + Sync {
    fn select(&self, segments: &[Segment]) -> Vec<Highlight>;
}

/// Every segment becomes a highlight
pub struct EverySegment;

impl HighlightPolicy for EverySegment {
    fn select(&self, segments: &[Segment]) -> Vec<Highlight> {
        segments
            .iter()
            .map(|s| Highlight {
                timestamp: s.start,
                text: s.text.clone(),
            })
            .collect()
    }
}

/// One highlight per elapsed interval: the first segment starting at or after
/// each interval boundary is picked
pub struct IntervalSampling {
    pub interval_secs: f64,
}

impl Default for IntervalSampling {
    fn default() -> Self {
        Self { interval_secs: 60.0 }
    }
}

impl HighlightPolicy for IntervalSampling {
    fn select(&self, segments: &[Segment]) -> Vec<Highlight> {
        let mut highlights = Vec::new();
        let mut next_boundary = 0.0;

        for segment in segments {
            if segment.start >= next_boundary {
                highlights.push(Highlight {
                    timestamp: segment.start,
                    text: segment.text.clone(),
                });
                next_boundary = segment.start + self.interval_secs;
            }
        }

        highlights
    }
}

/// Renders a transcript into a highlight report document
pub struct Summarizer {
    policy: Box<dyn HighlightPolicy>,
}

impl Summarizer {
    pub fn new(policy: Box<dyn HighlightPolicy>) -> Self {
        Self { policy }
    }

    /// Produce the markdown summary document for a transcript.
    ///
    /// An empty transcript yields a document with a header, no highlight
    /// entries, and an empty transcription section.
    pub fn render(&self, title: &str, transcript: &Transcript) -> String {
        let mut doc = String::new();

        doc.push_str(&format!("# Video Summary: {}\n\n", title));
        doc.push_str(&format!(
            "**Total Duration:** {}\n",
            format_hms(transcript.duration())
        ));
        doc.push_str(&format!("**Total Segments:** {}\n\n", transcript.len()));

        doc.push_str("## Key Highlights\n\n");
        for highlight in self.policy.select(&transcript.segments) {
            doc.push_str(&format!(
                "- [{}] — {}\n",
                format_timestamp(highlight.timestamp),
                highlight.text
            ));
        }
        doc.push('\n');

        doc.push_str("---\n\n");
        doc.push_str("## Full Transcription\n\n");
        for segment in &transcript.segments {
            doc.push_str(&format!(
                "**[{}]** {}\n\n",
                format_timestamp(segment.start),
                segment.text
            ));
        }

        doc
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(Box::new(IntervalSampling::default()))
    }
}
