//! Amplitude-based silence span detection over raw PCM samples.
//!
//! The detector walks fixed-size windows, classifies each by RMS level in dBFS,
//! and folds runs of quiet windows into silent spans. The keep plan is the
//! complement of those spans, widened by the configured padding. All arithmetic
//! is in sample units so the logic is independent of the sample rate.

/// Half-open range of sample indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Detection parameters, already converted to sample units
#[derive(Debug, Clone, Copy)]
pub struct DetectorParams {
    /// RMS window size in samples
    pub window_len: usize,

    /// Minimum quiet run that classifies as a silent span, in samples
    pub min_silence_len: usize,

    /// RMS level below which a window counts as silent, in dBFS
    pub threshold_db: f64,
}

/// RMS level of a window in dBFS, relative to i16 full scale
fn rms_dbfs(window: &[i16]) -> f64 {
    if window.is_empty() {
        return f64::NEG_INFINITY;
    }

    let sum_sq: f64 = window.iter().map(|&s| (s as f64) * (s as f64)).sum();
    let rms = (sum_sq / window.len() as f64).sqrt() / i16::MAX as f64;

    if rms <= 0.0 {
        f64::NEG_INFINITY
    } else {
        20.0 * rms.log10()
    }
}

/// Find all silent spans in `samples`.
///
/// Spans are window-aligned, ordered, and non-overlapping. Quiet runs shorter
/// than `min_silence_len` are not reported.
pub fn detect_silent_spans(samples: &[i16], params: &DetectorParams) -> Vec<Span> {
    let mut spans = Vec::new();
    if samples.is_empty() || params.window_len == 0 {
        return spans;
    }

    let mut run_start: Option<usize> = None;
    let mut pos = 0;

    while pos < samples.len() {
        let end = (pos + params.window_len).min(samples.len());
        let quiet = rms_dbfs(&samples[pos..end]) < params.threshold_db;

        match (quiet, run_start) {
            (true, None) => run_start = Some(pos),
            (false, Some(start)) => {
                if pos - start >= params.min_silence_len {
                    spans.push(Span { start, end: pos });
                }
                run_start = None;
            }
            _ => {}
        }

        pos = end;
    }

    if let Some(start) = run_start {
        if samples.len() - start >= params.min_silence_len {
            spans.push(Span {
                start,
                end: samples.len(),
            });
        }
    }

    spans
}

/// Build the plan of spans to keep, given the silent spans of a track.
///
/// Each kept span is widened by `padding` samples at both ends, clamped to the
/// track, and overlapping neighbors are merged. If silence covers the whole
/// track the full track is retained instead, so the plan is never empty for a
/// non-empty input.
pub fn plan_keep_spans(silent: &[Span], total: usize, padding: usize) -> Vec<Span> {
    if total == 0 {
        return Vec::new();
    }

    let mut kept = Vec::new();
    let mut cursor = 0;
    for span in silent {
        if span.start > cursor {
            kept.push(Span {
                start: cursor,
                end: span.start,
            });
        }
        cursor = span.end.max(cursor);
    }
    if cursor < total {
        kept.push(Span {
            start: cursor,
            end: total,
        });
    }

    // Everything below threshold: keep the original track rather than nothing
    if kept.is_empty() {
        return vec![Span {
            start: 0,
            end: total,
        }];
    }

    let mut padded: Vec<Span> = Vec::with_capacity(kept.len());
    for span in kept {
        let start = span.start.saturating_sub(padding);
        let end = (span.end + padding).min(total);
        match padded.last_mut() {
            Some(prev) if start <= prev.end => prev.end = prev.end.max(end),
            _ => padded.push(Span { start, end }),
        }
    }

    padded
}

/// Concatenate the kept spans of `samples` in original order
pub fn assemble(samples: &[i16], keep: &[Span]) -> Vec<i16> {
    let capacity = keep.iter().map(Span::len).sum();
    let mut out = Vec::with_capacity(capacity);
    for span in keep {
        out.extend_from_slice(&samples[span.start..span.end.min(samples.len())]);
    }
    out
}
