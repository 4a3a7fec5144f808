//! Overlay rendering
//!
//! Re-expresses the original text as alternating plain/highlighted
//! segments driven by the currently visible spans. Colors follow
//! severity: the darker the highlight, the higher the risk.

use serde::Serialize;

use crate::matcher::char_boundaries;
use crate::rules::Severity;
use crate::types::Span;

/// A `(start, end, severity)` highlight triple in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub severity: Severity,
}

/// One piece of the rendered text. Every character of the input
/// belongs to exactly one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Plain {
        text: String,
    },
    Highlight {
        text: String,
        severity: Severity,
        color: &'static str,
    },
}

impl Segment {
    /// The raw text of the segment, ignoring highlight markup.
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } => text,
            Segment::Highlight { text, .. } => text,
        }
    }
}

/// Render `text` with the visible spans as highlight overlays.
///
/// Left-to-right sweep: sort the clamped triples by start (stable),
/// then emit the plain gap before each span, the highlighted span
/// itself, and finally the plain tail. If the visible spans overlap
/// each other the sweep does not reconcile them and characters may be
/// emitted more than once; run [`resolve_overlaps`] first to get a
/// well-formed partition.
pub fn render(text: &str, visible: &[&Span]) -> Vec<Segment> {
    let marks: Vec<HighlightSpan> = visible
        .iter()
        .map(|s| HighlightSpan {
            start: s.start,
            end: s.end,
            severity: s.severity,
        })
        .collect();
    render_marks(text, &marks)
}

/// Sweep implementation over bare highlight triples.
pub fn render_marks(text: &str, marks: &[HighlightSpan]) -> Vec<Segment> {
    let bounds = char_boundaries(text);
    let len = bounds.len() - 1;

    let mut marks: Vec<HighlightSpan> = marks
        .iter()
        .map(|m| {
            let start = m.start.min(len);
            HighlightSpan {
                start,
                end: m.end.min(len).max(start),
                severity: m.severity,
            }
        })
        .collect();
    marks.sort_by_key(|m| m.start);

    let slice = |a: usize, b: usize| text[bounds[a]..bounds[b]].to_string();

    let mut segments = Vec::new();
    let mut cursor = 0usize;
    for mark in marks {
        if cursor < mark.start {
            segments.push(Segment::Plain {
                text: slice(cursor, mark.start),
            });
        }
        segments.push(Segment::Highlight {
            text: slice(mark.start, mark.end),
            severity: mark.severity,
            color: mark.severity.color(),
        });
        cursor = mark.end;
    }
    if cursor < len {
        segments.push(Segment::Plain {
            text: slice(cursor, len),
        });
    }
    segments
}

/// Reconcile overlapping visible spans into a non-overlapping highlight
/// sequence: for any overlapping range the highest-severity span wins,
/// ties go to the earlier-starting (then first-seen) span, and
/// lower-severity remainders on either side are kept as truncated
/// highlights. Output is sorted by start and safe to feed to
/// [`render_marks`].
pub fn resolve_overlaps(visible: &[&Span], text_len: usize) -> Vec<HighlightSpan> {
    let candidates: Vec<HighlightSpan> = visible
        .iter()
        .map(|s| {
            let start = s.start.min(text_len);
            HighlightSpan {
                start,
                end: s.end.min(text_len).max(start),
                severity: s.severity,
            }
        })
        .filter(|m| m.start < m.end)
        .collect();

    let mut cuts: Vec<usize> = candidates
        .iter()
        .flat_map(|m| [m.start, m.end])
        .collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut resolved: Vec<(usize, HighlightSpan)> = Vec::new();
    for window in cuts.windows(2) {
        let (a, b) = (window[0], window[1]);
        let winner = candidates
            .iter()
            .enumerate()
            .filter(|(_, m)| m.start <= a && b <= m.end)
            .max_by_key(|(idx, m)| {
                (
                    m.severity.rank(),
                    std::cmp::Reverse(m.start),
                    std::cmp::Reverse(*idx),
                )
            });
        let Some((idx, mark)) = winner else { continue };

        if let Some((last_idx, last)) = resolved.last_mut() {
            if *last_idx == idx && last.end == a {
                last.end = b;
                continue;
            }
        }
        resolved.push((
            idx,
            HighlightSpan {
                start: a,
                end: b,
                severity: mark.severity,
            },
        ));
    }
    resolved.into_iter().map(|(_, m)| m).collect()
}

/// HTML form of a rendered segment list, mirroring the front end's
/// `<mark>` highlighter.
pub fn to_html(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Plain { text } => out.push_str(text),
            Segment::Highlight { text, color, .. } => {
                out.push_str(&format!(
                    "<mark style=\"background:{}; padding:0 2px; border-radius:3px;\">{}</mark>",
                    color, text
                ));
            }
        }
    }
    out
}
