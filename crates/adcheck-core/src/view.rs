//! Presentation-side aggregation: filtering, display ordering, and
//! export of detected spans
//!
//! Everything here is a pure projection over the span list from one
//! analysis call; changing the filter never re-runs the matcher. This
//! module never fails — unknown severity or law vocabulary degrades to
//! literal display.

use std::collections::HashMap;
use std::collections::HashSet;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::rules::Severity;
use crate::types::Span;

lazy_static! {
    /// Display names for the known regulatory domains. Unknown tags
    /// pass through unchanged.
    static ref LAW_LABELS: HashMap<&'static str, &'static str> =
        HashMap::from([("yakki", "薬機"), ("keihyo", "景表")]);
}

/// Human label for a law tag, falling back to the tag itself.
pub fn law_label(law: &str) -> &str {
    LAW_LABELS.get(law).copied().unwrap_or(law)
}

/// Read-time projection over a span list. `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    pub severities: Option<HashSet<Severity>>,
    pub laws: Option<HashSet<String>>,
}

impl ViewFilter {
    /// Keep everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_severities(mut self, severities: impl IntoIterator<Item = Severity>) -> Self {
        self.severities = Some(severities.into_iter().collect());
        self
    }

    pub fn with_laws(mut self, laws: impl IntoIterator<Item = String>) -> Self {
        self.laws = Some(laws.into_iter().collect());
        self
    }

    fn allows(&self, span: &Span) -> bool {
        let sev_ok = self
            .severities
            .as_ref()
            .map_or(true, |set| set.contains(&span.severity));
        let law_ok = self
            .laws
            .as_ref()
            .map_or(true, |set| set.contains(&span.law));
        sev_ok && law_ok
    }
}

/// Select the visible spans for the current filter state. Pure; the
/// underlying span list is untouched.
pub fn filter<'a>(spans: &'a [Span], filter: &ViewFilter) -> Vec<&'a Span> {
    spans.iter().filter(|s| filter.allows(s)).collect()
}

/// Order spans for display: severity rank descending, then start
/// ascending. Stable, so equal keys keep their detection order.
pub fn sort_for_display(visible: &mut [&Span]) {
    visible.sort_by_key(|s| (std::cmp::Reverse(s.severity.rank()), s.start));
}

/// One export-ready table row derived from a visible span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRow {
    pub matched: String,
    pub label: String,
    pub severity: String, // 高/中/低
    pub law: String,      // 薬機/景表, or the raw tag
    pub rule_id: String,
    pub suggestion: String,
    pub note: String,
    pub start: usize,
    pub end: usize,
    pub rank: u8,
    pub badge: String,
}

impl ViewRow {
    fn from_span(span: &Span) -> Self {
        ViewRow {
            matched: span.matched.clone(),
            label: span.label.clone(),
            severity: span.severity.label().to_string(),
            law: law_label(&span.law).to_string(),
            rule_id: span.rule_id.clone(),
            suggestion: span.suggestion.clone().unwrap_or_default(),
            note: span.note.clone().unwrap_or_default(),
            start: span.start,
            end: span.end,
            rank: span.severity.rank(),
            badge: span.severity.badge().to_string(),
        }
    }
}

/// Tabular form of the visible spans, one row each, in the given order.
pub fn to_table(visible: &[&Span]) -> Vec<ViewRow> {
    visible.iter().map(|s| ViewRow::from_span(s)).collect()
}

/// Plain-text summary for copy-paste sharing. The empty case is an
/// explicit message, not an empty document.
pub fn to_summary_text(visible: &[&Span]) -> String {
    if visible.is_empty() {
        return "NG表現は検出されませんでした。".to_string();
    }
    let mut lines = vec!["【検出サマリー】".to_string()];
    for span in visible {
        lines.push(format!(
            "- [{}/{}] {}｜{}（{}）\n  提案: {}",
            span.severity.badge(),
            law_label(&span.law),
            span.matched,
            span.label,
            span.rule_id,
            span.suggestion.as_deref().unwrap_or(""),
        ));
    }
    lines.join("\n")
}

const CSV_HEADER: [&str; 9] = [
    "一致文字列",
    "ラベル",
    "重要度",
    "法令",
    "ルールID",
    "提案",
    "注記",
    "start",
    "end",
];

/// CSV export of table rows, UTF-8 with BOM so Excel opens it cleanly.
/// Writes go to an in-memory buffer and cannot fail.
pub fn to_csv(rows: &[ViewRow]) -> Vec<u8> {
    // UTF-8 BOM
    let mut writer = csv::Writer::from_writer(vec![0xEF, 0xBB, 0xBF]);
    let _ = writer.write_record(CSV_HEADER);
    for row in rows {
        let _ = writer.write_record([
            row.matched.as_str(),
            row.label.as_str(),
            row.severity.as_str(),
            row.law.as_str(),
            row.rule_id.as_str(),
            row.suggestion.as_str(),
            row.note.as_str(),
            &row.start.to_string(),
            &row.end.to_string(),
        ]);
    }
    writer.into_inner().unwrap_or_default()
}
