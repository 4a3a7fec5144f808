use crate::rules::Severity;

/// One matched occurrence of a rule against the input text.
///
/// `start`/`end` are half-open character offsets; `matched` is the
/// exact substring at those offsets. Spans from different rules may
/// overlap each other.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub matched: String,
    pub rule_id: String,
    pub label: String,
    pub law: String, // e.g. "yakki", "keihyo"
    pub severity: Severity,
    // The original service named this key "suggest"; existing callers
    // read it under that name.
    #[serde(rename = "suggest")]
    pub suggestion: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMeta {
    pub rules_count: usize,
}

/// Result of one analysis call. Spans are in detection order
/// (rule-set order, then left to right within each rule).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisResult {
    pub score: u32, // 0-100
    pub spans: Vec<Span>,
    pub meta: AnalysisMeta,
}
