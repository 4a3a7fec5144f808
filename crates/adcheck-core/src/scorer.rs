//! Severity-weighted risk aggregation

use crate::types::Span;

/// Reduce a span list to a single risk score in `[0, 100]`.
///
/// `score = min(100, 5 × Σ weight(severity))` with weights 3/2/1 for
/// high/mid/low. Saturating, deterministic, empty list scores 0.
pub fn score(spans: &[Span]) -> u32 {
    let total: u32 = spans
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.severity.weight()));
    total.saturating_mul(5).min(100)
}
