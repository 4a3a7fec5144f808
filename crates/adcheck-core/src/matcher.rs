//! Span detection
//!
//! Scans input text against every rule in the set. Pure function of
//! (text, rules); never fails once the rule set has been built.

use crate::rules::RuleSet;
use crate::types::Span;

/// Byte offset of every character boundary in `text`, plus the total
/// length as a final sentinel. Index = character position.
pub(crate) fn char_boundaries(text: &str) -> Vec<usize> {
    let mut bounds: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
    bounds.push(text.len());
    bounds
}

/// Scan `text` against every rule, producing spans in rule-set order
/// and, within each rule, left-to-right non-overlapping occurrence
/// order.
///
/// Offsets are character offsets into `text`, keeping the output shape
/// stable for callers that index by characters rather than bytes.
pub fn scan(text: &str, rules: &RuleSet) -> Vec<Span> {
    let bounds = char_boundaries(text);
    let char_at = |byte: usize| bounds.partition_point(|&b| b < byte);

    let mut spans = Vec::new();
    for rule in rules.iter() {
        for m in rule.pattern.find_iter(text) {
            spans.push(Span {
                start: char_at(m.start()),
                end: char_at(m.end()),
                matched: m.as_str().to_string(),
                rule_id: rule.id.clone(),
                label: rule.label.clone(),
                law: rule.law.clone(),
                severity: rule.severity,
                suggestion: rule.suggestion.clone(),
                note: rule.note.clone(),
            });
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Rule, Severity};

    fn rule_set(rules: Vec<Rule>) -> RuleSet {
        RuleSet::new(rules).unwrap()
    }

    #[test]
    fn test_detects_absolute_claim() {
        let rules = rule_set(vec![Rule::new(
            "R1",
            "絶対",
            "絶対表現",
            "yakki",
            Severity::High,
        )
        .unwrap()]);
        let spans = scan("これは絶対に効果があります", &rules);

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].matched, "絶対");
        assert_eq!(spans[0].start, 3);
        assert_eq!(spans[0].end, 5);
        assert_eq!(spans[0].severity, Severity::High);
        assert_eq!(spans[0].rule_id, "R1");
    }

    #[test]
    fn test_empty_text_yields_no_spans() {
        let rules = rule_set(vec![Rule::new("R1", "x", "l", "yakki", Severity::Low).unwrap()]);
        assert!(scan("", &rules).is_empty());
    }

    #[test]
    fn test_rule_order_then_position_order() {
        let rules = rule_set(vec![
            Rule::new("R1", "b", "l1", "yakki", Severity::Low).unwrap(),
            Rule::new("R2", "a", "l2", "keihyo", Severity::High).unwrap(),
        ]);
        let spans = scan("a b a b", &rules);
        let ids: Vec<&str> = spans.iter().map(|s| s.rule_id.as_str()).collect();
        // All of R1's matches come before R2's, each left to right.
        assert_eq!(ids, vec!["R1", "R1", "R2", "R2"]);
        assert!(spans[0].start < spans[1].start);
        assert!(spans[2].start < spans[3].start);
    }

    #[test]
    fn test_same_rule_matches_do_not_overlap() {
        let rules = rule_set(vec![Rule::new("R1", "aa", "l", "yakki", Severity::Low).unwrap()]);
        let spans = scan("aaaa", &rules);
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (0, 2));
        assert_eq!((spans[1].start, spans[1].end), (2, 4));
    }

    #[test]
    fn test_case_insensitive_and_multiline() {
        let rules =
            rule_set(vec![Rule::new("R1", "^danger", "l", "yakki", Severity::Mid).unwrap()]);
        let spans = scan("safe\nDANGER zone", &rules);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].matched, "DANGER");
    }

    #[test]
    fn test_different_rules_may_overlap() {
        let rules = rule_set(vec![
            Rule::new("R1", "abc", "l1", "yakki", Severity::High).unwrap(),
            Rule::new("R2", "bcd", "l2", "keihyo", Severity::Low).unwrap(),
        ]);
        let spans = scan("abcd", &rules);
        assert_eq!(spans.len(), 2);
        assert!(spans[0].end > spans[1].start);
    }

    #[test]
    fn test_offsets_are_character_offsets() {
        let rules = rule_set(vec![Rule::new("R1", "効果", "l", "yakki", Severity::Mid).unwrap()]);
        let text = "この薬は効果があります";
        let spans = scan(text, &rules);
        assert_eq!(spans.len(), 1);
        let slice: String = text
            .chars()
            .skip(spans[0].start)
            .take(spans[0].end - spans[0].start)
            .collect();
        assert_eq!(slice, spans[0].matched);
    }
}
