//! Property-based tests for adcheck-api
//!
//! Tests the wire contract the API serves: the score/span/meta JSON
//! shape and the overlay segment encoding, over a YAML-loaded rule set.

use proptest::prelude::*;

use adcheck_core::overlay::{render_marks, resolve_overlaps};
use adcheck_core::{view, RuleEngine, RuleSet};

const RULES_YAML: &str = r#"
patterns:
  - id: YK-001
    regex: "絶対"
    label: "絶対表現"
    law: yakki
    severity: high
    suggest: "個人差があります 等に言い換える"
  - id: KH-001
    regex: "期間限定"
    label: "有利誤認のおそれ"
    law: keihyo
    severity: low
"#;

fn engine() -> RuleEngine {
    RuleEngine::new(RuleSet::from_yaml_str(RULES_YAML).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Wire shape
    // ============================================================

    #[test]
    fn response_json_always_has_contract_fields(text in "[あ絶対期間限定 a-z]{0,60}") {
        let result = engine().analyze(&text);
        let json = serde_json::to_value(&result).unwrap();

        prop_assert!(json["score"].is_u64());
        prop_assert!(json["score"].as_u64().unwrap() <= 100);
        prop_assert!(json["spans"].is_array());
        prop_assert_eq!(json["meta"]["rules_count"].as_u64(), Some(2));
    }

    #[test]
    fn span_json_carries_rule_metadata(text in "[絶対に効く]{1,40}") {
        let result = engine().analyze(&text);
        let json = serde_json::to_value(&result).unwrap();
        for span in json["spans"].as_array().unwrap() {
            prop_assert_eq!(span["rule_id"].as_str(), Some("YK-001"));
            prop_assert_eq!(span["severity"].as_str(), Some("high"));
            prop_assert_eq!(span["law"].as_str(), Some("yakki"));
            prop_assert!(span["start"].as_u64().unwrap() < span["end"].as_u64().unwrap());
            // The front end reads the replacement hint under "suggest".
            prop_assert_eq!(
                span["suggest"].as_str(),
                Some("個人差があります 等に言い換える")
            );
            prop_assert!(span.get("suggestion").is_none());
        }
    }

    // ============================================================
    // Overlay segment encoding
    // ============================================================

    #[test]
    fn segment_json_is_tagged_and_round_trips(text in "[絶対x ]{0,40}") {
        let result = engine().analyze(&text);
        let visible = view::filter(&result.spans, &view::ViewFilter::all());
        let marks = resolve_overlaps(&visible, text.chars().count());
        let segments = render_marks(&text, &marks);

        let json = serde_json::to_value(&segments).unwrap();
        let mut rebuilt = String::new();
        for seg in json.as_array().unwrap() {
            let kind = seg["kind"].as_str().unwrap();
            prop_assert!(kind == "plain" || kind == "highlight");
            if kind == "highlight" {
                prop_assert!(seg["color"].as_str().unwrap().starts_with('#'));
            }
            rebuilt.push_str(seg["text"].as_str().unwrap());
        }
        prop_assert_eq!(rebuilt, text);
    }

    // ============================================================
    // Export
    // ============================================================

    #[test]
    fn csv_export_has_one_line_per_visible_span(text in "[絶対 限定期間]{0,40}") {
        let result = engine().analyze(&text);
        let mut visible = view::filter(&result.spans, &view::ViewFilter::all());
        view::sort_for_display(&mut visible);
        let bytes = view::to_csv(&view::to_table(&visible));

        let body = String::from_utf8(bytes[3..].to_vec()).unwrap();
        prop_assert_eq!(body.lines().count(), visible.len() + 1);
    }
}
