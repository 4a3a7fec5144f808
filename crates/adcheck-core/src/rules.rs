//! Rule definitions and rule-set construction
//!
//! A rule set is loaded once from a declarative YAML list, validated and
//! compiled up front, and treated as immutable for the life of the
//! process. Pattern errors, missing fields, and duplicate ids all fail
//! here, never during a scan.

use std::collections::HashSet;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::RuleSetError;

/// Ordinal risk level of a rule. High outranks mid outranks low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Mid,
    Low,
}

impl Severity {
    /// Score contribution of one match at this severity.
    pub fn weight(self) -> u32 {
        match self {
            Severity::High => 3,
            Severity::Mid => 2,
            Severity::Low => 1,
        }
    }

    /// Display ordering: higher rank sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 2,
            Severity::Mid => 1,
            Severity::Low => 0,
        }
    }

    /// Human label (高/中/低).
    pub fn label(self) -> &'static str {
        match self {
            Severity::High => "高",
            Severity::Mid => "中",
            Severity::Low => "低",
        }
    }

    /// Colored badge for tables and summaries.
    pub fn badge(self) -> &'static str {
        match self {
            Severity::High => "🟥 高",
            Severity::Mid => "🟧 中",
            Severity::Low => "🟨 低",
        }
    }

    /// Highlight color. Darker means higher risk.
    pub fn color(self) -> &'static str {
        match self {
            Severity::High => "#ffccd5",
            Severity::Mid => "#ffe5b4",
            Severity::Low => "#fff3b0",
        }
    }

    /// Strict parse of a severity tag.
    pub fn from_tag(s: &str) -> Option<Severity> {
        match s {
            "high" => Some(Severity::High),
            "mid" => Some(Severity::Mid),
            "low" => Some(Severity::Low),
            _ => None,
        }
    }

    /// Lenient parse used for rule files.
    ///
    /// Unknown values map to `Low` (weight 1), matching the scorer
    /// contract for unrecognized severities.
    pub fn parse_lenient(s: &str) -> Severity {
        Severity::from_tag(s).unwrap_or(Severity::Low)
    }
}

/// One compiled detection rule.
///
/// The pattern is intrinsically case-insensitive and multi-line; callers
/// never supply match flags.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub pattern: Regex,
    pub label: String,
    pub law: String,
    pub severity: Severity,
    pub suggestion: Option<String>,
    pub note: Option<String>,
}

impl Rule {
    /// Compile a rule from its raw parts.
    pub fn new(
        id: impl Into<String>,
        pattern: &str,
        label: impl Into<String>,
        law: impl Into<String>,
        severity: Severity,
    ) -> Result<Self, RuleSetError> {
        let id = id.into();
        let pattern = compile_pattern(&id, pattern)?;
        Ok(Rule {
            id,
            pattern,
            label: label.into(),
            law: law.into(),
            severity,
            suggestion: None,
            note: None,
        })
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

fn compile_pattern(id: &str, pattern: &str) -> Result<Regex, RuleSetError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
        .map_err(|e| RuleSetError::InvalidPattern {
            id: id.to_string(),
            source: Box::new(e),
        })
}

/// Raw rule entry as it appears in the YAML file.
#[derive(Debug, Deserialize)]
struct RuleSpec {
    #[serde(default)]
    id: String,
    #[serde(default)]
    regex: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    law: String,
    #[serde(default)]
    severity: String,
    #[serde(default, alias = "suggest")]
    suggestion: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    patterns: Vec<RuleSpec>,
}

/// Immutable, validated collection of compiled rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build a rule set from already-compiled rules, checking id
    /// uniqueness.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleSetError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(RuleSetError::DuplicateId(rule.id.clone()));
            }
        }
        Ok(RuleSet { rules })
    }

    /// Parse and validate a YAML rule document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RuleSetError> {
        let file: RuleFile = serde_yaml::from_str(yaml)?;
        let mut rules = Vec::with_capacity(file.patterns.len());
        for spec in file.patterns {
            rules.push(validate_spec(spec)?);
        }
        Self::new(rules)
    }

    /// Load and validate a YAML rule file from disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

fn validate_spec(spec: RuleSpec) -> Result<Rule, RuleSetError> {
    let required = [
        ("id", &spec.id),
        ("regex", &spec.regex),
        ("label", &spec.label),
        ("law", &spec.law),
        ("severity", &spec.severity),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(RuleSetError::MissingField {
                id: spec.id.clone(),
                field,
            });
        }
    }

    let mut rule = Rule::new(
        spec.id,
        &spec.regex,
        spec.label,
        spec.law,
        Severity::parse_lenient(&spec.severity),
    )?;
    rule.suggestion = spec.suggestion.filter(|s| !s.is_empty());
    rule.note = spec.note.filter(|s| !s.is_empty());
    Ok(rule)
}
