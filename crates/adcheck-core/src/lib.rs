//! Ad-copy compliance checking engine
//!
//! Scans free-form advertising text against a declarative set of
//! regulatory-language rules (薬機法 / 景品表示法), aggregates the
//! matches into a 0-100 risk score, and prepares filtered, sorted,
//! exportable views plus a severity-colored highlight rendering of the
//! source text.
//!
//! The engine is a plain value: build a [`RuleSet`] once (from YAML or
//! in memory), wrap it in a [`RuleEngine`], and call
//! [`RuleEngine::analyze`] from as many threads as you like. All
//! analysis is pure and synchronous; rule problems fail at
//! construction, never mid-scan.

pub mod error;
pub mod matcher;
pub mod overlay;
pub mod rules;
pub mod scorer;
pub mod types;
pub mod view;

use std::path::Path;

pub use error::RuleSetError;
pub use rules::{Rule, RuleSet, Severity};
pub use types::{AnalysisMeta, AnalysisResult, Span};

/// Analysis entry point: an immutable rule set plus the scan/score
/// pipeline over it.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: RuleSet,
}

impl RuleEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Build an engine from a YAML rule file. Fails fast on any
    /// malformed rule.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        Ok(Self::new(RuleSet::from_yaml_file(path)?))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Run one analysis: detect all spans, score them, attach metadata.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let spans = matcher::scan(text, &self.rules);
        let score = scorer::score(&spans);
        AnalysisResult {
            score,
            spans,
            meta: AnalysisMeta {
                rules_count: self.rules.len(),
            },
        }
    }
}
