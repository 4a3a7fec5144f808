//! Request models for the AdCheck API

use adcheck_core::view::ViewFilter;
use adcheck_core::Severity;
use serde::Deserialize;

/// Body for `POST /api/analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Body for the export/render endpoints: text plus an optional
/// presentation filter. Omitted filters mean "all"; unknown severity
/// tags are ignored.
#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    pub text: String,
    #[serde(default)]
    pub severities: Option<Vec<String>>,
    #[serde(default)]
    pub laws: Option<Vec<String>>,
}

impl ViewRequest {
    pub fn filter(&self) -> ViewFilter {
        let mut filter = ViewFilter::all();
        if let Some(severities) = &self.severities {
            filter = filter.with_severities(
                severities.iter().filter_map(|s| Severity::from_tag(s)),
            );
        }
        if let Some(laws) = &self.laws {
            filter = filter.with_laws(laws.iter().cloned());
        }
        filter
    }
}
