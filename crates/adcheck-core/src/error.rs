use thiserror::Error;

/// Errors raised while building a [`crate::RuleSet`].
///
/// All of these surface at load time, before any analysis call; the
/// matcher itself never fails once a rule set has been constructed.
#[derive(Error, Debug)]
pub enum RuleSetError {
    #[error("Failed to read rule file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse rule file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Rule '{id}' has an invalid pattern: {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("Rule '{id}' is missing required field '{field}'")]
    MissingField { id: String, field: &'static str },

    #[error("Duplicate rule id: {0}")]
    DuplicateId(String),
}
