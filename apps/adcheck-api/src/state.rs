//! Application state for the AdCheck API

use adcheck_core::RuleEngine;
use anyhow::{Context, Result};
use tracing::info;

const DEFAULT_RULES_PATH: &str = "rules/ng_rules.yml";

/// Shared, read-only state: the rule engine built once at startup.
pub struct AppState {
    pub engine: RuleEngine,
}

impl AppState {
    /// Load the rule file named by `RULES_PATH` (or the default) and
    /// build the engine. Any rule problem aborts startup.
    pub fn new() -> Result<Self> {
        let rules_path =
            std::env::var("RULES_PATH").unwrap_or_else(|_| DEFAULT_RULES_PATH.to_string());

        let engine = RuleEngine::from_yaml_file(&rules_path)
            .with_context(|| format!("Failed to load rules from {}", rules_path))?;

        info!(
            "Loaded {} rules from {}",
            engine.rules().len(),
            rules_path
        );
        Ok(Self { engine })
    }
}
