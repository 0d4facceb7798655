//! Configuration for the Analyzer

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Maximum word length (characters)
    pub max_word_length: usize,

    /// Maximum time for a single external model call (seconds)
    pub analysis_timeout_secs: u64,
}

impl AnalyzerConfig {
    /// Get the analysis timeout as a Duration
    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_word_length == 0 {
            return Err("max_word_length must be greater than 0".to_string());
        }
        if self.analysis_timeout_secs == 0 {
            return Err("analysis_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            // Matches the word column width in the ledger schema
            max_word_length: 200,
            analysis_timeout_secs: 120,
        }
    }
}
