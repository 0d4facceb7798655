//! Configuration file parsing for the API server.
//!
//! Loads settings from TOML files including bind address, database path,
//! and Gemini credentials. Required fields are validated eagerly at
//! startup, never lazily per request.

use radix_analyzer::AnalyzerConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable overriding the configured API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// API configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// A field carries an invalid value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// API server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// SQLite database path (":memory:" for an in-memory ledger)
    pub database_path: String,

    /// Gemini API settings
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Analyzer settings
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

/// Gemini API settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API key; may also come from the GEMINI_API_KEY environment variable
    #[serde(default)]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            endpoint: default_endpoint(),
        }
    }
}

fn default_model() -> String {
    radix_llm::gemini::DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    radix_llm::gemini::DEFAULT_ENDPOINT.to_string()
}

impl ApiConfig {
    /// Load configuration from a TOML file
    ///
    /// The GEMINI_API_KEY environment variable, when set and non-empty,
    /// overrides the api_key from the file. The result is validated before
    /// being returned.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: ApiConfig = toml::from_str(&contents)?;

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.gemini.api_key = key;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate required fields
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.is_empty() {
            return Err(ConfigError::MissingField("bind_address".to_string()));
        }
        if self.database_path.is_empty() {
            return Err(ConfigError::MissingField("database_path".to_string()));
        }
        if self.gemini.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField("gemini.api_key".to_string()));
        }
        self.analyzer.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ApiConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            database_path: ":memory:".to_string(),
            gemini: GeminiConfig {
                api_key: "test-key-do-not-use-in-production".to_string(),
                model: default_model(),
                endpoint: default_endpoint(),
            },
            analyzer: AnalyzerConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
