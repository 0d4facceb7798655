//! Error types for the Analyzer

use thiserror::Error;

/// Errors that can occur during analysis
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Word is empty or whitespace-only
    #[error("Word is empty")]
    EmptyWord,

    /// Word exceeds maximum length
    #[error("Word too long: {0} chars (max: {1})")]
    WordTooLong(usize, usize),

    /// Language model error (network, provider, credentials)
    #[error("Language model error: {0}")]
    Llm(String),

    /// Ledger error (backend unreachable, referential failure)
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// The external call exceeded the configured timeout
    #[error("Analysis timeout")]
    Timeout,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
