//! Veritas Radix API
//!
//! Thin HTTP boundary over the etymology analysis pipeline:
//! `POST /analyze`, `GET /search`, `GET /health`.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ApiConfig;
use handlers::{create_router, AppState};
use radix_analyzer::Analyzer;
use radix_llm::GeminiProvider;
use radix_store::SqliteLedger;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Ledger initialization error
    #[error("Storage error: {0}")]
    Store(#[from] radix_store::StoreError),

    /// Model provider initialization error (e.g. missing credentials)
    #[error("Language model error: {0}")]
    Llm(#[from] radix_llm::LlmError),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the API HTTP server
///
/// Validates configuration eagerly, wires the Gemini provider and the
/// SQLite ledger into the Analyzer, and starts the axum server. A missing
/// API key fails here, before any request is accepted.
pub async fn start_server(config: ApiConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Veritas Radix API");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);
    info!("Model: {}", config.gemini.model);

    config.validate()?;

    let provider = GeminiProvider::new(&config.gemini.api_key, &config.gemini.model)?
        .with_endpoint(&config.gemini.endpoint);
    let ledger = SqliteLedger::new(&config.database_path)?;
    let analyzer = Analyzer::new(provider, ledger, config.analyzer.clone());

    let state = AppState {
        analyzer: Arc::new(analyzer),
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("API listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
