//! HTTP request handlers for the API server.
//!
//! Implements the analyze, search-history, and health endpoints using axum.
//! This layer is thin glue: it validates input presence, resolves the
//! caller's address, and dispatches to the Analyzer.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use radix_analyzer::{AnalysisRequest, Analyzer, AnalyzerError};
use radix_domain::traits::{HistoryQuery, LanguageModel, SearchLedger};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;
use std::sync::Arc;

/// Default number of history entries returned by GET /search
const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Shared application state
pub struct AppState<L, S>
where
    L: LanguageModel,
    S: SearchLedger,
{
    /// Analyzer owning the model provider and the ledger
    pub analyzer: Arc<Analyzer<L, S>>,
}

impl<L, S> Clone for AppState<L, S>
where
    L: LanguageModel,
    S: SearchLedger,
{
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
        }
    }
}

/// Analyze request body
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// The word to analyze
    #[serde(default)]
    pub word: Option<String>,
}

/// Analyze response body
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Always true for 200 responses, including degraded results
    pub success: bool,
    /// The normalized analysis payload
    pub analysis: Value,
    /// Human-readable status message
    pub message: String,
}

/// Search history query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Word prefix filter
    #[serde(default)]
    pub q: Option<String>,
    /// Maximum results
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One entry in the search history response
#[derive(Debug, Serialize)]
pub struct SearchEntry {
    /// The searched word
    pub word: String,
    /// Origin IP address, when recorded
    pub origin_address: Option<String>,
    /// Creation time, seconds since Unix epoch
    pub created_at: u64,
}

/// Search history response body
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Matching search events, newest first
    pub results: Vec<SearchEntry>,
    /// Number of returned results
    pub total: usize,
    /// The query string that was applied
    pub query: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall status
    pub status: String,
    /// Human-readable message
    pub message: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum ApiError {
    /// Request validation failed (missing/empty word, malformed body)
    Validation(String),
    /// Analysis pipeline error
    Analysis(AnalyzerError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Analysis(e) => match e {
                AnalyzerError::EmptyWord | AnalyzerError::WordTooLong(_, _) => {
                    (StatusCode::BAD_REQUEST, e.to_string())
                }
                AnalyzerError::Llm(_) | AnalyzerError::Timeout => {
                    (StatusCode::BAD_GATEWAY, e.to_string())
                }
                AnalyzerError::Ledger(_) | AnalyzerError::Config(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
                }
            },
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<AnalyzerError> for ApiError {
    fn from(e: AnalyzerError) -> Self {
        ApiError::Analysis(e)
    }
}

/// Resolve the caller's address from proxy headers
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// POST /analyze - Analyze a word's etymology
///
/// Returns 200 with the normalized payload for structured and degraded
/// results alike; 400 on validation failure before any ledger or model
/// interaction; 502 when the external model cannot be reached.
async fn analyze_word<L, S>(
    State(state): State<AppState<L, S>>,
    headers: HeaderMap,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError>
where
    L: LanguageModel + Send + Sync + 'static,
    S: SearchLedger + Send + 'static,
    L::Error: Display,
    S::Error: Display,
{
    let Json(request) = body.map_err(|e| ApiError::Validation(e.body_text()))?;

    let word = request.word.unwrap_or_default();
    if word.trim().is_empty() {
        return Err(ApiError::Validation("Word parameter required".to_string()));
    }

    let outcome = state
        .analyzer
        .analyze(AnalysisRequest {
            word,
            origin_address: client_ip(&headers),
            requested_by: None,
        })
        .await?;

    let message = if outcome.degraded {
        "Análise concluída com resultado em texto livre".to_string()
    } else {
        "Análise etimológica concluída".to_string()
    };

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis: outcome.payload,
        message,
    }))
}

/// GET /search - Search history, newest first
async fn search_words<L, S>(
    State(state): State<AppState<L, S>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError>
where
    L: LanguageModel + Send + Sync + 'static,
    S: SearchLedger + Send + 'static,
    L::Error: Display,
    S::Error: Display,
{
    let query = HistoryQuery {
        word_prefix: params.q.clone().filter(|q| !q.is_empty()),
        limit: Some(params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT)),
    };

    let events = state.analyzer.search_history(&query)?;

    let results: Vec<SearchEntry> = events
        .into_iter()
        .map(|e| SearchEntry {
            word: e.word,
            origin_address: e.origin_address,
            created_at: e.created_at,
        })
        .collect();

    let total = results.len();

    Ok(Json(SearchResponse {
        results,
        total,
        query: params.q.unwrap_or_default(),
    }))
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        message: "API funcionando".to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<L, S>(state: AppState<L, S>) -> AxumRouter
where
    L: LanguageModel + Send + Sync + 'static,
    S: SearchLedger + Send + 'static,
    L::Error: Display,
    S::Error: Display,
{
    AxumRouter::new()
        .route("/analyze", post(analyze_word::<L, S>))
        .route("/search", get(search_words::<L, S>))
        .route("/health", get(health_check))
        .with_state(state)
}
