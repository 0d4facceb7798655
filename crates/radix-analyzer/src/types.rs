//! Request/outcome types for the Analyzer

use radix_domain::{RecordId, SearchId};
use serde_json::Value;

/// An inbound request to analyze a word's etymology
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// The word to analyze
    pub word: String,

    /// Origin IP address of the request, when known
    pub origin_address: Option<String>,

    /// Opaque identifier of the requesting user, when known
    pub requested_by: Option<String>,
}

/// The outcome of a successful analysis (structured or degraded)
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// The analyzed word (trimmed)
    pub word: String,

    /// The search event recorded for this request
    pub search_id: SearchId,

    /// The persisted etymology record
    pub record_id: RecordId,

    /// The normalized payload, as persisted
    pub payload: Value,

    /// Whether the payload is the raw-text fallback
    pub degraded: bool,
}
