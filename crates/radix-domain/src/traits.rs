//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{EtymologyRecord, RecordId, SearchEvent, SearchId};
use serde_json::Value;

/// Trait for the external generative-language model
///
/// Implemented by the infrastructure layer (radix-llm). The model is an
/// opaque text-in/text-out function; it may fail or time out.
pub trait LanguageModel {
    /// Error type for model operations
    type Error;

    /// Generate a text completion for the given prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Query criteria for retrieving search history
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    /// Filter by word prefix
    pub word_prefix: Option<String>,

    /// Maximum results to return
    pub limit: Option<usize>,
}

/// Trait for durable search/result record-keeping
///
/// Implemented by the infrastructure layer (radix-store).
///
/// Ordering contract: `record_search` is always called before any
/// `record_result` for the same request. A search event with no linked
/// result is normal - it means the external call failed after the search
/// was recorded.
pub trait SearchLedger {
    /// Error type for ledger operations
    type Error;

    /// Record an inbound analysis request. Called before the external model.
    fn record_search(
        &mut self,
        word: &str,
        origin_address: Option<&str>,
        requested_by: Option<&str>,
    ) -> Result<SearchId, Self::Error>;

    /// Record a normalized analysis result linked to an existing search.
    ///
    /// Fails if the referenced search event does not exist.
    fn record_result(
        &mut self,
        word: &str,
        payload: &Value,
        search_id: SearchId,
    ) -> Result<RecordId, Self::Error>;

    /// Get a search event by ID
    fn get_search(&self, id: SearchId) -> Result<Option<SearchEvent>, Self::Error>;

    /// Get an etymology record by ID
    fn get_result(&self, id: RecordId) -> Result<Option<EtymologyRecord>, Self::Error>;

    /// Get all records linked to a search event
    fn results_for_search(&self, id: SearchId) -> Result<Vec<EtymologyRecord>, Self::Error>;

    /// Query search history, newest first
    fn search_history(&self, query: &HistoryQuery) -> Result<Vec<SearchEvent>, Self::Error>;

    /// Delete a search event and, by cascade, its linked records
    fn delete_search(&mut self, id: SearchId) -> Result<(), Self::Error>;
}
