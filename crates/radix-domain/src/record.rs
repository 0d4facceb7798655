//! Etymology record - the stored result of an analysis

use crate::id::{RecordId, SearchId};
use serde_json::Value;

/// The stored result (structured or fallback) of analyzing a word.
///
/// Every record references the search event that produced it; deleting a
/// search event deletes its records (enforced by the storage backend).
/// The payload is opaque structured JSON - its shape is conventional,
/// not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct EtymologyRecord {
    /// Unique identifier
    pub id: RecordId,

    /// The word this record describes
    pub word: String,

    /// Normalized analysis payload, stored as opaque JSON
    pub payload: Value,

    /// The search event this record belongs to
    pub search_id: SearchId,

    /// Creation time, seconds since Unix epoch
    pub created_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_references_parent_search() {
        let search_id = SearchId::new();
        let record = EtymologyRecord {
            id: RecordId::new(),
            word: "democracia".to_string(),
            payload: json!({"word": "democracia", "status": "completed"}),
            search_id,
            created_at: 1_700_000_000,
        };

        assert_eq!(record.search_id, search_id);
        assert_eq!(record.payload["status"], "completed");
    }
}
