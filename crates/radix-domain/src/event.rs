//! Search event - one row per inbound analysis request

use crate::id::SearchId;

/// A recorded instance of a user requesting analysis of a word.
///
/// Created once per inbound request, before the external model is called,
/// so a failed analysis still counts as a search. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEvent {
    /// Unique identifier
    pub id: SearchId,

    /// The word that was searched (trimmed)
    pub word: String,

    /// Origin IP address of the request, when known
    pub origin_address: Option<String>,

    /// Opaque identifier of the requesting user, when known
    pub requested_by: Option<String>,

    /// Creation time, seconds since Unix epoch
    pub created_at: u64,
}
