//! Identifier newtypes for ledger rows
//!
//! Both identifiers are UUIDv7-based: chronologically sortable, 128-bit
//! unique, and generated without coordination. The storage layer persists
//! them as 16-byte blobs.

use std::fmt;

/// Unique identifier for a search event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchId(u128);

impl SearchId {
    /// Generate a new UUIDv7-based SearchId
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_domain::SearchId;
    ///
    /// let id = SearchId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a SearchId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for SearchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SearchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Unique identifier for an etymology record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u128);

impl RecordId {
    /// Generate a new UUIDv7-based RecordId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RecordId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_id_uniqueness() {
        let a = SearchId::new();
        let b = SearchId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_search_id_value_round_trip() {
        let id = SearchId::new();
        let restored = SearchId::from_value(id.value());
        assert_eq!(id, restored);
    }

    #[test]
    fn test_record_id_value_round_trip() {
        let id = RecordId::new();
        let restored = RecordId::from_value(id.value());
        assert_eq!(id, restored);
    }

    #[test]
    fn test_ids_are_chronologically_sortable() {
        let first = SearchId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = SearchId::new();
        assert!(first < second);
    }

    #[test]
    fn test_display_is_uuid_format() {
        let id = SearchId::new();
        let s = id.to_string();
        // UUID text form: 8-4-4-4-12
        assert_eq!(s.len(), 36);
        assert_eq!(s.matches('-').count(), 4);
    }
}
