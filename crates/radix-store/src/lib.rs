//! Veritas Radix Storage Layer
//!
//! Implements the SearchLedger trait over SQLite.
//!
//! # Architecture
//!
//! - One `searches` row per inbound analysis request
//! - Zero or more `results` rows linked to each search
//! - Referential integrity enforced by a cascading foreign key:
//!   deleting a search deletes its results
//!
//! # Examples
//!
//! ```no_run
//! use radix_store::SqliteLedger;
//!
//! let ledger = SqliteLedger::new(":memory:").unwrap();
//! // Ledger is now ready for search/result operations
//! ```

#![warn(missing_docs)]

use radix_domain::traits::{HistoryQuery, SearchLedger};
use radix_domain::{EtymologyRecord, RecordId, SearchEvent, SearchId};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors that can occur during ledger operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A result referenced a search event that does not exist
    #[error("Search event not found: {0}")]
    MissingParent(String),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Payload serialization error
    #[error("Payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// SQLite-based implementation of SearchLedger
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Callers share a SqliteLedger
/// across threads behind a mutex (the analyzer does this).
pub struct SqliteLedger {
    conn: Connection,
}

impl SqliteLedger {
    /// Create a new SqliteLedger with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use radix_store::SqliteLedger;
    ///
    /// let ledger = SqliteLedger::new("radix.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        // SQLite leaves foreign keys off unless asked, and the cascade
        // from searches to results depends on them
        conn.pragma_update(None, "foreign_keys", true)?;
        let ledger = Self { conn };
        ledger.initialize_schema()?;
        Ok(ledger)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn id_to_bytes(id: u128) -> Vec<u8> {
        id.to_be_bytes().to_vec()
    }

    fn bytes_to_id(bytes: &[u8]) -> Result<u128, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for identifier, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(u128::from_be_bytes(arr))
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn search_exists(&self, id: SearchId) -> Result<bool, StoreError> {
        let id_bytes = Self::id_to_bytes(id.value());
        let exists: bool = self
            .conn
            .query_row(
                "SELECT 1 FROM searches WHERE id = ?1",
                params![&id_bytes],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    fn row_to_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<SearchEvent> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_id(&id_bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Blob, Box::new(e))
        })?;

        Ok(SearchEvent {
            id: SearchId::from_value(id),
            word: row.get(1)?,
            origin_address: row.get(2)?,
            requested_by: row.get(3)?,
            created_at: row.get::<_, i64>(4)? as u64,
        })
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<EtymologyRecord> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_id(&id_bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Blob, Box::new(e))
        })?;

        let payload_text: String = row.get(2)?;
        let payload: Value = serde_json::from_str(&payload_text).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let search_bytes: Vec<u8> = row.get(3)?;
        let search_id = Self::bytes_to_id(&search_bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Blob, Box::new(e))
        })?;

        Ok(EtymologyRecord {
            id: RecordId::from_value(id),
            word: row.get(1)?,
            payload,
            search_id: SearchId::from_value(search_id),
            created_at: row.get::<_, i64>(4)? as u64,
        })
    }
}

impl SearchLedger for SqliteLedger {
    type Error = StoreError;

    fn record_search(
        &mut self,
        word: &str,
        origin_address: Option<&str>,
        requested_by: Option<&str>,
    ) -> Result<SearchId, Self::Error> {
        let id = SearchId::new();
        let id_bytes = Self::id_to_bytes(id.value());

        self.conn.execute(
            "INSERT INTO searches (id, word, origin_address, requested_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &id_bytes,
                word,
                origin_address,
                requested_by,
                Self::now_secs() as i64,
            ],
        )?;

        Ok(id)
    }

    fn record_result(
        &mut self,
        word: &str,
        payload: &Value,
        search_id: SearchId,
    ) -> Result<RecordId, Self::Error> {
        if !self.search_exists(search_id)? {
            return Err(StoreError::MissingParent(search_id.to_string()));
        }

        let id = RecordId::new();
        let id_bytes = Self::id_to_bytes(id.value());
        let search_bytes = Self::id_to_bytes(search_id.value());
        let payload_text = serde_json::to_string(payload)?;

        self.conn.execute(
            "INSERT INTO results (id, word, payload, search_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &id_bytes,
                word,
                &payload_text,
                &search_bytes,
                Self::now_secs() as i64,
            ],
        )?;

        Ok(id)
    }

    fn get_search(&self, id: SearchId) -> Result<Option<SearchEvent>, Self::Error> {
        let id_bytes = Self::id_to_bytes(id.value());

        let event = self
            .conn
            .query_row(
                "SELECT id, word, origin_address, requested_by, created_at
                 FROM searches WHERE id = ?1",
                params![&id_bytes],
                Self::row_to_event,
            )
            .optional()?;

        Ok(event)
    }

    fn get_result(&self, id: RecordId) -> Result<Option<EtymologyRecord>, Self::Error> {
        let id_bytes = Self::id_to_bytes(id.value());

        let record = self
            .conn
            .query_row(
                "SELECT id, word, payload, search_id, created_at
                 FROM results WHERE id = ?1",
                params![&id_bytes],
                Self::row_to_record,
            )
            .optional()?;

        Ok(record)
    }

    fn results_for_search(&self, id: SearchId) -> Result<Vec<EtymologyRecord>, Self::Error> {
        let id_bytes = Self::id_to_bytes(id.value());

        let mut stmt = self.conn.prepare(
            "SELECT id, word, payload, search_id, created_at
             FROM results WHERE search_id = ?1 ORDER BY created_at, id",
        )?;

        let records = stmt
            .query_map(params![&id_bytes], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn search_history(&self, query: &HistoryQuery) -> Result<Vec<SearchEvent>, Self::Error> {
        let mut sql = String::from(
            "SELECT id, word, origin_address, requested_by, created_at
             FROM searches WHERE 1=1",
        );
        let mut sql_params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(prefix) = &query.word_prefix {
            // The prefix is literal text; %/_ in it must not act as wildcards
            let escaped = prefix
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            sql.push_str(" AND word LIKE ? ESCAPE '\\'");
            sql_params.push(Box::new(format!("{}%", escaped)));
        }

        // Newest first; UUIDv7 ids break ties within the same second
        sql.push_str(" ORDER BY created_at DESC, id DESC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            sql_params.push(Box::new(limit as i64));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = sql_params.iter().map(|p| p.as_ref()).collect();

        let events = stmt
            .query_map(&param_refs[..], Self::row_to_event)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }

    fn delete_search(&mut self, id: SearchId) -> Result<(), Self::Error> {
        let id_bytes = Self::id_to_bytes(id.value());

        let affected = self
            .conn
            .execute("DELETE FROM searches WHERE id = ?1", params![&id_bytes])?;

        if affected == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
