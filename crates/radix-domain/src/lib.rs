//! Veritas Radix Domain Layer
//!
//! This crate contains the core domain model for the Veritas Radix etymology
//! backend. It defines the fundamental concepts, value objects, and trait
//! interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **SearchEvent**: a recorded instance of a user requesting analysis of a word
//! - **EtymologyRecord**: the stored result of an analysis, linked to its search
//! - **AnalysisPayload**: a tagged union of structured model output and the
//!   raw-text fallback used when the model's output cannot be parsed
//!
//! ## Architecture
//!
//! - Pure domain types and trait seams only
//! - Infrastructure implementations live in other crates
//!   (`radix-llm`, `radix-store`)
//! - Only fundamental primitives as dependencies (uuid, serde_json)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod event;
pub mod id;
pub mod payload;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use event::SearchEvent;
pub use id::{RecordId, SearchId};
pub use payload::AnalysisPayload;
pub use record::EtymologyRecord;
