//! Veritas Radix Analyzer
//!
//! Converts a word into a persisted etymology record using an external
//! generative-language model.
//!
//! # Architecture
//!
//! ```text
//! Word → Analyzer → SearchLedger (search) → LanguageModel → Normalizer
//!                                                → SearchLedger (result)
//! ```
//!
//! # Key Features
//!
//! - **Prompt Building**: deterministic Portuguese-language instruction
//!   requesting a fixed-schema JSON answer
//! - **Response Normalization**: tolerant conversion of raw model text into
//!   a canonical payload; unparseable output degrades to a raw-text
//!   fallback instead of failing
//! - **Search Ledger Ordering**: the search is recorded before the external
//!   call, so a failed analysis still counts as a search
//!
//! # Example Usage
//!
//! ```no_run
//! use radix_analyzer::{Analyzer, AnalyzerConfig, AnalysisRequest};
//! use radix_llm::MockProvider;
//! use radix_store::SqliteLedger;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"word": "radix"}"#);
//! let ledger = SqliteLedger::new(":memory:")?;
//!
//! let analyzer = Analyzer::new(llm, ledger, AnalyzerConfig::default());
//!
//! let request = AnalysisRequest {
//!     word: "radix".to_string(),
//!     origin_address: None,
//!     requested_by: None,
//! };
//!
//! let outcome = analyzer.analyze(request).await?;
//! println!("Stored record {} for search {}", outcome.record_id, outcome.search_id);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod normalizer;
mod prompt;
mod types;


pub use analyzer::Analyzer;
pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use normalizer::normalize;
pub use prompt::PromptBuilder;
pub use types::{AnalysisOutcome, AnalysisRequest};
