//! Core Analyzer implementation

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::normalizer::normalize;
use crate::prompt::PromptBuilder;
use crate::types::{AnalysisOutcome, AnalysisRequest};
use radix_domain::traits::{HistoryQuery, LanguageModel, SearchLedger};
use radix_domain::SearchEvent;
use std::sync::{Arc, Mutex};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Analyzer turns a word into a persisted etymology record
///
/// Orchestration order is the contract: the search is recorded before the
/// external model is called, so a failed analysis still counts as a search,
/// and no result is ever recorded without a prior search event. The two
/// ledger writes are independent and non-transactional; an orphaned search
/// after a crash or model failure is normal, not corruption.
pub struct Analyzer<L, S>
where
    L: LanguageModel,
    S: SearchLedger,
{
    llm: Arc<L>,
    ledger: Arc<Mutex<S>>,
    config: AnalyzerConfig,
}

impl<L, S> Analyzer<L, S>
where
    L: LanguageModel + Send + Sync + 'static,
    S: SearchLedger,
    L::Error: std::fmt::Display,
    S::Error: std::fmt::Display,
{
    /// Create a new Analyzer
    pub fn new(llm: L, ledger: S, config: AnalyzerConfig) -> Self {
        Self {
            llm: Arc::new(llm),
            ledger: Arc::new(Mutex::new(ledger)),
            config,
        }
    }

    /// Analyze a word's etymology and persist the outcome
    ///
    /// # Errors
    ///
    /// - `EmptyWord` / `WordTooLong`: rejected before any ledger or model
    ///   interaction
    /// - `Llm` / `Timeout`: the external call failed; the search event is
    ///   kept
    /// - `Ledger`: a ledger write failed
    ///
    /// Unparseable model output is NOT an error; it resolves to a degraded
    /// outcome with a raw-text payload.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome, AnalyzerError> {
        let word = request.word.trim().to_string();

        if word.is_empty() {
            return Err(AnalyzerError::EmptyWord);
        }
        // The limit is in characters, not bytes; accented words count
        // one per letter
        let word_chars = word.chars().count();
        if word_chars > self.config.max_word_length {
            return Err(AnalyzerError::WordTooLong(
                word_chars,
                self.config.max_word_length,
            ));
        }

        info!(
            "Starting analysis for word '{}', origin {:?}",
            word, request.origin_address
        );

        // Record the search before the external call
        let search_id = {
            let mut ledger = self
                .ledger
                .lock()
                .map_err(|e| AnalyzerError::Ledger(format!("Ledger lock error: {}", e)))?;
            ledger
                .record_search(
                    &word,
                    request.origin_address.as_deref(),
                    request.requested_by.as_deref(),
                )
                .map_err(|e| AnalyzerError::Ledger(e.to_string()))?
        };

        debug!("Recorded search {}", search_id);

        let prompt = PromptBuilder::new(&word).build();
        debug!("Prompt length: {} chars", prompt.len());

        let raw = timeout(self.config.analysis_timeout(), self.call_model(&prompt))
            .await
            .map_err(|_| AnalyzerError::Timeout)??;

        debug!("Model response length: {} chars", raw.len());

        let payload = normalize(&word, &raw);
        let degraded = payload.is_degraded();
        if degraded {
            warn!(
                "Model output for '{}' was not a JSON object; storing raw-text fallback",
                word
            );
        }

        let value = payload.into_value();

        let record_id = {
            let mut ledger = self
                .ledger
                .lock()
                .map_err(|e| AnalyzerError::Ledger(format!("Ledger lock error: {}", e)))?;
            ledger
                .record_result(&word, &value, search_id)
                .map_err(|e| AnalyzerError::Ledger(e.to_string()))?
        };

        info!(
            "Analysis complete for '{}': search {}, record {}, degraded: {}",
            word, search_id, record_id, degraded
        );

        Ok(AnalysisOutcome {
            word,
            search_id,
            record_id,
            payload: value,
            degraded,
        })
    }

    /// Query search history, newest first
    pub fn search_history(&self, query: &HistoryQuery) -> Result<Vec<SearchEvent>, AnalyzerError> {
        let ledger = self
            .ledger
            .lock()
            .map_err(|e| AnalyzerError::Ledger(format!("Ledger lock error: {}", e)))?;
        ledger
            .search_history(query)
            .map_err(|e| AnalyzerError::Ledger(e.to_string()))
    }

    /// Call the language model provider
    async fn call_model(&self, prompt: &str) -> Result<String, AnalyzerError> {
        let llm = Arc::clone(&self.llm);
        let prompt = prompt.to_string();

        // The LanguageModel trait is blocking; run it off the async runtime
        tokio::task::spawn_blocking(move || {
            llm.generate(&prompt)
                .map_err(|e| AnalyzerError::Llm(e.to_string()))
        })
        .await
        .map_err(|e| AnalyzerError::Llm(format!("Task join error: {}", e)))?
    }
}
