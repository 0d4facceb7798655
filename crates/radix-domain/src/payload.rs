//! Analysis payload - tagged union of structured and fallback results
//!
//! The external model is asked for a fixed-schema JSON object but is free to
//! return anything. A payload is either the parsed object (structured) or the
//! raw text wrapped in a minimal fallback shape (degraded). Both serialize
//! with `status = "completed"` - a degraded result is still a success.

use serde_json::{Map, Value};

/// Status value force-set on every persisted payload
pub const STATUS_COMPLETED: &str = "completed";

/// Payload field holding the prose explanation in the fallback shape
pub const EXPLANATION_FIELD: &str = "etymology_explanation";

/// Normalized result of an etymology analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPayload {
    /// The model returned a parseable JSON object; adopted verbatim
    Structured(Map<String, Value>),

    /// The model returned something else; the raw text becomes the explanation
    RawText {
        /// The word that was analyzed
        word: String,
        /// The model's raw response, verbatim
        explanation: String,
    },
}

impl AnalysisPayload {
    /// Whether this payload is the raw-text fallback
    pub fn is_degraded(&self) -> bool {
        matches!(self, AnalysisPayload::RawText { .. })
    }

    /// Convert into the JSON value persisted by the ledger.
    ///
    /// Force-sets `status = "completed"` in both variants, overwriting
    /// whatever the model may have returned for that field.
    pub fn into_value(self) -> Value {
        let mut object = match self {
            AnalysisPayload::Structured(map) => map,
            AnalysisPayload::RawText { word, explanation } => {
                let mut map = Map::new();
                map.insert("word".to_string(), Value::String(word));
                map.insert(EXPLANATION_FIELD.to_string(), Value::String(explanation));
                map
            }
        };
        object.insert(
            "status".to_string(),
            Value::String(STATUS_COMPLETED.to_string()),
        );
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_payload_forces_status() {
        let mut map = Map::new();
        map.insert("word".to_string(), json!("philosophiae"));
        map.insert("status".to_string(), json!("pending"));

        let value = AnalysisPayload::Structured(map).into_value();
        assert_eq!(value, json!({"word": "philosophiae", "status": "completed"}));
    }

    #[test]
    fn test_structured_payload_adds_missing_status() {
        let mut map = Map::new();
        map.insert("word".to_string(), json!("radix"));

        let value = AnalysisPayload::Structured(map).into_value();
        assert_eq!(value["status"], "completed");
    }

    #[test]
    fn test_fallback_payload_shape() {
        let payload = AnalysisPayload::RawText {
            word: "xyzzy".to_string(),
            explanation: "not a real analysis".to_string(),
        };
        assert!(payload.is_degraded());

        let value = payload.into_value();
        assert_eq!(
            value,
            json!({
                "word": "xyzzy",
                "etymology_explanation": "not a real analysis",
                "status": "completed"
            })
        );
    }

    #[test]
    fn test_fallback_with_empty_explanation() {
        let value = AnalysisPayload::RawText {
            word: "vox".to_string(),
            explanation: String::new(),
        }
        .into_value();

        assert_eq!(value[EXPLANATION_FIELD], "");
        assert_eq!(value["status"], "completed");
    }

    #[test]
    fn test_structured_payload_is_not_degraded() {
        let payload = AnalysisPayload::Structured(Map::new());
        assert!(!payload.is_degraded());
    }
}
