//! Normalize raw model output into a canonical payload
//!
//! The model is asked for bare JSON but routinely wraps its answer in
//! markdown code fences or ignores the format entirely. Normalization
//! never fails: anything that does not parse as a JSON object becomes a
//! raw-text fallback payload, which is a degraded success, not an error.

use radix_domain::AnalysisPayload;
use serde_json::Value;
use tracing::debug;

/// Normalize a raw model response for the given word
///
/// Algorithm:
/// 1. trim the raw text
/// 2. strip a surrounding markdown code fence, if present
/// 3. attempt a strict JSON parse of the remainder
/// 4. a JSON object is adopted as the structured payload; anything else
///    (parse failure, or valid JSON that is not an object) falls back to
///    the raw-text payload carrying the trimmed response verbatim
///
/// Only the whole trimmed string is attempted; no fragment extraction
/// beyond the single fence strip.
pub fn normalize(word: &str, raw: &str) -> AnalysisPayload {
    let trimmed = raw.trim();
    let candidate = strip_code_fence(trimmed);

    match serde_json::from_str::<Value>(&candidate) {
        Ok(Value::Object(map)) => AnalysisPayload::Structured(map),
        Ok(other) => {
            debug!("Model returned valid JSON but not an object: {}", other);
            fallback(word, trimmed)
        }
        Err(e) => {
            debug!("Model response is not valid JSON: {}", e);
            fallback(word, trimmed)
        }
    }
}

fn fallback(word: &str, trimmed: &str) -> AnalysisPayload {
    AnalysisPayload::RawText {
        word: word.to_string(),
        explanation: trimmed.to_string(),
    }
}

/// Strip a surrounding markdown code fence, optionally tagged "json"
///
/// Wrapped means both delimiters are present: a leading fence line and a
/// bare closing fence line. Anything else is left intact so the strict
/// parse decides.
fn strip_code_fence(trimmed: &str) -> String {
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() < 2 || lines[lines.len() - 1] != "```" {
        return trimmed.to_string();
    }

    // Skip first line (```json or ```) and last line (```)
    lines[1..lines.len() - 1].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json_object() {
        let payload = normalize("radix", r#"{"word": "radix", "root": "radix"}"#);
        let value = payload.into_value();
        assert_eq!(value["word"], "radix");
        assert_eq!(value["status"], "completed");
    }

    #[test]
    fn test_fenced_json_with_tag() {
        let raw = "```json\n{\"word\":\"philosophiae\",\"status\":\"pending\"}\n```";
        let payload = normalize("philosophiae", raw);
        assert!(!payload.is_degraded());

        let value = payload.into_value();
        assert_eq!(
            value,
            json!({"word": "philosophiae", "status": "completed"})
        );
    }

    #[test]
    fn test_fenced_json_without_tag() {
        let raw = "```\n{\"word\": \"vox\"}\n```";
        let payload = normalize("vox", raw);
        assert!(!payload.is_degraded());
    }

    #[test]
    fn test_plain_text_falls_back() {
        let payload = normalize("xyzzy", "not a real analysis");
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
    fn test_fence_and_surrounding_whitespace() {
        let raw = "  \n```json\n{\"word\": \"lumen\"}\n```\n  ";
        let payload = normalize("lumen", raw);
        assert!(!payload.is_degraded());
    }

    #[test]
    fn test_empty_response_falls_back_with_empty_explanation() {
        let value = normalize("umbra", "   ").into_value();
        assert_eq!(value["word"], "umbra");
        assert_eq!(value["etymology_explanation"], "");
        assert_eq!(value["status"], "completed");
    }

    #[test]
    fn test_empty_code_block_falls_back() {
        let payload = normalize("nox", "```");
        assert!(payload.is_degraded());
    }

    #[test]
    fn test_unterminated_fence_with_trailing_text_falls_back() {
        // No closing fence means the text is not wrapped; nothing may be
        // discarded, and the inner JSON must not be adopted
        let raw = "```json\n{\"word\": \"lux\"}\nnote: unverified";
        let payload = normalize("lux", raw);
        assert!(payload.is_degraded());

        let value = payload.into_value();
        assert_eq!(value["etymology_explanation"], raw);
    }

    #[test]
    fn test_unterminated_fence_without_trailing_text_falls_back() {
        let raw = "```json\n{\"word\": \"lux\"}";
        let payload = normalize("lux", raw);
        assert!(payload.is_degraded());

        let value = payload.into_value();
        assert_eq!(value["etymology_explanation"], raw);
    }

    #[test]
    fn test_truncated_json_falls_back_verbatim() {
        let raw = r#"{"word": "cor", "root":"#;
        let value = normalize("cor", raw).into_value();
        assert_eq!(value["etymology_explanation"], raw);
    }

    #[test]
    fn test_json_array_is_not_adopted() {
        // Valid JSON, but there is no object to force a status field onto
        let payload = normalize("ars", r#"[1, 2, 3]"#);
        assert!(payload.is_degraded());
    }

    #[test]
    fn test_status_overwritten_not_merged() {
        let payload = normalize("via", r#"{"word": "via", "status": "failed"}"#);
        let value = payload.into_value();
        assert_eq!(value["status"], "completed");
    }

    #[test]
    fn test_multiple_fragments_not_extracted() {
        // Two JSON objects back to back are not valid JSON as a whole
        let raw = r#"{"word": "a"} {"word": "b"}"#;
        let payload = normalize("a", raw);
        assert!(payload.is_degraded());
    }

    #[test]
    fn test_strip_code_fence_passthrough() {
        assert_eq!(strip_code_fence(r#"{"k": 1}"#), r#"{"k": 1}"#);
    }

    #[test]
    fn test_strip_code_fence_multiline_body() {
        let raw = "```json\n{\n  \"k\": 1\n}\n```";
        assert_eq!(strip_code_fence(raw), "{\n  \"k\": 1\n}");
    }
}
