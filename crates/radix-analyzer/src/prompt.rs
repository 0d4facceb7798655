//! Prompt engineering for etymology analysis
//!
//! The prompt is Portuguese-language (the product serves a Portuguese
//! etymology tool) and demands a JSON object with a fixed key set so the
//! normalizer has a predictable shape to adopt.

/// Builds the instruction prompt for a single word
///
/// Pure and deterministic: the same word always produces the same prompt.
/// The word is pre-validated (non-empty, trimmed) by the caller.
pub struct PromptBuilder {
    word: String,
}

impl PromptBuilder {
    /// Create a new prompt builder for the given word
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }

    /// Build the complete analysis prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(ANALYSIS_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str(&format!("Palavra para analisar: \"{}\"\n\n", self.word));

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const ANALYSIS_INSTRUCTIONS: &str = r#"Analise a etimologia da palavra indicada em português, fornecendo:
1. Idioma e forma de origem
2. Evolução histórica e explicação etimológica
3. Morfologia (prefixo, radical, sufixo)
4. Uso moderno e palavras relacionadas
5. Um grau de confiança entre 0.0 e 1.0"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Responda APENAS com um objeto JSON válido, sem texto adicional, com exatamente estas chaves:
{
  "word": "a palavra analisada",
  "original_language": "idioma de origem",
  "original_form": "forma original da palavra",
  "etymology_explanation": "explicação da evolução histórica",
  "prefix": "prefixo ou null",
  "root": "radical",
  "suffix": "sufixo ou null",
  "modern_usage": "significado e uso atual",
  "related_words": ["palavras", "relacionadas"],
  "confidence_score": 0.0,
  "status": "completed"
}

Lembre-se: retorne SOMENTE o JSON, sem blocos de código markdown, sem explicações."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_word() {
        let prompt = PromptBuilder::new("filosofia").build();
        assert!(prompt.contains("\"filosofia\""));
    }

    #[test]
    fn test_prompt_includes_fixed_key_set() {
        let prompt = PromptBuilder::new("radix").build();
        for key in [
            "original_language",
            "original_form",
            "etymology_explanation",
            "prefix",
            "root",
            "suffix",
            "modern_usage",
            "related_words",
            "confidence_score",
            "status",
        ] {
            assert!(prompt.contains(key), "prompt missing key {}", key);
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = PromptBuilder::new("democracia").build();
        let b = PromptBuilder::new("democracia").build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_prompt_requests_json_only() {
        let prompt = PromptBuilder::new("vox").build();
        assert!(prompt.contains("SOMENTE o JSON"));
    }
}
