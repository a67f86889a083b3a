//! Text processing traits

use crate::{Language, Result};
use async_trait::async_trait;

/// Translation backend interface
///
/// Implementations:
/// - `GoogleTranslator` - public Google Translate web endpoint
/// - `LlmTranslator` - translation through the completion backend
/// - `NoopTranslator` - pass-through (disabled)
///
/// Backends only ever see native-script codes; Romanized variants are
/// handled by the translation service above them.
///
/// # Example
///
/// ```ignore
/// let translator = create_translator(&settings.translation, llm);
/// let english = translator.translate("मैं आज क्या करूँ?", Language::Hindi, Language::English).await?;
/// ```
#[async_trait]
pub trait Translator: Send + Sync + 'static {
    /// Translate text between languages
    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String>;

    /// Check if language pair is supported
    fn supports_pair(&self, from: Language, to: Language) -> bool {
        !from.is_romanized() && !to.is_romanized()
    }

    /// Get translator name for logging
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTranslator;

    #[async_trait]
    impl Translator for MockTranslator {
        async fn translate(&self, text: &str, _from: Language, _to: Language) -> Result<String> {
            Ok(format!("[Translated: {}]", text))
        }

        fn name(&self) -> &str {
            "mock-translator"
        }
    }

    #[tokio::test]
    async fn test_mock_translator() {
        let translator = MockTranslator;
        assert!(translator.supports_pair(Language::Hindi, Language::English));
        assert!(!translator.supports_pair(Language::English, Language::HindiRoman));

        let result = translator
            .translate("नमस्ते", Language::Hindi, Language::English)
            .await
            .unwrap();
        assert!(result.contains("Translated"));
    }
}
