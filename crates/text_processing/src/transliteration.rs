//! Native script → Romanized rendering via the completion backend

use std::sync::Arc;

use tara_config::constants::generation;
use tara_core::{GenerateRequest, Language, LanguageModel};

use crate::{Result, TextProcessingError};

/// Romanizes native-script text for the `_rom` language variants
pub struct Transliterator {
    llm: Arc<dyn LanguageModel>,
    max_tokens: u32,
    temperature: f32,
}

impl Transliterator {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            llm,
            max_tokens: generation::TRANSLITERATION_MAX_TOKENS,
            temperature: generation::TRANSLITERATION_TEMPERATURE,
        }
    }

    pub fn with_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    /// Render `native_text` in Latin letters for `target`.
    ///
    /// Never fails: backend errors, empty output, or a non-Romanized target
    /// return the input unchanged.
    pub async fn romanize(&self, native_text: &str, target: Language) -> String {
        match self.try_romanize(native_text, target).await {
            Ok(romanized) => romanized,
            Err(e) => {
                tracing::warn!(
                    target = target.code(),
                    error = %e,
                    "Transliteration failed, keeping native script"
                );
                native_text.to_string()
            }
        }
    }

    async fn try_romanize(&self, native_text: &str, target: Language) -> Result<String> {
        if native_text.trim().is_empty() {
            return Ok(native_text.to_string());
        }
        if !target.is_romanized() {
            return Err(TextProcessingError::Transliteration(format!(
                "{} is not a Romanized variant",
                target.code()
            )));
        }

        let request = GenerateRequest::prompt(Self::build_prompt(native_text, target))
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        let response = self.llm.generate(request).await?;
        let romanized = response.text.trim();

        if romanized.is_empty() {
            return Err(TextProcessingError::Transliteration(
                "backend returned no text".to_string(),
            ));
        }

        tracing::debug!(target = target.code(), chars = romanized.len(), "Transliterated");
        Ok(romanized.to_string())
    }

    fn build_prompt(native_text: &str, target: Language) -> String {
        let native = target.native();
        format!(
            r#"Convert the following {} text into {}.

RULES:
1. Keep the meaning exactly the same
2. Write it in Latin letters the way people type {} in everyday chat
3. Do not translate into English
4. Output ONLY the converted text, nothing else

TEXT:
{}"#,
            native.name(),
            target.name(),
            native.name(),
            native_text
        )
    }
}
