//! Translation through the completion backend

use std::sync::Arc;

use async_trait::async_trait;
use tara_config::constants::generation;
use tara_core::{Error, GenerateRequest, Language, LanguageModel, Result, Script, Translator};

/// Translator that prompts the completion backend
pub struct LlmTranslator {
    llm: Arc<dyn LanguageModel>,
    max_tokens: u32,
}

impl LlmTranslator {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            llm,
            max_tokens: generation::TRANSLATION_MAX_TOKENS,
        }
    }

    fn build_prompt(text: &str, from: Language, to: Language) -> String {
        let script_info = match to.script() {
            Script::Latin => format!("{} uses the LATIN ALPHABET.", to.name()),
            script => format!("{} uses the {:?} script, not Latin letters.", to.name(), script),
        };

        format!(
            r#"You are a professional translator. Translate the following text from {} to {}.

SCRIPT INFORMATION: {}

STRICT RULES:
- Provide an ACCURATE, LITERAL translation
- Use the CORRECT script as specified above
- Do NOT add interpretations or answer the text
- Output ONLY the translation, no explanations or notes
- NEVER prefix with 'Translation:' or similar

Text to translate:
{}"#,
            from.name(),
            to.name(),
            script_info,
            text
        )
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String> {
        if from == to || text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let request = GenerateRequest::prompt(Self::build_prompt(text, from, to))
            .with_max_tokens(self.max_tokens)
            .with_temperature(generation::TRANSLATION_TEMPERATURE);

        let response = self.llm.generate(request).await?;
        let translated = response.text.trim();

        if translated.is_empty() {
            return Err(Error::Translation("backend returned no text".to_string()));
        }

        Ok(translated.to_string())
    }

    fn name(&self) -> &str {
        "llm"
    }
}
