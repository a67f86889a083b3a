//! Completion-backend language classifier

use std::sync::Arc;

use tara_config::constants::generation;
use tara_config::prompts::LANGUAGE_EXAMPLES;
use tara_config::DetectionConfig;
use tara_core::{GenerateRequest, Language, LanguageModel};

use super::{DetectionResult, DetectionSource, PatternMatcher};

/// Primary language detector
///
/// Asks the completion backend for one code from the closed set. The
/// backend's answer is validated; its confidence is estimated from the
/// input rather than trusted.
pub struct LanguageClassifier {
    llm: Arc<dyn LanguageModel>,
    patterns: PatternMatcher,
    config: DetectionConfig,
}

impl LanguageClassifier {
    pub fn new(llm: Arc<dyn LanguageModel>, config: DetectionConfig) -> Self {
        Self {
            llm,
            patterns: PatternMatcher::new(),
            config,
        }
    }

    /// Detect the language of `text`
    pub async fn classify(&self, text: &str) -> DetectionResult {
        let text = text.trim();

        if text.chars().count() < self.config.short_text_chars {
            let guess = self.patterns.detect(text);
            if guess.confidence > self.config.short_text_confidence {
                Self::log(&guess);
                return guess;
            }
        }

        let request = GenerateRequest::prompt(Self::build_prompt(text))
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(generation::CLASSIFIER_TEMPERATURE);

        let result = match self.llm.generate(request).await {
            Ok(response) => match Self::parse_code(&response.text) {
                Some(language) => {
                    let confidence = Self::heuristic_confidence(text, language);
                    let threshold = self.config.threshold_for(language);
                    if confidence >= threshold {
                        DetectionResult::new(language, confidence, DetectionSource::Backend)
                    } else {
                        tracing::debug!(
                            code = language.code(),
                            confidence,
                            threshold,
                            "Backend answer below threshold"
                        );
                        self.fallback(text)
                    }
                }
                None => {
                    tracing::debug!(raw = %response.text, "Backend returned an unknown language code");
                    self.fallback(text)
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Language detection backend failed");
                self.fallback(text)
            }
        };

        Self::log(&result);
        result
    }

    /// Estimated confidence for a validated backend answer, never above 1.0
    pub fn heuristic_confidence(text: &str, language: Language) -> f32 {
        let length = text.chars().count();
        let mut confidence: f32 = 0.6;

        if length > 50 {
            confidence += 0.2;
        } else if length > 20 {
            confidence += 0.1;
        }

        let mut unique: Vec<char> = text.chars().collect();
        unique.sort_unstable();
        unique.dedup();
        if unique.len() > 20 {
            confidence += 0.1;
        }

        if !language.is_romanized() && !language.uses_latin_script() {
            confidence += 0.1;
        }

        confidence.min(1.0)
    }

    /// Parse the backend's answer into a code from the closed set
    pub fn parse_code(raw: &str) -> Option<Language> {
        let cleaned = raw.trim().to_lowercase();
        let token = cleaned
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '_')
            .split_whitespace()
            .next()?;
        let token = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '_');
        Language::from_code(token)
    }

    fn build_prompt(text: &str) -> String {
        let codes = Language::all()
            .iter()
            .map(|l| format!("- {}: {}", l.code(), l.name()))
            .collect::<Vec<_>>()
            .join("\n");

        let examples = LANGUAGE_EXAMPLES
            .iter()
            .map(|(sample, code)| format!("\"{}\" -> {}", sample, code))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"Identify the language of the text below.

SUPPORTED CODES:
{}

Romanized codes (ending in _rom) mean the language is typed in Latin letters,
the way people write it in chat. The same sentence in native script gets the
plain code.

EXAMPLES:
{}

RULES:
1. Answer with exactly one code from the list
2. Output ONLY the code, nothing else

TEXT: "{}"
CODE:"#,
            codes, examples, text
        )
    }

    fn fallback(&self, text: &str) -> DetectionResult {
        self.patterns.detect(text).with_source(DetectionSource::Fallback)
    }

    fn log(result: &DetectionResult) {
        tracing::debug!(
            code = result.language.code(),
            confidence = result.confidence,
            source = result.source.as_str(),
            "Language detected"
        );
    }
}
