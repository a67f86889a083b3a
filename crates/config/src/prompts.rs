//! Prompt texts
//!
//! The persona and refusal texts can be overridden from a YAML file; the
//! classifier few-shot examples are fixed.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Reader persona prepended to every reading prompt
pub const PERSONA: &str = "You are TarotTara, a professional and empathic tarot reader.
You remember the last few messages and speak in a warm, respectful, and professional tone.
Maintain appropriate boundaries and avoid overly familiar terms like \"sweetie\", \"cutie\", \"dear\", or \"honey\".

Provide direct, clear, and actionable interpretations based on the cards drawn. Be specific about what the cards indicate rather than being vague or non-committal. When cards suggest positive outcomes, state them clearly. When cards indicate challenges, explain them directly and offer guidance.

Structure your response clearly:
1. Explain each card's meaning in relation to the question
2. Provide a clear interpretation of what the cards suggest
3. Give specific insights and guidance based on the reading

Keep responses focused and complete, avoiding overly long explanations that don't provide clear answers.";

/// Answer to factual questions
pub const FACTUAL_REFUSAL: &str =
    "Sorry, I cannot provide factual information at the moment. Please ask a tarot-related question.";

/// `{language}` is replaced with the asker's language name
pub const LANGUAGE_HINT: &str =
    "Please respond in a way that is suitable for someone who speaks {language}.";

/// Few-shot examples for language detection: (text, code).
///
/// Native-script and Romanized spellings of the same sentence sit side by
/// side so the model learns the distinction.
pub const LANGUAGE_EXAMPLES: &[(&str, &str)] = &[
    ("Hello, how are you?", "en"),
    ("नमस्ते, कैसे हो आप?", "hi"),
    ("mai aj kya kru?", "hi_rom"),
    ("मी आज काय करू?", "mr"),
    ("mi aaj kay karaycha?", "mr_rom"),
    ("আমি আজ কি করব?", "bn"),
    ("ami aaj ki korbo?", "bn_rom"),
    ("నేను ఈరోజు ఏమి చేయాలి?", "te"),
    ("naanu ee roju em cheyali?", "te_rom"),
    ("நான் இன்று என்ன செய்வேன்?", "ta"),
    ("naan inru enna seiven?", "ta_rom"),
    ("હું આજે શું કરું?", "gu"),
    ("hu aaje shu karish?", "gu_rom"),
    ("Hola, ¿cómo estás?", "es"),
    ("Bonjour, comment allez-vous?", "fr"),
];

/// Category definitions for intent classification
pub const INTENT_DEFINITIONS: &str = "\
- conversation: A friendly or casual question, such as greetings, well-wishes, or general inquiries (e.g., 'How are you?', 'Hello!', 'Good morning!', 'Good night', 'Good evening')
- yes_no: A question that can be answered with yes or no.
- factual: A direct factual query requesting verifiable information, such as dates, definitions, locations, or identities (e.g., 'Who is the Prime Minister of India?', 'What is today's date?').
- timeline: A question about when, how long, or timeframes.
- insight: A question asking for an explanation, reason, or deeper understanding.
- guidance: A question seeking advice, recommendation, or next steps.";

/// Few-shot examples for intent classification: (question, label)
pub const INTENT_EXAMPLES: &[(&str, &str)] = &[
    ("How are you?", "conversation"),
    ("Will I become an engineer?", "yes_no"),
    ("When will I become an engineer?", "timeline"),
    ("Why do people become engineers?", "insight"),
    ("What should I do to become an engineer?", "guidance"),
    ("Who is the Prime Minister of India?", "factual"),
    ("What is the capital of France?", "factual"),
    ("How many days are in a leap year?", "factual"),
    ("Hello there!", "conversation"),
];

/// Overridable prompt texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptsConfig {
    #[serde(default = "default_persona")]
    pub persona: String,

    #[serde(default = "default_factual_refusal")]
    pub factual_refusal: String,

    #[serde(default = "default_language_hint")]
    pub language_hint: String,
}

fn default_persona() -> String {
    PERSONA.to_string()
}

fn default_factual_refusal() -> String {
    FACTUAL_REFUSAL.to_string()
}

fn default_language_hint() -> String {
    LANGUAGE_HINT.to_string()
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            persona: default_persona(),
            factual_refusal: default_factual_refusal(),
            language_hint: default_language_hint(),
        }
    }
}

impl PromptsConfig {
    /// Load from a YAML file; missing keys keep the built-in texts
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|_| ConfigError::FileNotFound(path.as_ref().display().to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Language hint line for `language_name`
    pub fn language_hint_for(&self, language_name: &str) -> String {
        self.language_hint.replace("{language}", language_name)
    }
}
