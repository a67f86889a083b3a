//! Centralized constants
//!
//! Single source of truth for endpoints and generation parameters used
//! as serde defaults in `settings` and by the backends.

/// Service endpoints
pub mod endpoints {
    /// Groq OpenAI-compatible API
    pub const GROQ_DEFAULT: &str = "https://api.groq.com/openai/v1";

    /// Ollama LLM endpoint
    pub const OLLAMA_DEFAULT: &str = "http://localhost:11434";

    /// Google Translate web endpoint
    pub const GOOGLE_TRANSLATE_DEFAULT: &str = "https://translate.googleapis.com/translate_a/single";
}

/// Model names
pub mod models {
    pub const GROQ_DEFAULT: &str = "llama-3.3-70b-versatile";
    pub const OLLAMA_DEFAULT: &str = "llama3";
}

/// Environment variables read outside the `TARA__` namespace
pub mod env {
    /// API key fallback for the completion backend
    pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
}

/// Timeouts (seconds)
pub mod timeouts {
    pub const LLM_REQUEST_SECS: u64 = 60;
    pub const TRANSLATION_SECS: u64 = 10;
    pub const HTTP_REQUEST_SECS: u64 = 120;
}

/// Sampling parameters per call site
pub mod generation {
    /// Language and intent classification: one short deterministic token
    pub const CLASSIFIER_MAX_TOKENS: u32 = 10;
    pub const CLASSIFIER_TEMPERATURE: f32 = 0.0;

    pub const READING_MAX_TOKENS: u32 = 3072;
    pub const READING_TEMPERATURE: f32 = 0.7;

    pub const TRANSLITERATION_MAX_TOKENS: u32 = 2048;
    pub const TRANSLITERATION_TEMPERATURE: f32 = 0.2;

    pub const TRANSLATION_MAX_TOKENS: u32 = 2048;
    pub const TRANSLATION_TEMPERATURE: f32 = 0.0;
}

/// Language detection
pub mod detection {
    /// Below this many characters the pattern matcher is tried first
    pub const SHORT_TEXT_CHARS: usize = 10;

    /// Pattern confidence that short-circuits the backend for short text
    pub const SHORT_TEXT_CONFIDENCE: f32 = 0.7;

    /// Detected language must beat this to be translated
    pub const MIN_TRANSLATION_CONFIDENCE: f32 = 0.3;
}

/// Response cache
pub mod cache {
    pub const TTL_SECS: u64 = 3600;
    pub const MAX_ENTRIES: usize = 1000;
}
