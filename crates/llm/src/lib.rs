//! Completion backends
//!
//! Features:
//! - OpenAI-compatible chat completions (Groq, OpenAI, vLLM, ...)
//! - Local Ollama inference
//! - Factory building the configured backend behind `tara_core::LanguageModel`
//!
//! Backends make exactly one HTTP round trip per call. Timeouts come from
//! the HTTP client; nothing is retried.

pub mod backend;
pub mod factory;

pub use backend::{OllamaBackend, OllamaConfig, OpenAIBackend, OpenAIConfig};
pub use factory::create_backend;

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for tara_core::Error {
    fn from(err: LlmError) -> Self {
        tara_core::Error::Llm(err.to_string())
    }
}
