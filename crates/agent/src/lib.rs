//! Tarot reading agent
//!
//! Features:
//! - Intent-routed reading generation (conversation, factual, timeline, spread)
//! - Exact-text response cache over a pluggable store
//! - Per-session conversation context fed back into prompts
//! - The end-to-end `ask` pipeline with detection and round-trip translation

pub mod assistant;
pub mod cache;
pub mod context;
pub mod format;
pub mod meanings;
pub mod prompt;
pub mod reading;

pub use assistant::{AskResponse, AskResult, TarotAssistant, Timing};
pub use cache::{InMemoryCacheStore, ResponseCache};
pub use context::{ConversationContext, ConversationTurn};
pub use format::result_text;
pub use meanings::BundledMeanings;
pub use reading::{ReadingError, ReadingGenerator};

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Question is empty")]
    EmptyQuestion,

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<tara_llm::LlmError> for AgentError {
    fn from(err: tara_llm::LlmError) -> Self {
        AgentError::Llm(err.to_string())
    }
}
