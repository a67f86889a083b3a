//! Core traits and types for the tarot reading assistant
//!
//! This crate provides foundational types used across all other crates:
//! - Language definitions, including Romanized variants
//! - Intent categories and the reading data model
//! - LLM request/response types
//! - Collaborator traits (completion backend, translator, cache store, card meanings)
//! - Error types

pub mod error;
pub mod intent;
pub mod language;
pub mod llm_types;
pub mod reading;
pub mod traits;

pub use error::{Error, Result};
pub use intent::Intent;
pub use language::{Language, Script, UnknownLanguage, ROMANIZATION_PAIRS};
pub use llm_types::{
    FinishReason, GenerateRequest, GenerateResponse, Message, Role, TokenUsage,
};
pub use reading::{CachedReading, DateRange, InvalidDateRange, ReadingResult};

pub use traits::{CacheStore, CardMeanings, LanguageModel, Translator};
