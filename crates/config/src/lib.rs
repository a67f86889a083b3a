//! Configuration management for the tarot reading assistant
//!
//! Supports loading configuration from:
//! - TOML/YAML/JSON files (`config/default.*`, `config/<env>.*`)
//! - Environment variables (`TARA__` prefix, `__` separator)
//!
//! Also home to the static reading material: the tarot deck with its
//! timeline date spans and keyword meanings, and the prompt texts.

pub mod constants;
pub mod deck;
pub mod prompts;
pub mod settings;

pub use deck::{date_span, keyword_meaning, DateSpan, FULL_DECK, NUMERIC_CARDS};
pub use prompts::PromptsConfig;
pub use settings::{
    load_settings, load_settings_from, CacheConfig, DetectionConfig, LlmConfig, LlmProvider,
    ObservabilityConfig, ReadingConfig, RuntimeEnvironment, ServerConfig, Settings,
    TranslationConfig, TranslationProvider,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
