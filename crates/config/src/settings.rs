//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::constants::{cache, detection, endpoints, env, generation, models, timeouts};
use crate::ConfigError;
use tara_core::Language;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Completion backend
    #[serde(default)]
    pub llm: LlmConfig,

    /// Translation backend
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Language detection
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Reading generation
    #[serde(default)]
    pub reading: ReadingConfig,

    /// Response cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// YAML file overriding the persona and refusal texts
    #[serde(default)]
    pub prompts_path: Option<String>,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_llm()?;
        self.validate_translation()?;
        self.validate_detection()?;
        self.validate_reading()?;
        self.validate_cache()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        let server = &self.server;

        if server.port == 0 {
            return Err(invalid("server.port", "Port cannot be 0"));
        }

        if server.timeout_seconds == 0 {
            return Err(invalid(
                "server.timeout_seconds",
                "Timeout must be at least 1 second",
            ));
        }

        if server.max_sessions == 0 {
            return Err(invalid(
                "server.max_sessions",
                "Max sessions must be at least 1",
            ));
        }

        if self.environment.is_production() && server.cors_enabled && server.cors_origins.is_empty()
        {
            tracing::warn!(
                "CORS is enabled in production but no origins are configured. \
                 All origins will be allowed."
            );
        }

        Ok(())
    }

    fn validate_llm(&self) -> Result<(), ConfigError> {
        let llm = &self.llm;

        if llm.endpoint.trim().is_empty() {
            return Err(invalid("llm.endpoint", "Endpoint cannot be empty"));
        }

        if llm.model.trim().is_empty() {
            return Err(invalid("llm.model", "Model cannot be empty"));
        }

        if llm.timeout_seconds == 0 {
            return Err(invalid(
                "llm.timeout_seconds",
                "Timeout must be at least 1 second",
            ));
        }

        if llm.provider == LlmProvider::OpenAI && llm.resolved_api_key().is_none() {
            if self.environment.is_strict() {
                return Err(invalid(
                    "llm.api_key",
                    "API key must be set (or GROQ_API_KEY exported) outside development",
                ));
            }
            tracing::warn!("llm.api_key is not set; completion requests will be rejected");
        }

        Ok(())
    }

    fn validate_translation(&self) -> Result<(), ConfigError> {
        let translation = &self.translation;

        if translation.timeout_seconds == 0 {
            return Err(invalid(
                "translation.timeout_seconds",
                "Timeout must be at least 1 second",
            ));
        }

        unit_interval("translation.min_confidence", translation.min_confidence)
    }

    fn validate_detection(&self) -> Result<(), ConfigError> {
        let detection = &self.detection;

        unit_interval(
            "detection.short_text_confidence",
            detection.short_text_confidence,
        )?;

        for (code, threshold) in &detection.thresholds {
            if Language::from_code(code).is_none() {
                return Err(invalid(
                    &format!("detection.thresholds.{}", code),
                    "Unknown language code",
                ));
            }
            unit_interval(&format!("detection.thresholds.{}", code), *threshold)?;
        }

        Ok(())
    }

    fn validate_reading(&self) -> Result<(), ConfigError> {
        let reading = &self.reading;

        for (field, value) in [
            ("reading.temperature", reading.temperature),
            (
                "reading.transliteration_temperature",
                reading.transliteration_temperature,
            ),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(invalid(
                    field,
                    &format!("Must be between 0.0 and 2.0, got {}", value),
                ));
            }
        }

        if reading.max_tokens == 0 || reading.transliteration_max_tokens == 0 {
            return Err(invalid("reading.max_tokens", "Token budgets must be at least 1"));
        }

        Ok(())
    }

    fn validate_cache(&self) -> Result<(), ConfigError> {
        if self.cache.enabled && self.cache.max_entries == 0 {
            return Err(invalid(
                "cache.max_entries",
                "Must be at least 1 when the cache is enabled",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn unit_interval(field: &str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(
            field,
            &format!("Must be between 0.0 and 1.0, got {}", value),
        ));
    }
    Ok(())
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u64,

    /// Maximum live sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins (empty = any)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_http_timeout() -> u64 {
    timeouts::HTTP_REQUEST_SECS
}

fn default_max_sessions() -> usize {
    1000
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_http_timeout(),
            max_sessions: default_max_sessions(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Completion backend flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Any OpenAI-compatible chat completions API (Groq by default)
    #[default]
    #[serde(alias = "groq")]
    OpenAI,
    /// Local Ollama server
    Ollama,
}

/// Completion backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,

    /// Base URL; chat completions are posted below it
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Bearer token; falls back to `GROQ_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,
}

fn default_llm_endpoint() -> String {
    endpoints::GROQ_DEFAULT.to_string()
}

fn default_llm_model() -> String {
    models::GROQ_DEFAULT.to_string()
}

fn default_llm_timeout() -> u64 {
    timeouts::LLM_REQUEST_SECS
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            api_key: None,
            timeout_seconds: default_llm_timeout(),
        }
    }
}

impl LlmConfig {
    /// Configured key, else the `GROQ_API_KEY` environment variable
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(env::GROQ_API_KEY).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Translation backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    /// Google Translate web endpoint
    #[default]
    Google,
    /// The completion backend
    Llm,
    /// No translation
    Disabled,
}

/// Translation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default)]
    pub provider: TranslationProvider,

    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_translation_timeout")]
    pub timeout_seconds: u64,

    /// Detection confidence required before a question is translated
    #[serde(default = "default_min_translation_confidence")]
    pub min_confidence: f32,
}

fn default_translation_endpoint() -> String {
    endpoints::GOOGLE_TRANSLATE_DEFAULT.to_string()
}

fn default_translation_timeout() -> u64 {
    timeouts::TRANSLATION_SECS
}

fn default_min_translation_confidence() -> f32 {
    detection::MIN_TRANSLATION_CONFIDENCE
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            endpoint: default_translation_endpoint(),
            timeout_seconds: default_translation_timeout(),
            min_confidence: default_min_translation_confidence(),
        }
    }
}

/// Language detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Inputs shorter than this (in characters) try the pattern matcher first
    #[serde(default = "default_short_text_chars")]
    pub short_text_chars: usize,

    /// Pattern confidence needed to skip the backend for short inputs
    #[serde(default = "default_short_text_confidence")]
    pub short_text_confidence: f32,

    #[serde(default = "default_classifier_max_tokens")]
    pub max_tokens: u32,

    /// Per-code overrides of the minimum accepted confidence
    #[serde(default)]
    pub thresholds: HashMap<String, f32>,
}

fn default_short_text_chars() -> usize {
    detection::SHORT_TEXT_CHARS
}

fn default_short_text_confidence() -> f32 {
    detection::SHORT_TEXT_CONFIDENCE
}

fn default_classifier_max_tokens() -> u32 {
    generation::CLASSIFIER_MAX_TOKENS
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            short_text_chars: default_short_text_chars(),
            short_text_confidence: default_short_text_confidence(),
            max_tokens: default_classifier_max_tokens(),
            thresholds: HashMap::new(),
        }
    }
}

impl DetectionConfig {
    /// Minimum confidence accepted for `language`
    pub fn threshold_for(&self, language: Language) -> f32 {
        self.thresholds
            .get(language.code())
            .copied()
            .unwrap_or_else(|| language.default_detection_threshold())
    }
}

/// Reading generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingConfig {
    #[serde(default = "default_reading_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_reading_temperature")]
    pub temperature: f32,

    /// Most recent turns included in the prompt transcript
    #[serde(default = "default_history_turns")]
    pub history_turns: usize,

    /// Tell the model which language the asker uses
    #[serde(default = "default_true")]
    pub language_hint: bool,

    #[serde(default = "default_intent_max_tokens")]
    pub intent_max_tokens: u32,

    #[serde(default = "default_transliteration_max_tokens")]
    pub transliteration_max_tokens: u32,

    #[serde(default = "default_transliteration_temperature")]
    pub transliteration_temperature: f32,

    /// Fixed RNG seed for card draws (tests and demos)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_reading_max_tokens() -> u32 {
    generation::READING_MAX_TOKENS
}

fn default_reading_temperature() -> f32 {
    generation::READING_TEMPERATURE
}

fn default_history_turns() -> usize {
    10
}

fn default_intent_max_tokens() -> u32 {
    generation::CLASSIFIER_MAX_TOKENS
}

fn default_transliteration_max_tokens() -> u32 {
    generation::TRANSLITERATION_MAX_TOKENS
}

fn default_transliteration_temperature() -> f32 {
    generation::TRANSLITERATION_TEMPERATURE
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_reading_max_tokens(),
            temperature: default_reading_temperature(),
            history_turns: default_history_turns(),
            language_hint: true,
            intent_max_tokens: default_intent_max_tokens(),
            transliteration_max_tokens: default_transliteration_max_tokens(),
            transliteration_temperature: default_transliteration_temperature(),
            seed: None,
        }
    }
}

/// Response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Entry lifetime; 0 keeps entries until evicted
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,

    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

fn default_cache_ttl() -> u64 {
    cache::TTL_SECS
}

fn default_cache_max_entries() -> usize {
    cache::MAX_ENTRIES
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: default_cache_ttl(),
            max_entries: default_cache_max_entries(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Enable the Prometheus exporter
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from `config/` in the working directory
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from a configuration directory
///
/// Sources, later ones win: `<dir>/default.*`, `<dir>/<env>.*`, then
/// `TARA__SECTION__FIELD` environment variables.
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::from(dir.join("default")).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder = builder.add_source(File::from(dir.join(env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("TARA")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    // Validate
    settings.validate()?;

    Ok(settings)
}
