//! LLM Factory
//!
//! Builds the configured completion backend from `tara_config::LlmConfig`.
//!
//! ## Example
//! ```ignore
//! let settings = load_settings(None)?;
//! let llm = create_backend(&settings.llm)?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use tara_config::{LlmConfig, LlmProvider};
use tara_core::LanguageModel;

use crate::backend::{OllamaBackend, OllamaConfig, OpenAIBackend, OpenAIConfig};
use crate::LlmError;

/// Create the backend named by `config.provider`
pub fn create_backend(config: &LlmConfig) -> Result<Arc<dyn LanguageModel>, LlmError> {
    let timeout = Duration::from_secs(config.timeout_seconds);

    let backend: Arc<dyn LanguageModel> = match config.provider {
        LlmProvider::OpenAI => {
            let backend = OpenAIBackend::new(OpenAIConfig {
                endpoint: config.endpoint.clone(),
                api_key: config.resolved_api_key().unwrap_or_default(),
                model: config.model.clone(),
                timeout,
                ..Default::default()
            })?;
            Arc::new(backend)
        }
        LlmProvider::Ollama => {
            let backend = OllamaBackend::new(OllamaConfig {
                endpoint: config.endpoint.clone(),
                model: config.model.clone(),
                timeout,
                ..Default::default()
            })?;
            Arc::new(backend)
        }
    };

    tracing::info!(
        provider = ?config.provider,
        model = %backend.model_name(),
        endpoint = %config.endpoint,
        "Completion backend ready"
    );

    Ok(backend)
}
