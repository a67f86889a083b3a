//! Translation
//!
//! Backends implement [`tara_core::Translator`] and only ever see
//! native-script codes. [`TranslationService`] sits above them and handles
//! the Romanized variants:
//! - to English: a Romanized source is sent as its native-script pair
//! - from English: a Romanized target is produced as native script, then
//!   romanized by the [`Transliterator`](crate::Transliterator)

mod google;
mod llm;
mod noop;
mod service;

pub use google::GoogleTranslator;
pub use llm::LlmTranslator;
pub use noop::NoopTranslator;
pub use service::{DetectedText, TranslationService};

use std::sync::Arc;
use std::time::Duration;

use tara_config::{TranslationConfig, TranslationProvider};
use tara_core::{LanguageModel, Translator};

/// Create translator based on config
pub fn create_translator(
    config: &TranslationConfig,
    llm: Arc<dyn LanguageModel>,
) -> Arc<dyn Translator> {
    match config.provider {
        TranslationProvider::Google => {
            let timeout = Duration::from_secs(config.timeout_seconds);
            match GoogleTranslator::new(&config.endpoint, timeout) {
                Ok(translator) => {
                    tracing::info!(endpoint = %config.endpoint, "Using Google translation");
                    Arc::new(translator)
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Failed to build Google translation client, falling back to the completion backend"
                    );
                    Arc::new(LlmTranslator::new(llm))
                }
            }
        }
        TranslationProvider::Llm => {
            tracing::info!(model = %llm.model_name(), "Using completion backend for translation");
            Arc::new(LlmTranslator::new(llm))
        }
        TranslationProvider::Disabled => {
            tracing::info!("Translation disabled");
            Arc::new(NoopTranslator)
        }
    }
}
