//! Language Model traits

use crate::{GenerateRequest, GenerateResponse, Result};
use async_trait::async_trait;

/// Language Model interface
///
/// Implementations:
/// - `OpenAIBackend` - OpenAI-compatible chat completions (Groq by default)
/// - `OllamaBackend` - Local Ollama inference
///
/// # Example
///
/// ```ignore
/// let llm: Arc<dyn LanguageModel> = create_backend(&settings.llm)?;
/// let request = GenerateRequest::prompt("Which language is this? mai aj kya kru?")
///     .with_max_tokens(10)
///     .with_temperature(0.0);
/// let response = llm.generate(request).await?;
/// println!("{}", response.text);
/// ```
#[async_trait]
pub trait LanguageModel: Send + Sync + 'static {
    /// Generate completion
    ///
    /// `max_tokens` and `temperature` on the request override the backend defaults.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Check if model is available
    ///
    /// Returns false if model is not loaded or backend is unavailable.
    async fn is_available(&self) -> bool;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}
