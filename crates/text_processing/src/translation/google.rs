//! Google Translate web endpoint (`client=gtx`)

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tara_core::{Error, Language, Result, Translator};

use crate::TextProcessingError;

/// Translator backed by the public `translate_a/single` endpoint
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl GoogleTranslator {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> std::result::Result<Self, TextProcessingError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TextProcessingError::Translation(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// Concatenate the sentence segments of a `translate_a/single` response.
    ///
    /// The body looks like `[[["Hello","नमस्ते",null,null,10],...],null,"hi",...]`.
    pub fn parse_response(body: &Value) -> Option<String> {
        let segments = body.get(0)?.as_array()?;
        let text: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn map_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.timeout.as_millis() as u64)
        } else {
            Error::Translation(err.to_string())
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String> {
        if from == to || text.trim().is_empty() {
            return Ok(text.to_string());
        }
        if !self.supports_pair(from, to) {
            return Err(TextProcessingError::UnsupportedPair {
                from: from.code().to_string(),
                to: to.code().to_string(),
            }
            .into());
        }

        tracing::debug!(from = from.code(), to = to.code(), chars = text.len(), "Google translate");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", from.code()),
                ("tl", to.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Translation(format!("HTTP {}", status)));
        }

        let body: Value = response.json().await.map_err(|e| self.map_error(e))?;

        Self::parse_response(&body)
            .ok_or_else(|| Error::Translation("empty translation in response".to_string()))
    }

    fn name(&self) -> &str {
        "google"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn translator() -> GoogleTranslator {
        GoogleTranslator::new("http://127.0.0.1:9/translate_a/single", Duration::from_millis(200))
            .unwrap()
    }

    #[test]
    fn test_parse_response_concatenates_segments() {
        let body = json!([
            [
                ["What should I do today? ", "मैं आज क्या करूं? ", null, null, 10],
                ["I am worried.", "मैं चिंतित हूं।", null, null, 10]
            ],
            null,
            "hi"
        ]);

        assert_eq!(
            GoogleTranslator::parse_response(&body).unwrap(),
            "What should I do today? I am worried."
        );
    }

    #[test]
    fn test_parse_response_rejects_unexpected_shapes() {
        assert!(GoogleTranslator::parse_response(&json!({"error": "bad"})).is_none());
        assert!(GoogleTranslator::parse_response(&json!([[]])).is_none());
        assert!(GoogleTranslator::parse_response(&json!([null])).is_none());
    }

    #[tokio::test]
    async fn test_same_language_is_identity() {
        let result = translator()
            .translate("hello", Language::English, Language::English)
            .await
            .unwrap();
        assert_eq!(result, "hello");
    }

    #[tokio::test]
    async fn test_romanized_codes_are_rejected() {
        let result = translator()
            .translate("hello", Language::English, Language::HindiRoman)
            .await;
        assert!(matches!(result, Err(Error::Translation(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_errors() {
        let result = translator()
            .translate("hello", Language::English, Language::Hindi)
            .await;
        assert!(result.is_err());
    }
}
