//! Intent classification
//!
//! Greetings and pleasantries are caught by a regex; everything else goes to
//! the completion backend with a few-shot prompt. Anything the backend says
//! outside the closed set becomes [`Intent::General`].
//!
//! # Example
//!
//! ```ignore
//! let classifier = IntentClassifier::new(llm);
//! let intent = classifier.classify("When will I get married?").await;
//! assert_eq!(intent, Intent::Timeline);
//! ```

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tara_config::constants::generation;
use tara_config::prompts::{INTENT_DEFINITIONS, INTENT_EXAMPLES};
use tara_core::{GenerateRequest, Intent, LanguageModel};

static GREETING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:hi|hello|hey|good\s+(?:morning|evening|night)|how\s+are\s+you|how'?s\s+it\s+going|bye|goodbye|see\s+you|what'?s\s+up|who\s+are\s+you|namaste|happy\s+(?:diwali|holi))\b",
    )
    .expect("greeting pattern is a valid regex")
});

/// Maps an English question to an [`Intent`]
pub struct IntentClassifier {
    llm: Arc<dyn LanguageModel>,
    max_tokens: u32,
}

impl IntentClassifier {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            llm,
            max_tokens: generation::CLASSIFIER_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// True for greetings and small talk
    pub fn is_greeting(question: &str) -> bool {
        GREETING.is_match(question)
    }

    /// Classify `question`; never fails
    pub async fn classify(&self, question: &str) -> Intent {
        if Self::is_greeting(question) {
            tracing::debug!("Greeting matched, skipping backend");
            return Intent::Conversation;
        }

        let request = GenerateRequest::prompt(Self::build_prompt(question))
            .with_max_tokens(self.max_tokens)
            .with_temperature(generation::CLASSIFIER_TEMPERATURE);

        match self.llm.generate(request).await {
            Ok(response) => {
                let intent = Intent::coerce(&response.text);
                tracing::debug!(raw = %response.text.trim(), intent = %intent, "Intent classified");
                intent
            }
            Err(e) => {
                tracing::warn!(error = %e, "Intent classification failed, using general");
                Intent::General
            }
        }
    }

    fn build_prompt(question: &str) -> String {
        let labels = Intent::all()
            .iter()
            .filter(|i| **i != Intent::General)
            .map(|i| i.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let examples = INTENT_EXAMPLES
            .iter()
            .map(|(q, label)| format!("Question: \"{}\"\nCategory: {}", q, label))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"Classify the question into exactly one category.

CATEGORIES:
{}

EXAMPLES:
{}

RULES:
1. Answer with one of: {}
2. Output ONLY the category name, nothing else

Question: "{}"
Category:"#,
            INTENT_DEFINITIONS, examples, labels, question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tara_core::{GenerateResponse, Result};

    struct ScriptedLlm {
        reply: Option<&'static str>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LanguageModel for ScriptedLlm {
        async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
            self.prompts
                .lock()
                .push(request.last_user_message().unwrap_or_default().to_string());
            self.reply
                .map(GenerateResponse::text)
                .ok_or_else(|| tara_core::Error::Llm("unavailable".into()))
        }

        async fn is_available(&self) -> bool {
            true
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    fn classifier(reply: Option<&'static str>) -> (IntentClassifier, Arc<ScriptedLlm>) {
        let llm = Arc::new(ScriptedLlm {
            reply,
            prompts: Mutex::new(Vec::new()),
        });
        (IntentClassifier::new(llm.clone()), llm)
    }

    #[test]
    fn test_greetings() {
        for text in [
            "Hello!",
            "hey there",
            "Good Morning",
            "how are you?",
            "How's it going",
            "Namaste",
            "happy diwali to you",
            "Who are you?",
        ] {
            assert!(IntentClassifier::is_greeting(text), "text: {}", text);
        }

        for text in [
            "Will I get the job?",
            "This is a high priority",
            "What should I do about my hiking trip?",
        ] {
            assert!(!IntentClassifier::is_greeting(text), "text: {}", text);
        }
    }

    #[tokio::test]
    async fn test_greeting_skips_backend() {
        let (classifier, llm) = classifier(Some("factual"));
        assert_eq!(classifier.classify("Good evening!").await, Intent::Conversation);
        assert!(llm.prompts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_backend_label() {
        let (classifier, llm) = classifier(Some(" Timeline.\n"));
        assert_eq!(
            classifier.classify("When will I get married?").await,
            Intent::Timeline
        );

        let prompts = llm.prompts.lock();
        assert!(prompts[0].contains("yes_no"));
        assert!(prompts[0].contains("Question: \"When will I get married?\""));
    }

    #[tokio::test]
    async fn test_unknown_label_is_general() {
        let (classifier, _) = classifier(Some("astrology"));
        assert_eq!(
            classifier.classify("What does my future hold?").await,
            Intent::General
        );
    }

    #[tokio::test]
    async fn test_backend_error_is_general() {
        let (classifier, _) = classifier(None);
        assert_eq!(
            classifier.classify("Should I move to a new city?").await,
            Intent::General
        );
    }
}
