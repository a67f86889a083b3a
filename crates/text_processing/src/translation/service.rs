//! Detection-aware translation to and from English

use std::sync::Arc;

use serde::Serialize;
use tara_core::{Language, Translator};

use crate::detection::{DetectionResult, LanguageClassifier};
use crate::Transliterator;

/// A question after detection and translation
#[derive(Debug, Clone, Serialize)]
pub struct DetectedText {
    /// Input as given
    pub original: String,
    /// English text, or the original when translation was skipped or failed
    pub english: String,
    pub detection: DetectionResult,
}

/// Translation pipeline over a native-script backend
///
/// Backends never see a Romanized code. Failures degrade to the untranslated
/// text and are only logged.
pub struct TranslationService {
    classifier: LanguageClassifier,
    translator: Arc<dyn Translator>,
    transliterator: Transliterator,
    min_confidence: f32,
}

impl TranslationService {
    pub fn new(
        classifier: LanguageClassifier,
        translator: Arc<dyn Translator>,
        transliterator: Transliterator,
        min_confidence: f32,
    ) -> Self {
        Self {
            classifier,
            translator,
            transliterator,
            min_confidence,
        }
    }

    pub fn translator_name(&self) -> &str {
        self.translator.name()
    }

    /// Detect the language of `text` and translate it to English when
    /// the detection is confident enough
    pub async fn detect_and_translate(&self, text: &str) -> DetectedText {
        let detection = self.classifier.classify(text).await;

        let english = if detection.language != Language::English
            && detection.confidence > self.min_confidence
        {
            self.to_english(text, detection.language).await
        } else {
            text.to_string()
        };

        DetectedText {
            original: text.to_string(),
            english,
            detection,
        }
    }

    /// Translate `text` written in `detected` into English
    pub async fn to_english(&self, text: &str, detected: Language) -> String {
        if detected == Language::English {
            return text.to_string();
        }

        // Romanized input is sent under its native code
        let source = detected.native();

        match self.translator.translate(text, source, Language::English).await {
            Ok(english) => {
                tracing::debug!(
                    detected = detected.code(),
                    source = source.code(),
                    backend = self.translator.name(),
                    "Translated to English"
                );
                english
            }
            Err(e) => {
                tracing::warn!(
                    detected = detected.code(),
                    error = %e,
                    "Translation to English failed, using original text"
                );
                text.to_string()
            }
        }
    }

    /// Translate English `text` into `target`, romanizing afterwards for
    /// Romanized targets
    pub async fn from_english(&self, text: &str, target: Language) -> String {
        if target == Language::English {
            return text.to_string();
        }

        let native = target.native();
        let translated = match self.translator.translate(text, Language::English, native).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(
                    target = target.code(),
                    error = %e,
                    "Translation from English failed, returning English text"
                );
                return text.to_string();
            }
        };

        if target.is_romanized() {
            self.transliterator.romanize(&translated, target).await
        } else {
            translated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tara_config::DetectionConfig;
    use tara_core::{Error, GenerateRequest, GenerateResponse, LanguageModel, Result};

    /// Completion backend with a fixed reply
    struct FixedLlm(&'static str);

    #[async_trait]
    impl LanguageModel for FixedLlm {
        async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse> {
            Ok(GenerateResponse::text(self.0))
        }

        async fn is_available(&self) -> bool {
            true
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    /// Translator that records every pair it was asked for
    #[derive(Default)]
    struct RecordingTranslator {
        calls: Mutex<Vec<(Language, Language)>>,
        fail: bool,
    }

    #[async_trait]
    impl Translator for RecordingTranslator {
        async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String> {
            self.calls.lock().push((from, to));
            if self.fail {
                return Err(Error::Timeout(10_000));
            }
            Ok(format!("[{}->{}] {}", from.code(), to.code(), text))
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn service(
        detector_reply: &'static str,
        transliteration_reply: &'static str,
        translator: Arc<RecordingTranslator>,
    ) -> TranslationService {
        TranslationService::new(
            LanguageClassifier::new(Arc::new(FixedLlm(detector_reply)), DetectionConfig::default()),
            translator,
            Transliterator::new(Arc::new(FixedLlm(transliteration_reply))),
            0.3,
        )
    }

    #[tokio::test]
    async fn test_romanized_source_uses_native_code() {
        let translator = Arc::new(RecordingTranslator::default());
        let service = service("en", "", translator.clone());

        let english = service.to_english("mai aj kya kru?", Language::HindiRoman).await;
        assert_eq!(english, "[hi->en] mai aj kya kru?");
        assert_eq!(
            translator.calls.lock().as_slice(),
            &[(Language::Hindi, Language::English)]
        );
    }

    #[tokio::test]
    async fn test_romanized_target_goes_through_native_script() {
        let translator = Arc::new(RecordingTranslator::default());
        let service = service("en", "aaj achha din hai", translator.clone());

        let result = service.from_english("Today is a good day", Language::HindiRoman).await;
        assert_eq!(result, "aaj achha din hai");

        let calls = translator.calls.lock();
        assert_eq!(calls.as_slice(), &[(Language::English, Language::Hindi)]);
        assert!(calls.iter().all(|(f, t)| !f.is_romanized() && !t.is_romanized()));
    }

    #[tokio::test]
    async fn test_native_target_is_not_transliterated() {
        let translator = Arc::new(RecordingTranslator::default());
        let service = service("en", "SHOULD NOT APPEAR", translator);

        let result = service.from_english("Good luck", Language::Tamil).await;
        assert_eq!(result, "[en->ta] Good luck");
    }

    #[tokio::test]
    async fn test_english_is_identity() {
        let translator = Arc::new(RecordingTranslator::default());
        let service = service("en", "", translator.clone());

        assert_eq!(service.to_english("hello", Language::English).await, "hello");
        assert_eq!(service.from_english("hello", Language::English).await, "hello");
        assert!(translator.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_failures_degrade_to_input() {
        let translator = Arc::new(RecordingTranslator {
            fail: true,
            ..Default::default()
        });
        let service = service("en", "unused", translator);

        assert_eq!(service.to_english("नमस्ते", Language::Hindi).await, "नमस्ते");
        assert_eq!(
            service.from_english("Good luck", Language::GujaratiRoman).await,
            "Good luck"
        );
    }

    #[tokio::test]
    async fn test_detect_and_translate() {
        let translator = Arc::new(RecordingTranslator::default());
        let service = service("hi_rom", "", translator.clone());

        let detected = service.detect_and_translate("mai aj kya kru? bahut tension hai").await;
        assert_eq!(detected.detection.language, Language::HindiRoman);
        assert_eq!(detected.original, "mai aj kya kru? bahut tension hai");
        assert_eq!(detected.english, "[hi->en] mai aj kya kru? bahut tension hai");
    }

    #[tokio::test]
    async fn test_english_question_is_not_translated() {
        let translator = Arc::new(RecordingTranslator::default());
        let service = service("en", "", translator.clone());

        let detected = service.detect_and_translate("Will I find a new job this year?").await;
        assert_eq!(detected.detection.language, Language::English);
        assert_eq!(detected.english, "Will I find a new job this year?");
        assert!(translator.calls.lock().is_empty());
    }
}
