//! The question → reading pipeline
//!
//! strip → detect/translate → cache → (intent → reading → cache put)
//! → context append → result text → translate back.
//! Every step runs in order on one task; nothing is fanned out.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tara_config::{PromptsConfig, Settings};
use tara_core::{
    CacheStore, CachedReading, CardMeanings, Intent, Language, LanguageModel, ReadingResult,
    Translator,
};
use tara_text_processing::{
    create_translator, IntentClassifier, LanguageClassifier, TranslationService, Transliterator,
};

use crate::cache::{InMemoryCacheStore, ResponseCache};
use crate::context::{ConversationContext, ConversationTurn};
use crate::format::result_text;
use crate::meanings::BundledMeanings;
use crate::reading::ReadingGenerator;
use crate::AgentError;

/// Stage durations in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Timing {
    pub lang_detect_translate: f64,
    pub intent_classification: f64,
    pub prediction: f64,
    pub total: f64,
}

/// Reading or the error that replaced it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AskResult {
    Reading(CachedReading),
    Error { error: String },
}

impl AskResult {
    pub fn reading(&self) -> Option<&ReadingResult> {
        match self {
            AskResult::Reading(cached) => Some(&cached.result),
            AskResult::Error { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AskResult::Error { .. })
    }
}

/// Answer to one question
#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    pub detected_language: Language,
    pub confidence: f32,
    pub intent: Intent,
    pub result_text: String,
    pub result: AskResult,
    pub translated_question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_result: Option<String>,
    pub timing: Option<Timing>,
    pub from_cache: bool,
}

/// Multilingual tarot reader
pub struct TarotAssistant {
    translation: TranslationService,
    intents: IntentClassifier,
    reader: ReadingGenerator,
    cache: ResponseCache,
}

impl TarotAssistant {
    pub fn new(
        translation: TranslationService,
        intents: IntentClassifier,
        reader: ReadingGenerator,
        cache: ResponseCache,
    ) -> Self {
        Self {
            translation,
            intents,
            reader,
            cache,
        }
    }

    /// Build from settings with the configured completion and translation
    /// backends, bundled card meanings and an in-memory cache
    pub fn from_settings(settings: &Settings) -> Result<Self, AgentError> {
        let llm = tara_llm::create_backend(&settings.llm)?;
        let translator = create_translator(&settings.translation, llm.clone());
        let store: Arc<dyn CacheStore> = Arc::new(InMemoryCacheStore::from_config(&settings.cache));

        let prompts = match &settings.prompts_path {
            Some(path) => PromptsConfig::load(Path::new(path))
                .map_err(|e| AgentError::Configuration(e.to_string()))?,
            None => PromptsConfig::default(),
        };

        Ok(Self::with_backends(
            settings,
            prompts,
            llm,
            translator,
            store,
            Arc::new(BundledMeanings),
        ))
    }

    /// Build from settings around explicit collaborators
    pub fn with_backends(
        settings: &Settings,
        prompts: PromptsConfig,
        llm: Arc<dyn LanguageModel>,
        translator: Arc<dyn Translator>,
        store: Arc<dyn CacheStore>,
        meanings: Arc<dyn CardMeanings>,
    ) -> Self {
        let translation = TranslationService::new(
            LanguageClassifier::new(llm.clone(), settings.detection.clone()),
            translator,
            Transliterator::new(llm.clone()).with_sampling(
                settings.reading.transliteration_max_tokens,
                settings.reading.transliteration_temperature,
            ),
            settings.translation.min_confidence,
        );
        let intents =
            IntentClassifier::new(llm.clone()).with_max_tokens(settings.reading.intent_max_tokens);
        let reader = ReadingGenerator::new(llm, meanings, prompts, settings.reading.clone());
        let cache = if settings.cache.enabled {
            ResponseCache::new(store)
        } else {
            ResponseCache::disabled(store)
        };

        tracing::info!(
            translator = translation.translator_name(),
            cache_enabled = cache.is_enabled(),
            "Tarot assistant ready"
        );

        Self::new(translation, intents, reader, cache)
    }

    /// Answer `question`, recording the turn in `context`
    pub async fn ask(
        &self,
        question: &str,
        context: &mut ConversationContext,
    ) -> Result<AskResponse, AgentError> {
        let started = Instant::now();
        let question = question.trim();
        if question.is_empty() {
            return Err(AgentError::EmptyQuestion);
        }

        let t0 = Instant::now();
        let detected = self.translation.detect_and_translate(question).await;
        let lang_detect_translate = t0.elapsed().as_secs_f64();
        let language = detected.detection.language;

        let (intent, reading, timing) = match self.cache.get(question).await {
            Some(cached) => {
                tracing::debug!(intent = %cached.intent, "Cache hit");
                metrics::counter!("tara_cache_hits_total").increment(1);
                (cached.intent, cached.result, None)
            }
            None => {
                let t1 = Instant::now();
                let intent = self.intents.classify(&detected.english).await;
                let intent_classification = t1.elapsed().as_secs_f64();

                let t2 = Instant::now();
                let outcome = self
                    .reader
                    .generate(&detected.english, intent, context.history(), language)
                    .await;
                let prediction = t2.elapsed().as_secs_f64();

                let mut timing = Timing {
                    lang_detect_translate,
                    intent_classification,
                    prediction,
                    total: 0.0,
                };

                let reading = match outcome {
                    Ok(reading) => reading,
                    Err(e) => {
                        timing.total = started.elapsed().as_secs_f64();
                        tracing::error!(intent = %intent, error = %e, "Reading failed");
                        metrics::counter!("tara_reading_errors_total").increment(1);
                        Self::record(intent, timing.total);

                        let message = e.to_string();
                        return Ok(AskResponse {
                            detected_language: language,
                            confidence: detected.detection.confidence,
                            intent,
                            result_text: format!("Error: {}", message),
                            result: AskResult::Error { error: message },
                            translated_question: detected.english,
                            translated_result: None,
                            timing: Some(timing),
                            from_cache: false,
                        });
                    }
                };

                self.cache
                    .put(question, &CachedReading::new(intent, reading.clone()))
                    .await;
                (intent, reading, Some(timing))
            }
        };
        let from_cache = timing.is_none();

        context.append(ConversationTurn::new(
            question,
            detected.english.clone(),
            intent,
            reading.clone(),
        ));

        let text = result_text(&reading);
        let translated_result = if language != Language::English {
            Some(self.translation.from_english(&text, language).await)
        } else {
            None
        };

        let total = started.elapsed().as_secs_f64();
        let timing = timing.map(|t| Timing { total, ..t });
        Self::record(intent, total);

        tracing::info!(
            language = language.code(),
            intent = %intent,
            from_cache,
            total_secs = total,
            "Question answered"
        );

        Ok(AskResponse {
            detected_language: language,
            confidence: detected.detection.confidence,
            intent,
            result_text: text,
            result: AskResult::Reading(CachedReading::new(intent, reading)),
            translated_question: detected.english,
            translated_result,
            timing,
            from_cache,
        })
    }

    fn record(intent: Intent, seconds: f64) {
        metrics::counter!("tara_requests_total", "intent" => intent.as_str()).increment(1);
        metrics::histogram!("tara_request_duration_seconds").record(seconds);
    }
}
