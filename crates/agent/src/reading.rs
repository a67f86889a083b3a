//! Reading Generator
//!
//! One terminal branch per intent:
//! - `factual`: fixed refusal, no backend call
//! - `conversation`: persona + history + question
//! - `timeline`: one numeric card with its date range
//! - everything else: a three-card spread from the full deck
//!
//! Failures while building the prompt or calling the backend come back as
//! [`ReadingError`]; the caller renders them as a visible error.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tara_config::{date_span, PromptsConfig, ReadingConfig, FULL_DECK, NUMERIC_CARDS};
use tara_core::{CardMeanings, GenerateRequest, Intent, Language, LanguageModel, ReadingResult};
use thiserror::Error;

use crate::context::ConversationTurn;
use crate::prompt::{history_transcript, reading_prompt, spread_draw, timeline_draw};

/// Placeholder when a card's meaning cannot be looked up
const MISSING_MEANING: &str = "No additional meaning is available for this card.";

#[derive(Error, Debug)]
pub enum ReadingError {
    #[error("{0}")]
    Backend(#[from] tara_core::Error),

    #[error("Completion backend returned an empty reading")]
    EmptyReply,

    #[error("No date range for card {0}")]
    MissingDateRange(String),

    #[error("Deck has fewer than {0} cards")]
    DeckTooSmall(usize),
}

/// Builds prompts per intent and shapes the backend's reply
pub struct ReadingGenerator {
    llm: Arc<dyn LanguageModel>,
    meanings: Arc<dyn CardMeanings>,
    prompts: PromptsConfig,
    config: ReadingConfig,
    rng: Mutex<StdRng>,
}

impl ReadingGenerator {
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        meanings: Arc<dyn CardMeanings>,
        prompts: PromptsConfig,
        config: ReadingConfig,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            llm,
            meanings,
            prompts,
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Produce a reading for an English `question`
    pub async fn generate(
        &self,
        question: &str,
        intent: Intent,
        history: &[ConversationTurn],
        language: Language,
    ) -> Result<ReadingResult, ReadingError> {
        self.generate_on(question, intent, history, language, Local::now().date_naive())
            .await
    }

    /// As [`generate`](Self::generate), resolving timeline dates against `today`
    pub async fn generate_on(
        &self,
        question: &str,
        intent: Intent,
        history: &[ConversationTurn],
        language: Language,
        today: NaiveDate,
    ) -> Result<ReadingResult, ReadingError> {
        if intent.is_spread() {
            return self.spread(question, history, language).await;
        }

        match intent {
            Intent::Factual => Ok(ReadingResult::Factual {
                refusal_text: self.prompts.factual_refusal.clone(),
            }),
            Intent::Timeline => self.timeline(question, history, language, today).await,
            _ => {
                let prompt = self.prompt(question, history, language, None);
                let interpretation = self.invoke(prompt).await?;
                Ok(ReadingResult::Conversation { interpretation })
            }
        }
    }

    async fn timeline(
        &self,
        question: &str,
        history: &[ConversationTurn],
        language: Language,
        today: NaiveDate,
    ) -> Result<ReadingResult, ReadingError> {
        let card = {
            let mut rng = self.rng.lock();
            let index = rng.gen_range(0..NUMERIC_CARDS.len());
            NUMERIC_CARDS[index].clone()
        };

        let date_range = date_span(&card)
            .and_then(|span| span.resolve(today))
            .ok_or_else(|| ReadingError::MissingDateRange(card.clone()))?;
        let meaning = self.meaning(&card).await;

        tracing::debug!(card = %card, start = %date_range.start(), end = %date_range.end(), "Timeline card drawn");

        let draw = timeline_draw(&card, &date_range.format_long(), &meaning);
        let prompt = self.prompt(question, history, language, Some(&draw));
        let interpretation = self.invoke(prompt).await?;

        Ok(ReadingResult::Timeline {
            card,
            date_range,
            interpretation,
        })
    }

    async fn spread(
        &self,
        question: &str,
        history: &[ConversationTurn],
        language: Language,
    ) -> Result<ReadingResult, ReadingError> {
        let cards = self.draw_three()?;

        let mut drawn = Vec::with_capacity(cards.len());
        for card in &cards {
            drawn.push((card.clone(), self.meaning(card).await));
        }

        tracing::debug!(cards = ?cards, "Spread drawn");

        let draw = spread_draw(&drawn);
        let prompt = self.prompt(question, history, language, Some(&draw));
        let interpretation = self.invoke(prompt).await?;

        Ok(ReadingResult::Spread {
            cards,
            interpretation,
        })
    }

    /// Three distinct cards, in draw order
    fn draw_three(&self) -> Result<[String; 3], ReadingError> {
        if FULL_DECK.len() < 3 {
            return Err(ReadingError::DeckTooSmall(3));
        }

        let mut rng = self.rng.lock();
        let picked = rand::seq::index::sample(&mut *rng, FULL_DECK.len(), 3);
        let mut cards = picked.iter().map(|i| FULL_DECK[i].clone());

        match (cards.next(), cards.next(), cards.next()) {
            (Some(a), Some(b), Some(c)) => Ok([a, b, c]),
            _ => Err(ReadingError::DeckTooSmall(3)),
        }
    }

    async fn meaning(&self, card: &str) -> String {
        match self.meanings.meaning(card).await {
            Ok(meaning) => meaning,
            Err(e) => {
                tracing::warn!(card = %card, error = %e, "Card meaning lookup failed");
                MISSING_MEANING.to_string()
            }
        }
    }

    fn prompt(
        &self,
        question: &str,
        history: &[ConversationTurn],
        language: Language,
        draw: Option<&str>,
    ) -> String {
        let hint = self
            .config
            .language_hint
            .then(|| self.prompts.language_hint_for(language.name()));
        let transcript = history_transcript(history, self.config.history_turns);

        reading_prompt(
            &self.prompts.persona,
            hint.as_deref(),
            &transcript,
            question,
            draw,
        )
    }

    async fn invoke(&self, prompt: String) -> Result<String, ReadingError> {
        let request = GenerateRequest::prompt(prompt)
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);

        let response = self.llm.generate(request).await?;
        let text = response.text.trim();
        if text.is_empty() {
            return Err(ReadingError::EmptyReply);
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use async_trait::async_trait;
    use tara_core::{Error, GenerateResponse, Result};

    use crate::meanings::BundledMeanings;

    struct ScriptedLlm {
        reply: Option<&'static str>,
        prompts: Mutex<Vec<GenerateRequest>>,
    }

    impl ScriptedLlm {
        fn new(reply: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn last_prompt(&self) -> String {
            self.prompts
                .lock()
                .last()
                .and_then(|r| r.last_user_message())
                .unwrap_or_default()
                .to_string()
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedLlm {
        async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
            self.prompts.lock().push(request);
            self.reply
                .map(GenerateResponse::text)
                .ok_or_else(|| Error::Llm("503 Service Unavailable".to_string()))
        }

        async fn is_available(&self) -> bool {
            true
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    struct NoMeanings;

    #[async_trait]
    impl CardMeanings for NoMeanings {
        async fn meaning(&self, _card: &str) -> Result<String> {
            Err(Error::Retrieval("index offline".to_string()))
        }
    }

    fn seeded(seed: u64) -> ReadingConfig {
        ReadingConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    fn generator(llm: Arc<ScriptedLlm>, seed: u64) -> ReadingGenerator {
        ReadingGenerator::new(
            llm,
            Arc::new(BundledMeanings),
            PromptsConfig::default(),
            seeded(seed),
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[tokio::test]
    async fn test_factual_skips_backend() {
        let llm = ScriptedLlm::new(Some("unused"));
        let result = generator(llm.clone(), 1)
            .generate("Who is the Prime Minister of India?", Intent::Factual, &[], Language::English)
            .await
            .unwrap();

        assert_eq!(
            result,
            ReadingResult::Factual {
                refusal_text: tara_config::prompts::FACTUAL_REFUSAL.to_string()
            }
        );
        assert!(llm.prompts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_conversation() {
        let llm = ScriptedLlm::new(Some("  Hello! The cards are ready when you are.  "));
        let result = generator(llm.clone(), 1)
            .generate("How are you?", Intent::Conversation, &[], Language::HindiRoman)
            .await
            .unwrap();

        assert_eq!(
            result,
            ReadingResult::Conversation {
                interpretation: "Hello! The cards are ready when you are.".to_string()
            }
        );

        let prompt = llm.last_prompt();
        assert!(prompt.starts_with("You are TarotTara"));
        assert!(prompt.contains("someone who speaks Romanized Hindi"));
        assert!(prompt.ends_with("User: \"How are you?\"\n\nAssistant:"));

        let requests = llm.prompts.lock();
        assert_eq!(requests[0].max_tokens, Some(3072));
        assert_eq!(requests[0].temperature, Some(0.7));
    }

    #[tokio::test]
    async fn test_timeline_draws_numeric_card_with_ordered_dates() {
        let llm = ScriptedLlm::new(Some("Expect movement soon."));

        for seed in 0..25 {
            let result = generator(llm.clone(), seed)
                .generate_on(
                    "When will I find a job?",
                    Intent::Timeline,
                    &[],
                    Language::English,
                    today(),
                )
                .await
                .unwrap();

            match result {
                ReadingResult::Timeline {
                    card, date_range, ..
                } => {
                    assert!(NUMERIC_CARDS.contains(&card), "{} is not numeric", card);
                    assert!(date_range.start() <= date_range.end());
                    assert!(date_range.end() >= today());
                }
                other => panic!("unexpected result {:?}", other),
            }
        }

        let prompt = llm.last_prompt();
        assert!(prompt.contains("You drew: "));
        assert!(prompt.contains("Meaning: "));
    }

    #[tokio::test]
    async fn test_spread_draws_three_distinct_cards_in_order() {
        let llm = ScriptedLlm::new(Some("A hopeful spread."));

        for seed in 0..25 {
            let result = generator(llm.clone(), seed)
                .generate("Will I be happy?", Intent::YesNo, &[], Language::English)
                .await
                .unwrap();

            let cards = match result {
                ReadingResult::Spread { cards, .. } => cards,
                other => panic!("unexpected result {:?}", other),
            };
            let unique: HashSet<_> = cards.iter().collect();
            assert_eq!(unique.len(), 3);
            assert!(cards.iter().all(|c| FULL_DECK.contains(c)));

            let prompt = llm.last_prompt();
            let first = prompt.find(&format!("1. {} — ", cards[0])).unwrap();
            let second = prompt.find(&format!("2. {} — ", cards[1])).unwrap();
            let third = prompt.find(&format!("3. {} — ", cards[2])).unwrap();
            assert!(first < second && second < third);
        }
    }

    #[tokio::test]
    async fn test_every_intent_reaches_its_branch() {
        for &intent in Intent::all() {
            let llm = ScriptedLlm::new(Some("reading"));
            let result = generator(llm, 7)
                .generate_on("What lies ahead?", intent, &[], Language::English, today())
                .await
                .unwrap();

            let branch_matches = match &result {
                ReadingResult::Spread { .. } => intent.is_spread(),
                ReadingResult::Timeline { .. } => intent == Intent::Timeline,
                ReadingResult::Factual { .. } => intent == Intent::Factual,
                ReadingResult::Conversation { .. } => intent == Intent::Conversation,
            };
            assert!(branch_matches, "intent {} gave {:?}", intent, result);
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_cards() {
        let a = generator(ScriptedLlm::new(Some("x")), 42)
            .generate("q", Intent::General, &[], Language::English)
            .await
            .unwrap();
        let b = generator(ScriptedLlm::new(Some("x")), 42)
            .generate("q", Intent::General, &[], Language::English)
            .await
            .unwrap();
        assert_eq!(a.cards(), b.cards());
    }

    #[tokio::test]
    async fn test_backend_failure_is_an_error() {
        let llm = ScriptedLlm::new(None);
        let err = generator(llm, 1)
            .generate("Will I pass?", Intent::YesNo, &[], Language::English)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("503 Service Unavailable"));
    }

    #[tokio::test]
    async fn test_empty_reply_is_an_error() {
        let llm = ScriptedLlm::new(Some("   "));
        let err = generator(llm, 1)
            .generate("Hello", Intent::Conversation, &[], Language::English)
            .await
            .unwrap_err();
        assert!(matches!(err, ReadingError::EmptyReply));
    }

    #[tokio::test]
    async fn test_missing_meanings_degrade_to_placeholder() {
        let llm = ScriptedLlm::new(Some("Still a reading."));
        let generator = ReadingGenerator::new(
            llm.clone(),
            Arc::new(NoMeanings),
            PromptsConfig::default(),
            seeded(3),
        );

        let result = generator
            .generate("Should I move?", Intent::Guidance, &[], Language::English)
            .await
            .unwrap();
        assert_eq!(result.interpretation(), "Still a reading.");
        assert_eq!(llm.last_prompt().matches(MISSING_MEANING).count(), 3);
    }

    #[tokio::test]
    async fn test_history_and_hint_toggle() {
        let llm = ScriptedLlm::new(Some("ok"));
        let config = ReadingConfig {
            language_hint: false,
            ..seeded(1)
        };
        let generator = ReadingGenerator::new(
            llm.clone(),
            Arc::new(BundledMeanings),
            PromptsConfig::default(),
            config,
        );
        let history = vec![ConversationTurn::new(
            "Hi",
            "Hi",
            Intent::Conversation,
            ReadingResult::Conversation {
                interpretation: "Welcome.".to_string(),
            },
        )];

        generator
            .generate("And now?", Intent::Conversation, &history, Language::Tamil)
            .await
            .unwrap();

        let prompt = llm.last_prompt();
        assert!(!prompt.contains("someone who speaks"));
        assert!(prompt.contains("User: Hi\nAssistant: Welcome.\n\nUser: \"And now?\""));
    }
}
