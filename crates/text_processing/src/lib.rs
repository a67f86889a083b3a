//! Multilingual text processing for the tarot assistant
//!
//! This crate provides:
//! - **Language detection**: offline pattern heuristics and a completion-backend
//!   classifier that falls back to them
//! - **Translation**: Google / completion-backend / pass-through backends behind
//!   a service that understands Romanized variants
//! - **Transliteration**: native script to everyday Latin spelling
//! - **Intent classification**: greeting shortcut plus few-shot classification
//!
//! # Example
//!
//! ```ignore
//! use tara_text_processing::{LanguageClassifier, TranslationService, Transliterator};
//!
//! let service = TranslationService::new(
//!     LanguageClassifier::new(llm.clone(), settings.detection.clone()),
//!     create_translator(&settings.translation, llm.clone()),
//!     Transliterator::new(llm.clone()),
//!     settings.translation.min_confidence,
//! );
//! let detected = service.detect_and_translate("mai aj kya kru?").await;
//! println!("{} -> {}", detected.detection.language, detected.english);
//! ```

pub mod detection;
pub mod intent;
pub mod translation;

mod error;
mod transliteration;

pub use error::{Result, TextProcessingError};

pub use detection::{DetectionResult, DetectionSource, LanguageClassifier, PatternMatcher};
pub use intent::IntentClassifier;
pub use translation::{
    create_translator, DetectedText, GoogleTranslator, LlmTranslator, NoopTranslator,
    TranslationService,
};
pub use transliteration::Transliterator;
