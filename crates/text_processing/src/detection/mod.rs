//! Language detection
//!
//! Two detectors share one result type:
//! - [`PatternMatcher`]: offline script-range and lexical heuristics
//! - [`LanguageClassifier`]: asks the completion backend, falls back to the
//!   pattern matcher when the answer is unusable

mod classifier;
mod patterns;

pub use classifier::LanguageClassifier;
pub use patterns::PatternMatcher;

use serde::{Deserialize, Serialize};
use tara_core::Language;

/// Which detector produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionSource {
    /// Pattern matcher, asked directly
    Pattern,
    /// Validated completion-backend answer
    Backend,
    /// Pattern matcher after the backend answer was rejected
    Fallback,
}

impl DetectionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionSource::Pattern => "pattern",
            DetectionSource::Backend => "backend",
            DetectionSource::Fallback => "fallback",
        }
    }
}

/// Detected language with a confidence in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub language: Language,
    pub confidence: f32,
    pub source: DetectionSource,
}

impl DetectionResult {
    pub fn new(language: Language, confidence: f32, source: DetectionSource) -> Self {
        Self {
            language,
            confidence: confidence.clamp(0.0, 1.0),
            source,
        }
    }

    /// Same language and confidence, relabelled
    pub fn with_source(mut self, source: DetectionSource) -> Self {
        self.source = source;
        self
    }
}
