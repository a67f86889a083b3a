//! Conversation Context
//!
//! Per-session, append-only history of asked questions and their readings.
//! The session owns its context; callers serialise access to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tara_core::{Intent, Language, ReadingResult};

/// One question and its reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Question as asked (stripped)
    pub question: String,
    /// English question sent to the reader
    pub translated_question: String,
    pub intent: Intent,
    pub result: ReadingResult,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(
        question: impl Into<String>,
        translated_question: impl Into<String>,
        intent: Intent,
        result: ReadingResult,
    ) -> Self {
        Self {
            question: question.into(),
            translated_question: translated_question.into(),
            intent,
            result,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered turns of one session
#[derive(Debug, Clone, Serialize)]
pub struct ConversationContext {
    language: Language,
    turns: Vec<ConversationTurn>,
    created_at: DateTime<Utc>,
}

impl ConversationContext {
    /// Empty context for the language the user selected
    pub fn new(language: Language) -> Self {
        Self {
            language,
            turns: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Turns in insertion order
    pub fn history(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn append(&mut self, turn: ConversationTurn) {
        tracing::trace!(turn = self.turns.len() + 1, intent = %turn.intent, "Context turn appended");
        self.turns.push(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new(Language::English)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(question: &str, answer: &str) -> ConversationTurn {
        ConversationTurn::new(
            question,
            question,
            Intent::Conversation,
            ReadingResult::Conversation {
                interpretation: answer.to_string(),
            },
        )
    }

    #[test]
    fn test_append_preserves_order() {
        let mut context = ConversationContext::new(Language::HindiRoman);
        assert!(context.is_empty());

        context.append(turn("first", "one"));
        context.append(turn("second", "two"));
        context.append(turn("third", "three"));

        let questions: Vec<_> = context.history().iter().map(|t| t.question.as_str()).collect();
        assert_eq!(questions, vec!["first", "second", "third"]);
        assert_eq!(context.len(), 3);
        assert_eq!(context.language(), Language::HindiRoman);
    }

    #[test]
    fn test_history_is_restartable() {
        let mut context = ConversationContext::default();
        context.append(turn("q", "a"));

        let first: Vec<_> = context.history().to_vec();
        let second: Vec<_> = context.history().to_vec();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }
}
