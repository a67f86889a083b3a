//! Intent categories that drive the reading state machine

use serde::{Deserialize, Serialize};

/// Classified purpose of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Greetings, small talk, follow-ups
    Conversation,
    /// Question answerable with yes or no
    YesNo,
    /// Request for facts unrelated to a reading
    Factual,
    /// "When will ..." questions
    Timeline,
    /// Understanding a situation or person
    Insight,
    /// Advice on what to do
    Guidance,
    /// Anything else
    #[default]
    General,
}

impl Intent {
    /// Label used in prompts, logs and responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conversation => "conversation",
            Self::YesNo => "yes_no",
            Self::Factual => "factual",
            Self::Timeline => "timeline",
            Self::Insight => "insight",
            Self::Guidance => "guidance",
            Self::General => "general",
        }
    }

    /// Parse an exact label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|intent| intent.as_str() == label)
    }

    /// Parse a classifier reply; anything outside the set becomes `General`.
    pub fn coerce(raw: &str) -> Self {
        let label = raw
            .trim()
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '_')
            .to_lowercase();
        Self::from_label(&label).unwrap_or_default()
    }

    /// Whether this intent is answered with a three-card spread
    pub fn is_spread(&self) -> bool {
        matches!(
            self,
            Self::YesNo | Self::Insight | Self::Guidance | Self::General
        )
    }

    pub fn all() -> &'static [Intent] {
        &[
            Self::Conversation,
            Self::YesNo,
            Self::Factual,
            Self::Timeline,
            Self::Insight,
            Self::Guidance,
            Self::General,
        ]
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_valid_labels() {
        assert_eq!(Intent::coerce("timeline"), Intent::Timeline);
        assert_eq!(Intent::coerce("  YES_NO\n"), Intent::YesNo);
        assert_eq!(Intent::coerce("\"factual\"."), Intent::Factual);
    }

    #[test]
    fn test_coerce_unknown_is_general() {
        assert_eq!(Intent::coerce("astrology"), Intent::General);
        assert_eq!(Intent::coerce(""), Intent::General);
        assert_eq!(Intent::coerce("the intent is timeline"), Intent::General);
    }

    #[test]
    fn test_spread_intents() {
        assert!(Intent::General.is_spread());
        assert!(Intent::YesNo.is_spread());
        assert!(!Intent::Timeline.is_spread());
        assert!(!Intent::Conversation.is_spread());
        assert!(!Intent::Factual.is_spread());
    }

    #[test]
    fn test_serde_labels() {
        assert_eq!(serde_json::to_string(&Intent::YesNo).unwrap(), "\"yes_no\"");
        for intent in Intent::all() {
            let json = serde_json::to_string(intent).unwrap();
            assert_eq!(json.trim_matches('"'), intent.as_str());
        }
    }
}
