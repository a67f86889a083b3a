//! Reading prompt assembly

use crate::context::ConversationTurn;

/// Alternating `User:` / `Assistant:` transcript of the last `limit` turns.
///
/// Turns with an empty question or an empty interpretation are left out
/// whole, so the transcript always alternates.
pub fn history_transcript(turns: &[ConversationTurn], limit: usize) -> String {
    let start = turns.len().saturating_sub(limit);

    turns[start..]
        .iter()
        .filter(|turn| {
            !turn.question.trim().is_empty() && !turn.result.interpretation().trim().is_empty()
        })
        .flat_map(|turn| {
            [
                format!("User: {}", turn.question),
                format!("Assistant: {}", turn.result.interpretation()),
            ]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full reading prompt
///
/// ```text
/// <persona>
/// <language hint>
///
/// <transcript>
///
/// User: "<question>"
///
/// <draw>
///
/// Assistant:
/// ```
pub fn reading_prompt(
    persona: &str,
    language_hint: Option<&str>,
    transcript: &str,
    question: &str,
    draw: Option<&str>,
) -> String {
    let mut prompt = String::from(persona);
    if let Some(hint) = language_hint {
        prompt.push('\n');
        prompt.push_str(hint);
    }
    if !transcript.is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(transcript);
    }
    prompt.push_str(&format!("\n\nUser: \"{}\"", question));
    if let Some(draw) = draw {
        prompt.push_str("\n\n");
        prompt.push_str(draw);
    }
    prompt.push_str("\n\nAssistant:");
    prompt
}

/// Draw section for a timeline reading
pub fn timeline_draw(card: &str, dates: &str, meaning: &str) -> String {
    format!("You drew: {}  ({})\nMeaning: {}", card, dates, meaning)
}

/// Draw section for a three-card spread
pub fn spread_draw(cards: &[(String, String)]) -> String {
    let lines = cards
        .iter()
        .enumerate()
        .map(|(i, (card, meaning))| format!("{}. {} — {}", i + 1, card, meaning))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Cards drawn:\n{}", lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tara_core::{Intent, ReadingResult};

    fn turn(question: &str, interpretation: &str) -> ConversationTurn {
        ConversationTurn::new(
            question,
            question,
            Intent::Conversation,
            ReadingResult::Conversation {
                interpretation: interpretation.to_string(),
            },
        )
    }

    #[test]
    fn test_transcript_alternates_and_skips_empty_turns() {
        let turns = vec![
            turn("Hello", "Welcome, seeker."),
            turn("", "orphan answer"),
            turn("Will it rain?", ""),
            turn("Will I pass?", "The cards favour you."),
        ];

        assert_eq!(
            history_transcript(&turns, 10),
            "User: Hello\nAssistant: Welcome, seeker.\nUser: Will I pass?\nAssistant: The cards favour you."
        );
    }

    #[test]
    fn test_transcript_limit_keeps_latest() {
        let turns = vec![turn("one", "1"), turn("two", "2"), turn("three", "3")];
        assert_eq!(
            history_transcript(&turns, 2),
            "User: two\nAssistant: 2\nUser: three\nAssistant: 3"
        );
        assert_eq!(history_transcript(&turns, 0), "");
    }

    #[test]
    fn test_factual_turn_uses_refusal_text() {
        let turns = vec![ConversationTurn::new(
            "Capital of France?",
            "Capital of France?",
            Intent::Factual,
            ReadingResult::Factual {
                refusal_text: "Sorry.".to_string(),
            },
        )];
        assert_eq!(
            history_transcript(&turns, 10),
            "User: Capital of France?\nAssistant: Sorry."
        );
    }

    #[test]
    fn test_reading_prompt_shape() {
        let prompt = reading_prompt(
            "PERSONA",
            Some("HINT"),
            "User: a\nAssistant: b",
            "What now?",
            Some(&timeline_draw("Two of Cups", "March 1, 2026 – March 10, 2026", "love")),
        );

        assert_eq!(
            prompt,
            "PERSONA\nHINT\n\nUser: a\nAssistant: b\n\nUser: \"What now?\"\n\n\
             You drew: Two of Cups  (March 1, 2026 – March 10, 2026)\nMeaning: love\n\nAssistant:"
        );
    }

    #[test]
    fn test_reading_prompt_without_extras() {
        assert_eq!(
            reading_prompt("PERSONA", None, "", "Hi", None),
            "PERSONA\n\nUser: \"Hi\"\n\nAssistant:"
        );
    }

    #[test]
    fn test_spread_draw() {
        let draw = spread_draw(&[
            ("The Sun".to_string(), "joy".to_string()),
            ("The Moon".to_string(), "illusion".to_string()),
            ("The Star".to_string(), "hope".to_string()),
        ]);
        assert_eq!(
            draw,
            "Cards drawn:\n1. The Sun — joy\n2. The Moon — illusion\n3. The Star — hope"
        );
    }
}
