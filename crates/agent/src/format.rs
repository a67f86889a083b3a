//! Plain-text rendering of a reading

use tara_core::ReadingResult;

/// Text shown to the asker for `result`
pub fn result_text(result: &ReadingResult) -> String {
    match result {
        ReadingResult::Factual { refusal_text } => refusal_text.clone(),
        ReadingResult::Conversation { interpretation } => interpretation.clone(),
        ReadingResult::Timeline {
            card,
            date_range,
            interpretation,
        } => format!(
            "Card: {}\nTimeframe: {}\n\n{}",
            card,
            date_range.format_long(),
            interpretation
        ),
        ReadingResult::Spread {
            cards,
            interpretation,
        } => format!("Cards Drawn: {}\n\n{}", cards.join(", "), interpretation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tara_core::DateRange;

    #[test]
    fn test_timeline_text() {
        let result = ReadingResult::Timeline {
            card: "Four of Cups".to_string(),
            date_range: DateRange::new(
                NaiveDate::from_ymd_opt(2026, 7, 12).unwrap(),
                NaiveDate::from_ymd_opt(2026, 7, 21).unwrap(),
            )
            .unwrap(),
            interpretation: "Rest first.".to_string(),
        };

        assert_eq!(
            result_text(&result),
            "Card: Four of Cups\nTimeframe: July 12, 2026 – July 21, 2026\n\nRest first."
        );
    }

    #[test]
    fn test_spread_text() {
        let result = ReadingResult::Spread {
            cards: [
                "The Fool".to_string(),
                "Ace of Cups".to_string(),
                "The World".to_string(),
            ],
            interpretation: "A full circle.".to_string(),
        };

        assert_eq!(
            result_text(&result),
            "Cards Drawn: The Fool, Ace of Cups, The World\n\nA full circle."
        );
    }

    #[test]
    fn test_plain_variants() {
        let factual = ReadingResult::Factual {
            refusal_text: "Sorry.".to_string(),
        };
        let conversation = ReadingResult::Conversation {
            interpretation: "Hello!".to_string(),
        };
        assert_eq!(result_text(&factual), "Sorry.");
        assert_eq!(result_text(&conversation), "Hello!");
    }
}
