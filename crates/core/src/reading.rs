//! Reading data model
//!
//! `ReadingResult` has exactly one populated variant per reading. Date ranges
//! travel as a pair of ISO-8601 calendar dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Intent;

/// Inclusive calendar span with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "(NaiveDate, NaiveDate)",
    into = "(NaiveDate, NaiveDate)"
)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Rejected range where the end precedes the start
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("date range end {end} is before start {start}")]
pub struct InvalidDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidDateRange> {
        if start > end {
            return Err(InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `March 21, 2026 – March 30, 2026`
    pub fn format_long(&self) -> String {
        format!(
            "{} – {}",
            self.start.format("%B %-d, %Y"),
            self.end.format("%B %-d, %Y")
        )
    }
}

impl TryFrom<(NaiveDate, NaiveDate)> for DateRange {
    type Error = InvalidDateRange;

    fn try_from((start, end): (NaiveDate, NaiveDate)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl From<DateRange> for (NaiveDate, NaiveDate) {
    fn from(range: DateRange) -> Self {
        (range.start, range.end)
    }
}

/// Structured outcome of a reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReadingResult {
    Conversation {
        interpretation: String,
    },
    Factual {
        refusal_text: String,
    },
    Timeline {
        card: String,
        date_range: DateRange,
        interpretation: String,
    },
    Spread {
        cards: [String; 3],
        interpretation: String,
    },
}

impl ReadingResult {
    /// Interpretation text; the refusal sentence for factual results.
    pub fn interpretation(&self) -> &str {
        match self {
            Self::Conversation { interpretation }
            | Self::Timeline { interpretation, .. }
            | Self::Spread { interpretation, .. } => interpretation,
            Self::Factual { refusal_text } => refusal_text,
        }
    }

    /// Cards drawn for this reading, in draw order
    pub fn cards(&self) -> Vec<&str> {
        match self {
            Self::Timeline { card, .. } => vec![card.as_str()],
            Self::Spread { cards, .. } => cards.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

/// What the response cache stores: the result with its intent folded in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedReading {
    pub intent: Intent,
    #[serde(flatten)]
    pub result: ReadingResult,
}

impl CachedReading {
    pub fn new(intent: Intent, result: ReadingResult) -> Self {
        Self { intent, result }
    }
}
