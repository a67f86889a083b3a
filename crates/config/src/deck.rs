//! The tarot deck
//!
//! 78 cards: 22 Major Arcana plus four suits of fourteen. The 40 numeric
//! cards (Ace to Ten) carry a fixed month/day span used by timeline
//! readings: pip cards map to their astrological decan, Aces to the season
//! of their suit.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use tara_core::DateRange;

pub const MAJOR_ARCANA: [&str; 22] = [
    "The Fool",
    "The Magician",
    "The High Priestess",
    "The Empress",
    "The Emperor",
    "The Hierophant",
    "The Lovers",
    "The Chariot",
    "Strength",
    "The Hermit",
    "Wheel of Fortune",
    "Justice",
    "The Hanged Man",
    "Death",
    "Temperance",
    "The Devil",
    "The Tower",
    "The Star",
    "The Moon",
    "The Sun",
    "Judgement",
    "The World",
];

pub const SUITS: [&str; 4] = ["Wands", "Cups", "Swords", "Pentacles"];

pub const RANKS: [&str; 14] = [
    "Ace", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Page",
    "Knight", "Queen", "King",
];

/// Ace to Ten
const NUMERIC_RANKS: usize = 10;

/// All 78 cards, Major Arcana first, then each suit Ace to King
pub static FULL_DECK: Lazy<Vec<String>> = Lazy::new(|| {
    let mut deck: Vec<String> = MAJOR_ARCANA.iter().map(|c| c.to_string()).collect();
    for suit in SUITS {
        for rank in RANKS {
            deck.push(format!("{} of {}", rank, suit));
        }
    }
    deck
});

/// The 40 cards with a timeline span
pub static NUMERIC_CARDS: Lazy<Vec<String>> = Lazy::new(|| {
    SUITS
        .iter()
        .flat_map(|suit| {
            RANKS[..NUMERIC_RANKS]
                .iter()
                .map(move |rank| format!("{} of {}", rank, suit))
        })
        .collect()
});

/// Month/day span, possibly wrapping over New Year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    /// (month, day)
    pub start: (u32, u32),
    /// (month, day)
    pub end: (u32, u32),
}

impl DateSpan {
    const fn new(start: (u32, u32), end: (u32, u32)) -> Self {
        Self { start, end }
    }

    /// Whether the span ends in the calendar year after it starts
    pub fn wraps_year(&self) -> bool {
        self.end < self.start
    }

    /// Concrete dates for the span starting in `year`
    fn in_year(&self, year: i32) -> Option<DateRange> {
        let start = NaiveDate::from_ymd_opt(year, self.start.0, self.start.1)?;
        let end_year = if self.wraps_year() { year + 1 } else { year };
        let end = NaiveDate::from_ymd_opt(end_year, self.end.0, self.end.1)?;
        DateRange::new(start, end).ok()
    }

    /// The earliest occurrence whose end is on or after `today`.
    ///
    /// A span in progress resolves to the current occurrence.
    pub fn resolve(&self, today: NaiveDate) -> Option<DateRange> {
        (today.year() - 1..=today.year() + 1)
            .filter_map(|year| self.in_year(year))
            .find(|range| range.end() >= today)
    }
}

/// Decans per suit: Two/Three/Four, Five/Six/Seven, Eight/Nine/Ten
const WANDS_DECANS: [DateSpan; 9] = [
    // Aries
    DateSpan::new((3, 21), (3, 30)),
    DateSpan::new((3, 31), (4, 10)),
    DateSpan::new((4, 11), (4, 19)),
    // Leo
    DateSpan::new((7, 23), (8, 1)),
    DateSpan::new((8, 2), (8, 11)),
    DateSpan::new((8, 12), (8, 22)),
    // Sagittarius
    DateSpan::new((11, 22), (12, 1)),
    DateSpan::new((12, 2), (12, 11)),
    DateSpan::new((12, 12), (12, 21)),
];

const CUPS_DECANS: [DateSpan; 9] = [
    // Cancer
    DateSpan::new((6, 21), (7, 1)),
    DateSpan::new((7, 2), (7, 11)),
    DateSpan::new((7, 12), (7, 22)),
    // Scorpio
    DateSpan::new((10, 23), (11, 1)),
    DateSpan::new((11, 2), (11, 11)),
    DateSpan::new((11, 12), (11, 21)),
    // Pisces
    DateSpan::new((2, 19), (2, 28)),
    DateSpan::new((3, 1), (3, 10)),
    DateSpan::new((3, 11), (3, 20)),
];

const SWORDS_DECANS: [DateSpan; 9] = [
    // Libra
    DateSpan::new((9, 23), (10, 2)),
    DateSpan::new((10, 3), (10, 12)),
    DateSpan::new((10, 13), (10, 22)),
    // Aquarius
    DateSpan::new((1, 20), (1, 29)),
    DateSpan::new((1, 30), (2, 8)),
    DateSpan::new((2, 9), (2, 18)),
    // Gemini
    DateSpan::new((5, 21), (5, 31)),
    DateSpan::new((6, 1), (6, 10)),
    DateSpan::new((6, 11), (6, 20)),
];

const PENTACLES_DECANS: [DateSpan; 9] = [
    // Capricorn
    DateSpan::new((12, 22), (12, 30)),
    DateSpan::new((12, 31), (1, 9)),
    DateSpan::new((1, 10), (1, 19)),
    // Taurus
    DateSpan::new((4, 20), (4, 29)),
    DateSpan::new((4, 30), (5, 10)),
    DateSpan::new((5, 11), (5, 20)),
    // Virgo
    DateSpan::new((8, 23), (9, 1)),
    DateSpan::new((9, 2), (9, 11)),
    DateSpan::new((9, 12), (9, 22)),
];

/// Seasons for the Aces, in `SUITS` order
const ACE_SEASONS: [DateSpan; 4] = [
    DateSpan::new((3, 21), (6, 20)),
    DateSpan::new((6, 21), (9, 22)),
    DateSpan::new((9, 23), (12, 21)),
    DateSpan::new((12, 22), (3, 20)),
];

fn split_card(card: &str) -> Option<(usize, usize)> {
    let (rank, suit) = card.split_once(" of ")?;
    let rank = RANKS.iter().position(|r| *r == rank)?;
    let suit = SUITS.iter().position(|s| *s == suit)?;
    Some((rank, suit))
}

/// Timeline span for a numeric card; `None` for court cards and Major Arcana
pub fn date_span(card: &str) -> Option<DateSpan> {
    let (rank, suit) = split_card(card)?;
    match rank {
        0 => Some(ACE_SEASONS[suit]),
        1..=9 => {
            let decans = match suit {
                0 => &WANDS_DECANS,
                1 => &CUPS_DECANS,
                2 => &SWORDS_DECANS,
                _ => &PENTACLES_DECANS,
            };
            Some(decans[rank - 1])
        }
        _ => None,
    }
}

const MAJOR_MEANINGS: [&str; 22] = [
    "new beginnings, spontaneity, a leap of faith, innocence",
    "willpower, skill, manifestation, resourcefulness",
    "intuition, hidden knowledge, the subconscious, inner voice",
    "abundance, nurturing, fertility, creativity",
    "authority, structure, stability, leadership",
    "tradition, guidance, institutions, shared beliefs",
    "love, union, alignment of values, meaningful choices",
    "determination, control, victory through focus",
    "courage, patience, compassion, inner strength",
    "introspection, solitude, seeking inner truth",
    "cycles, destiny, turning points, change of fortune",
    "fairness, truth, cause and effect, accountability",
    "surrender, pause, seeing from a new perspective",
    "endings, transformation, clearing the way for the new",
    "balance, moderation, patience, finding the middle path",
    "attachment, temptation, restriction, shadow self",
    "sudden upheaval, revelation, collapse of false structures",
    "hope, renewal, inspiration, serenity",
    "illusion, uncertainty, dreams, the unconscious",
    "joy, success, vitality, clarity",
    "reflection, reckoning, awakening, an inner calling",
    "completion, fulfilment, integration, wholeness",
];

const RANK_MEANINGS: [&str; 14] = [
    "a new beginning and raw potential",
    "balance, partnership and a choice to be made",
    "growth, collaboration and early results",
    "stability, consolidation and a pause",
    "conflict, loss and challenge",
    "harmony restored, generosity and moving on",
    "assessment, perseverance and testing resolve",
    "movement, change and acceleration",
    "near completion, resilience and reward",
    "culmination, fulfilment and its burdens",
    "curiosity, news and a fresh message",
    "action, pursuit and momentum",
    "mature care, intuition and mastery held inward",
    "authority, control and mastery expressed outward",
];

const SUIT_DOMAINS: [&str; 4] = [
    "passion, ambition and creative drive",
    "emotions, relationships and intuition",
    "thought, communication and conflict",
    "money, work and the material world",
];

/// Keyword meaning for any card in the deck
pub fn keyword_meaning(card: &str) -> Option<String> {
    if let Some(index) = MAJOR_ARCANA.iter().position(|c| *c == card) {
        return Some(format!("{}: {}.", card, MAJOR_MEANINGS[index]));
    }
    let (rank, suit) = split_card(card)?;
    Some(format!(
        "{}: {} in matters of {}.",
        card, RANK_MEANINGS[rank], SUIT_DOMAINS[suit]
    ))
}
