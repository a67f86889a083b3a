//! Language definitions
//!
//! Covers English, the major Indian languages, a handful of European and
//! South-East Asian languages, and the informal Romanized ("Hinglish"-style)
//! variants of six Indian languages. Every Romanized code pairs with exactly
//! one native-script code.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported language codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "hi_rom")]
    HindiRoman,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "bn_rom")]
    BengaliRoman,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "te_rom")]
    TeluguRoman,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "ta_rom")]
    TamilRoman,
    #[serde(rename = "mr")]
    Marathi,
    #[serde(rename = "mr_rom")]
    MarathiRoman,
    #[serde(rename = "gu")]
    Gujarati,
    #[serde(rename = "gu_rom")]
    GujaratiRoman,
    #[serde(rename = "kn")]
    Kannada,
    #[serde(rename = "ml")]
    Malayalam,
    #[serde(rename = "pa")]
    Punjabi,
    #[serde(rename = "or")]
    Odia,
    #[serde(rename = "as")]
    Assamese,
    #[serde(rename = "ur")]
    Urdu,
    #[serde(rename = "ne")]
    Nepali,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "vi")]
    Vietnamese,
    #[serde(rename = "id")]
    Indonesian,
    #[serde(rename = "ms")]
    Malay,
    #[serde(rename = "tl")]
    Filipino,
    #[serde(rename = "th")]
    Thai,
    #[serde(rename = "my")]
    Myanmar,
    #[serde(rename = "km")]
    Khmer,
    #[serde(rename = "lo")]
    Lao,
    #[serde(rename = "si")]
    Sinhala,
}

/// Romanized code → native-script code.
///
/// `native()`, `romanized()` and `is_romanized()` all read this table.
pub const ROMANIZATION_PAIRS: &[(Language, Language)] = &[
    (Language::HindiRoman, Language::Hindi),
    (Language::MarathiRoman, Language::Marathi),
    (Language::BengaliRoman, Language::Bengali),
    (Language::TeluguRoman, Language::Telugu),
    (Language::TamilRoman, Language::Tamil),
    (Language::GujaratiRoman, Language::Gujarati),
];

impl Language {
    /// Wire code (`en`, `hi`, `hi_rom`, ...)
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::HindiRoman => "hi_rom",
            Self::Bengali => "bn",
            Self::BengaliRoman => "bn_rom",
            Self::Telugu => "te",
            Self::TeluguRoman => "te_rom",
            Self::Tamil => "ta",
            Self::TamilRoman => "ta_rom",
            Self::Marathi => "mr",
            Self::MarathiRoman => "mr_rom",
            Self::Gujarati => "gu",
            Self::GujaratiRoman => "gu_rom",
            Self::Kannada => "kn",
            Self::Malayalam => "ml",
            Self::Punjabi => "pa",
            Self::Odia => "or",
            Self::Assamese => "as",
            Self::Urdu => "ur",
            Self::Nepali => "ne",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
            Self::Italian => "it",
            Self::Portuguese => "pt",
            Self::Vietnamese => "vi",
            Self::Indonesian => "id",
            Self::Malay => "ms",
            Self::Filipino => "tl",
            Self::Thai => "th",
            Self::Myanmar => "my",
            Self::Khmer => "km",
            Self::Lao => "lo",
            Self::Sinhala => "si",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::HindiRoman => "Romanized Hindi",
            Self::Bengali => "Bengali",
            Self::BengaliRoman => "Romanized Bengali",
            Self::Telugu => "Telugu",
            Self::TeluguRoman => "Romanized Telugu",
            Self::Tamil => "Tamil",
            Self::TamilRoman => "Romanized Tamil",
            Self::Marathi => "Marathi",
            Self::MarathiRoman => "Romanized Marathi",
            Self::Gujarati => "Gujarati",
            Self::GujaratiRoman => "Romanized Gujarati",
            Self::Kannada => "Kannada",
            Self::Malayalam => "Malayalam",
            Self::Punjabi => "Punjabi",
            Self::Odia => "Odia",
            Self::Assamese => "Assamese",
            Self::Urdu => "Urdu",
            Self::Nepali => "Nepali",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::German => "German",
            Self::Italian => "Italian",
            Self::Portuguese => "Portuguese",
            Self::Vietnamese => "Vietnamese",
            Self::Indonesian => "Indonesian",
            Self::Malay => "Malay",
            Self::Filipino => "Filipino",
            Self::Thai => "Thai",
            Self::Myanmar => "Myanmar",
            Self::Khmer => "Khmer",
            Self::Lao => "Lao",
            Self::Sinhala => "Sinhala",
        }
    }

    /// Script this code is written in.
    ///
    /// Romanized variants are Latin by definition.
    pub fn script(&self) -> Script {
        match self {
            Self::Hindi | Self::Marathi | Self::Nepali => Script::Devanagari,
            Self::Bengali | Self::Assamese => Script::Bengali,
            Self::Telugu => Script::Telugu,
            Self::Tamil => Script::Tamil,
            Self::Gujarati => Script::Gujarati,
            Self::Kannada => Script::Kannada,
            Self::Malayalam => Script::Malayalam,
            Self::Punjabi => Script::Gurmukhi,
            Self::Odia => Script::Odia,
            Self::Urdu => Script::Arabic,
            Self::Sinhala => Script::Sinhala,
            Self::Myanmar => Script::Myanmar,
            Self::Thai => Script::Thai,
            Self::Khmer => Script::Khmer,
            Self::Lao => Script::Lao,
            Self::English
            | Self::HindiRoman
            | Self::BengaliRoman
            | Self::TeluguRoman
            | Self::TamilRoman
            | Self::MarathiRoman
            | Self::GujaratiRoman
            | Self::Spanish
            | Self::French
            | Self::German
            | Self::Italian
            | Self::Portuguese
            | Self::Vietnamese
            | Self::Indonesian
            | Self::Malay
            | Self::Filipino => Script::Latin,
        }
    }

    /// True for the `_rom` codes
    pub fn is_romanized(&self) -> bool {
        self.romanized_source().is_some()
    }

    /// Native-script pair of a Romanized code; native codes map to themselves.
    pub fn native(&self) -> Language {
        self.romanized_source().unwrap_or(*self)
    }

    /// Romanized variant of a native code, if one is supported.
    pub fn romanized(&self) -> Option<Language> {
        ROMANIZATION_PAIRS
            .iter()
            .find(|(_, native)| native == self)
            .map(|(romanized, _)| *romanized)
    }

    fn romanized_source(&self) -> Option<Language> {
        ROMANIZATION_PAIRS
            .iter()
            .find(|(romanized, _)| romanized == self)
            .map(|(_, native)| *native)
    }

    /// Whether the language's own writing system is Latin.
    ///
    /// Romanized codes count as Latin: they are typed in Latin letters.
    pub fn uses_latin_script(&self) -> bool {
        self.script() == Script::Latin
    }

    /// Default minimum detection confidence before a fallback detector
    /// takes over.
    pub fn default_detection_threshold(&self) -> f32 {
        match self {
            Self::HindiRoman => 0.4,
            _ => 0.3,
        }
    }

    /// Parse an exact wire code (case-insensitive, surrounding whitespace ignored)
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        Self::all().iter().copied().find(|lang| lang.code() == code)
    }

    /// Every supported code
    pub fn all() -> &'static [Language] {
        &[
            Self::English,
            Self::Hindi,
            Self::HindiRoman,
            Self::Bengali,
            Self::BengaliRoman,
            Self::Telugu,
            Self::TeluguRoman,
            Self::Tamil,
            Self::TamilRoman,
            Self::Marathi,
            Self::MarathiRoman,
            Self::Gujarati,
            Self::GujaratiRoman,
            Self::Kannada,
            Self::Malayalam,
            Self::Punjabi,
            Self::Odia,
            Self::Assamese,
            Self::Urdu,
            Self::Nepali,
            Self::Spanish,
            Self::French,
            Self::German,
            Self::Italian,
            Self::Portuguese,
            Self::Vietnamese,
            Self::Indonesian,
            Self::Malay,
            Self::Filipino,
            Self::Thai,
            Self::Myanmar,
            Self::Khmer,
            Self::Lao,
            Self::Sinhala,
        ]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown language code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Writing systems the detector distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    Latin,
    Devanagari,
    Bengali,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Gujarati,
    Gurmukhi,
    Odia,
    Arabic,
    Sinhala,
    Myanmar,
    Thai,
    Khmer,
    Lao,
}

impl Script {
    /// Unicode block for this script (first block only)
    pub fn unicode_range(&self) -> (u32, u32) {
        match self {
            Self::Latin => (0x0000, 0x007F),
            Self::Devanagari => (0x0900, 0x097F),
            Self::Bengali => (0x0980, 0x09FF),
            Self::Gurmukhi => (0x0A00, 0x0A7F),
            Self::Gujarati => (0x0A80, 0x0AFF),
            Self::Odia => (0x0B00, 0x0B7F),
            Self::Tamil => (0x0B80, 0x0BFF),
            Self::Telugu => (0x0C00, 0x0C7F),
            Self::Kannada => (0x0C80, 0x0CFF),
            Self::Malayalam => (0x0D00, 0x0D7F),
            Self::Sinhala => (0x0D80, 0x0DFF),
            Self::Thai => (0x0E00, 0x0E7F),
            Self::Lao => (0x0E80, 0x0EFF),
            Self::Myanmar => (0x1000, 0x109F),
            Self::Khmer => (0x1780, 0x17FF),
            Self::Arabic => (0x0600, 0x06FF),
        }
    }

    /// Check if a character belongs to this script
    pub fn contains_char(&self, c: char) -> bool {
        let code = c as u32;
        let (start, end) = self.unicode_range();
        code >= start && code <= end
    }

    /// Check if any character of `text` belongs to this script
    pub fn matches(&self, text: &str) -> bool {
        text.chars().any(|c| self.contains_char(c))
    }
}
