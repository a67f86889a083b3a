//! Offline language heuristics
//!
//! Native scripts are recognised by Unicode block. Romanized Indian languages
//! share the Latin alphabet, so they are told apart by common function words
//! and verb endings. A few European languages are recognised by accents.

use once_cell::sync::Lazy;
use regex::Regex;
use tara_core::{Language, Script};

use super::{DetectionResult, DetectionSource};

/// Scripts in the order they are tested
const SCRIPT_PRIORITY: &[(Script, Language)] = &[
    (Script::Devanagari, Language::Hindi),
    (Script::Bengali, Language::Bengali),
    (Script::Telugu, Language::Telugu),
    (Script::Tamil, Language::Tamil),
    (Script::Gujarati, Language::Gujarati),
    (Script::Kannada, Language::Kannada),
    (Script::Malayalam, Language::Malayalam),
    (Script::Gurmukhi, Language::Punjabi),
    (Script::Odia, Language::Odia),
    (Script::Arabic, Language::Urdu),
    (Script::Sinhala, Language::Sinhala),
    (Script::Myanmar, Language::Myanmar),
    (Script::Thai, Language::Thai),
    (Script::Khmer, Language::Khmer),
    (Script::Lao, Language::Lao),
];

/// Word groups per Romanized language. Each group counts at most once.
///
/// English glosses are left out on purpose: a group like `name|naam` would
/// mark plain English as Romanized Hindi.
const LEXICONS: &[(Language, &[&str])] = &[
    (
        Language::HindiRoman,
        &[
            "mai|main|mein",
            "aj|aaj",
            "kya|kyaa",
            "kru|karu|karun|karoon",
            "hoon|hun",
            "hai|hain",
            "tha|thi",
            "hoga|hogi|honge",
            "kaise|kaisa|kaisi",
            "kahan|kaha",
            "kab",
            "kyun|kyu",
            "acha|accha|achha",
            "bura|buri",
            "naam",
            "ghar",
            "kaam",
            "dost",
            "pyar|prem",
            "shaadi|shadi",
            "naukri",
            "paise|paisa",
            "samay",
            "roz",
            "kal",
            "parso",
            "mujhe|mera|meri|mere",
            "nahi|nahin",
            "yeh|ye|woh|wo",
            "haal",
            "jaunga|jaungi|jana|jaana",
            "pasand",
        ],
    ),
    (
        Language::MarathiRoman,
        &[
            "mi|mee",
            "aaj",
            "kay|kaay",
            "[a-z]+ay(?:cha|chi|che)",
            "mala|mla",
            "aahe|ahe",
            "aahat|ahat",
            "kuthe",
            "jaat|jaato|jaate",
            "udya",
            "majha|majhi|maza",
            "tumhi",
            "kasa|kashi|kase",
            "hee",
        ],
    ),
    (
        Language::BengaliRoman,
        &[
            "ami|amra",
            "aj|aaj",
            "ki|kii",
            "korbo|korchi|koro|kori",
            "amar|amader",
            "nam",
            "kothay|kothai",
            "jaccho|jacchi|jabo",
            "kemon",
            "acho|achi|achen",
            "tumi|tomar",
            "bhalo",
            "ekhon",
            "keno",
        ],
    ),
    (
        Language::TeluguRoman,
        &[
            "naanu|nenu",
            "ee",
            "em|emi|enti",
            "chestha|chestunnav|cheyali|chesthanu",
            "naku|naaku",
            "pani",
            "kavali|kaavali",
            "ekkada",
            "veltunnavu|velthunnav|veltanu",
            "elaa|ela",
            "unnaru|unnav|unnanu",
            "meeru|nuvvu",
            "roju",
        ],
    ),
    (
        Language::TamilRoman,
        &[
            "naan",
            "inru|indru|innaikku",
            "enna",
            "seiven|seyyanum|panren|pannanum",
            "enakku|ennaku",
            "velai",
            "venum|vendum",
            "enge|engey",
            "poren|pogiren|porom",
            "eppadi|epdi",
            "irukkinga|irukeenga|iruken",
            "neenga",
            "illai|illa",
        ],
    ),
    (
        Language::GujaratiRoman,
        &[
            "hu",
            "shu",
            "karish|karvanu|karyu",
            "mari|maru|maro",
            "che|chhe",
            "cho|chho",
            "kem",
            "jao|javu|jaish",
            "tame|tamne",
            "aaje",
            "nathi",
            "saru",
        ],
    ),
];

/// Distinctive accented letters, tested in this order
const ACCENTS: &[(Language, &str)] = &[
    (Language::Spanish, "ñ¿¡áíóú"),
    (Language::French, "àâçèêëîïôœùûÿ"),
    (Language::German, "äöüß"),
    (Language::Portuguese, "ãõ"),
    (Language::Italian, "ìò"),
];

const SCRIPT_CONFIDENCE: f32 = 0.9;
const STRONG_RATIO: f32 = 0.25;
const WEAK_RATIO: f32 = 0.15;
const STRONG_CEILING: f32 = 0.85;
const WEAK_CEILING: f32 = 0.75;
const ACCENT_CONFIDENCE: f32 = 0.8;
const DEFAULT_CONFIDENCE: f32 = 0.5;

static COMPILED_LEXICONS: Lazy<Vec<(Language, Vec<Regex>)>> = Lazy::new(|| {
    LEXICONS
        .iter()
        .map(|(language, groups)| {
            let patterns = groups
                .iter()
                .map(|group| {
                    Regex::new(&format!(r"(?i)\b(?:{})\b", group))
                        .expect("lexicon patterns are valid regexes")
                })
                .collect();
            (*language, patterns)
        })
        .collect()
});

/// Fast, deterministic, offline language guess
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher;

impl PatternMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Guess the language of `text`
    pub fn detect(&self, text: &str) -> DetectionResult {
        let text = text.trim();
        if text.is_empty() {
            return self.result(Language::English, 0.0);
        }

        if let Some(language) = Self::detect_script(text) {
            return self.result(language, SCRIPT_CONFIDENCE);
        }

        if let Some((language, confidence)) = Self::detect_romanized(text) {
            return self.result(language, confidence);
        }

        if let Some(language) = Self::detect_accents(text) {
            return self.result(language, ACCENT_CONFIDENCE);
        }

        self.result(Language::English, DEFAULT_CONFIDENCE)
    }

    /// First native script, in priority order, with any character in `text`
    pub fn detect_script(text: &str) -> Option<Language> {
        SCRIPT_PRIORITY
            .iter()
            .find(|(script, _)| script.matches(text))
            .map(|(_, language)| *language)
    }

    /// Share of words matched by each Romanized lexicon, in lexicon order
    pub fn lexical_ratios(text: &str) -> Vec<(Language, f32)> {
        let word_count = text.split_whitespace().count().max(1) as f32;

        COMPILED_LEXICONS
            .iter()
            .map(|(language, patterns)| {
                let matches = patterns.iter().filter(|p| p.is_match(text)).count() as f32;
                (*language, (matches / word_count).min(1.0))
            })
            .collect()
    }

    fn detect_romanized(text: &str) -> Option<(Language, f32)> {
        let ratios = Self::lexical_ratios(text);

        // Strict comparison keeps the earlier language on ties
        let (best, ratio) = ratios.iter().fold(None, |best: Option<(Language, f32)>, &(l, r)| {
            match best {
                Some((_, br)) if br >= r => best,
                _ => Some((l, r)),
            }
        })?;

        if ratio > STRONG_RATIO {
            return Some((best, STRONG_CEILING.min(0.5 + ratio * 0.35)));
        }

        let contenders = ratios.iter().filter(|(_, r)| *r > WEAK_RATIO).count();
        if contenders >= 2 {
            return Some((best, WEAK_CEILING.min(0.5 + ratio * 0.35)));
        }

        None
    }

    fn detect_accents(text: &str) -> Option<Language> {
        let mut best: Option<(Language, usize)> = None;

        for (language, accents) in ACCENTS {
            let hits = text.chars().filter(|c| accents.contains(*c)).count();
            if hits == 0 {
                continue;
            }
            match best {
                Some((_, most)) if most >= hits => {}
                _ => best = Some((*language, hits)),
            }
        }

        best.map(|(language, _)| language)
    }

    fn result(&self, language: Language, confidence: f32) -> DetectionResult {
        DetectionResult::new(language, confidence, DetectionSource::Pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> DetectionResult {
        PatternMatcher::new().detect(text)
    }

    #[test]
    fn test_empty_input() {
        let result = detect("   ");
        assert_eq!(result.language, Language::English);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_native_scripts() {
        let cases = [
            ("मैं आज क्या करूं?", Language::Hindi),
            ("আমি আজ কি করব?", Language::Bengali),
            ("నేను ఈరోజు ఏమి చేయాలి?", Language::Telugu),
            ("நான் இன்று என்ன செய்வேன்?", Language::Tamil),
            ("હું આજે શું કરું?", Language::Gujarati),
            ("ನಾನು ಇಂದು ಏನು ಮಾಡಲಿ?", Language::Kannada),
            ("ഞാൻ ഇന്ന് എന്ത് ചെയ്യണം?", Language::Malayalam),
            ("ਮੈਂ ਅੱਜ ਕੀ ਕਰਾਂ?", Language::Punjabi),
            ("میں آج کیا کروں؟", Language::Urdu),
            ("สวัสดีครับ", Language::Thai),
        ];

        for (text, expected) in cases {
            let result = detect(text);
            assert_eq!(result.language, expected, "text: {}", text);
            assert!(result.confidence >= 0.9);
        }
    }

    #[test]
    fn test_marathi_native_reads_as_devanagari_hindi() {
        assert_eq!(detect("मी आज काय करू?").language, Language::Hindi);
    }

    #[test]
    fn test_romanized_languages() {
        let cases = [
            ("mai aj kya kru?", Language::HindiRoman),
            ("mujhe yeh pasand hai", Language::HindiRoman),
            ("kya haal hai dost?", Language::HindiRoman),
            ("main kal office jaunga", Language::HindiRoman),
            ("mi aaj kay karaycha?", Language::MarathiRoman),
            ("mala hee ghadaycha aahe", Language::MarathiRoman),
            ("mi udya office la jaat aahe", Language::MarathiRoman),
            ("ami aj ki korbo?", Language::BengaliRoman),
            ("amar nam ki?", Language::BengaliRoman),
            ("kemon acho?", Language::BengaliRoman),
            ("naanu ee em chestha?", Language::TeluguRoman),
            ("naku ee pani kavali", Language::TeluguRoman),
            ("elaa unnaru?", Language::TeluguRoman),
            ("naan inru enna seiven?", Language::TamilRoman),
            ("enakku ee velai venum", Language::TamilRoman),
            ("eppadi irukkinga?", Language::TamilRoman),
            ("hu aaj shu karish?", Language::GujaratiRoman),
            ("kem cho?", Language::GujaratiRoman),
        ];

        for (text, expected) in cases {
            let result = detect(text);
            assert_eq!(result.language, expected, "text: {}", text);
            assert!(
                (0.5..=0.85).contains(&result.confidence),
                "confidence {} for {}",
                result.confidence,
                text
            );
        }
    }

    #[test]
    fn test_mixed_romanized_prefers_hindi() {
        assert_eq!(detect("mai aaj kay karu?").language, Language::HindiRoman);
        assert_eq!(detect("mujhe kuthe jaana hai?").language, Language::HindiRoman);
    }

    #[test]
    fn test_full_match_hits_ceiling() {
        let result = detect("mai aj kya kru?");
        assert!((result.confidence - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_weak_match_needs_two_languages() {
        // hi_rom "kal" and mr_rom "mala", one word in five each
        let result = detect("kal mala office bus train");
        assert_eq!(result.language, Language::HindiRoman);
        assert!(result.confidence <= 0.75);
        assert!((result.confidence - 0.57).abs() < 1e-6);

        // A single weak language is not enough
        let result = detect("kal office bus train metro");
        assert_eq!(result.language, Language::English);
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn test_plain_english() {
        for text in [
            "Hello, how are you?",
            "What is your name?",
            "The time is right for my job",
            "I will go there tomorrow and see",
        ] {
            let result = detect(text);
            assert_eq!(result.language, Language::English, "text: {}", text);
            assert_eq!(result.confidence, 0.5);
        }
    }

    #[test]
    fn test_accents() {
        let cases = [
            ("Hola, ¿cómo estás?", Language::Spanish),
            ("Bonjour, ça va très bien", Language::French),
            ("Grüße aus München", Language::German),
            ("Não sei", Language::Portuguese),
            ("Così è la vita, però", Language::Italian),
        ];

        for (text, expected) in cases {
            let result = detect(text);
            assert_eq!(result.language, expected, "text: {}", text);
            assert_eq!(result.confidence, 0.8);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = detect("ami aj ki korbo?");
        let b = detect("ami aj ki korbo?");
        assert_eq!(a, b);
        assert_eq!(a.source, DetectionSource::Pattern);
    }

    #[test]
    fn test_lexical_ratios_order() {
        let ratios = PatternMatcher::lexical_ratios("kem cho?");
        let languages: Vec<_> = ratios.iter().map(|(l, _)| *l).collect();
        assert_eq!(languages[0], Language::HindiRoman);
        assert_eq!(languages[5], Language::GujaratiRoman);
        assert_eq!(ratios[5].1, 1.0);
    }
}
