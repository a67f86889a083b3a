//! Bundled card meanings

use async_trait::async_trait;
use tara_config::keyword_meaning;
use tara_core::{CardMeanings, Error, Result};

/// Keyword meanings shipped with the deck
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledMeanings;

#[async_trait]
impl CardMeanings for BundledMeanings {
    async fn meaning(&self, card: &str) -> Result<String> {
        keyword_meaning(card).ok_or_else(|| Error::Retrieval(format!("unknown card: {}", card)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_and_unknown_cards() {
        let meanings = BundledMeanings;
        let tower = meanings.meaning("The Tower").await.unwrap();
        assert!(tower.starts_with("The Tower:"));

        let five = meanings.meaning("Five of Cups").await.unwrap();
        assert!(five.contains("emotions"));

        assert!(matches!(
            meanings.meaning("The Joker").await,
            Err(Error::Retrieval(_))
        ));
    }
}
