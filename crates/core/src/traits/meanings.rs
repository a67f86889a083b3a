//! Card meaning lookup

use crate::Result;
use async_trait::async_trait;

/// Source of a card's semantic meaning
#[async_trait]
pub trait CardMeanings: Send + Sync + 'static {
    /// Meaning text for the named card, e.g. "The Tower"
    async fn meaning(&self, card: &str) -> Result<String>;
}
