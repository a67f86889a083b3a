//! Collaborator traits
//!
//! Every external dependency of the reading pipeline sits behind one of
//! these traits so backends can be swapped by configuration and replaced
//! with mocks in tests.
//!
//! ```text
//! LanguageModel  - completion backend (detection, intent, readings, transliteration)
//! Translator     - translation backend
//! CacheStore     - key/value store behind the response cache
//! CardMeanings   - semantic meaning of a tarot card
//! ```

mod cache;
mod llm;
mod meanings;
mod text_processing;

pub use cache::CacheStore;
pub use llm::LanguageModel;
pub use meanings::CardMeanings;
pub use text_processing::Translator;
