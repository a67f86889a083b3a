//! Error types for text processing

use thiserror::Error;

/// Text processing errors
#[derive(Error, Debug)]
pub enum TextProcessingError {
    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Transliteration error: {0}")]
    Transliteration(String),

    #[error("Unsupported language pair: {from} -> {to}")]
    UnsupportedPair { from: String, to: String },

    #[error("Backend error: {0}")]
    Backend(#[from] tara_core::Error),
}

pub type Result<T> = std::result::Result<T, TextProcessingError>;

impl From<TextProcessingError> for tara_core::Error {
    fn from(err: TextProcessingError) -> Self {
        match err {
            TextProcessingError::Backend(inner) => inner,
            other => tara_core::Error::Translation(other.to_string()),
        }
    }
}
