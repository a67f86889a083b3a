//! Core error type shared across crates

use thiserror::Error;

/// Errors raised by collaborators (completion backend, translation backend,
/// cache store, meanings source).
#[derive(Error, Debug)]
pub enum Error {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Meaning lookup error: {0}")]
    Retrieval(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

pub type Result<T> = std::result::Result<T, Error>;
