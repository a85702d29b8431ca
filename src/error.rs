//! Error types for the veracity fact checker.

use crate::llm::LlmError;
use veracity_search::SearchError;

/// Top-level error type.
///
/// Only construction (config loading, client building) returns these to
/// callers. Inside a run they are converted into degraded verdicts.
#[derive(Debug, thiserror::Error)]
pub enum FactCheckError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Evidence-gathering error.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// The reasoning call failed.
    #[error("reasoning call failed: {0}")]
    Llm(#[from] LlmError),

    /// The reasoning reply could not be read as a verdict.
    #[error("could not parse reasoning output: {0}")]
    ReasoningParse(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, FactCheckError>;
