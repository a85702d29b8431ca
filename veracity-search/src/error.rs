//! Error types for the veracity-search crate.
//!
//! Every variant is scoped to a single operation (one search strategy, one
//! page fetch). The dispatch and evidence stages recover from all of them by
//! skipping the failed item, so none of these ever ends a fact-check run.

/// Errors that can occur while gathering evidence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A fetch exceeded its per-operation timeout and was cancelled.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// An HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A response or URL could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns true if this error came from the per-operation timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Convenience type alias for veracity-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
