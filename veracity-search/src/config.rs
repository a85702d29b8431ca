//! Evidence-gathering configuration with sensible defaults.
//!
//! [`SearchConfig`] controls how many sources a run visits, the timeout for
//! each network operation and the delays between search attempts.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::backoff::BackoffPolicy;
use crate::error::SearchError;

/// Default cap on distinct sources visited per claim.
pub const DEFAULT_MAX_LINKS: usize = 3;

/// Configuration for one evidence-gathering run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of sources to fetch. The dispatcher over-collects
    /// twice this many candidates before selection.
    pub max_links: usize,
    /// Timeout for each search strategy and fallback probe, in seconds.
    pub search_timeout_seconds: u64,
    /// Timeout for each evidence page fetch, in seconds.
    pub fetch_timeout_seconds: u64,
    /// Delay schedule between search strategies.
    pub backoff: BackoffPolicy,
    /// Fixed delay before each fallback probe, in milliseconds.
    pub fallback_delay_ms: u64,
    /// Cap on cleaned characters kept per evidence source.
    pub max_evidence_chars: usize,
    /// Custom User-Agent string. If `None`, a realistic browser
    /// User-Agent is picked from a built-in rotation list.
    pub user_agent: Option<String>,
    /// Also run the top query through Google's general-result extractor,
    /// after the fixed strategy list. Off by default.
    pub general_search: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_links: DEFAULT_MAX_LINKS,
            search_timeout_seconds: 25,
            fetch_timeout_seconds: 30,
            backoff: BackoffPolicy::default(),
            fallback_delay_ms: 3_000,
            max_evidence_chars: crate::content::DEFAULT_MAX_CHARS,
            user_agent: None,
            general_search: false,
        }
    }
}

impl SearchConfig {
    /// Per-strategy timeout as a [`Duration`].
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_seconds)
    }

    /// Per-page timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }

    /// Fallback probe delay as a [`Duration`].
    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }

    /// Number of unique candidates after which dispatch stops early.
    pub fn collection_target(&self) -> usize {
        self.max_links.saturating_mul(2)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_links` must be greater than 0
    /// - both timeouts must be greater than 0
    /// - `max_evidence_chars` must be greater than 0
    /// - `backoff.initial_delay_ms` must be <= `backoff.max_delay_ms`
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_links == 0 {
            return Err(SearchError::Config(
                "max_links must be greater than 0".into(),
            ));
        }
        if self.search_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "search_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.fetch_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "fetch_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_evidence_chars == 0 {
            return Err(SearchError::Config(
                "max_evidence_chars must be greater than 0".into(),
            ));
        }
        if self.backoff.initial_delay_ms > self.backoff.max_delay_ms {
            return Err(SearchError::Config(
                "backoff initial delay must be <= max delay".into(),
            ));
        }
        Ok(())
    }
}
