//! The page-fetching seam between the pipeline and the network.
//!
//! Every network read in a run goes through [`PageFetcher::fetch`]: search
//! strategies, fallback probes and evidence pages alike. Production code
//! uses [`HttpFetcher`]; tests substitute scripted fetchers so runs stay
//! deterministic.

use std::future::Future;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;

/// Fetches the body of a URL as text.
///
/// All implementations must be `Send + Sync` so one fetcher can serve
/// concurrent runs.
pub trait PageFetcher: Send + Sync {
    /// Fetch `url`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Timeout`] when `timeout` elapses and
    /// [`SearchError::Http`] for connection failures, non-success statuses
    /// and unreadable bodies.
    fn fetch(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, SearchError>> + Send;
}

/// Fetch through `fetcher`, enforcing `timeout` independently of the
/// fetcher's own handling.
///
/// Exceeding the timeout cancels only this call.
pub async fn fetch_with_timeout<F: PageFetcher>(
    fetcher: &F,
    url: &str,
    timeout: Duration,
) -> Result<String, SearchError> {
    match tokio::time::timeout(timeout, fetcher.fetch(url, timeout)).await {
        Ok(result) => result,
        Err(_) => Err(SearchError::Timeout(format!(
            "{url} exceeded {}s limit",
            timeout.as_secs()
        ))),
    }
}

/// [`PageFetcher`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the client settings from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the client cannot be constructed.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        http::build_client(config).map(Self::with_client)
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, SearchError> {
        tracing::trace!(url, "fetching");

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_request_error(url, e))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("{url}: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| map_request_error(url, e))?;

        tracing::trace!(url, bytes = body.len(), "response received");
        Ok(body)
    }
}

fn map_request_error(url: &str, err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::Timeout(format!("{url}: {err}"))
    } else {
        SearchError::Http(format!("{url}: {err}"))
    }
}
