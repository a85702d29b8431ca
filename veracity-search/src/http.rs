//! The reqwest client every search and page request goes through.
//!
//! One client is built per fetcher and reused for the whole run, so the
//! cookie jar and the chosen User-Agent stay stable across strategies.

use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::redirect::Policy;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Redirect hops followed before a request fails.
pub const MAX_REDIRECTS: usize = 10;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_ENGLISH: &str = "en-US,en;q=0.5";

/// Desktop browser identities; one is picked when no User-Agent is configured.
const BROWSER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0",
];

/// The User-Agent a client built from `config` sends.
///
/// A configured value wins; otherwise one of the built-in browser strings
/// is drawn at random.
pub fn user_agent_for(config: &SearchConfig) -> String {
    match config.user_agent.as_deref() {
        Some(custom) if !custom.trim().is_empty() => custom.to_owned(),
        _ => BROWSER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(BROWSER_AGENTS[0])
            .to_owned(),
    }
}

/// Headers a browser sends when asking for an HTML page in English.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_ENGLISH));
    headers
}

/// Build the shared client: cookie jar, browser headers, gzip and brotli,
/// at most [`MAX_REDIRECTS`] redirects.
///
/// No client-wide timeout is set. Each request carries its own.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the TLS backend cannot be initialised.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let agent = user_agent_for(config);
    tracing::debug!(user_agent = %agent, "building HTTP client");

    reqwest::Client::builder()
        .user_agent(agent)
        .default_headers(browser_headers())
        .cookie_store(true)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| SearchError::Http(format!("HTTP client setup failed: {e}")))
}
