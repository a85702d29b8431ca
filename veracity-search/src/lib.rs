//! # veracity-search
//!
//! Evidence gathering for the veracity fact checker.
//!
//! This crate turns one claim into a small set of cleaned evidence pages.
//! It knows nothing about the reasoning step that consumes them.
//!
//! ## Design
//!
//! - Eight fixed query variants per claim, run in a fixed strategy order
//!   across DuckDuckGo, Bing and the search pages of fact-check sites
//! - Progressive backoff between strategies, a per-request timeout, and
//!   skip-and-continue on every failure
//! - Candidate links vetted by pluggable extraction rules, per-engine
//!   denylists and a trusted-domain allowlist
//! - Sources ranked by domain priority, then fetched, cleaned and gated
//!   by length
//! - Every network read goes through [`PageFetcher`], so whole runs can
//!   be replayed from canned responses
//!
//! ## Security
//!
//! - Claim and query text are logged only at trace level
//! - No network listeners; this is a library, not a server

pub mod backoff;
pub mod config;
pub mod content;
pub mod engine;
pub mod engines;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod links;
pub mod orchestrator;
pub mod trusted;
pub mod types;

pub use backoff::BackoffPolicy;
pub use config::SearchConfig;
pub use engine::EngineProfile;
pub use error::{Result, SearchError};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use orchestrator::dispatch::{dispatch, DispatchOutcome, StrategyAttempt, StrategyOutcome};
pub use orchestrator::evidence::{fetch_evidence, EvidenceOutcome};
pub use orchestrator::planner::generate_search_queries;
pub use orchestrator::select::select_sources;
pub use types::{CandidateLink, EvidenceSource, FetchedPage, SearchEngine, SearchStrategy};

/// Gather evidence for `claim`: plan queries, search, select and fetch.
///
/// Convenience wrapper that runs every stage in order and returns the
/// admitted evidence. Callers that need the intermediate results (the
/// candidate list, the selected links) call the stages directly.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid. Network failures
/// never surface here; they only shrink the evidence set.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> veracity_search::Result<()> {
/// let config = veracity_search::SearchConfig::default();
/// let fetcher = veracity_search::HttpFetcher::new(&config)?;
/// let evidence = veracity_search::gather_evidence("the earth is flat", &fetcher, &config).await?;
/// for source in &evidence {
///     println!("{}: {} chars", source.url, source.content.len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn gather_evidence<F: PageFetcher>(
    claim: &str,
    fetcher: &F,
    config: &SearchConfig,
) -> Result<Vec<EvidenceSource>> {
    config.validate()?;
    let queries = generate_search_queries(claim);
    let found = dispatch(claim, &queries, fetcher, config).await;
    let selected = select_sources(&found.links, config.max_links);
    Ok(fetch_evidence(&selected, fetcher, config).await.evidence)
}
