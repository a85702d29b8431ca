//! Search dispatch: walk the strategy list, collect candidate links, and
//! fall back to direct fact-check site probes when nothing was found.
//!
//! Strategies run strictly one after another, with a backoff delay before
//! every strategy except the first. A failed or empty strategy is logged
//! and skipped; dispatch itself never fails.

use std::collections::HashSet;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::content::char_len;
use crate::engine::EngineProfile;
use crate::engines::direct::{DirectSite, FALLBACK_SITES, PRIMARY_SITES};
use crate::engines::{extractor_for, BingEngine, DuckDuckGoEngine, GoogleEngine};
use crate::error::SearchError;
use crate::fetcher::{fetch_with_timeout, PageFetcher};
use crate::types::{CandidateLink, SearchEngine, SearchStrategy};

/// Queries sent to the primary engine, taken from the front of the plan.
const PRIMARY_ENGINE_QUERIES: usize = 3;

/// Queries sent to the secondary engine, taken from the front of the plan.
const SECONDARY_ENGINE_QUERIES: usize = 2;

/// Site-restricted queries run on the primary engine after the direct sites.
const SITE_QUERY_TEMPLATES: &[&str] = &[
    "site:reuters.com fact check {}",
    "site:apnews.com fact check {}",
    "site:bbc.com fact check {}",
    "site:npr.org {}",
];

/// A direct site's search page must return more than this many characters
/// to count as a candidate.
pub const DIRECT_HIT_MIN_CHARS: usize = 100;

/// A fallback probe must return more than this many characters to count.
pub const FALLBACK_HIT_MIN_CHARS: usize = 200;

/// Fallback stops once this many probes have been accepted.
pub const FALLBACK_MAX_LINKS: usize = 2;

/// What happened when one strategy (or fallback probe) ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyOutcome {
    /// The page yielded this many links not seen before.
    Links(usize),
    /// The page was fetched but yielded nothing usable.
    NoLinks,
    /// A direct site's page was long enough to become a candidate itself.
    DirectHit,
    /// The fetch timed out or failed.
    Failed(SearchError),
}

/// One executed strategy and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyAttempt {
    pub strategy: SearchStrategy,
    pub outcome: StrategyOutcome,
}

/// Everything dispatch collected for one claim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Unique candidates in discovery order.
    pub links: Vec<CandidateLink>,
    /// Primary strategies in the order they ran.
    pub attempts: Vec<StrategyAttempt>,
    /// Whether the fallback phase ran.
    pub used_fallback: bool,
    /// Fallback probes in the order they ran.
    pub fallback_attempts: Vec<StrategyAttempt>,
}

/// Build the ordered strategy list for `claim`.
///
/// Order: the first three queries on DuckDuckGo, the first two on Bing, the
/// three primary fact-check site searches, then four site-restricted
/// DuckDuckGo queries.
pub fn build_strategies(claim: &str, queries: &[String]) -> Vec<SearchStrategy> {
    let claim = claim.trim();
    let mut strategies = Vec::with_capacity(
        PRIMARY_ENGINE_QUERIES
            + SECONDARY_ENGINE_QUERIES
            + PRIMARY_SITES.len()
            + SITE_QUERY_TEMPLATES.len(),
    );

    strategies.extend(
        queries
            .iter()
            .take(PRIMARY_ENGINE_QUERIES)
            .map(|q| DuckDuckGoEngine.strategy(q)),
    );
    strategies.extend(
        queries
            .iter()
            .take(SECONDARY_ENGINE_QUERIES)
            .map(|q| BingEngine.strategy(q)),
    );
    strategies.extend(PRIMARY_SITES.iter().map(|site| site.strategy(claim)));
    strategies.extend(
        SITE_QUERY_TEMPLATES
            .iter()
            .map(|template| DuckDuckGoEngine.strategy(&template.replacen("{}", claim, 1))),
    );

    strategies
}

/// Run the full search phase for `claim`: primary strategies, then the
/// fallback probes if no candidate was found.
pub async fn dispatch<F: PageFetcher>(
    claim: &str,
    queries: &[String],
    fetcher: &F,
    config: &SearchConfig,
) -> DispatchOutcome {
    let mut strategies = build_strategies(claim, queries);
    if config.general_search {
        if let Some(query) = queries.first() {
            strategies.push(GoogleEngine.strategy(query));
        }
    }
    let mut outcome = run_strategies(&strategies, fetcher, config).await;

    if outcome.links.is_empty() {
        tracing::info!("no candidates from search strategies, probing fallback sites");
        let (links, attempts) = run_fallback(claim, FALLBACK_SITES, fetcher, config).await;
        outcome.used_fallback = true;
        outcome.links = links;
        outcome.fallback_attempts = attempts;
    }

    tracing::info!(
        candidates = outcome.links.len(),
        fallback = outcome.used_fallback,
        "search phase complete"
    );
    outcome
}

/// Run `strategies` in order, stopping once the collection target is met.
pub async fn run_strategies<F: PageFetcher>(
    strategies: &[SearchStrategy],
    fetcher: &F,
    config: &SearchConfig,
) -> DispatchOutcome {
    let target = config.collection_target();
    let timeout = config.search_timeout();
    let mut seen: HashSet<String> = HashSet::new();
    let mut outcome = DispatchOutcome::default();

    for (index, strategy) in strategies.iter().enumerate() {
        if index > 0 {
            let attempt = u32::try_from(index).unwrap_or(u32::MAX);
            pause(config.backoff.delay_for_attempt(attempt)).await;
        }

        tracing::trace!(engine = %strategy.engine, query = %strategy.query, "running strategy");

        let result = match fetch_with_timeout(fetcher, &strategy.url, timeout).await {
            Ok(body) => absorb(strategy, &body, config.max_links, &mut seen, &mut outcome.links),
            Err(err) => {
                tracing::warn!(engine = %strategy.engine, error = %err, "strategy failed, skipping");
                StrategyOutcome::Failed(err)
            }
        };

        tracing::debug!(
            engine = %strategy.engine,
            outcome = ?result,
            total = outcome.links.len(),
            "strategy finished"
        );
        outcome.attempts.push(StrategyAttempt {
            strategy: strategy.clone(),
            outcome: result,
        });

        if outcome.links.len() >= target {
            tracing::debug!(target, "collection target reached, stopping early");
            break;
        }
    }

    outcome
}

/// Merge the links found in one strategy's page into `links`.
///
/// At most `per_page` links are taken from a single result page.
fn absorb(
    strategy: &SearchStrategy,
    body: &str,
    per_page: usize,
    seen: &mut HashSet<String>,
    links: &mut Vec<CandidateLink>,
) -> StrategyOutcome {
    if strategy.engine == SearchEngine::DirectSite {
        if char_len(body) > DIRECT_HIT_MIN_CHARS && seen.insert(strategy.url.clone()) {
            links.push(CandidateLink::new(&strategy.url, SearchEngine::DirectSite));
            return StrategyOutcome::DirectHit;
        }
        return StrategyOutcome::NoLinks;
    }

    let Some(extractor) = extractor_for(strategy.engine) else {
        return StrategyOutcome::NoLinks;
    };

    let mut added = 0;
    for link in extractor.extract(body, per_page) {
        if seen.insert(link.url.clone()) {
            links.push(link);
            added += 1;
        }
    }

    if added == 0 {
        StrategyOutcome::NoLinks
    } else {
        StrategyOutcome::Links(added)
    }
}

/// Probe `sites` directly, accepting a site's search page as a candidate
/// when it returns enough content.
///
/// Each probe waits [`SearchConfig::fallback_delay`] first. Stops after
/// [`FALLBACK_MAX_LINKS`] accepted pages.
pub async fn run_fallback<F: PageFetcher>(
    claim: &str,
    sites: &[DirectSite],
    fetcher: &F,
    config: &SearchConfig,
) -> (Vec<CandidateLink>, Vec<StrategyAttempt>) {
    let claim = claim.trim();
    let timeout = config.search_timeout();
    let mut links: Vec<CandidateLink> = Vec::new();
    let mut attempts = Vec::new();

    for site in sites {
        if links.len() >= FALLBACK_MAX_LINKS {
            break;
        }
        pause(config.fallback_delay()).await;

        let strategy = site.strategy(claim);
        let outcome = match fetch_with_timeout(fetcher, &strategy.url, timeout).await {
            Ok(body) if char_len(&body) > FALLBACK_HIT_MIN_CHARS => {
                if links.iter().any(|l| l.url == strategy.url) {
                    StrategyOutcome::NoLinks
                } else {
                    tracing::info!(site = site.name, "fallback probe accepted");
                    links.push(CandidateLink::new(&strategy.url, SearchEngine::DirectSite));
                    StrategyOutcome::DirectHit
                }
            }
            Ok(_) => StrategyOutcome::NoLinks,
            Err(err) => {
                tracing::warn!(site = site.name, error = %err, "fallback probe failed");
                StrategyOutcome::Failed(err)
            }
        };
        attempts.push(StrategyAttempt { strategy, outcome });
    }

    (links, attempts)
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backoff::BackoffPolicy;
    use crate::orchestrator::planner::generate_search_queries;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned bodies; unknown URLs answer with an empty page.
    #[derive(Default)]
    struct ScriptedFetcher {
        pages: HashMap<String, Result<String, SearchError>>,
        requests: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn with(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_owned(), Ok(body.to_owned()));
            self
        }

        fn failing(mut self, url: &str, err: SearchError) -> Self {
            self.pages.insert(url.to_owned(), Err(err));
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl PageFetcher for ScriptedFetcher {
        async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, SearchError> {
            self.requests.lock().unwrap().push(url.to_owned());
            self.pages.get(url).cloned().unwrap_or_else(|| Ok(String::new()))
        }
    }

    fn fast_config(max_links: usize) -> SearchConfig {
        SearchConfig {
            max_links,
            backoff: BackoffPolicy::none(),
            fallback_delay_ms: 0,
            ..Default::default()
        }
    }

    fn strategies_for(claim: &str) -> Vec<SearchStrategy> {
        build_strategies(claim, &generate_search_queries(claim))
    }

    #[test]
    fn strategy_order_matches_plan() {
        let strategies = strategies_for("the earth is flat");
        let engines: Vec<SearchEngine> = strategies.iter().map(|s| s.engine).collect();
        assert_eq!(
            engines,
            vec![
                SearchEngine::DuckDuckGo,
                SearchEngine::DuckDuckGo,
                SearchEngine::DuckDuckGo,
                SearchEngine::Bing,
                SearchEngine::Bing,
                SearchEngine::DirectSite,
                SearchEngine::DirectSite,
                SearchEngine::DirectSite,
                SearchEngine::DuckDuckGo,
                SearchEngine::DuckDuckGo,
                SearchEngine::DuckDuckGo,
                SearchEngine::DuckDuckGo,
            ]
        );
        assert_eq!(
            strategies[0].url,
            "https://duckduckgo.com/html/?q=%22the+earth+is+flat%22+fact+check"
        );
        assert_eq!(strategies[3].query, "\"the earth is flat\" fact check");
        assert_eq!(strategies[5].url, "https://www.snopes.com/search/the+earth+is+flat");
        assert_eq!(strategies[8].query, "site:reuters.com fact check the earth is flat");
        assert_eq!(strategies[11].query, "site:npr.org the earth is flat");
    }

    #[test]
    fn short_query_list_still_builds_site_strategies() {
        let strategies = build_strategies("x", &["only one".to_owned()]);
        assert_eq!(strategies.len(), 1 + 1 + 3 + 4);
    }

    #[tokio::test]
    async fn stops_once_twice_max_links_collected() {
        let strategies = strategies_for("claim");
        let first = "<a href=\"https://www.snopes.com/a\">a</a>\
                     <a href=\"https://www.snopes.com/b\">b</a>\
                     <a href=\"https://www.snopes.com/c\">c</a>";
        let second = "https://www.factcheck.org/c https://www.politifact.com/d \
                      https://apnews.com/article/e";
        let fetcher = ScriptedFetcher::default()
            .with(&strategies[0].url, first)
            .with(&strategies[1].url, second);

        let outcome = run_strategies(&strategies, &fetcher, &fast_config(2)).await;

        let urls: Vec<&str> = outcome.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.snopes.com/a",
                "https://www.snopes.com/b",
                "https://www.factcheck.org/c",
                "https://www.politifact.com/d",
            ]
        );
        assert_eq!(outcome.attempts.len(), 2);
        assert_eq!(outcome.attempts[0].outcome, StrategyOutcome::Links(2));
        assert_eq!(outcome.attempts[1].outcome, StrategyOutcome::Links(2));
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[tokio::test]
    async fn one_crowded_page_does_not_end_the_search() {
        let strategies = strategies_for("claim");
        let crowded: String = (0..6)
            .map(|i| format!("https://www.snopes.com/fact-check/claim-{i}/ "))
            .collect();
        let fetcher = ScriptedFetcher::default()
            .with(&strategies[0].url, &crowded)
            .with(
                &strategies[1].url,
                "https://www.factcheck.org/2024/claim/ https://www.politifact.com/claim/",
            );

        let outcome = run_strategies(&strategies, &fetcher, &fast_config(3)).await;

        assert_eq!(outcome.attempts[0].outcome, StrategyOutcome::Links(3));
        assert_eq!(outcome.attempts[1].outcome, StrategyOutcome::Links(2));
        assert_eq!(fetcher.requests()[1], strategies[1].url);

        let selected = crate::orchestrator::select::select_sources(&outcome.links, 3);
        let hosts: Vec<&str> = selected
            .iter()
            .map(|l| l.url.split('/').nth(2).unwrap_or_default())
            .collect();
        assert_eq!(hosts, vec!["www.factcheck.org", "www.snopes.com", "www.politifact.com"]);
    }

    #[tokio::test]
    async fn failures_are_skipped_and_later_strategies_run() {
        let strategies = strategies_for("claim");
        let fetcher = ScriptedFetcher::default()
            .failing(&strategies[0].url, SearchError::Timeout("slow".into()))
            .failing(&strategies[1].url, SearchError::Http("502".into()))
            .with(&strategies[2].url, "see https://apnews.com/article/claim-check");

        let outcome = run_strategies(&strategies, &fetcher, &fast_config(3)).await;

        assert_eq!(outcome.links.len(), 1);
        assert_eq!(outcome.links[0].url, "https://apnews.com/article/claim-check");
        assert!(matches!(
            outcome.attempts[0].outcome,
            StrategyOutcome::Failed(SearchError::Timeout(_))
        ));
        assert!(matches!(
            outcome.attempts[1].outcome,
            StrategyOutcome::Failed(SearchError::Http(_))
        ));
        assert_eq!(outcome.attempts.len(), strategies.len());
    }

    #[tokio::test]
    async fn duplicate_links_across_strategies_counted_once() {
        let strategies = strategies_for("claim");
        let page = "https://www.snopes.com/fact-check/claim/";
        let fetcher = ScriptedFetcher::default()
            .with(&strategies[0].url, page)
            .with(&strategies[1].url, page);

        let outcome = run_strategies(&strategies, &fetcher, &fast_config(3)).await;

        assert_eq!(outcome.links.len(), 1);
        assert_eq!(outcome.attempts[0].outcome, StrategyOutcome::Links(1));
        assert_eq!(outcome.attempts[1].outcome, StrategyOutcome::NoLinks);
    }

    #[tokio::test]
    async fn direct_site_needs_more_than_100_chars() {
        let strategies = strategies_for("claim");
        let fetcher = ScriptedFetcher::default()
            .with(&strategies[5].url, &"s".repeat(100))
            .with(&strategies[6].url, &"f".repeat(101));

        let outcome = run_strategies(&strategies, &fetcher, &fast_config(3)).await;

        assert_eq!(outcome.attempts[5].outcome, StrategyOutcome::NoLinks);
        assert_eq!(outcome.attempts[6].outcome, StrategyOutcome::DirectHit);
        assert_eq!(
            outcome.links,
            vec![CandidateLink::new(&strategies[6].url, SearchEngine::DirectSite)]
        );
    }

    #[tokio::test]
    async fn fallback_runs_when_nothing_found() {
        let claim = "the earth is flat";
        // Reuters is probed only by the fallback phase.
        let fetcher = ScriptedFetcher::default().with(&FALLBACK_SITES[3].url(claim), &"y".repeat(500));

        let outcome =
            dispatch(claim, &generate_search_queries(claim), &fetcher, &fast_config(3)).await;

        assert!(outcome.used_fallback);
        assert_eq!(outcome.attempts.len(), 12);
        let urls: Vec<&str> = outcome.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://www.reuters.com/search/news?blob=the+earth+is+flat+fact+check"]
        );
        assert_eq!(outcome.fallback_attempts.len(), 4);
        assert_eq!(outcome.fallback_attempts[3].outcome, StrategyOutcome::DirectHit);
    }

    #[tokio::test]
    async fn fallback_stops_after_two_accepted() {
        let claim = "claim";
        let long = "z".repeat(300);
        let fetcher = ScriptedFetcher::default()
            .with(&FALLBACK_SITES[0].url(claim), &long)
            .with(&FALLBACK_SITES[1].url(claim), &long)
            .with(&FALLBACK_SITES[2].url(claim), &long);

        let (links, attempts) =
            run_fallback(claim, FALLBACK_SITES, &fetcher, &fast_config(3)).await;

        assert_eq!(links.len(), 2);
        assert_eq!(attempts.len(), 2);
    }

    #[tokio::test]
    async fn fallback_rejects_exactly_200_chars() {
        let claim = "claim";
        let fetcher = ScriptedFetcher::default().with(&FALLBACK_SITES[0].url(claim), &"a".repeat(200));
        let (links, attempts) =
            run_fallback(claim, &FALLBACK_SITES[..1], &fetcher, &fast_config(3)).await;
        assert!(links.is_empty());
        assert_eq!(attempts[0].outcome, StrategyOutcome::NoLinks);
    }

    #[tokio::test]
    async fn general_search_runs_last_and_keeps_untrusted_links() {
        let claim = "claim";
        let queries = generate_search_queries(claim);
        let google_url = GoogleEngine.search_url(&queries[0]);
        let fetcher = ScriptedFetcher::default().with(
            &google_url,
            "[Blog](https://blog.example/claim) [Snopes](https://www.snopes.com/claim/)",
        );
        let config = SearchConfig {
            general_search: true,
            ..fast_config(3)
        };

        let outcome = dispatch(claim, &queries, &fetcher, &config).await;

        assert_eq!(outcome.attempts.len(), 13);
        assert_eq!(outcome.attempts[12].strategy.engine, SearchEngine::Google);
        assert_eq!(outcome.attempts[12].outcome, StrategyOutcome::Links(2));
        assert!(!outcome.used_fallback);
        let urls: Vec<&str> = outcome.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec!["https://blog.example/claim", "https://www.snopes.com/claim/"]);
    }

    #[tokio::test]
    async fn general_search_off_by_default() {
        let claim = "claim";
        let queries = generate_search_queries(claim);
        let fetcher = ScriptedFetcher::default();

        dispatch(claim, &queries, &fetcher, &fast_config(3)).await;

        let google_url = GoogleEngine.search_url(&queries[0]);
        assert!(!fetcher.requests().contains(&google_url));
    }

    #[tokio::test]
    async fn fallback_skipped_when_strategies_found_links() {
        let claim = "claim";
        let queries = generate_search_queries(claim);
        let strategies = build_strategies(claim, &queries);
        let fetcher = ScriptedFetcher::default()
            .with(&strategies[0].url, "https://www.npr.org/2024/01/01/claim");

        let outcome = dispatch(claim, &queries, &fetcher, &fast_config(3)).await;

        assert!(!outcome.used_fallback);
        assert!(outcome.fallback_attempts.is_empty());
        assert_eq!(outcome.links.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_delays_apply_between_strategies() {
        let strategies = strategies_for("claim");
        let fetcher = ScriptedFetcher::default();
        let config = SearchConfig {
            fallback_delay_ms: 0,
            ..Default::default()
        };

        let start = tokio::time::Instant::now();
        run_strategies(&strategies[..4], &fetcher, &config).await;

        // Attempts 1, 2 and 3 wait 3s, 3s and 4s.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(10), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_secs(11), "elapsed {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn fallback_waits_before_each_site_request() {
        let fetcher = ScriptedFetcher::default();
        let config = SearchConfig::default();

        let start = tokio::time::Instant::now();
        run_fallback("claim", FALLBACK_SITES, &fetcher, &config).await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(12), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_secs(13), "elapsed {elapsed:?}");
    }
}
