//! Integration tests for the evidence pipeline.
//!
//! These tests replay whole runs (plan → dispatch → select → fetch) against
//! a scripted in-memory fetcher. No network calls, no delays.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use veracity_search::engines::direct::FALLBACK_SITES;
use veracity_search::engines::DuckDuckGoEngine;
use veracity_search::orchestrator::dispatch::build_strategies;
use veracity_search::{
    dispatch, fetch_evidence, gather_evidence, generate_search_queries, select_sources,
    BackoffPolicy, EngineProfile, PageFetcher, SearchConfig, SearchError,
};

/// Answers from a fixed table; unknown URLs get an empty page.
#[derive(Default)]
struct ScriptedFetcher {
    pages: HashMap<String, Result<String, SearchError>>,
    log: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    fn page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Ok(body.into()));
        self
    }

    fn error(mut self, url: impl Into<String>, err: SearchError) -> Self {
        self.pages.insert(url.into(), Err(err));
        self
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, SearchError> {
        self.log.lock().unwrap().push(url.to_owned());
        self.pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

/// Fails every request, as if the network were down.
struct OfflineFetcher;

impl PageFetcher for OfflineFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, SearchError> {
        Err(SearchError::Http(format!("{url}: connection refused")))
    }
}

fn fast_config() -> SearchConfig {
    SearchConfig {
        backoff: BackoffPolicy::none(),
        fallback_delay_ms: 0,
        ..Default::default()
    }
}

fn article(topic: &str) -> String {
    format!(
        "<!DOCTYPE html><html><body><header>Site header</header><article>\
         <h1>Fact check: {topic}</h1>\
         <p>Our reporters reviewed the available records about {topic} and found \
         that the claim circulating online is not supported by evidence.</p>\
         </article><footer>Copyright</footer></body></html>"
    )
}

const CLAIM: &str = "the earth is flat";

fn first_ddg_url() -> String {
    let queries = generate_search_queries(CLAIM);
    DuckDuckGoEngine.search_url(&queries[0])
}

#[tokio::test]
async fn mixed_search_page_yields_only_trusted_text_links() {
    let results = r#"
        <a href="https://duckduckgo.com/settings">Settings</a>
        <a href="https://www.snopes.com/fact-check/flat-earth/">Snopes</a>
        [FactCheck](https://www.factcheck.org/2023/05/flat-earth/)
        <a href="https://www.facebook.com/groups/flat">Group</a>
        <a href="https://www.reuters.com/graphics/earth.png">Image</a>
        <a href="https://www.politifact.com/report.pdf">Report</a>
        https://blog.example/flat-earth-truth
        https://apnews.com/article/earth-shape-check
        https://www.npr.org/2020/01/01/earth
    "#;
    let fetcher = ScriptedFetcher::default().page(first_ddg_url(), results);
    let config = SearchConfig {
        max_links: 4,
        ..fast_config()
    };

    let outcome = dispatch(CLAIM, &generate_search_queries(CLAIM), &fetcher, &config).await;

    let urls: Vec<&str> = outcome.links.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://www.factcheck.org/2023/05/flat-earth/",
            "https://www.snopes.com/fact-check/flat-earth/",
            "https://apnews.com/article/earth-shape-check",
            "https://www.npr.org/2020/01/01/earth",
        ]
    );
    // Four links stay below the target of 2 × max_links, so every strategy runs.
    assert_eq!(fetcher.log().len(), build_strategies(CLAIM, &generate_search_queries(CLAIM)).len());
    assert!(!outcome.used_fallback);
}

#[tokio::test]
async fn full_run_selects_priority_sources_and_fetches_them() {
    let results = "https://www.bbc.com/news/earth \
                   https://www.snopes.com/fact-check/flat-earth/ \
                   https://www.cnn.com/earth";
    let fetcher = ScriptedFetcher::default()
        .page(first_ddg_url(), results)
        .page("https://www.snopes.com/fact-check/flat-earth/", article("snopes"))
        .page("https://www.bbc.com/news/earth", article("bbc"))
        .error("https://www.cnn.com/earth", SearchError::Timeout("30s".into()));

    let evidence = gather_evidence(CLAIM, &fetcher, &fast_config())
        .await
        .expect("valid config");

    let urls: Vec<&str> = evidence.iter().map(|e| e.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://www.snopes.com/fact-check/flat-earth/", "https://www.bbc.com/news/earth"]
    );
    assert!(evidence[0].content.starts_with("Fact check: snopes"));
    assert!(!evidence[0].content.contains("Site header"));
}

#[tokio::test]
async fn identical_responses_give_identical_selection() {
    let build = || {
        ScriptedFetcher::default()
            .page(first_ddg_url(), "https://www.npr.org/a https://www.factcheck.org/b")
            .page(
                build_strategies(CLAIM, &generate_search_queries(CLAIM))[3].url.clone(),
                "https://www.politifact.com/c https://apnews.com/d",
            )
    };
    let config = fast_config();
    let queries = generate_search_queries(CLAIM);

    let first = dispatch(CLAIM, &queries, &build(), &config).await;
    let second = dispatch(CLAIM, &queries, &build(), &config).await;

    assert_eq!(first, second);
    assert_eq!(
        select_sources(&first.links, config.max_links),
        select_sources(&second.links, config.max_links)
    );
}

#[tokio::test]
async fn empty_network_finds_nothing() {
    let fetcher = ScriptedFetcher::default();
    let config = fast_config();

    let outcome = dispatch(CLAIM, &generate_search_queries(CLAIM), &fetcher, &config).await;

    assert!(outcome.used_fallback);
    assert!(outcome.links.is_empty());
    // 12 primary strategies and 4 fallback probes.
    assert_eq!(fetcher.log().len(), 16);
    assert!(select_sources(&outcome.links, config.max_links).is_empty());
}

#[tokio::test]
async fn offline_run_degrades_to_empty_evidence() {
    let evidence = gather_evidence(CLAIM, &OfflineFetcher, &fast_config())
        .await
        .expect("valid config");
    assert!(evidence.is_empty());
}

#[tokio::test]
async fn fallback_site_can_still_supply_evidence() {
    let reuters = FALLBACK_SITES[3].url(CLAIM);
    let body = format!(
        "Reuters search results. {}",
        "Fact Check: Photos do not show a flat horizon. ".repeat(6)
    );
    let fetcher = ScriptedFetcher::default().page(reuters.clone(), body);
    let config = fast_config();

    let outcome = dispatch(CLAIM, &generate_search_queries(CLAIM), &fetcher, &config).await;
    assert!(outcome.used_fallback);

    let selected = select_sources(&outcome.links, config.max_links);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].url, reuters);

    let fetched = fetch_evidence(&selected, &fetcher, &config).await;
    assert_eq!(fetched.evidence.len(), 1);
    assert_eq!(fetched.evidence[0].url, reuters);
}
