//! The fact-check run: one claim in, one verdict out.
//!
//! A run moves strictly forward through its stages:
//!
//! ```text
//! Planning → Searching → (SearchFallback) → Selecting → Fetching → Synthesizing → Done
//!                                              │            │
//!                                              └ NoSources  └ NoContent
//! ```
//!
//! Every branch ends in a complete [`VerdictResult`]. Nothing inside a run
//! returns an error to the caller.

use serde::Serialize;
use veracity_search::{
    CandidateLink, EvidenceSource, HttpFetcher, PageFetcher, SearchConfig, dispatch,
    fetch_evidence, generate_search_queries, select_sources,
};

use crate::config::FactCheckConfig;
use crate::error::{FactCheckError, Result};
use crate::llm::openai::OpenAiProvider;
use crate::llm::provider::ReasoningProvider;
use crate::llm::usage::{CumulativeUsage, TokenUsage};
use crate::synthesizer::synthesize;
use crate::verdict::VerdictResult;

/// A stage of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStage {
    Planning,
    Searching,
    /// Entered only when no search strategy produced a candidate.
    SearchFallback,
    Selecting,
    Fetching,
    Synthesizing,
    Done,
    /// Selection produced no trusted link.
    NoSources,
    /// No selected link produced usable content.
    NoContent,
    /// The claim was empty after trimming.
    InvalidClaim,
}

impl RunStage {
    /// Returns true if a run ends in this stage.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Done | Self::NoSources | Self::NoContent | Self::InvalidClaim
        )
    }
}

/// Everything one run produced, for callers that want more than the verdict.
#[derive(Debug)]
pub struct RunReport {
    /// The trimmed claim.
    pub claim: String,
    /// Stages in the order they were entered; the last one is terminal.
    pub stages: Vec<RunStage>,
    pub queries: Vec<String>,
    /// Unique candidates from search, in discovery order.
    pub candidates: Vec<CandidateLink>,
    /// Links chosen for fetching, in priority order.
    pub selected: Vec<CandidateLink>,
    pub evidence: Vec<EvidenceSource>,
    /// The reasoning prompt, if the run got that far.
    pub prompt: Option<String>,
    pub result: VerdictResult,
    /// Why the verdict is degraded, if the reasoning step failed.
    pub error: Option<FactCheckError>,
}

impl RunReport {
    fn new(claim: &str) -> Self {
        Self {
            claim: claim.to_owned(),
            stages: Vec::new(),
            queries: Vec::new(),
            candidates: Vec::new(),
            selected: Vec::new(),
            evidence: Vec::new(),
            prompt: None,
            result: VerdictResult::no_sources(),
            error: None,
        }
    }

    fn enter(&mut self, stage: RunStage) {
        tracing::info!(?stage, "run stage");
        self.stages.push(stage);
    }

    /// The stage the run ended in.
    pub fn terminal_stage(&self) -> Option<RunStage> {
        self.stages.last().copied().filter(RunStage::is_terminal)
    }
}

/// Fact checker over a page fetcher and a reasoning provider.
///
/// Holds the lifetime token counters; concurrent runs on one instance
/// share them through atomic increments.
pub struct FactChecker<F, P> {
    fetcher: F,
    provider: P,
    search: SearchConfig,
    usage: CumulativeUsage,
}

impl<F, P> std::fmt::Debug for FactChecker<F, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactChecker")
            .field("search", &self.search)
            .field("usage", &self.usage.snapshot())
            .finish_non_exhaustive()
    }
}

impl FactChecker<HttpFetcher, OpenAiProvider> {
    /// Build a checker that talks to the network as configured.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or a client cannot be built.
    pub fn from_config(config: &FactCheckConfig) -> Result<Self> {
        config.validate()?;
        let search = config.search_config();
        let fetcher = HttpFetcher::new(&search)?;
        let provider = OpenAiProvider::new(config.provider_config())?;
        Self::new(fetcher, provider, search)
    }
}

impl<F: PageFetcher, P: ReasoningProvider> FactChecker<F, P> {
    /// Build a checker from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`FactCheckError::Search`] if `search` is invalid.
    pub fn new(fetcher: F, provider: P, search: SearchConfig) -> Result<Self> {
        search.validate()?;
        Ok(Self {
            fetcher,
            provider,
            search,
            usage: CumulativeUsage::new(),
        })
    }

    /// Lifetime token counts across all runs.
    pub fn cumulative_usage(&self) -> TokenUsage {
        self.usage.snapshot()
    }

    /// The search settings runs use.
    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// Check `claim` and return the verdict.
    pub async fn verify_statement(&self, claim: &str) -> VerdictResult {
        self.run(claim).await.result
    }

    /// Check `claim` and return the verdict with the run's intermediate
    /// results.
    pub async fn run(&self, claim: &str) -> RunReport {
        let claim = claim.trim();
        let mut report = RunReport::new(claim);

        if claim.is_empty() {
            report.enter(RunStage::InvalidClaim);
            report.result = self.early(VerdictResult::invalid_claim());
            return report;
        }
        tracing::trace!(claim, "checking claim");

        report.enter(RunStage::Planning);
        report.queries = generate_search_queries(claim);

        report.enter(RunStage::Searching);
        let found = dispatch(claim, &report.queries, &self.fetcher, &self.search).await;
        if found.used_fallback {
            report.enter(RunStage::SearchFallback);
        }
        report.candidates = found.links;

        report.enter(RunStage::Selecting);
        report.selected = select_sources(&report.candidates, self.search.max_links);
        tracing::info!(
            selected = ?report.selected.iter().map(|l| l.url.as_str()).collect::<Vec<_>>(),
            "sources selected"
        );
        if report.selected.is_empty() {
            report.enter(RunStage::NoSources);
            report.result = self.early(VerdictResult::no_sources());
            return report;
        }

        report.enter(RunStage::Fetching);
        let fetched = fetch_evidence(&report.selected, &self.fetcher, &self.search).await;
        if fetched.evidence.is_empty() {
            report.enter(RunStage::NoContent);
            report.result = self.early(VerdictResult::no_content(fetched.attempted));
            return report;
        }
        report.evidence = fetched.evidence;

        report.enter(RunStage::Synthesizing);
        let synthesis = synthesize(claim, &report.evidence, &self.provider, &self.usage).await;
        report.prompt = Some(synthesis.prompt);
        report.result = synthesis.result;
        report.error = synthesis.error;

        report.enter(RunStage::Done);
        report
    }

    /// Attach zero call usage and the current totals to an early result.
    fn early(&self, result: VerdictResult) -> VerdictResult {
        result.with_usage(TokenUsage::default(), self.usage.snapshot())
    }
}
