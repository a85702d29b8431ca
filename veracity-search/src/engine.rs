//! Trait definition for pluggable search engine profiles.
//!
//! Each engine (DuckDuckGo, Bing, Google) implements [`EngineProfile`] to
//! describe how a query becomes a request URL and which links its result
//! pages may yield. Fetching is not the engine's job; every request goes
//! through a [`crate::fetcher::PageFetcher`].

use crate::links::{default_rules, ExtractionRule, LinkExtractor, LinkFilter};
use crate::types::{SearchEngine, SearchStrategy};

/// Static description of one search backend.
///
/// All implementations must be `Send + Sync` so profiles can be shared
/// across concurrent runs.
pub trait EngineProfile: Send + Sync {
    /// Returns which [`SearchEngine`] variant this profile represents.
    fn engine_type(&self) -> SearchEngine;

    /// Build the result-page URL for `query`. The implementation handles
    /// encoding.
    fn search_url(&self, query: &str) -> String;

    /// The filter applied to links found on this engine's result pages.
    fn link_filter(&self) -> LinkFilter;

    /// Extraction rules for this engine's result pages.
    ///
    /// Defaults to [`default_rules`].
    fn extraction_rules(&self) -> Vec<Box<dyn ExtractionRule>> {
        default_rules()
    }

    /// A ready-to-use extractor tagged with this engine.
    fn extractor(&self) -> LinkExtractor {
        LinkExtractor::new(self.engine_type(), self.link_filter())
            .with_rules(self.extraction_rules())
    }

    /// A strategy that runs `query` on this engine.
    fn strategy(&self, query: &str) -> SearchStrategy {
        SearchStrategy::new(self.engine_type(), query, self.search_url(query))
    }
}
