//! Search engine profiles and direct fact-check site searches.
//!
//! Each engine module provides a struct implementing
//! [`crate::engine::EngineProfile`]. [`direct`] holds the search pages of
//! trusted fact-check sites, which are used as evidence candidates
//! themselves rather than scanned for links.

pub mod bing;
pub mod direct;
pub mod duckduckgo;
pub mod google;

pub use bing::BingEngine;
pub use duckduckgo::DuckDuckGoEngine;
pub use google::GoogleEngine;

use crate::engine::EngineProfile;
use crate::links::LinkExtractor;
use crate::types::SearchEngine;

/// Form-encode a query for use in a URL (`a b` becomes `a+b`).
pub fn encode_query(query: &str) -> String {
    url::form_urlencoded::byte_serialize(query.as_bytes()).collect()
}

/// The profile for `engine`, or `None` for [`SearchEngine::DirectSite`].
pub fn profile(engine: SearchEngine) -> Option<&'static dyn EngineProfile> {
    match engine {
        SearchEngine::DuckDuckGo => Some(&DuckDuckGoEngine),
        SearchEngine::Bing => Some(&BingEngine),
        SearchEngine::Google => Some(&GoogleEngine),
        SearchEngine::DirectSite => None,
    }
}

/// The extractor matching `engine`, or `None` for direct site searches.
pub fn extractor_for(engine: SearchEngine) -> Option<LinkExtractor> {
    profile(engine).map(|p| p.extractor())
}
