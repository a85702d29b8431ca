//! Core types for search strategies, candidate links and fetched evidence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a search strategy sends its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchEngine {
    /// DuckDuckGo HTML endpoint, the primary engine.
    DuckDuckGo,
    /// Bing, the secondary engine.
    Bing,
    /// Google, scanned with the general-result extractor (no trust requirement).
    Google,
    /// A trusted fact-check site's own search page.
    DirectSite,
}

impl SearchEngine {
    /// Returns the human-readable name of this engine.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Bing => "Bing",
            Self::Google => "Google",
            Self::DirectSite => "DirectSite",
        }
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One (engine, query) pair with its resolved request URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStrategy {
    /// Which backend the URL points at.
    pub engine: SearchEngine,
    /// The query text the URL was built from.
    pub query: String,
    /// Fully resolved request URL.
    pub url: String,
}

impl SearchStrategy {
    /// Build a strategy from its parts.
    pub fn new(engine: SearchEngine, query: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            engine,
            query: query.into(),
            url: url.into(),
        }
    }
}

/// A URL discovered in search output, not yet vetted for trust.
///
/// Links produced by [`crate::links::LinkExtractor`] never point at a
/// denylisted host and never end in a non-text file extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateLink {
    /// The decoded URL.
    pub url: String,
    /// Engine whose output contained the link.
    pub engine: SearchEngine,
}

impl CandidateLink {
    /// Create a candidate link.
    pub fn new(url: impl Into<String>, engine: SearchEngine) -> Self {
        Self {
            url: url.into(),
            engine,
        }
    }
}

/// A page that was fetched for evidence, before the length gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedPage {
    /// The URL that was fetched.
    pub url: String,
    /// Body exactly as returned by the fetcher.
    pub raw_content: String,
    /// Body after HTML reduction and [`crate::content::clean_text`].
    pub cleaned_content: String,
}

/// A cleaned page admitted as evidence for the reasoning step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSource {
    /// URL of the page; always one of the selected links.
    pub url: String,
    /// Cleaned content; always longer than the evidence length gate.
    pub content: String,
}
