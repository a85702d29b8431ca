//! Search pages on trusted fact-check and wire sites.
//!
//! These URLs are probed directly. When a probe returns enough content,
//! the search page itself becomes a candidate link.

use crate::types::{SearchEngine, SearchStrategy};

use super::encode_query;

/// A fact-check site's own search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectSite {
    /// Short site name used in logs.
    pub name: &'static str,
    /// URL prefix the encoded claim is appended to.
    pub url_prefix: &'static str,
    /// Text appended (already encoded) after the claim.
    pub url_suffix: &'static str,
}

impl DirectSite {
    /// Resolve this site's search URL for `claim`.
    pub fn url(&self, claim: &str) -> String {
        format!("{}{}{}", self.url_prefix, encode_query(claim), self.url_suffix)
    }

    /// A [`SearchEngine::DirectSite`] strategy for `claim`.
    pub fn strategy(&self, claim: &str) -> SearchStrategy {
        SearchStrategy::new(SearchEngine::DirectSite, claim, self.url(claim))
    }
}

/// Snopes site search.
pub const SNOPES: DirectSite = DirectSite {
    name: "snopes",
    url_prefix: "https://www.snopes.com/search/",
    url_suffix: "",
};

/// FactCheck.org site search.
pub const FACTCHECK_ORG: DirectSite = DirectSite {
    name: "factcheck.org",
    url_prefix: "https://www.factcheck.org/search/?s=",
    url_suffix: "",
};

/// PolitiFact site search.
pub const POLITIFACT: DirectSite = DirectSite {
    name: "politifact",
    url_prefix: "https://www.politifact.com/search/?q=",
    url_suffix: "",
};

/// Reuters news search, restricted to fact checks.
pub const REUTERS: DirectSite = DirectSite {
    name: "reuters",
    url_prefix: "https://www.reuters.com/search/news?blob=",
    url_suffix: "+fact+check",
};

/// Sites probed as part of the primary strategy list.
pub const PRIMARY_SITES: &[DirectSite] = &[SNOPES, FACTCHECK_ORG, POLITIFACT];

/// Sites probed in the fallback phase when no candidate was found.
pub const FALLBACK_SITES: &[DirectSite] = &[SNOPES, FACTCHECK_ORG, POLITIFACT, REUTERS];
