//! Google, scanned with the general-result extractor.
//!
//! Google result pages are read for markdown links only, and links are
//! not required to be on a trusted domain. Trust is enforced later by
//! source selection.

use crate::engine::EngineProfile;
use crate::links::{DenyRule, ExtractionRule, LinkFilter, PatternRule, COMMON_DENYLIST};
use crate::types::SearchEngine;

use super::encode_query;

const SEARCH_URL: &str = "https://www.google.com/search";

/// Google search profile.
pub struct GoogleEngine;

impl EngineProfile for GoogleEngine {
    fn engine_type(&self) -> SearchEngine {
        SearchEngine::Google
    }

    fn search_url(&self, query: &str) -> String {
        format!("{SEARCH_URL}?q={}", encode_query(query))
    }

    fn link_filter(&self) -> LinkFilter {
        let mut denylist = vec![DenyRule::Domain("google.com")];
        denylist.extend_from_slice(COMMON_DENYLIST);
        LinkFilter::general(denylist)
    }

    fn extraction_rules(&self) -> Vec<Box<dyn ExtractionRule>> {
        vec![Box::new(PatternRule::markdown_link())]
    }
}
