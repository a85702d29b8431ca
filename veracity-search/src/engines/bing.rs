//! Bing, the secondary engine.

use crate::engine::EngineProfile;
use crate::links::{DenyRule, LinkFilter, COMMON_DENYLIST, SOCIAL_DENYLIST};
use crate::types::SearchEngine;

use super::encode_query;

const SEARCH_URL: &str = "https://www.bing.com/search";

/// Bing search profile.
///
/// Shares DuckDuckGo's filtering; only its own hosts (Bing, Microsoft,
/// MSN) differ in the denylist.
pub struct BingEngine;

impl EngineProfile for BingEngine {
    fn engine_type(&self) -> SearchEngine {
        SearchEngine::Bing
    }

    fn search_url(&self, query: &str) -> String {
        format!("{SEARCH_URL}?q={}", encode_query(query))
    }

    fn link_filter(&self) -> LinkFilter {
        let mut denylist = vec![
            DenyRule::Domain("bing.com"),
            DenyRule::Domain("microsoft.com"),
            DenyRule::Domain("msn.com"),
        ];
        denylist.extend_from_slice(COMMON_DENYLIST);
        denylist.extend_from_slice(SOCIAL_DENYLIST);
        LinkFilter::trusted_only(denylist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_query() {
        assert_eq!(
            BingEngine.search_url("vaccines cause autism true or false"),
            "https://www.bing.com/search?q=vaccines+cause+autism+true+or+false"
        );
    }

    #[test]
    fn microsoft_properties_are_denied() {
        let filter = BingEngine.link_filter();
        assert!(!filter.accepts("https://www.bing.com/images/search?q=x"));
        assert!(!filter.accepts("https://www.msn.com/en-us/news/politics/x"));
        assert!(!filter.accepts("https://support.microsoft.com/kb"));
        assert!(filter.accepts("https://www.cbsnews.com/news/x/"));
    }

    #[test]
    fn results_page_keeps_trusted_links_only() {
        let html = r#"
<li class="b_algo"><h2><a href="https://www.bbc.com/news/science-123">BBC</a></h2></li>
<li class="b_algo"><h2><a href="https://flat-earth-society.example/proof">Proof</a></h2></li>
<li class="b_algo"><h2><a href="https://www.msn.com/en-us/news/x">MSN</a></h2></li>
"#;
        let links = BingEngine.extractor().extract(html, 5);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://www.bbc.com/news/science-123");
        assert_eq!(links[0].engine, SearchEngine::Bing);
    }
}
