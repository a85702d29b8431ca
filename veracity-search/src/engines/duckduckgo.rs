//! DuckDuckGo, the primary engine.
//!
//! Uses the HTML-only endpoint, which needs no JavaScript and tolerates
//! automated requests. Result links are wrapped in `/l/?uddg=` redirects;
//! the redirect extraction rule unwraps them.

use crate::engine::EngineProfile;
use crate::links::{DenyRule, LinkFilter, COMMON_DENYLIST, SOCIAL_DENYLIST};
use crate::types::SearchEngine;

use super::encode_query;

const SEARCH_URL: &str = "https://duckduckgo.com/html/";

/// DuckDuckGo HTML search profile.
///
/// Result pages only yield links on trusted domains.
pub struct DuckDuckGoEngine;

impl EngineProfile for DuckDuckGoEngine {
    fn engine_type(&self) -> SearchEngine {
        SearchEngine::DuckDuckGo
    }

    fn search_url(&self, query: &str) -> String {
        format!("{SEARCH_URL}?q={}", encode_query(query))
    }

    fn link_filter(&self) -> LinkFilter {
        let mut denylist = vec![DenyRule::Domain("duckduckgo.com")];
        denylist.extend_from_slice(COMMON_DENYLIST);
        denylist.extend_from_slice(SOCIAL_DENYLIST);
        LinkFilter::trusted_only(denylist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_DDG_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<div class="result results_links results_links_deep web-result">
    <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.snopes.com%2Ffact-check%2Fflat-earth%2F&amp;rut=abc123">
        Is the Earth Flat? | Snopes
    </a>
</div>
<div class="result results_links results_links_deep web-result">
    <a class="result__a" href="https://www.factcheck.org/2021/05/earth-shape/">
        FactCheck.org: the shape of the Earth
    </a>
</div>
<div class="result results_links results_links_deep web-result">
    <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fen.wikipedia.org%2Fwiki%2FFlat_Earth&amp;rut=def456">
        Flat Earth - Wikipedia
    </a>
</div>
<a href="https://duckduckgo.com/settings">Settings</a>
</body>
</html>"#;

    #[test]
    fn search_url_encodes_query() {
        assert_eq!(
            DuckDuckGoEngine.search_url("\"the earth is flat\" fact check"),
            "https://duckduckgo.com/html/?q=%22the+earth+is+flat%22+fact+check"
        );
    }

    #[test]
    fn mock_results_page_yields_trusted_links() {
        let links = DuckDuckGoEngine.extractor().extract(MOCK_DDG_HTML, 10);
        let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.factcheck.org/2021/05/earth-shape/",
                "https://www.snopes.com/fact-check/flat-earth/",
            ]
        );
    }

    #[test]
    fn own_domain_and_wikipedia_are_denied() {
        let filter = DuckDuckGoEngine.link_filter();
        assert!(!filter.accepts("https://duckduckgo.com/settings"));
        assert!(!filter.accepts("https://en.wikipedia.org/wiki/Flat_Earth"));
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DuckDuckGoEngine>();
    }
}
