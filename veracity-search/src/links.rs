//! Candidate link extraction from raw search output.
//!
//! A [`LinkExtractor`] runs an ordered list of [`ExtractionRule`]s over the
//! same text, concatenates their matches in rule order, then decodes,
//! filters and deduplicates them. Filtering is driven entirely by a
//! [`LinkFilter`]; the engine tag on the extractor is provenance only.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::trusted::{host_matches, TRUSTED_DOMAINS};
use crate::types::{CandidateLink, SearchEngine};

/// File extensions that never carry textual evidence.
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".pdf", ".doc", ".docx", ".xls", ".xlsx",
    ".ppt", ".pptx", ".zip", ".rar", ".7z", ".tar", ".gz",
];

static MARKDOWN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?:[^\]]+)\]\((https?://[^()\s]+)\)").expect("valid markdown link pattern")
});

static BARE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(https?://[^\s\)\]\[,"'<>]+)"#).expect("valid bare URL pattern")
});

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href=["']?(https?://[^"'\s>]+)"#).expect("valid href pattern")
});

static REDIRECT_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[?&](?:amp;)?uddg=(https?(?:%3A|:)[^&"'\s>]+)"#).expect("valid redirect pattern")
});

// ── Extraction rules ──────────────────────────────────────────

/// One way of pulling URL-shaped strings out of page text.
///
/// Rules only find candidates; decoding and filtering happen afterwards in
/// [`LinkExtractor::extract`], so a rule may return duplicates or junk.
pub trait ExtractionRule: Send + Sync {
    /// Short stable name used in logs.
    fn name(&self) -> &'static str;

    /// Return every candidate string in `text`, in order of appearance.
    fn candidates(&self, text: &str) -> Vec<String>;
}

/// A rule backed by a regex whose first capture group is the URL.
pub struct PatternRule {
    name: &'static str,
    pattern: &'static LazyLock<Regex>,
}

impl PatternRule {
    /// Markdown links: `[text](https://...)`.
    pub fn markdown_link() -> Self {
        Self {
            name: "markdown_link",
            pattern: &MARKDOWN_LINK_RE,
        }
    }

    /// Bare `http(s)://` URLs anywhere in the text.
    pub fn bare_url() -> Self {
        Self {
            name: "bare_url",
            pattern: &BARE_URL_RE,
        }
    }

    /// HTML `href` attributes with absolute URLs.
    pub fn href_attribute() -> Self {
        Self {
            name: "href_attribute",
            pattern: &HREF_RE,
        }
    }

    /// Targets of DuckDuckGo `/l/?uddg=` redirect wrappers.
    pub fn redirect_param() -> Self {
        Self {
            name: "redirect_param",
            pattern: &REDIRECT_PARAM_RE,
        }
    }
}

impl ExtractionRule for PatternRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn candidates(&self, text: &str) -> Vec<String> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim_end_matches(['.', ';', ':', '!', '?']).to_owned())
            .collect()
    }
}

/// The rule set used for engine result pages, in discovery order.
pub fn default_rules() -> Vec<Box<dyn ExtractionRule>> {
    vec![
        Box::new(PatternRule::markdown_link()),
        Box::new(PatternRule::bare_url()),
        Box::new(PatternRule::href_attribute()),
        Box::new(PatternRule::redirect_param()),
    ]
}

// ── Filtering ─────────────────────────────────────────────────

/// A host or page that must never become a candidate link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyRule {
    /// The host is this domain or any subdomain of it.
    Domain(&'static str),
    /// Any host label equals this, e.g. `accounts` for `accounts.google.com`.
    Subdomain(&'static str),
    /// Pages on `domain` whose path starts with `path_prefix`.
    Page {
        /// Domain the page lives on (subdomains included).
        domain: &'static str,
        /// Path prefix, starting with `/`.
        path_prefix: &'static str,
    },
}

impl DenyRule {
    /// Returns true if this rule rejects a URL with the given host and path.
    /// Both must already be lowercased.
    pub fn matches(&self, host: &str, path: &str) -> bool {
        match *self {
            Self::Domain(domain) => host_matches(host, domain),
            Self::Subdomain(label) => {
                let mut labels: Vec<&str> = host.split('.').collect();
                // The registrable suffix is never a service subdomain.
                labels.truncate(labels.len().saturating_sub(2));
                labels.contains(&label)
            }
            Self::Page {
                domain,
                path_prefix,
            } => host_matches(host, domain) && path.starts_with(path_prefix),
        }
    }
}

/// Service subdomains and video pages no engine should yield.
pub const COMMON_DENYLIST: &[DenyRule] = &[
    DenyRule::Page {
        domain: "youtube.com",
        path_prefix: "/watch",
    },
    DenyRule::Subdomain("accounts"),
    DenyRule::Subdomain("support"),
    DenyRule::Subdomain("maps"),
    DenyRule::Subdomain("play"),
    DenyRule::Subdomain("policies"),
    DenyRule::Subdomain("consent"),
    DenyRule::Subdomain("books"),
    DenyRule::Subdomain("translate"),
];

/// Social networks and encyclopedias, excluded from trusted-only engines.
pub const SOCIAL_DENYLIST: &[DenyRule] = &[
    DenyRule::Domain("wikipedia.org"),
    DenyRule::Domain("facebook.com"),
    DenyRule::Domain("twitter.com"),
    DenyRule::Domain("instagram.com"),
    DenyRule::Domain("linkedin.com"),
];

/// Decides which decoded URLs survive extraction.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    /// Hosts and pages to reject outright.
    pub denylist: Vec<DenyRule>,
    /// Whether a link must point at a domain in `allowlist`.
    pub require_trusted: bool,
    /// Trusted domains consulted when `require_trusted` is set.
    pub allowlist: &'static [&'static str],
}

impl LinkFilter {
    /// A filter that also requires a trusted host.
    pub fn trusted_only(denylist: Vec<DenyRule>) -> Self {
        Self {
            denylist,
            require_trusted: true,
            allowlist: TRUSTED_DOMAINS,
        }
    }

    /// A filter that applies only the denylist and extension rules.
    pub fn general(denylist: Vec<DenyRule>) -> Self {
        Self {
            denylist,
            require_trusted: false,
            allowlist: TRUSTED_DOMAINS,
        }
    }

    /// Returns true if the decoded `url` may become a candidate link.
    pub fn accepts(&self, url: &str) -> bool {
        let Ok(parsed) = url::Url::parse(url) else {
            return false;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }
        let Some(host) = parsed.host_str().map(str::to_ascii_lowercase) else {
            return false;
        };
        let path = parsed.path().to_ascii_lowercase();

        if self.denylist.iter().any(|rule| rule.matches(&host, &path)) {
            return false;
        }
        if has_excluded_extension(&path) {
            return false;
        }
        if self.require_trusted {
            return self
                .allowlist
                .iter()
                .any(|domain| host_matches(&host, domain));
        }
        true
    }
}

/// Returns true if a lowercased path ends in a non-text file extension.
pub fn has_excluded_extension(path: &str) -> bool {
    EXCLUDED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

// ── Extractor ─────────────────────────────────────────────────

/// Extracts vetted candidate links from one engine's output.
pub struct LinkExtractor {
    engine: SearchEngine,
    rules: Vec<Box<dyn ExtractionRule>>,
    filter: LinkFilter,
}

impl std::fmt::Debug for LinkExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rules: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        f.debug_struct("LinkExtractor")
            .field("engine", &self.engine)
            .field("rules", &rules)
            .field("filter", &self.filter)
            .finish()
    }
}

impl LinkExtractor {
    /// Create an extractor with the [`default_rules`].
    pub fn new(engine: SearchEngine, filter: LinkFilter) -> Self {
        Self {
            engine,
            rules: default_rules(),
            filter,
        }
    }

    /// Replace the rule list.
    pub fn with_rules(mut self, rules: Vec<Box<dyn ExtractionRule>>) -> Self {
        self.rules = rules;
        self
    }

    /// Engine tag attached to every link this extractor yields.
    pub fn engine(&self) -> SearchEngine {
        self.engine
    }

    /// The filter applied to decoded candidates.
    pub fn filter(&self) -> &LinkFilter {
        &self.filter
    }

    /// Extract up to `max_links` unique, vetted links from `text`.
    ///
    /// Output order is first-seen order across the rules, which run in
    /// list order over the full text.
    pub fn extract(&self, text: &str, max_links: usize) -> Vec<CandidateLink> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut links = Vec::new();
        let mut found = 0usize;

        for rule in &self.rules {
            let candidates = rule.candidates(text);
            tracing::trace!(rule = rule.name(), count = candidates.len(), "rule matches");
            found += candidates.len();

            for raw in candidates {
                if links.len() >= max_links {
                    break;
                }
                let Some(url) = decode_url(&raw) else {
                    continue;
                };
                if !self.filter.accepts(&url) {
                    continue;
                }
                if seen.insert(url.clone()) {
                    links.push(CandidateLink::new(url, self.engine));
                }
            }
        }

        tracing::debug!(
            engine = %self.engine,
            found,
            kept = links.len(),
            "links extracted"
        );
        links
    }
}

/// Percent-decode a candidate URL, rejecting invalid UTF-8.
fn decode_url(raw: &str) -> Option<String> {
    urlencoding::decode(raw).ok().map(|decoded| decoded.into_owned())
}
