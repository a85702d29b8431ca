//! Static allowlist of trusted fact-check and news domains.
//!
//! Position in [`TRUSTED_DOMAINS`] is priority: lower index ranks higher.
//! [`HIGH_PRIORITY_DOMAINS`] is the fixed subset that source selection
//! visits first.

use url::Url;

/// Trusted fact-check and news domains, highest priority first.
pub const TRUSTED_DOMAINS: &[&str] = &[
    "factcheck.org",
    "snopes.com",
    "politifact.com",
    "reuters.com",
    "apnews.com",
    "bbc.com",
    "npr.org",
    "washingtonpost.com",
    "nytimes.com",
    "cnn.com",
    "nbcnews.com",
    "cbsnews.com",
    "abcnews.go.com",
    "usatoday.com",
    "wsj.com",
    "theguardian.com",
    "pbs.org",
    "time.com",
    "newsweek.com",
    "theatlantic.com",
];

/// Domains that source selection takes first, in this order.
pub const HIGH_PRIORITY_DOMAINS: &[&str] = &[
    "factcheck.org",
    "snopes.com",
    "politifact.com",
    "reuters.com",
    "apnews.com",
    "bbc.com",
    "npr.org",
];

/// Extract the lowercased host of `url`, or `None` if it does not parse.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_ascii_lowercase))
}

/// Returns true if `host` is `domain` or one of its subdomains.
///
/// `www.snopes.com` matches `snopes.com`; `notsnopes.com` does not.
pub fn host_matches(host: &str, domain: &str) -> bool {
    match host.strip_suffix(domain) {
        Some("") => true,
        Some(prefix) => prefix.ends_with('.'),
        None => false,
    }
}

/// Returns the allowlist index of the first trusted domain `host` belongs to.
pub fn trusted_rank(host: &str) -> Option<usize> {
    TRUSTED_DOMAINS
        .iter()
        .position(|domain| host_matches(host, domain))
}
