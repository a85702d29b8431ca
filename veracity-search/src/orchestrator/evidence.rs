//! Evidence fetching: visit each selected link, clean its content, and
//! admit it only past the minimum-length gate.

use crate::config::SearchConfig;
use crate::content::{char_len, clean_text, readable_text, truncate_to_limit};
use crate::fetcher::{fetch_with_timeout, PageFetcher};
use crate::types::{CandidateLink, EvidenceSource, FetchedPage};

/// Cleaned content must be longer than this many characters to count as
/// evidence.
pub const MIN_EVIDENCE_CHARS: usize = 100;

/// Result of the fetching phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceOutcome {
    /// Admitted sources, in link order.
    pub evidence: Vec<EvidenceSource>,
    /// Every page that was fetched successfully, admitted or not.
    pub pages: Vec<FetchedPage>,
    /// URLs of every link visited, in order.
    pub attempted: Vec<String>,
}

/// Returns true if `cleaned` is long enough to be admitted.
pub fn passes_gate(cleaned: &str) -> bool {
    char_len(cleaned) > MIN_EVIDENCE_CHARS
}

/// Fetch `links` one at a time and collect usable evidence.
///
/// A failed fetch skips that link. Admitted content is truncated to
/// [`SearchConfig::max_evidence_chars`] after the gate is applied.
pub async fn fetch_evidence<F: PageFetcher>(
    links: &[CandidateLink],
    fetcher: &F,
    config: &SearchConfig,
) -> EvidenceOutcome {
    let timeout = config.fetch_timeout();
    let mut outcome = EvidenceOutcome::default();

    for link in links {
        outcome.attempted.push(link.url.clone());

        let raw = match fetch_with_timeout(fetcher, &link.url, timeout).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(url = %link.url, error = %err, "evidence fetch failed, skipping");
                continue;
            }
        };

        let cleaned = clean_text(&readable_text(&raw));
        if passes_gate(&cleaned) {
            tracing::debug!(url = %link.url, chars = char_len(&cleaned), "evidence admitted");
            outcome.evidence.push(EvidenceSource {
                url: link.url.clone(),
                content: truncate_to_limit(&cleaned, config.max_evidence_chars),
            });
        } else {
            tracing::warn!(url = %link.url, chars = char_len(&cleaned), "content too short");
        }

        outcome.pages.push(FetchedPage {
            url: link.url.clone(),
            raw_content: raw,
            cleaned_content: cleaned,
        });
    }

    tracing::info!(
        attempted = outcome.attempted.len(),
        admitted = outcome.evidence.len(),
        "evidence fetched"
    );
    outcome
}
