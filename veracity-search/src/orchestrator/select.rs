//! Source selection: rank candidates by trusted-domain priority and cap
//! the result to the configured maximum.

use std::collections::HashSet;

use crate::trusted::{host_matches, host_of, trusted_rank, HIGH_PRIORITY_DOMAINS};
use crate::types::CandidateLink;

/// Pick at most `max_links` sources from `candidates`.
///
/// Phase 1 walks [`HIGH_PRIORITY_DOMAINS`] in order and takes the first
/// candidate not yet selected on each domain. Phase 2 fills any remaining
/// slots from `candidates` in discovery order, accepting any trusted host.
/// Duplicates (by exact URL) are never selected twice.
pub fn select_sources(candidates: &[CandidateLink], max_links: usize) -> Vec<CandidateLink> {
    let hosts: Vec<Option<String>> = candidates.iter().map(|c| host_of(&c.url)).collect();
    let mut chosen: HashSet<&str> = HashSet::new();
    let mut selected: Vec<CandidateLink> = Vec::new();

    for domain in HIGH_PRIORITY_DOMAINS {
        if selected.len() >= max_links {
            break;
        }
        let hit = candidates.iter().zip(&hosts).find(|(candidate, host)| {
            !chosen.contains(candidate.url.as_str())
                && host.as_deref().is_some_and(|h| host_matches(h, domain))
        });
        if let Some((candidate, _)) = hit {
            chosen.insert(candidate.url.as_str());
            selected.push(candidate.clone());
        }
    }

    for (candidate, host) in candidates.iter().zip(&hosts) {
        if selected.len() >= max_links {
            break;
        }
        if chosen.contains(candidate.url.as_str()) {
            continue;
        }
        if host.as_deref().and_then(trusted_rank).is_some() {
            chosen.insert(candidate.url.as_str());
            selected.push(candidate.clone());
        }
    }

    tracing::debug!(
        candidates = candidates.len(),
        selected = selected.len(),
        "sources selected"
    );
    selected
}
