//! Token usage tracking for reasoning calls.
//!
//! [`TokenUsage`] records one call; [`CumulativeUsage`] is the counter an
//! orchestrator owns for its whole lifetime.
//!
//! # Examples
//!
//! ```
//! use veracity::llm::usage::{CumulativeUsage, TokenUsage};
//!
//! let totals = CumulativeUsage::new();
//! totals.record(&TokenUsage::new(500, 200));
//! totals.record(&TokenUsage::new(100, 50));
//! assert_eq!(totals.snapshot().total(), 850);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Token counts for a single request/response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt/input.
    pub prompt_tokens: u64,
    /// Number of tokens in the completion/output.
    pub completion_tokens: u64,
}

impl TokenUsage {
    /// Create a new token usage record.
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    /// Total tokens consumed (prompt + completion).
    pub fn total(&self) -> u64 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }
}

/// Lifetime token counters shared by every run on one orchestrator.
///
/// Increments are atomic, so concurrent runs can record through a shared
/// reference. Counters are never reset.
#[derive(Debug, Default)]
pub struct CumulativeUsage {
    prompt_tokens: AtomicU64,
    completion_tokens: AtomicU64,
}

impl CumulativeUsage {
    /// Counters starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one call's counts.
    pub fn record(&self, usage: &TokenUsage) {
        saturating_add(&self.prompt_tokens, usage.prompt_tokens);
        saturating_add(&self.completion_tokens, usage.completion_tokens);
    }

    /// Current totals.
    pub fn snapshot(&self) -> TokenUsage {
        TokenUsage::new(
            self.prompt_tokens.load(Ordering::Relaxed),
            self.completion_tokens.load(Ordering::Relaxed),
        )
    }
}

fn saturating_add(counter: &AtomicU64, amount: u64) {
    // The closure always returns Some, so the update cannot fail.
    let _ = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
        Some(current.saturating_add(amount))
    });
}
