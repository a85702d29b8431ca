//! Progressive delay between search strategies.
//!
//! Search engines start refusing or captcha-walling a client that fires
//! requests back to back, so the dispatcher sleeps between strategies. The
//! delay grows by `step_ms` every `step_every` attempts and never exceeds
//! `max_delay_ms`. The first attempt never waits.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay before the second strategy.
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 3_000;
/// Default increase applied every `step_every` attempts.
pub const DEFAULT_STEP_MS: u64 = 1_000;
/// Default number of attempts between increases.
pub const DEFAULT_STEP_EVERY: u32 = 3;
/// Default ceiling for any single delay.
pub const DEFAULT_MAX_DELAY_MS: u64 = 10_000;

/// Delay schedule for sequential search attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffPolicy {
    /// Delay in milliseconds before the first retry-eligible attempt.
    pub initial_delay_ms: u64,
    /// Milliseconds added after every `step_every` attempts.
    pub step_ms: u64,
    /// How many attempts share one delay level. Zero disables growth.
    pub step_every: u32,
    /// Ceiling for any single delay, in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            step_ms: DEFAULT_STEP_MS,
            step_every: DEFAULT_STEP_EVERY,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

impl BackoffPolicy {
    /// A policy that never sleeps. Used by tests and offline harnesses.
    pub fn none() -> Self {
        Self {
            initial_delay_ms: 0,
            step_ms: 0,
            step_every: 0,
            max_delay_ms: 0,
        }
    }

    /// Set the initial delay in milliseconds.
    pub fn with_initial_delay_ms(mut self, initial_delay_ms: u64) -> Self {
        self.initial_delay_ms = initial_delay_ms;
        self
    }

    /// Set the per-level increase in milliseconds.
    pub fn with_step_ms(mut self, step_ms: u64) -> Self {
        self.step_ms = step_ms;
        self
    }

    /// Set how many attempts share one delay level.
    pub fn with_step_every(mut self, step_every: u32) -> Self {
        self.step_every = step_every;
        self
    }

    /// Set the delay ceiling in milliseconds.
    pub fn with_max_delay_ms(mut self, max_delay_ms: u64) -> Self {
        self.max_delay_ms = max_delay_ms;
        self
    }

    /// Delay to sleep before the attempt at zero-based index `attempt`.
    ///
    /// Formula: `min(initial + step * (attempt / step_every), max)`, with
    /// attempt 0 always returning zero.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let level = match self.step_every {
            0 => 0,
            every => u64::from(attempt / every),
        };
        let delay = self
            .initial_delay_ms
            .saturating_add(self.step_ms.saturating_mul(level))
            .min(self.max_delay_ms);
        Duration::from_millis(delay)
    }
}
