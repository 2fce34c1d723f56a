//! Retry policy for transient failures.
//!
//! Backoff is linear: the wait before re-invoking after attempt `n` is
//! `n * base_delay`.

use std::time::Duration;

/// Default number of attempts per model, including the first
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default base delay for linear backoff (in milliseconds)
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;

/// Retry configuration for the retry/fallback controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum attempts per model, including the first
    pub max_attempts: u32,
    /// Base delay for linear backoff
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPolicy {
    /// Creates a retry policy with default values
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
        }
    }

    /// Sets the maximum number of attempts
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the base delay for linear backoff
    #[must_use]
    pub const fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Attempt budget, never below one.
    #[must_use]
    pub fn attempt_budget(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait after failed attempt `attempt` (1-based).
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}
