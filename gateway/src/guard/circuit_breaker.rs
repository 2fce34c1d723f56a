//! Lazy-expiry circuit breaker.
//!
//! This module isolates a quota-limited downstream dependency once quota
//! exhaustion has been observed. State is keyed by dependency name and is
//! created on the first [`CircuitBreaker::open`]. There is no background timer:
//! an open state whose cooldown has lapsed is removed by the next
//! [`CircuitBreaker::allow`] that observes it.
//!
//! The breaker never inspects responses. Callers check `allow` before the
//! guarded call and call `open` themselves when they classify a response as
//! quota exhaustion (see [`crate::guard::QuotaDetector`]).

use crate::guard::clock::{Clock, SystemClock};
use metrics::counter;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default cooldown in seconds before an open breaker lets calls through again
pub const DEFAULT_COOLDOWN_SECS: u64 = 300;

/// State of one dependency's breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerState {
    /// Whether calls are currently short-circuited
    pub is_open: bool,
    /// When the breaker was opened
    pub opened_at: Instant,
    /// How long the breaker stays open
    pub cooldown: Duration,
}

impl CircuitBreakerState {
    fn has_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.opened_at) >= self.cooldown
    }

    /// Returns `true` if calls are short-circuited at `now`.
    #[must_use]
    pub fn blocks_at(&self, now: Instant) -> bool {
        self.is_open && !self.has_expired(now)
    }
}

/// A keyed, lazily expiring circuit breaker.
///
/// The state map lock is held only for the map read or write, never across
/// the guarded call. Two racing callers may both be allowed through before
/// either opens the breaker.
#[derive(Debug)]
pub struct CircuitBreaker {
    states: Mutex<HashMap<String, CircuitBreakerState>>,
    cooldowns: HashMap<String, Duration>,
    default_cooldown: Duration,
    clock: Arc<dyn Clock>,
}

impl CircuitBreaker {
    /// Creates a breaker using the system clock.
    #[must_use]
    pub fn new(default_cooldown: Duration) -> Self {
        Self::with_clock(default_cooldown, Arc::new(SystemClock))
    }

    /// Creates a breaker reading time from `clock`.
    #[must_use]
    pub fn with_clock(default_cooldown: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
            cooldowns: HashMap::new(),
            default_cooldown,
            clock,
        }
    }

    /// Sets the cooldown for one dependency key.
    #[must_use]
    pub fn with_cooldown(mut self, key: impl Into<String>, cooldown: Duration) -> Self {
        self.cooldowns.insert(key.into(), cooldown);
        self
    }

    /// Cooldown applied when `key` is opened.
    #[must_use]
    pub fn cooldown_for(&self, key: &str) -> Duration {
        self.cooldowns
            .get(key)
            .copied()
            .unwrap_or(self.default_cooldown)
    }

    /// Returns `false` only while `key` is open and its cooldown has not
    /// elapsed. An expired state is removed.
    pub fn allow(&self, key: &str) -> bool {
        let now = self.clock.now();
        let mut states = self.states.lock();

        let Some(state) = states.get(key) else {
            return true;
        };

        if state.blocks_at(now) {
            drop(states);
            counter!("gateway_breaker_rejections_total", "dependency" => key.to_string())
                .increment(1);
            return false;
        }

        states.remove(key);
        drop(states);
        debug!(dependency = key, "Circuit breaker cooldown elapsed, closing");
        true
    }

    /// Opens the breaker for `key`.
    ///
    /// A breaker that is already open keeps its original `opened_at`, so
    /// racing callers reporting the same exhaustion do not extend the
    /// cooldown.
    pub fn open(&self, key: &str) {
        let now = self.clock.now();
        let cooldown = self.cooldown_for(key);
        let mut states = self.states.lock();

        if states.get(key).is_some_and(|s| s.blocks_at(now)) {
            return;
        }

        states.insert(
            key.to_string(),
            CircuitBreakerState {
                is_open: true,
                opened_at: now,
                cooldown,
            },
        );
        drop(states);

        let cooldown_secs = cooldown.as_secs();
        warn!(dependency = key, cooldown_secs, "Quota exhausted, circuit breaker opened");
        counter!("gateway_breaker_opened_total", "dependency" => key.to_string()).increment(1);
    }

    /// Returns a copy of the stored state for `key` without expiring it.
    #[must_use]
    pub fn state(&self, key: &str) -> Option<CircuitBreakerState> {
        self.states.lock().get(key).copied()
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_COOLDOWN_SECS))
    }
}
