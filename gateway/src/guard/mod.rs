//! Protection for quota-limited downstream dependencies.
//!
//! The [`CircuitBreaker`] keeps per-dependency open/closed state with lazy
//! expiry, the [`QuotaDetector`] recognizes exhaustion payloads, and the
//! [`GuardedClient`] ties both around an HTTP client.

pub mod circuit_breaker;
pub mod client;
pub mod clock;
pub mod quota;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerState, DEFAULT_COOLDOWN_SECS};
pub use client::{GuardedClient, DEFAULT_GUARDED_TIMEOUT_SECS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use quota::{QuotaDetector, DEFAULT_QUOTA_MARKERS};
