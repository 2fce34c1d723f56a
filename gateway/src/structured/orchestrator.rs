//! Generation-to-structured-value orchestration.
//!
//! One generation attempt is: obtain text, normalize it, try a strict parse,
//! repair on failure, parse again. A repaired text that still does not parse
//! is treated as untrustworthy, so the next step is a fresh generation rather
//! than another repair.

use crate::inference::types::GatewayError;
use crate::structured::normalize::normalize;
use crate::structured::repair::repair_with_report;
use metrics::counter;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Default number of generate-then-parse cycles.
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 3;

/// Default pause before regenerating, in milliseconds.
pub const DEFAULT_REGENERATION_DELAY_MS: u64 = 1000;

/// Why one generation's text could not be turned into a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Final output of the repair engine
    pub repaired: String,
    /// Deserializer error for the repaired text
    pub reason: String,
}

/// Turns generated text into a typed value, regenerating a bounded number of
/// times when the text cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuredGenerator {
    max_generation_attempts: u32,
    regeneration_delay: Duration,
}

impl StructuredGenerator {
    /// Creates a generator with default attempt budget and delay.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
            regeneration_delay: Duration::from_millis(DEFAULT_REGENERATION_DELAY_MS),
        }
    }

    /// Sets the number of generate-then-parse cycles.
    #[must_use]
    pub const fn with_max_generation_attempts(mut self, attempts: u32) -> Self {
        self.max_generation_attempts = attempts;
        self
    }

    /// Sets the pause before each regeneration.
    #[must_use]
    pub const fn with_regeneration_delay(mut self, delay: Duration) -> Self {
        self.regeneration_delay = delay;
        self
    }

    /// Effective attempt budget; at least one generation always runs.
    #[must_use]
    pub fn attempt_budget(&self) -> u32 {
        self.max_generation_attempts.max(1)
    }

    /// Pause before each regeneration.
    #[must_use]
    pub const fn regeneration_delay(&self) -> Duration {
        self.regeneration_delay
    }

    /// Runs `generate` until its text parses as `T` or the budget is spent.
    ///
    /// # Errors
    ///
    /// Propagates any error from `generate` unchanged. Returns
    /// [`GatewayError::UnparsableStructuredOutput`] with the last raw text and
    /// its repaired form once every attempt has failed to parse.
    pub async fn generate<T, F, Fut>(&self, mut generate: F) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<String, GatewayError>>,
    {
        let budget = self.attempt_budget();
        let mut attempt = 0;

        loop {
            attempt += 1;
            let raw = generate().await?;

            let failure = match parse_structured::<T>(&raw) {
                Ok(value) => return Ok(value),
                Err(failure) => failure,
            };

            if attempt >= budget {
                warn!(attempts = attempt, error = %failure.reason, "Structured output unparsable, giving up");
                return Err(GatewayError::UnparsableStructuredOutput {
                    attempts: attempt,
                    raw,
                    repaired: failure.repaired,
                });
            }

            let delay_ms = u64::try_from(self.regeneration_delay.as_millis()).unwrap_or(u64::MAX);
            warn!(
                attempt,
                max_attempts = budget,
                delay_ms,
                error = %failure.reason,
                "Structured output unparsable, regenerating"
            );
            counter!("gateway_regenerations_total").increment(1);
            tokio::time::sleep(self.regeneration_delay).await;
        }
    }
}

impl Default for StructuredGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizes, parses and, if needed, repairs one generation's text.
///
/// # Errors
///
/// Returns the repaired text and the deserializer error when even the
/// repaired text does not parse as `T`.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T, ParseFailure> {
    let normalized = normalize(raw);
    if let Ok(value) = serde_json::from_str::<T>(&normalized) {
        return Ok(value);
    }

    let report = repair_with_report(&normalized);
    match serde_json::from_str::<T>(&report.text) {
        Ok(value) => {
            debug!(passes = ?report.applied, "Structured output parsed after repair");
            counter!("gateway_repairs_total", "outcome" => "repaired").increment(1);
            Ok(value)
        }
        Err(e) => {
            counter!("gateway_repairs_total", "outcome" => "failed").increment(1);
            Err(ParseFailure {
                repaired: report.text,
                reason: e.to_string(),
            })
        }
    }
}
