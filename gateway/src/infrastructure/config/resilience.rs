//! Retry and structured-output budgets.

use crate::inference::retry::{RetryPolicy, DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS};
use crate::structured::{
    StructuredGenerator, DEFAULT_MAX_GENERATION_ATTEMPTS, DEFAULT_REGENERATION_DELAY_MS,
};
use serde::Deserialize;
use std::time::Duration;

/// Transient retry settings for one model call.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    /// Total attempts per model (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Linear backoff step in milliseconds (default: 1000)
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl RetrySettings {
    /// Converts to the controller's policy.
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new()
            .with_max_attempts(self.max_attempts)
            .with_base_delay(Duration::from_millis(self.base_delay_ms))
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

/// Generate-then-parse cycle settings.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct StructuredSettings {
    /// Generation attempts before giving up (default: 3)
    #[serde(default = "default_max_generation_attempts")]
    pub max_generation_attempts: u32,
    /// Pause before each regeneration in milliseconds (default: 1000)
    #[serde(default = "default_regeneration_delay_ms")]
    pub regeneration_delay_ms: u64,
}

impl StructuredSettings {
    /// Converts to the orchestrator.
    #[must_use]
    pub fn generator(&self) -> StructuredGenerator {
        StructuredGenerator::new()
            .with_max_generation_attempts(self.max_generation_attempts)
            .with_regeneration_delay(Duration::from_millis(self.regeneration_delay_ms))
    }
}

impl Default for StructuredSettings {
    fn default() -> Self {
        Self {
            max_generation_attempts: default_max_generation_attempts(),
            regeneration_delay_ms: default_regeneration_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_base_delay_ms() -> u64 {
    DEFAULT_BASE_DELAY_MS
}

fn default_max_generation_attempts() -> u32 {
    DEFAULT_MAX_GENERATION_ATTEMPTS
}

fn default_regeneration_delay_ms() -> u64 {
    DEFAULT_REGENERATION_DELAY_MS
}
