//! Quota-limited dependency configuration.

use crate::guard::{QuotaDetector, DEFAULT_COOLDOWN_SECS, DEFAULT_QUOTA_MARKERS};
use serde::Deserialize;
use std::time::Duration;

/// Breaker settings for one guarded dependency.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GuardedDependencySettings {
    /// How long the breaker stays open after quota exhaustion (default: 300)
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
    /// Keywords marking a 429 body as quota exhaustion
    #[serde(default = "default_quota_markers")]
    pub quota_markers: Vec<String>,
}

impl GuardedDependencySettings {
    /// Breaker cooldown.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    /// Detector for this dependency's quota markers.
    #[must_use]
    pub fn quota_detector(&self) -> QuotaDetector {
        QuotaDetector::new(&self.quota_markers)
    }
}

impl Default for GuardedDependencySettings {
    fn default() -> Self {
        Self {
            cooldown_secs: default_cooldown_secs(),
            quota_markers: default_quota_markers(),
        }
    }
}

fn default_cooldown_secs() -> u64 {
    DEFAULT_COOLDOWN_SECS
}

fn default_quota_markers() -> Vec<String> {
    DEFAULT_QUOTA_MARKERS.iter().map(ToString::to_string).collect()
}
