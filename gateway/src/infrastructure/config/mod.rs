//! Configuration management for the gateway.
//!
//! Settings are layered: built-in defaults, then an optional TOML file named
//! by `WAYFARER_CONFIG`, then environment variables prefixed with `WAYFARER`
//! using `__` as the nesting separator, e.g.
//! `WAYFARER__PROVIDERS__GEMINI__API_KEY`.
//!
//! # Example
//!
//! ```
//! use wayfarer_gateway::infrastructure::config::Settings;
//!
//! let settings = Settings::from_toml_str(
//!     r#"
//!     default_provider = "openai"
//!
//!     [providers.openai]
//!     base_url = "https://api.openai.com/v1"
//!     default_model = "gpt-4o-mini"
//!     "#,
//! )
//! .expect("valid configuration");
//! assert_eq!(settings.retry.max_attempts, 3);
//! ```

pub mod guarded;
pub mod providers;
pub mod resilience;
pub mod telemetry;

pub use guarded::GuardedDependencySettings;
pub use providers::ProviderSettings;
pub use resilience::{RetrySettings, StructuredSettings};
pub use telemetry::TelemetrySettings;

use crate::guard::{CircuitBreaker, DEFAULT_COOLDOWN_SECS};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Environment variable naming an optional TOML configuration file.
pub const CONFIG_FILE_ENV: &str = "WAYFARER_CONFIG";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "WAYFARER";

/// Top-level configuration for the gateway.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Telemetry settings.
    pub telemetry: TelemetrySettings,
    /// Provider used when a request names none.
    #[serde(default)]
    pub default_provider: Option<String>,
    /// Generation providers by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderSettings>,
    /// Transient retry settings.
    #[serde(default)]
    pub retry: RetrySettings,
    /// Structured output settings.
    #[serde(default)]
    pub structured: StructuredSettings,
    /// Quota-limited dependencies by key.
    #[serde(default)]
    pub guarded: HashMap<String, GuardedDependencySettings>,
}

impl Settings {
    /// Loads settings from defaults, the optional config file and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built or deserialized.
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            builder = builder.add_source(File::with_name(&path).format(FileFormat::Toml));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Builds settings from defaults and an in-memory TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or misses required keys.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Builds one circuit breaker covering every guarded dependency, each
    /// with its configured cooldown.
    #[must_use]
    pub fn circuit_breaker(&self) -> CircuitBreaker {
        self.guarded.iter().fold(
            CircuitBreaker::new(Duration::from_secs(DEFAULT_COOLDOWN_SECS)),
            |breaker, (key, dependency)| breaker.with_cooldown(key, dependency.cooldown()),
        )
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("telemetry.service_name", "wayfarer-gateway")?
            .set_default("telemetry.sampling_ratio", 1.0)?
            .set_default("telemetry.log_level", "info")
    }
}
