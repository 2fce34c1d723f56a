//! Generation provider configuration.
//!
//! One [`ProviderSettings`] table per backend, keyed by provider name.

use crate::inference::types::{ApiStyle, GatewayError, ProviderProfile, DEFAULT_TIMEOUT_SECS};
use reqwest::Url;
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// Connection and model settings for one provider.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderSettings {
    /// Wire family (`openai_chat` or `gemini_generate_content`)
    #[serde(default = "default_api_style")]
    pub api_style: ApiStyle,
    /// Base endpoint URL
    pub base_url: String,
    /// API key; a missing key fails calls with `MissingCredential`
    pub api_key: Option<SecretString>,
    /// Model used when a request carries no override
    pub default_model: String,
    /// Whether the backend has a native JSON output switch
    #[serde(default)]
    pub supports_native_json_mode: bool,
    /// Ordered alternatives tried when a model is unavailable
    #[serde(default)]
    pub fallback_models: Vec<String>,
    /// Per-call timeout in seconds (default: 60)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderSettings {
    /// Builds the runtime profile for provider `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if `base_url` is not a valid URL.
    pub fn to_profile(&self, name: &str) -> Result<ProviderProfile, GatewayError> {
        let base_url = Url::parse(&self.base_url).map_err(|e| {
            GatewayError::Configuration(format!(
                "Invalid base_url '{}' for provider '{name}': {e}",
                self.base_url
            ))
        })?;

        let mut profile = ProviderProfile::new(name, self.api_style, base_url, &self.default_model)
            .with_native_json_mode(self.supports_native_json_mode)
            .with_fallback_chain(self.fallback_models.iter().cloned())
            .with_timeout(Duration::from_secs(self.timeout_secs));

        if let Some(key) = &self.api_key {
            profile = profile.with_credential(key.clone());
        }

        Ok(profile)
    }
}

fn default_api_style() -> ApiStyle {
    ApiStyle::OpenAiChat
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
