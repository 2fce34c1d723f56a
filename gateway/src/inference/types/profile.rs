//! Provider profiles.
//!
//! A [`ProviderProfile`] is loaded once from configuration and stays
//! read-only for the lifetime of the process.

use crate::inference::types::error::GatewayError;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for one outbound generation call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Wire family spoken by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiStyle {
    /// Message-array based chat completions (`OpenAI` and compatible endpoints)
    #[serde(rename = "openai_chat")]
    OpenAiChat,
    /// Contents/parts based `generateContent` (Gemini native REST)
    #[serde(rename = "gemini_generate_content")]
    GeminiGenerateContent,
}

/// Per-provider connection and model settings.
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    /// Registered provider name
    pub name: String,
    /// Wire family used to reach the backend
    pub api_style: ApiStyle,
    /// Base endpoint, always ending in `/`
    pub base_url: Url,
    /// API credential
    pub credential: Option<SecretString>,
    /// Model used when a request carries no override
    pub default_model: String,
    /// Whether the backend has a native structured-output switch
    pub supports_native_json_mode: bool,
    /// Ordered alternatives tried when a model is unavailable
    pub model_fallback_chain: Vec<String>,
    /// Bound on one outbound call
    pub timeout: Duration,
}

impl ProviderProfile {
    /// Creates a profile without credential or fallback chain.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        api_style: ApiStyle,
        base_url: Url,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            api_style,
            base_url: with_trailing_slash(base_url),
            credential: None,
            default_model: default_model.into(),
            supports_native_json_mode: false,
            model_fallback_chain: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the API credential.
    #[must_use]
    pub fn with_credential(mut self, credential: SecretString) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Marks the backend as supporting native JSON mode.
    #[must_use]
    pub fn with_native_json_mode(mut self, supported: bool) -> Self {
        self.supports_native_json_mode = supported;
        self
    }

    /// Sets the model fallback chain.
    #[must_use]
    pub fn with_fallback_chain<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.model_fallback_chain = models.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the outbound call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the exposed credential.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingCredential`] when no non-empty
    /// credential is configured.
    pub fn credential(&self) -> Result<&str, GatewayError> {
        self.credential
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GatewayError::MissingCredential(self.name.clone()))
    }

    /// Models to try, in order, for a request carrying `requested`.
    ///
    /// Without a fallback chain of at least two entries only the requested
    /// (or default) model is returned. When the first model sits inside the
    /// chain, the candidates continue down the chain from its position;
    /// otherwise the whole chain follows it.
    #[must_use]
    pub fn model_candidates(&self, requested: Option<&str>) -> Vec<String> {
        let first = requested.unwrap_or(&self.default_model);
        if self.model_fallback_chain.len() <= 1 {
            return vec![first.to_string()];
        }

        if let Some(position) = self.model_fallback_chain.iter().position(|m| m == first) {
            return self.model_fallback_chain[position..].to_vec();
        }

        let mut candidates = vec![first.to_string()];
        for model in &self.model_fallback_chain {
            if !candidates.contains(model) {
                candidates.push(model.clone());
            }
        }
        candidates
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
