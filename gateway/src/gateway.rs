//! The gateway facade.
//!
//! [`Gateway`] is what the rest of the backend talks to. It exposes two
//! operations: [`Gateway::generate_text`] for prose and
//! [`Gateway::generate_structured`] for typed values. Both surface only
//! [`GatewayError`].

use crate::inference::{
    adapter_for, GatewayError, GenerationRequest, ProviderRegistry, RetryFallbackController,
    RetryPolicy,
};
use crate::infrastructure::config::Settings;
use crate::structured::StructuredGenerator;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{info, instrument};

/// Entry point for text and structured generation.
#[derive(Clone)]
pub struct Gateway {
    registry: Arc<ProviderRegistry>,
    controller: RetryFallbackController,
    structured: StructuredGenerator,
}

impl Gateway {
    /// Creates a gateway over `registry` with default budgets.
    #[must_use]
    pub fn new(registry: ProviderRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            controller: RetryFallbackController::new(RetryPolicy::new()),
            structured: StructuredGenerator::new(),
        }
    }

    /// Builds a gateway with every configured provider registered.
    ///
    /// The configured default provider is used for requests naming none; a
    /// single configured provider becomes the default implicitly.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if a provider's settings are
    /// invalid, the default provider is not configured, or several providers
    /// are configured without a default.
    pub fn from_settings(settings: &Settings) -> Result<Self, GatewayError> {
        let registry = ProviderRegistry::new();
        for (name, provider) in &settings.providers {
            let profile = provider.to_profile(name)?;
            let adapter = adapter_for(&profile);
            registry.register_with_adapter(profile, adapter);
        }

        let default = match (&settings.default_provider, settings.providers.len()) {
            (Some(name), _) => Some(name.clone()),
            (None, 1) => settings.providers.keys().next().cloned(),
            (None, 0) => None,
            (None, _) => {
                return Err(GatewayError::Configuration(
                    "default_provider must be set when several providers are configured"
                        .to_string(),
                ))
            }
        };
        if let Some(name) = default {
            if registry.get(&name).is_none() {
                return Err(GatewayError::Configuration(format!(
                    "Default provider '{name}' is not configured"
                )));
            }
            registry.set_default(name);
        }

        info!(providers = ?registry.list_providers(), "Gateway configured");

        Ok(Self::new(registry)
            .with_retry_policy(settings.retry.policy())
            .with_structured_generator(settings.structured.generator()))
    }

    /// Replaces the transient retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.controller = RetryFallbackController::new(policy);
        self
    }

    /// Replaces the structured output orchestrator.
    #[must_use]
    pub fn with_structured_generator(mut self, structured: StructuredGenerator) -> Self {
        self.structured = structured;
        self
    }

    /// The provider registry.
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Generates prose.
    ///
    /// # Errors
    ///
    /// Returns the error left once retries and model fallbacks are spent.
    #[instrument(skip_all, fields(provider = %request.provider))]
    pub async fn generate_text(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let result = self.registry.generate(&self.controller, request).await?;
        Ok(result.content)
    }

    /// Generates a value of type `T`.
    ///
    /// JSON mode is always switched on. Unparsable output is repaired, and
    /// regenerated when repair is not enough.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Gateway::generate_text`], or
    /// [`GatewayError::UnparsableStructuredOutput`] once the generation budget
    /// is spent.
    #[instrument(skip_all, fields(provider = %request.provider))]
    pub async fn generate_structured<T: DeserializeOwned>(
        &self,
        request: &GenerationRequest,
    ) -> Result<T, GatewayError> {
        let request = &request.clone().with_json_mode(true);
        let this = self;
        self.structured
            .generate(|| async move { this.generate_text(request).await })
            .await
    }
}
