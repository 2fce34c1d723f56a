//! Gemini `generateContent` HTTP client.

use crate::guard::QuotaDetector;
use crate::inference::envelope::ProviderResponse;
use crate::inference::gemini::mapping::create_request;
use crate::inference::provider::ProviderAdapter;
use crate::inference::status::{classify_failure, transport_error};
use crate::inference::types::{
    ApiStyle, GatewayError, GenerationRequest, GenerationResult, ProviderProfile,
};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Adapter for Gemini's native REST API.
pub struct GeminiAdapter {
    client: Client,
    quota: QuotaDetector,
}

impl GeminiAdapter {
    /// Creates an adapter with a fresh HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Creates an adapter sharing an existing HTTP client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            quota: QuotaDetector::default(),
        }
    }

    /// Replaces the quota detector used to classify 429 responses.
    #[must_use]
    pub fn with_quota_detector(mut self, quota: QuotaDetector) -> Self {
        self.quota = quota;
        self
    }
}

impl Default for GeminiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    async fn send(
        &self,
        request: &GenerationRequest,
        profile: &ProviderProfile,
    ) -> Result<GenerationResult, GatewayError> {
        let api_key = profile.credential()?;
        let model = request.model.as_deref().unwrap_or(&profile.default_model);
        let body = create_request(request, profile.supports_native_json_mode);

        // Model names are accepted with or without the `models/` resource prefix.
        let model_id = model.strip_prefix("models/").unwrap_or(model);
        let url = profile
            .base_url
            .join(&format!("models/{model_id}:generateContent"))
            .map_err(|e| GatewayError::Configuration(format!("Invalid URL join: {e}")))?;

        debug!(provider = %profile.name, model, json_mode = request.json_mode, "Sending generateContent");

        let res = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .timeout(profile.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = res.status();
        let text = res.text().await.map_err(|e| transport_error(&e))?;

        if !status.is_success() {
            return Err(classify_failure(status, &text, model, &self.quota));
        }

        ProviderResponse::parse(ApiStyle::GeminiGenerateContent, &text)?.into_result(model)
    }
}
