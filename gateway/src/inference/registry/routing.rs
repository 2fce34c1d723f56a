//! Provider routing implementation.
//!
//! This module routes generation requests to registered providers through the
//! retry/fallback controller.

use crate::inference::controller::RetryFallbackController;
use crate::inference::registry::core::ProviderRegistry;
use crate::inference::types::{GatewayError, GenerationRequest, GenerationResult};

impl ProviderRegistry {
    /// Sends a generation request to the provider it names.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is not found or if generation fails
    /// after retries and fallbacks.
    pub async fn generate(
        &self,
        controller: &RetryFallbackController,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GatewayError> {
        let provider = self.resolve(&request.provider)?;
        controller
            .execute(provider.adapter.as_ref(), &provider.profile, request)
            .await
    }
}
