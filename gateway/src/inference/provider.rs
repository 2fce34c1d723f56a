//! Adapter seam between the controller and backend wire families.

use crate::inference::gemini::GeminiAdapter;
use crate::inference::openai::OpenAiChatAdapter;
use crate::inference::types::{
    ApiStyle, GatewayError, GenerationRequest, GenerationResult, ProviderProfile,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Instruction injected when JSON mode is requested from a backend without a
/// native structured-output switch.
pub const JSON_MODE_INSTRUCTION: &str = "Respond with a single valid JSON value only. \
Do not wrap it in markdown code fences and do not add any commentary.";

/// Maps a backend-agnostic request onto one backend family.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Sends one request to the backend described by `profile`.
    ///
    /// The model is `request.model`, or the profile's default model when the
    /// request carries none.
    async fn send(
        &self,
        request: &GenerationRequest,
        profile: &ProviderProfile,
    ) -> Result<GenerationResult, GatewayError>;
}

/// Builds the adapter matching the profile's wire family.
#[must_use]
pub fn adapter_for(profile: &ProviderProfile) -> Arc<dyn ProviderAdapter> {
    match profile.api_style {
        ApiStyle::OpenAiChat => Arc::new(OpenAiChatAdapter::new()),
        ApiStyle::GeminiGenerateContent => Arc::new(GeminiAdapter::new()),
    }
}
