//! Response envelopes.
//!
//! Each backend family wraps its text in a different envelope. The envelope is
//! decoded into a tagged union selected by the profile's [`ApiStyle`], and each
//! variant has exactly one extraction path.

use crate::inference::gemini::{self, GeminiResponse};
use crate::inference::openai::{self, OpenAiChatResponse};
use crate::inference::types::{ApiStyle, GatewayError, GenerationResult};

/// A decoded provider response envelope.
#[derive(Debug)]
pub enum ProviderResponse {
    /// Role/choice based envelope
    OpenAiStyle(OpenAiChatResponse),
    /// Candidate/part based envelope
    GeminiStyle(GeminiResponse),
}

impl ProviderResponse {
    /// Decodes a 2xx response body for the given wire family.
    ///
    /// # Errors
    ///
    /// Returns a transient failure when the body is not the expected
    /// envelope; a fresh call may well return a readable one.
    pub fn parse(style: ApiStyle, body: &str) -> Result<Self, GatewayError> {
        let decoded = match style {
            ApiStyle::OpenAiChat => serde_json::from_str(body).map(Self::OpenAiStyle),
            ApiStyle::GeminiGenerateContent => serde_json::from_str(body).map(Self::GeminiStyle),
        };
        decoded.map_err(|e| GatewayError::network(format!("Parse error: {e}")))
    }

    /// Extracts plain text from the envelope.
    ///
    /// # Errors
    ///
    /// Returns a transient failure when the envelope carries no text.
    pub fn into_result(self, model: &str) -> Result<GenerationResult, GatewayError> {
        let extracted = match self {
            Self::OpenAiStyle(body) => openai::map_response(body, model),
            Self::GeminiStyle(body) => gemini::map_response(body, model),
        };
        extracted.map_err(GatewayError::network)
    }
}
