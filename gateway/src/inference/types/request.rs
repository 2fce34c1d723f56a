//! Request types for generation operations.

use crate::inference::types::message::{Message, Role};

/// Default sampling temperature for new requests.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Default cap on generated tokens for new requests.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;

/// A backend-agnostic generation request.
///
/// Built once per attempt by the caller; the retry controller derives
/// per-model copies with [`GenerationRequest::for_model`] instead of mutating
/// the original.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// The conversation history, in order
    pub messages: Vec<Message>,
    /// Registered provider name; empty selects the registry default
    pub provider: String,
    /// Model override; `None` uses the provider profile's default model
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum number of tokens the backend may generate
    pub max_output_tokens: u32,
    /// Whether the backend should be asked for a JSON value
    pub json_mode: bool,
}

impl GenerationRequest {
    /// Creates a request for the named provider with default sampling settings.
    #[must_use]
    pub fn new(provider: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            messages,
            provider: provider.into(),
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            json_mode: false,
        }
    }

    /// Creates a request holding a single user message.
    #[must_use]
    pub fn with_message(provider: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(provider, vec![Message::user(content)])
    }

    /// Adds a message to the conversation
    #[must_use]
    pub fn add_message(mut self, role: Role, content: impl Into<String>) -> Self {
        self.messages.push(Message {
            role,
            content: content.into(),
        });
        self
    }

    /// Sets the model override.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the output token cap.
    #[must_use]
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Enables or disables JSON mode.
    #[must_use]
    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }

    /// Returns a copy of this request pinned to `model`.
    #[must_use]
    pub fn for_model(&self, model: &str) -> Self {
        Self {
            model: Some(model.to_string()),
            ..self.clone()
        }
    }
}
