//! Provider adapters and the retry/fallback controller.
//!
//! Requests flow from [`RetryFallbackController`] through the
//! [`ProviderRegistry`] to one [`ProviderAdapter`] per wire family.

pub mod controller;
pub mod envelope;
pub mod gemini;
pub mod openai;
pub mod provider;
pub mod registry;
pub mod retry;
pub mod status;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::RetryFallbackController;
pub use envelope::ProviderResponse;
pub use gemini::GeminiAdapter;
pub use openai::OpenAiChatAdapter;
pub use provider::{adapter_for, ProviderAdapter, JSON_MODE_INSTRUCTION};
pub use registry::{ProviderRegistry, RegisteredProvider};
pub use retry::RetryPolicy;
pub use types::*;
