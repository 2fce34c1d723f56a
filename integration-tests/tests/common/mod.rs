//! Shared test utilities for integration tests.
//!
//! Provides mock backends speaking the two supported wire families, a
//! scripted in-process adapter, and helpers that build a [`Gateway`] the way
//! the application does: from TOML settings.

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::VecDeque;
use wayfarer_gateway::inference::{GenerationResult, ProviderAdapter, ProviderProfile};
use wayfarer_gateway::{Gateway, GatewayError, GenerationRequest, Settings};
use wiremock::{MockServer, ResponseTemplate};

/// Chat-completions response carrying `content`.
pub fn openai_completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": content}}],
        "usage": {"prompt_tokens": 12, "completion_tokens": 34}
    }))
}

/// `generateContent` response carrying `content` in a single part.
pub fn gemini_completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": content}]},
            "finishReason": "STOP"
        }]
    }))
}

/// Settings with one `openai_chat` provider named `openai` pointing at
/// `server`, short delays, and `extra` appended verbatim.
pub fn openai_settings(server: &MockServer, extra: &str) -> Result<Settings> {
    let toml = format!(
        r#"
        default_provider = "openai"

        [retry]
        max_attempts = 3
        base_delay_ms = 5

        [structured]
        max_generation_attempts = 3
        regeneration_delay_ms = 5

        [providers.openai]
        api_style = "openai_chat"
        base_url = "{uri}/v1"
        api_key = "sk-test"
        default_model = "gpt-4o-mini"

        {extra}
        "#,
        uri = server.uri()
    );
    Ok(Settings::from_toml_str(&toml)?)
}

/// Gateway over a single `openai` provider backed by `server`.
pub fn openai_gateway(server: &MockServer) -> Result<Gateway> {
    Ok(Gateway::from_settings(&openai_settings(server, "")?)?)
}

/// A user request to the default provider.
pub fn itinerary_request(prompt: &str) -> GenerationRequest {
    GenerationRequest::with_message("", prompt)
}

/// In-process adapter replaying scripted outcomes.
pub struct StubAdapter {
    script: Mutex<VecDeque<Result<String, GatewayError>>>,
    seen: Mutex<Vec<GenerationRequest>>,
}

impl StubAdapter {
    /// Creates an adapter answering calls in order from `script`.
    pub fn new(script: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn seen(&self) -> Vec<GenerationRequest> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl ProviderAdapter for StubAdapter {
    async fn send(
        &self,
        request: &GenerationRequest,
        profile: &ProviderProfile,
    ) -> Result<GenerationResult, GatewayError> {
        self.seen.lock().push(request.clone());
        let model = request.model.as_deref().unwrap_or(&profile.default_model);
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::network("stub script exhausted")))
            .map(|content| GenerationResult::new(content, model))
    }
}
