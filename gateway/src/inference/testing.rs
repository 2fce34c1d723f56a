//! Scripted adapter for unit tests.

use crate::inference::provider::ProviderAdapter;
use crate::inference::types::{GatewayError, GenerationRequest, GenerationResult, ProviderProfile};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Replays a fixed sequence of outcomes and records every call.
pub(crate) struct ScriptedAdapter {
    script: Mutex<VecDeque<Result<String, GatewayError>>>,
    repeat: Option<Result<String, GatewayError>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedAdapter {
    pub(crate) fn new(script: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            repeat: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn repeating(outcome: Result<String, GatewayError>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            repeat: Some(outcome),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub(crate) fn models(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .map(|r| r.model.clone().unwrap_or_default())
            .collect()
    }

    pub(crate) fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl ProviderAdapter for ScriptedAdapter {
    async fn send(
        &self,
        request: &GenerationRequest,
        profile: &ProviderProfile,
    ) -> Result<GenerationResult, GatewayError> {
        self.requests.lock().push(request.clone());
        let model = request.model.as_deref().unwrap_or(&profile.default_model);

        let next = self.script.lock().pop_front();
        let outcome = next
            .or_else(|| self.repeat.clone())
            .unwrap_or_else(|| Err(GatewayError::network("script exhausted")));

        outcome.map(|content| GenerationResult::new(content, model))
    }
}
