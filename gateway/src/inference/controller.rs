//! Retry/fallback controller.
//!
//! Wraps one adapter call per [`GenerationRequest`] with two independent
//! mechanisms: transient retry with linear backoff, and advancing through the
//! profile's model fallback chain when a model is unavailable. Every failure
//! triggers at most one of the two.

use crate::inference::provider::ProviderAdapter;
use crate::inference::retry::RetryPolicy;
use crate::inference::types::{
    FailureKind, GatewayError, GenerationRequest, GenerationResult, ProviderProfile,
};
use metrics::counter;
use tracing::{debug, warn};

/// Executes adapter calls under a [`RetryPolicy`] and model fallback chain.
#[derive(Debug, Clone, Default)]
pub struct RetryFallbackController {
    policy: RetryPolicy,
}

impl RetryFallbackController {
    /// Creates a controller with the given retry policy.
    #[must_use]
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Runs `request` against `adapter`, retrying and falling back as needed.
    ///
    /// Each model candidate gets its own transient-retry budget.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error, the last transient error once a model's
    /// budget is spent, or `ModelUnavailable` once the chain is exhausted.
    pub async fn execute(
        &self,
        adapter: &dyn ProviderAdapter,
        profile: &ProviderProfile,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GatewayError> {
        let candidates = profile.model_candidates(request.model.as_deref());
        let budget = self.policy.attempt_budget();

        for (index, model) in candidates.iter().enumerate() {
            let pinned = request.for_model(model);
            let has_next_model = index + 1 < candidates.len();
            let mut attempt = 1;

            loop {
                let error = match adapter.send(&pinned, profile).await {
                    Ok(result) => {
                        debug!(provider = %profile.name, model = %model, attempt, "Generation succeeded");
                        return Ok(result);
                    }
                    Err(error) => error,
                };

                match error.failure_kind() {
                    FailureKind::Transient if attempt < budget => {
                        let delay = self.policy.delay_for_attempt(attempt);
                        let delay_ms: u64 = delay.as_millis().try_into().unwrap_or(u64::MAX);
                        warn!(
                            provider = %profile.name,
                            model = %model,
                            attempt,
                            max_attempts = budget,
                            delay_ms,
                            error = %error,
                            "Generation failed, retrying after backoff"
                        );
                        counter!("gateway_retries_total", "provider" => profile.name.clone())
                            .increment(1);
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    FailureKind::ModelUnavailable if has_next_model => {
                        warn!(
                            provider = %profile.name,
                            model = %model,
                            next_model = %candidates[index + 1],
                            "Model unavailable, advancing fallback chain"
                        );
                        counter!("gateway_model_fallbacks_total", "provider" => profile.name.clone())
                            .increment(1);
                        break;
                    }
                    _ => {
                        debug!(provider = %profile.name, model = %model, attempt, error = %error, "Generation failed");
                        return Err(error);
                    }
                }
            }
        }

        Err(GatewayError::Configuration(format!(
            "Provider '{}' has no model to try",
            profile.name
        )))
    }
}
