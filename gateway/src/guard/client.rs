//! HTTP client wrapper for quota-limited dependencies.

use crate::guard::circuit_breaker::CircuitBreaker;
use crate::guard::quota::QuotaDetector;
use crate::inference::status::transport_error;
use crate::inference::types::GatewayError;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout for guarded dependencies.
pub const DEFAULT_GUARDED_TIMEOUT_SECS: u64 = 30;

/// Sends requests to one downstream dependency behind a circuit breaker.
///
/// Calls are short-circuited with [`GatewayError::QuotaExhausted`] while the
/// breaker for this dependency is open. A 429 carrying a quota marker opens
/// the breaker. Any other 429 is reported as a transient failure.
#[derive(Debug, Clone)]
pub struct GuardedClient {
    name: String,
    client: Client,
    breaker: Arc<CircuitBreaker>,
    quota: QuotaDetector,
    timeout: Duration,
}

impl GuardedClient {
    /// Creates a client for the dependency `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, breaker: Arc<CircuitBreaker>) -> Self {
        Self {
            name: name.into(),
            client: Client::new(),
            breaker,
            quota: QuotaDetector::default(),
            timeout: Duration::from_secs(DEFAULT_GUARDED_TIMEOUT_SECS),
        }
    }

    /// Shares an existing HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Replaces the quota detector.
    #[must_use]
    pub fn with_quota_detector(mut self, quota: QuotaDetector) -> Self {
        self.quota = quota;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The dependency key used with the breaker.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Starts a request with this client's timeout applied.
    #[must_use]
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url).timeout(self.timeout)
    }

    /// Sends `request` unless the breaker is open.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::QuotaExhausted`] while the breaker is open or when
    ///   the response reports quota exhaustion
    /// - [`GatewayError::TransientTransportFailure`] on transport failure or
    ///   an ordinary 429
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        if !self.breaker.allow(&self.name) {
            debug!(dependency = %self.name, "Circuit open, short-circuiting call");
            return Err(GatewayError::QuotaExhausted(self.name.clone()));
        }

        let res = request.send().await.map_err(|e| transport_error(&e))?;

        if res.status() != StatusCode::TOO_MANY_REQUESTS {
            return Ok(res);
        }

        let body = res.text().await.map_err(|e| transport_error(&e))?;
        if self.quota.is_quota_exhausted(&body) {
            self.breaker.open(&self.name);
            return Err(GatewayError::QuotaExhausted(self.name.clone()));
        }

        Err(GatewayError::TransientTransportFailure {
            status: Some(StatusCode::TOO_MANY_REQUESTS.as_u16()),
            message: body,
        })
    }

    /// GETs `url` and decodes a JSON body.
    ///
    /// # Errors
    ///
    /// As [`GuardedClient::send`], plus [`GatewayError::Rejected`] for other
    /// 4xx responses, a transient failure for 5xx and an undecodable body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GatewayError> {
        let res = self.send(self.request(Method::GET, url)).await?;
        let status = res.status();
        let text = res.text().await.map_err(|e| transport_error(&e))?;

        if status.is_client_error() {
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: text,
            });
        }
        if !status.is_success() {
            return Err(GatewayError::TransientTransportFailure {
                status: Some(status.as_u16()),
                message: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| GatewayError::network(format!("Parse error: {e}")))
    }
}
