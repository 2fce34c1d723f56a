//! Error types for gateway operations.
//!
//! [`GatewayError`] is the closed taxonomy surfaced to callers. Every variant
//! maps to exactly one [`FailureKind`], which is what the retry controller
//! acts on.

/// How the retry controller reacts to a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Wait and re-invoke the same model
    Transient,
    /// Advance to the next model in the fallback chain
    ModelUnavailable,
    /// Propagate immediately
    Fatal,
}

/// Errors that can occur while generating text or structured output.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// The provider has no usable credential configured
    #[error("Missing credential for provider '{0}'")]
    MissingCredential(String),
    /// Network failure, timeout, 5xx or ordinary throttling
    #[error("Transient transport failure{}: {message}", fmt_status(.status))]
    TransientTransportFailure {
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// Failure description
        message: String,
    },
    /// The backend refused the request (authentication, malformed request)
    #[error("Request rejected (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status returned by the backend
        status: u16,
        /// Response body or description
        message: String,
    },
    /// The requested model is unknown to the backend
    #[error("Model unavailable: {model}")]
    ModelUnavailable {
        /// The model that was requested
        model: String,
        /// Response body or description
        message: String,
    },
    /// An allocated usage quota is exhausted
    #[error("Quota exhausted for '{0}'; dependency temporarily unavailable")]
    QuotaExhausted(String),
    /// Generation budget spent without producing parsable structured output
    #[error("Unparsable structured output after {attempts} generation attempt(s)")]
    UnparsableStructuredOutput {
        /// Number of generate-then-parse cycles performed
        attempts: u32,
        /// Raw text of the last generation
        raw: String,
        /// Final output of the repair engine for that text
        repaired: String,
    },
    /// Invalid configuration or unknown provider
    #[error("Configuration Error: {0}")]
    Configuration(String),
}

#[allow(clippy::ref_option)]
fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl GatewayError {
    /// Creates a transient failure without an HTTP status.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::TransientTransportFailure {
            status: None,
            message: message.into(),
        }
    }

    /// Classifies this error for the retry controller.
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::TransientTransportFailure { .. } => FailureKind::Transient,
            Self::ModelUnavailable { .. } => FailureKind::ModelUnavailable,
            Self::MissingCredential(_)
            | Self::Rejected { .. }
            | Self::QuotaExhausted(_)
            | Self::UnparsableStructuredOutput { .. }
            | Self::Configuration(_) => FailureKind::Fatal,
        }
    }

    /// Returns `true` if this error is transient and retry may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.failure_kind() == FailureKind::Transient
    }
}
