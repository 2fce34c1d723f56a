//! HTTP failure classification shared by every adapter.
//!
//! Maps a transport error or a non-2xx response onto the [`GatewayError`]
//! taxonomy so the retry controller can pick exactly one follow-up action.

use crate::guard::QuotaDetector;
use crate::inference::types::GatewayError;
use reqwest::StatusCode;

/// Body fragments signalling that the requested model does not exist.
///
/// Only consulted for 4xx responses other than 429.
pub const UNKNOWN_MODEL_MARKERS: &[&str] = &[
    "model_not_found",
    "does not exist",
    "is not found",
    "unknown model",
    "not supported for generatecontent",
];

/// Non-standard "overloaded" status, treated like a 503.
const STATUS_OVERLOADED: u16 = 529;

/// Classifies a non-2xx response.
#[must_use]
pub fn classify_failure(
    status: StatusCode,
    body: &str,
    model: &str,
    quota: &QuotaDetector,
) -> GatewayError {
    if status == StatusCode::NOT_FOUND {
        return model_unavailable(body, model);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        if quota.is_quota_exhausted(body) {
            return GatewayError::QuotaExhausted(model.to_string());
        }
        return transient(status, body);
    }

    if status.is_server_error() || status.as_u16() == STATUS_OVERLOADED {
        return transient(status, body);
    }

    if status.is_client_error() {
        let lowered = body.to_lowercase();
        if UNKNOWN_MODEL_MARKERS.iter().any(|m| lowered.contains(m)) {
            return model_unavailable(body, model);
        }
        return GatewayError::Rejected {
            status: status.as_u16(),
            message: body.to_string(),
        };
    }

    transient(status, body)
}

/// Classifies a failure to obtain a response at all.
#[must_use]
pub fn transport_error(error: &reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::network(format!("request timed out: {error}"))
    } else {
        GatewayError::network(error.to_string())
    }
}

fn model_unavailable(body: &str, model: &str) -> GatewayError {
    GatewayError::ModelUnavailable {
        model: model.to_string(),
        message: body.to_string(),
    }
}

fn transient(status: StatusCode, body: &str) -> GatewayError {
    GatewayError::TransientTransportFailure {
        status: Some(status.as_u16()),
        message: body.to_string(),
    }
}
