//! Relay failure taxonomy and its mapping onto the response envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::response::{envelope_response, FailureEnvelope};
use crate::relay::forwarder::ForwardError;
use crate::routing::RoutePreference;

pub const MSG_INVALID_JSON: &str = "Invalid JSON payload.";
pub const MSG_TOO_LARGE: &str = "Payload too large.";
pub const MSG_NOT_CONFIGURED: &str = "Webhook is not configured for this route type.";
pub const MSG_UPSTREAM_FAILED: &str = "Upstream webhook request failed.";
pub const MSG_FORWARD_FAILED: &str = "Failed to forward webhook.";

/// Every way a relay attempt can fail.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Body is not valid JSON.
    #[error("malformed JSON body: {0}")]
    Parse(#[source] serde_json::Error),

    /// Body could not be read off the connection.
    #[error("unreadable request body: {0}")]
    InvalidBody(String),

    /// Body exceeded the configured limit.
    #[error("request body exceeds the size limit")]
    PayloadTooLarge,

    /// JSON parsed but failed the schema; holds the first violation.
    #[error("{0}")]
    Validation(String),

    /// The route key is valid but has no destination.
    #[error("no destination configured for route '{0}'")]
    Misconfigured(RoutePreference),

    /// Destination answered with a non-success status.
    #[error("upstream returned {status}")]
    Upstream {
        status: StatusCode,
        details: Option<String>,
    },

    /// Destination could not be reached.
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl RelayError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Parse(_) => "parse_error",
            RelayError::InvalidBody(_) => "invalid_body",
            RelayError::PayloadTooLarge => "payload_too_large",
            RelayError::Validation(_) => "validation_error",
            RelayError::Misconfigured(_) => "misconfigured",
            RelayError::Upstream { .. } => "upstream_error",
            RelayError::Transport(_) => "transport_error",
            RelayError::Unexpected(_) => "unexpected_error",
        }
    }

    /// HTTP status returned to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Parse(_) | RelayError::InvalidBody(_) | RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            RelayError::Misconfigured(_) | RelayError::Transport(_) | RelayError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Envelope body for this failure. Internal detail never leaks for 5xx.
    pub fn envelope(&self) -> FailureEnvelope {
        match self {
            RelayError::Parse(_) => FailureEnvelope::new(MSG_INVALID_JSON),
            RelayError::InvalidBody(msg) | RelayError::Validation(msg) => FailureEnvelope::new(msg.clone()),
            RelayError::PayloadTooLarge => FailureEnvelope::new(MSG_TOO_LARGE),
            RelayError::Misconfigured(_) => FailureEnvelope::new(MSG_NOT_CONFIGURED),
            RelayError::Upstream { status, details } => FailureEnvelope {
                status: Some(status.as_u16()),
                details: details.clone(),
                ..FailureEnvelope::new(MSG_UPSTREAM_FAILED)
            },
            RelayError::Transport(_) | RelayError::Unexpected(_) => FailureEnvelope::new(MSG_FORWARD_FAILED),
        }
    }
}

impl From<ForwardError> for RelayError {
    fn from(err: ForwardError) -> Self {
        match err {
            ForwardError::Transport(msg) => RelayError::Transport(msg),
            ForwardError::Request(msg) => RelayError::Unexpected(msg),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        envelope_response(self.status_code(), &self.envelope())
    }
}
