//! Payload routing: parse, validate, resolve, forward, normalize.

use axum::body::Bytes;
use axum::http::StatusCode;
use serde_json::Value;
use std::time::Instant;

use crate::observability::metrics;
use crate::relay::error::RelayError;
use crate::relay::forwarder::{Forwarder, UpstreamResponse};
use crate::relay::payload::InboundPayload;
use crate::routing::RouteTable;

/// Upper bound on upstream body text reflected back in `details`.
pub const MAX_DETAILS_CHARS: usize = 2000;

/// Successful relay outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    /// Status the destination answered with.
    pub status: StatusCode,
    /// Parsed destination body, or `Null` when empty or not JSON.
    pub data: Value,
}

pub type RelayResult = Result<Delivery, RelayError>;

/// Stateless relay over an immutable route table.
#[derive(Debug)]
pub struct PayloadRouter<F> {
    routes: RouteTable,
    forwarder: F,
}

impl<F: Forwarder> PayloadRouter<F> {
    pub fn new(routes: RouteTable, forwarder: F) -> Self {
        Self { routes, forwarder }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Relay one raw inbound body.
    pub async fn route(&self, raw: &[u8]) -> RelayResult {
        let start = Instant::now();

        let payload = match InboundPayload::parse(raw) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected inbound payload");
                metrics::record_relay("none", e.kind(), start);
                return Err(e);
            }
        };

        let route = payload.route();
        let result = self.relay(&payload).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::record_relay(route.as_str(), outcome, start);

        result
    }

    /// Relay a payload that already passed validation.
    pub async fn relay(&self, payload: &InboundPayload) -> RelayResult {
        let route = payload.route();

        let Some(destination) = self.routes.destination(route) else {
            tracing::error!(route = %route, env = route.env_var(), "No destination configured for route");
            return Err(RelayError::Misconfigured(route));
        };

        let start = Instant::now();
        let upstream = self.forwarder.forward(destination, payload.document()).await;
        metrics::record_upstream(route.as_str(), start);

        let upstream = upstream.map_err(|e| {
            tracing::error!(route = %route, error = %e, "Failed to forward webhook");
            RelayError::from(e)
        })?;

        normalize(upstream).inspect_err(|e| {
            tracing::warn!(route = %route, error = %e, "Upstream webhook request failed");
        })
    }
}

/// Turn a raw upstream answer into a delivery or an upstream failure.
pub fn normalize(upstream: UpstreamResponse) -> RelayResult {
    if !upstream.status.is_success() {
        return Err(RelayError::Upstream {
            status: upstream.status,
            details: truncate_details(&upstream.body),
        });
    }

    // Empty or non-JSON success bodies are allowed.
    let data = serde_json::from_slice(&upstream.body).unwrap_or(Value::Null);

    Ok(Delivery {
        status: upstream.status,
        data,
    })
}

/// Upstream body as text, capped at [`MAX_DETAILS_CHARS`]; `None` when empty.
pub fn truncate_details(body: &Bytes) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    let text = String::from_utf8_lossy(body);
    Some(text.chars().take(MAX_DETAILS_CHARS).collect())
}
