//! Outbound delivery to a destination webhook.
//!
//! # Responsibilities
//! - Issue exactly one POST per relay attempt
//! - Mark the call non-cacheable
//! - Hand back the raw status and body for the router to interpret
//!
//! # Design Decisions
//! - No retries and no timeout override; the client defaults apply
//! - A body that cannot be read is reported as empty
//! - Connection pooling belongs to reqwest, not to this module

use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use serde_json::Value;
use std::future::Future;
use thiserror::Error;
use url::Url;

use crate::config::RelayEndpointConfig;

/// Why an outbound call produced no response.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// Connect, TLS or I/O failure talking to the destination.
    #[error("{0}")]
    Transport(String),

    /// The outbound request could not be built.
    #[error("{0}")]
    Request(String),
}

/// Raw answer from a destination.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Sends a payload to a destination.
pub trait Forwarder: Send + Sync + 'static {
    fn forward(
        &self,
        destination: &Url,
        payload: &Value,
    ) -> impl Future<Output = Result<UpstreamResponse, ForwardError>> + Send;
}

/// Production forwarder backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpForwarder {
    client: reqwest::Client,
}

impl HttpForwarder {
    /// Build the client once at startup.
    pub fn new(config: &RelayEndpointConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self { client: builder.build()? })
    }
}

impl Forwarder for HttpForwarder {
    fn forward(
        &self,
        destination: &Url,
        payload: &Value,
    ) -> impl Future<Output = Result<UpstreamResponse, ForwardError>> + Send {
        let request = self.client.post(destination.clone()).json(payload).send();

        async move {
            let response = request.await.map_err(|e| {
                if e.is_builder() {
                    ForwardError::Request(e.to_string())
                } else {
                    ForwardError::Transport(e.to_string())
                }
            })?;

            let status = response.status();

            let body = match response.bytes().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(status = %status, error = %e, "Failed to read upstream body");
                    Bytes::new()
                }
            };

            Ok(UpstreamResponse { status, body })
        }
    }
}
