//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the relay and health handlers
//! - Wire up middleware (request ID, tracing, body limit, concurrency)
//! - Bound only the health endpoint with a timeout; a relay call is never cut short
//! - Bind server to listener
//! - Dispatch relay requests to the payload router
//! - Stop cleanly on the shutdown broadcast

use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::health::get_status;
use crate::http::request::{MakeRequestUuidV4, RequestIdExt};
use crate::relay::{Forwarder, HttpForwarder, PayloadRouter, RelayError};
use crate::routing::{RoutePreference, RouteTable, RouteTableError};

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid route table: {0}")]
    Routes(#[from] RouteTableError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into handlers.
pub struct AppState<F> {
    pub router: Arc<PayloadRouter<F>>,
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
        }
    }
}

/// HTTP server for the webhook relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a server that forwards with a real HTTP client.
    pub fn new(config: RelayConfig) -> Result<Self, ServerError> {
        let forwarder = HttpForwarder::new(&config.relay)?;
        Self::with_forwarder(config, forwarder)
    }

    /// Create a server around any forwarder.
    pub fn with_forwarder<F: Forwarder>(config: RelayConfig, forwarder: F) -> Result<Self, ServerError> {
        let routes = RouteTable::from_config(&config.destinations)?;

        for route in RoutePreference::ALL {
            if routes.configured(route) {
                tracing::info!(route = %route, "Destination configured");
            } else {
                tracing::warn!(
                    route = %route,
                    env = route.env_var(),
                    "No destination configured; requests for this route will fail"
                );
            }
        }

        let state = AppState {
            router: Arc::new(PayloadRouter::new(routes, forwarder)),
        };

        let router = build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            relay_path = %self.config.relay.path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router<F: Forwarder>(config: &RelayConfig, state: AppState<F>) -> Router {
    Router::new()
        .route(&config.relay.path, post(relay_handler::<F>))
        .route(
            "/health",
            get(get_status::<F>).layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.relay.max_body_size))
        .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_concurrent_requests))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request.headers().request_id(),
            )
        }))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
}

/// Relay handler.
/// Reads the raw body and hands it to the payload router.
async fn relay_handler<F: Forwarder>(
    State(state): State<AppState<F>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let request_id = headers.request_id();

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let err = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                RelayError::PayloadTooLarge
            } else {
                RelayError::InvalidBody(rejection.body_text())
            };
            tracing::warn!(request_id = %request_id, error = %err, "Rejected request body");
            return err.into_response();
        }
    };

    match state.router.route(&body).await {
        Ok(delivery) => {
            tracing::info!(
                request_id = %request_id,
                upstream_status = %delivery.status,
                "Webhook relayed"
            );
            delivery.into_response()
        }
        Err(err) => {
            tracing::debug!(
                request_id = %request_id,
                kind = err.kind(),
                status = %err.status_code(),
                "Webhook relay failed"
            );
            err.into_response()
        }
    }
}
