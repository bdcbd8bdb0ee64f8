//! Shared utilities for integration testing.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use webhook_relay::config::RelayConfig;
use webhook_relay::http::HttpServer;
use webhook_relay::lifecycle::Shutdown;

/// What the mock upstream saw.
#[derive(Clone, Default)]
pub struct Recorded {
    pub calls: Arc<AtomicUsize>,
    pub bodies: Arc<Mutex<Vec<Bytes>>>,
    pub headers: Arc<Mutex<Vec<HeaderMap>>>,
}

#[allow(dead_code)]
impl Recorded {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_json(&self) -> serde_json::Value {
        let bodies = self.bodies.lock().unwrap();
        serde_json::from_slice(bodies.last().expect("no upstream call recorded")).unwrap()
    }

    pub fn last_headers(&self) -> HeaderMap {
        self.headers.lock().unwrap().last().cloned().expect("no upstream call recorded")
    }
}

#[derive(Clone)]
struct MockState {
    recorded: Recorded,
    status: StatusCode,
    body: &'static str,
}

async fn mock_webhook(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> (StatusCode, &'static str) {
    state.recorded.calls.fetch_add(1, Ordering::SeqCst);
    state.recorded.bodies.lock().unwrap().push(body);
    state.recorded.headers.lock().unwrap().push(headers);
    (state.status, state.body)
}

/// Start a mock n8n webhook on an ephemeral port that answers with a fixed response.
pub async fn start_mock_upstream(status: u16, body: &'static str) -> (SocketAddr, Recorded) {
    let recorded = Recorded::default();
    let state = MockState {
        recorded: recorded.clone(),
        status: StatusCode::from_u16(status).unwrap(),
        body,
    };

    let app = Router::new()
        .route("/webhook/{id}", post(mock_webhook))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, recorded)
}

/// Start the relay on an ephemeral port. Returns its address and the shutdown handle.
pub async fn start_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// A client that never reuses connections across tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
