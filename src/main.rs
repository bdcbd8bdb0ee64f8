//! Webhook Relay (v1)
//!
//! Accepts JSON payloads and relays each one to the n8n webhook selected by
//! its `routePreference` field.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────┐
//!                         │                  WEBHOOK RELAY                   │
//!                         │                                                  │
//!   POST /api/webhooks/n8n│  ┌─────────┐    ┌──────────┐    ┌────────────┐   │
//!   ──────────────────────┼─▶│  http   │───▶│ payload  │───▶│  routing   │   │
//!                         │  │ server  │    │ validate │    │   table    │   │
//!                         │  └─────────┘    └──────────┘    └─────┬──────┘   │
//!                         │                                       │          │
//!                         │                                       ▼          │
//!   { success, ... }      │  ┌─────────┐    ┌──────────┐    ┌────────────┐   │
//!   ◀─────────────────────┼──│envelope │◀───│normalize │◀───│ forwarder  │◀──┼── n8n
//!                         │  └─────────┘    └──────────┘    └────────────┘   │
//!                         │                                                  │
//!                         │  config · observability · lifecycle              │
//!                         └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use webhook_relay::config;
use webhook_relay::http::HttpServer;
use webhook_relay::lifecycle::{spawn_signal_listener, Shutdown};
use webhook_relay::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "webhook-relay")]
#[command(about = "Relays JSON payloads to n8n webhooks by route preference", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = config::load(args.config.as_deref())?;
    logging::init_logging(&config.observability);

    tracing::info!("webhook-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        relay_path = %config.relay.path,
        max_concurrent_requests = config.listener.max_concurrent_requests,
        health_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_listener(&shutdown);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
