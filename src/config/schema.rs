//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::routing::RoutePreference;

/// Root configuration for the webhook relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, concurrency).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Relay endpoint settings.
    pub relay: RelayEndpointConfig,

    /// Destination URL per route key. Missing keys are unconfigured routes.
    pub destinations: BTreeMap<RoutePreference, String>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum requests in flight at once (backpressure).
    pub max_concurrent_requests: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_concurrent_requests: 10_000,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Timeout for the health endpoint, in seconds. Relay calls are not bounded by it.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Relay endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayEndpointConfig {
    /// Path the relay listens on.
    pub path: String,

    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,

    /// User agent sent on outbound calls.
    pub user_agent: String,

    /// Honor HTTP(S)_PROXY environment variables for outbound calls.
    pub system_proxy: bool,
}

impl Default for RelayEndpointConfig {
    fn default() -> Self {
        Self {
            path: "/api/webhooks/n8n".to_string(),
            max_body_size: 2 * 1024 * 1024, // 2MB
            user_agent: concat!("webhook-relay/", env!("CARGO_PKG_VERSION")).to_string(),
            system_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.relay.path, "/api/webhooks/n8n");
        assert_eq!(config.relay.max_body_size, 2 * 1024 * 1024);
        assert!(config.destinations.is_empty());
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_minimal_toml() {
        let config: RelayConfig = toml::from_str(
            r#"
            [destinations]
            predefined = "https://n8n.example.com/webhook/a"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.destinations.get(&RoutePreference::Predefined).map(String::as_str),
            Some("https://n8n.example.com/webhook/a")
        );
        assert!(!config.destinations.contains_key(&RoutePreference::TripDesign));
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_hyphenated_route_key() {
        let config: RelayConfig = toml::from_str(
            r#"
            [destinations]
            trip-design = "https://n8n.example.com/webhook/b"
            "#,
        )
        .unwrap();
        assert!(config.destinations.contains_key(&RoutePreference::TripDesign));
    }

    #[test]
    fn test_unknown_route_key_rejected() {
        let result: Result<RelayConfig, _> = toml::from_str(
            r#"
            [destinations]
            custom = "https://n8n.example.com/webhook/c"
            "#,
        );
        assert!(result.is_err());
    }
}
