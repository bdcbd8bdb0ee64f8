//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits > 0, address parses)
//! - Check destination URLs are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::RelayConfig;
use crate::routing::table::parse_destination;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// True when the router would treat `path` as a fixed route rather than a pattern.
fn is_literal_path(path: &str) -> bool {
    !path.contains(['{', '}']) && !path.split('/').any(|seg| seg.starts_with(':') || seg.starts_with('*'))
}

/// Check a loaded configuration for semantic errors.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.listener.max_concurrent_requests == 0 {
        errors.push(ValidationError::new("listener.max_concurrent_requests", "must be greater than 0"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if !config.relay.path.starts_with('/') {
        errors.push(ValidationError::new("relay.path", "must start with '/'"));
    }

    if config.relay.path == "/health" {
        errors.push(ValidationError::new("relay.path", "conflicts with the health endpoint"));
    }

    if !is_literal_path(&config.relay.path) {
        errors.push(ValidationError::new(
            "relay.path",
            "must be a literal path (no ':' or '*' segments, no braces)",
        ));
    }

    if config.relay.max_body_size == 0 {
        errors.push(ValidationError::new("relay.max_body_size", "must be greater than 0"));
    }

    for (&route, raw) in &config.destinations {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        if let Err(e) = parse_destination(route, raw) {
            errors.push(ValidationError::new(format!("destinations.{}", route), e.to_string()));
        }
    }

    if config.observability.metrics_enabled && config.observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
