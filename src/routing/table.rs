//! Route lookup.
//!
//! # Responsibilities
//! - Store the destination for each route key
//! - Resolve a route key to its destination or an explicit None
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Empty configured values count as "not configured"
//! - Only http/https destinations are accepted

use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use url::Url;

use crate::routing::RoutePreference;

/// Errors raised while compiling the route table.
#[derive(Debug, Error)]
pub enum RouteTableError {
    #[error("destination for '{route}' is not a valid URL: {source}")]
    InvalidUrl {
        route: RoutePreference,
        #[source]
        source: url::ParseError,
    },

    #[error("destination for '{route}' must use http or https, got '{scheme}'")]
    UnsupportedScheme {
        route: RoutePreference,
        scheme: String,
    },
}

/// Compiled mapping from route key to destination endpoint.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    destinations: HashMap<RoutePreference, Url>,
}

impl RouteTable {
    /// Build the table from configured destination strings.
    pub fn from_config(destinations: &BTreeMap<RoutePreference, String>) -> Result<Self, RouteTableError> {
        let mut table = HashMap::new();

        for (&route, raw) in destinations {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            table.insert(route, parse_destination(route, raw)?);
        }

        Ok(Self { destinations: table })
    }

    /// Resolve the destination for a route key.
    pub fn destination(&self, route: RoutePreference) -> Option<&Url> {
        self.destinations.get(&route)
    }

    /// Whether a destination exists for the route key.
    pub fn configured(&self, route: RoutePreference) -> bool {
        self.destinations.contains_key(&route)
    }
}

/// Parse and check a single destination URL.
pub fn parse_destination(route: RoutePreference, raw: &str) -> Result<Url, RouteTableError> {
    let url = Url::parse(raw).map_err(|source| RouteTableError::InvalidUrl { route, source })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RouteTableError::UnsupportedScheme {
            route,
            scheme: other.to_string(),
        }),
    }
}
