//! The closed set of route keys a payload can ask for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects which external automation receives a payload.
///
/// The wire spelling is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum RoutePreference {
    #[serde(rename = "predefined")]
    Predefined,
    #[serde(rename = "trip-design")]
    TripDesign,
}

impl RoutePreference {
    /// Every route key, in declaration order.
    pub const ALL: [RoutePreference; 2] = [RoutePreference::Predefined, RoutePreference::TripDesign];

    /// Wire spelling used in payloads and config keys.
    pub fn as_str(self) -> &'static str {
        match self {
            RoutePreference::Predefined => "predefined",
            RoutePreference::TripDesign => "trip-design",
        }
    }

    /// Environment variable that overrides this route's destination.
    pub fn env_var(self) -> &'static str {
        match self {
            RoutePreference::Predefined => "N8N_WEBHOOK_PREDEFINED_URL",
            RoutePreference::TripDesign => "N8N_WEBHOOK_TRIP_DESIGN_URL",
        }
    }

    /// Human-readable list of accepted keys, e.g. `'predefined' | 'trip-design'`.
    pub fn expected() -> String {
        Self::ALL
            .iter()
            .map(|p| format!("'{}'", p.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl fmt::Display for RoutePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the route keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid routePreference. Expected {expected}, received '{received}'", expected = RoutePreference::expected())]
pub struct UnknownRoutePreference {
    pub received: String,
}

impl FromStr for RoutePreference {
    type Err = UnknownRoutePreference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownRoutePreference {
                received: s.to_string(),
            })
    }
}
