//! Inbound payload parsing and schema validation.
//!
//! Only `routePreference` is checked. Every other field is opaque and
//! travels to the destination untouched.

use serde_json::Value;

use crate::relay::error::RelayError;
use crate::routing::RoutePreference;

/// Name of the discriminant field.
pub const ROUTE_FIELD: &str = "routePreference";

/// A parsed body that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundPayload {
    route: RoutePreference,
    document: Value,
}

impl InboundPayload {
    /// Parse raw bytes as JSON and validate the discriminant.
    pub fn parse(raw: &[u8]) -> Result<Self, RelayError> {
        let document: Value = serde_json::from_slice(raw).map_err(RelayError::Parse)?;
        Self::from_value(document)
    }

    /// Validate an already parsed document.
    pub fn from_value(document: Value) -> Result<Self, RelayError> {
        let route = validate(&document).map_err(RelayError::Validation)?;
        Ok(Self { route, document })
    }

    pub fn route(&self) -> RoutePreference {
        self.route
    }

    /// The full original document, including fields the relay never looked at.
    pub fn document(&self) -> &Value {
        &self.document
    }
}

/// Return the route key or a description of the first schema violation.
fn validate(document: &Value) -> Result<RoutePreference, String> {
    let object = document
        .as_object()
        .ok_or_else(|| format!("Expected object, received {}", type_name(document)))?;

    match object.get(ROUTE_FIELD) {
        None => Err(format!("{} is required", ROUTE_FIELD)),
        Some(Value::String(s)) => s.parse::<RoutePreference>().map_err(|e| e.to_string()),
        Some(other) => Err(format!(
            "Invalid {}. Expected {}, received {}",
            ROUTE_FIELD,
            RoutePreference::expected(),
            type_name(other)
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
