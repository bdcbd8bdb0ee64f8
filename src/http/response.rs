//! Response envelope.
//!
//! Every relay reply is JSON shaped as `{ success, ... }` and carries
//! `Cache-Control: no-store`.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::relay::Delivery;

/// Body of a successful relay.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SuccessEnvelope {
    pub success: bool,
    pub status: u16,
    pub data: Value,
}

/// Body of a failed relay.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailureEnvelope {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl FailureEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            status: None,
            details: None,
        }
    }
}

impl From<&Delivery> for SuccessEnvelope {
    fn from(delivery: &Delivery) -> Self {
        Self {
            success: true,
            status: delivery.status.as_u16(),
            data: delivery.data.clone(),
        }
    }
}

/// JSON response marked non-cacheable.
pub fn envelope_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

impl IntoResponse for Delivery {
    fn into_response(self) -> Response {
        envelope_response(StatusCode::OK, &SuccessEnvelope::from(&self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let delivery = Delivery {
            status: StatusCode::OK,
            data: json!({"ok": true}),
        };
        assert_eq!(
            serde_json::to_value(SuccessEnvelope::from(&delivery)).unwrap(),
            json!({"success": true, "status": 200, "data": {"ok": true}})
        );
    }

    #[test]
    fn test_null_data_is_serialized() {
        let delivery = Delivery {
            status: StatusCode::OK,
            data: Value::Null,
        };
        assert_eq!(
            serde_json::to_value(SuccessEnvelope::from(&delivery)).unwrap(),
            json!({"success": true, "status": 200, "data": null})
        );
    }

    #[test]
    fn test_delivery_response_is_200_no_store() {
        let response = Delivery {
            status: StatusCode::ACCEPTED,
            data: Value::Null,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
