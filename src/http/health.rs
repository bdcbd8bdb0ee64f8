//! Health and status endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::http::server::AppState;
use crate::relay::Forwarder;
use crate::routing::RoutePreference;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub routes: Vec<RouteStatus>,
}

#[derive(Debug, Serialize)]
pub struct RouteStatus {
    pub route: RoutePreference,
    pub configured: bool,
}

/// Liveness plus which routes have a destination. URLs are never exposed.
pub async fn get_status<F: Forwarder>(State(state): State<AppState<F>>) -> Json<SystemStatus> {
    let routes = RoutePreference::ALL
        .into_iter()
        .map(|route| RouteStatus {
            route,
            configured: state.router.routes().configured(route),
        })
        .collect();

    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        routes,
    })
}
