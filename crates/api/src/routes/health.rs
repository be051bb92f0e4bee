use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Root banner payload.
#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Number of sites in the registry snapshot.
    pub sites_loaded: usize,
}

/// GET / -- service banner.
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Rockfall Guardian API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health -- returns service health.
///
/// An empty registry is reported as `degraded`: the service is up but has no
/// sensor data to serve.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let sites_loaded = state.registry.len();
    let status = if sites_loaded > 0 { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        sites_loaded,
    })
}

/// Mount root-level routes (NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}
