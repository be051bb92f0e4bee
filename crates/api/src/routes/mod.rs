pub mod charts;
pub mod dashboard;
pub mod health;
pub mod mines;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /mines                                list all sites
/// /mines/{id}                           one site
/// /mines/{id}/sensor-data               last `limit` raw readings
///
/// /dashboard/stats                      dashboard aggregates
///
/// /live-predictions                     one prediction per site
///
/// /charts/risk-distribution             sites by risk level
/// /charts/sensor-trends/{id}            field-wise series over last `hours`
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/mines", mines::router())
        .nest("/dashboard", dashboard::router())
        .route(
            "/live-predictions",
            get(handlers::predictions::live_predictions),
        )
        .nest("/charts", charts::router())
}
