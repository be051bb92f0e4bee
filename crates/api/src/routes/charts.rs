//! Route definitions for chart data.

use axum::routing::get;
use axum::Router;

use crate::handlers::charts;
use crate::state::AppState;

/// Routes mounted at `/charts`.
///
/// ```text
/// GET  /risk-distribution       -> risk_distribution
/// GET  /sensor-trends/{id}      -> sensor_trends
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/risk-distribution", get(charts::risk_distribution))
        .route("/sensor-trends/{id}", get(charts::sensor_trends))
}
