//! Route definitions for site endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::mines;
use crate::state::AppState;

/// Routes mounted at `/mines`.
///
/// ```text
/// GET  /                    -> list_mines
/// GET  /{id}                -> get_mine
/// GET  /{id}/sensor-data    -> get_sensor_data
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(mines::list_mines))
        .route("/{id}", get(mines::get_mine))
        .route("/{id}/sensor-data", get(mines::get_sensor_data))
}
