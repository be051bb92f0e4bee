//! Handlers for site listing, lookup and raw sensor data.

use axum::extract::{Path, Query, State};
use axum::Json;
use rockfall_core::error::CoreError;
use rockfall_core::reading::RawRecord;
use rockfall_core::registry::Site;
use rockfall_core::trend::tail;

use crate::error::AppResult;
use crate::handlers::read_source;
use crate::query::{window_size, SensorDataParams, DEFAULT_SENSOR_LIMIT};
use crate::state::AppState;

/// GET /api/mines
pub async fn list_mines(State(state): State<AppState>) -> Json<Vec<Site>> {
    Json(state.registry.all().to_vec())
}

/// GET /api/mines/{id}
pub async fn get_mine(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Site>> {
    let site = state.registry.get(&id)?;
    Ok(Json(site.clone()))
}

/// GET /api/mines/{id}/sensor-data
///
/// Returns the last `limit` raw readings (default 100) read straight from the
/// site's source, each exactly as stored.
pub async fn get_sensor_data(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<SensorDataParams>,
) -> AppResult<Json<Vec<RawRecord>>> {
    let limit = window_size(params.limit, DEFAULT_SENSOR_LIMIT, "limit")?;
    let parsed = read_source(&state, &id).await?;
    if parsed.records.is_empty() {
        return Err(CoreError::NotFound {
            entity: "Sensor data",
            id,
        }
        .into());
    }
    Ok(Json(tail(&parsed.records, limit).to_vec()))
}
