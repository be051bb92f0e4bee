//! Handlers for dashboard chart data.

use axum::extract::{Path, Query, State};
use axum::Json;
use rockfall_core::registry::RiskChart;
use rockfall_core::trend::{self, SensorTrend};

use crate::error::AppResult;
use crate::handlers::read_source;
use crate::query::{window_size, TrendParams, DEFAULT_TREND_HOURS};
use crate::state::AppState;

/// GET /api/charts/risk-distribution
///
/// Sites counted by current risk level.
pub async fn risk_distribution(State(state): State<AppState>) -> Json<RiskChart> {
    Json(state.registry.risk_chart())
}

/// GET /api/charts/sensor-trends/{id}
///
/// Field-wise series over the last `hours` readings (default 24).
pub async fn sensor_trends(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<TrendParams>,
) -> AppResult<Json<SensorTrend>> {
    let window = window_size(params.hours, DEFAULT_TREND_HOURS, "hours")?;
    let parsed = read_source(&state, &id).await?;
    Ok(Json(trend::extract(&id, &parsed.records, window)?))
}
