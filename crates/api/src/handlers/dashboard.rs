//! Handler for dashboard-level aggregates.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use rockfall_core::registry::DashboardStats;

use crate::state::AppState;

/// GET /api/dashboard/stats
pub async fn stats(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.registry.dashboard_stats(Utc::now()))
}
