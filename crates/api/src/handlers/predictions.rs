//! Handler for live risk predictions.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use rockfall_core::predict::Prediction;

use crate::state::AppState;

/// GET /api/live-predictions
///
/// One prediction per site, recomputed from each site's latest snapshot.
pub async fn live_predictions(State(state): State<AppState>) -> Json<Vec<Prediction>> {
    let predictions = state
        .registry
        .predictions(state.presentation(), &mut rand::rng(), Utc::now());
    Json(predictions)
}
