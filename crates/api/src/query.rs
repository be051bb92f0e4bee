//! Shared query parameter types for API handlers.

use serde::Deserialize;

use crate::error::AppError;

/// Default number of raw readings returned by the sensor-data endpoint.
pub const DEFAULT_SENSOR_LIMIT: i64 = 100;

/// Default trend window, one reading per hour.
pub const DEFAULT_TREND_HOURS: i64 = 24;

/// Largest window either endpoint will serve.
pub const MAX_WINDOW: i64 = 10_000;

/// Query parameters for `GET /mines/{id}/sensor-data` (`?limit=`).
#[derive(Debug, Deserialize)]
pub struct SensorDataParams {
    pub limit: Option<i64>,
}

/// Query parameters for `GET /charts/sensor-trends/{id}` (`?hours=`).
#[derive(Debug, Deserialize)]
pub struct TrendParams {
    pub hours: Option<i64>,
}

/// Resolve an optional window parameter against its default and bounds.
pub fn window_size(value: Option<i64>, default: i64, name: &str) -> Result<usize, AppError> {
    let value = value.unwrap_or(default);
    if !(1..=MAX_WINDOW).contains(&value) {
        return Err(AppError::BadRequest(format!(
            "{name} must be between 1 and {MAX_WINDOW}"
        )));
    }
    usize::try_from(value).map_err(|e| AppError::InternalError(e.to_string()))
}
