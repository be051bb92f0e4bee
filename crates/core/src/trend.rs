//! Trend Extractor: bounded field-wise series for charting.

use serde::Serialize;

use crate::error::CoreError;
use crate::reading::{
    RawRecord, KEY_PPV, KEY_PWP, KEY_RAINFALL, KEY_THERMAL_STRESS, KEY_TIMESTAMP,
};

/// Parallel series over the most recent readings, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorTrend {
    pub timestamps: Vec<String>,
    pub ppv: Vec<f64>,
    pub pwp: Vec<f64>,
    pub rainfall: Vec<f64>,
    pub thermal_stress: Vec<f64>,
}

impl SensorTrend {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// The last `n` items of a slice, or the whole slice when it is shorter.
pub fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// Extract the trend window over the last `window` records.
///
/// An empty history is a not-found condition for `site_id`. Every selected
/// record must carry all five trend fields with the right type; a gap is a
/// data-integrity failure for the whole call rather than a defaulted value.
pub fn extract(
    site_id: &str,
    records: &[RawRecord],
    window: usize,
) -> Result<SensorTrend, CoreError> {
    if records.is_empty() {
        return Err(CoreError::NotFound {
            entity: "Sensor data",
            id: site_id.to_string(),
        });
    }

    let selected = tail(records, window);
    let mut trend = SensorTrend {
        timestamps: Vec::with_capacity(selected.len()),
        ppv: Vec::with_capacity(selected.len()),
        pwp: Vec::with_capacity(selected.len()),
        rainfall: Vec::with_capacity(selected.len()),
        thermal_stress: Vec::with_capacity(selected.len()),
    };

    for (offset, record) in selected.iter().enumerate() {
        let missing = |field: &str| {
            CoreError::DataIntegrity(format!(
                "{site_id}: reading {} of trend window is missing {field}",
                offset + 1
            ))
        };
        let number = |key: &str| record.number(key).ok_or_else(|| missing(key));

        let timestamp = record
            .text(KEY_TIMESTAMP)
            .ok_or_else(|| missing(KEY_TIMESTAMP))?;
        trend.timestamps.push(timestamp.to_string());
        trend.ppv.push(number(KEY_PPV)?);
        trend.pwp.push(number(KEY_PWP)?);
        trend.rainfall.push(number(KEY_RAINFALL)?);
        trend.thermal_stress.push(number(KEY_THERMAL_STRESS)?);
    }

    Ok(trend)
}
