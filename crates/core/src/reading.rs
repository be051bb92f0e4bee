//! Sensor reading records and line-delimited JSON parsing.
//!
//! A source is one JSON object per line. Each line is parsed on its own: a
//! blank line is ignored, a line that is not a JSON object is skipped and
//! counted, and parsing always continues with the next line. Field types are
//! not checked at parse time; a field that is absent or of the wrong type
//! resolves to its default when the reading is built.

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::risk::RiskCategory;

// ---------------------------------------------------------------------------
// Field defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_UNIT_WEIGHT: f64 = 20.0;
pub const DEFAULT_COHESION: f64 = 25.0;
pub const DEFAULT_FRICTION: f64 = 30.0;
pub const DEFAULT_SLOPE_ANGLE: f64 = 35.0;
pub const DEFAULT_SLOPE_HEIGHT: f64 = 25.0;
pub const DEFAULT_RAINFALL: f64 = 10.0;
pub const DEFAULT_THERMAL_STRESS: f64 = 0.5;
pub const DEFAULT_PPV: f64 = 5.0;
pub const DEFAULT_PWP: f64 = 0.3;

// ---------------------------------------------------------------------------
// Source keys
// ---------------------------------------------------------------------------

pub const KEY_TIMESTAMP: &str = "Timestamp";
pub const KEY_UNIT_WEIGHT: &str = "Unit_Weight_kN_m3";
pub const KEY_COHESION: &str = "Cohesion_kPa";
pub const KEY_FRICTION: &str = "Friction_deg";
pub const KEY_SLOPE_ANGLE: &str = "Slope_Angle_deg";
pub const KEY_SLOPE_HEIGHT: &str = "Slope_Height_m";
pub const KEY_RAINFALL: &str = "Rain_3d_mm";
pub const KEY_THERMAL_STRESS: &str = "ThermalStressIndex";
pub const KEY_PPV: &str = "PPV_mm_s";
pub const KEY_PWP: &str = "PWP_Total";
pub const KEY_RISK_CATEGORY: &str = "risk_category";

// ---------------------------------------------------------------------------
// Raw wire record
// ---------------------------------------------------------------------------

/// One line of a sensor source, exactly as stored.
///
/// Holds the decoded JSON object untouched: unknown keys, key order and
/// integer-vs-float number forms all survive, so serializing a record gives
/// back what the raw sensor-data endpoint is expected to return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// A numeric field, or `None` when absent or not a number.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// A string field, or `None` when absent or not a string.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

// ---------------------------------------------------------------------------
// Parsed reading
// ---------------------------------------------------------------------------

/// A fully-defaulted sensor observation for one site.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub timestamp: String,
    pub unit_weight: f64,
    pub cohesion: f64,
    pub friction: f64,
    pub slope_angle: f64,
    pub slope_height: f64,
    pub rainfall: f64,
    pub thermal_stress: f64,
    pub ppv: f64,
    pub pwp: f64,
    pub risk_category: RiskCategory,
}

impl SensorReading {
    /// Resolve a raw record, substituting the documented default for every
    /// missing or wrongly-typed field. Absent or unrecognised risk labels
    /// resolve to `Low`.
    pub fn from_raw(raw: &RawRecord) -> Self {
        let number = |key: &str, default: f64| raw.number(key).unwrap_or(default);
        Self {
            timestamp: raw.text(KEY_TIMESTAMP).unwrap_or_default().to_string(),
            unit_weight: number(KEY_UNIT_WEIGHT, DEFAULT_UNIT_WEIGHT),
            cohesion: number(KEY_COHESION, DEFAULT_COHESION),
            friction: number(KEY_FRICTION, DEFAULT_FRICTION),
            slope_angle: number(KEY_SLOPE_ANGLE, DEFAULT_SLOPE_ANGLE),
            slope_height: number(KEY_SLOPE_HEIGHT, DEFAULT_SLOPE_HEIGHT),
            rainfall: number(KEY_RAINFALL, DEFAULT_RAINFALL),
            thermal_stress: number(KEY_THERMAL_STRESS, DEFAULT_THERMAL_STRESS),
            ppv: number(KEY_PPV, DEFAULT_PPV),
            pwp: number(KEY_PWP, DEFAULT_PWP),
            risk_category: raw
                .text(KEY_RISK_CATEGORY)
                .and_then(RiskCategory::from_label)
                .unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// Result of parsing one source: the records in file order plus the number of
/// lines that were skipped as malformed.
#[derive(Debug, Clone, Default)]
pub struct ParsedSource {
    pub records: Vec<RawRecord>,
    pub skipped_lines: usize,
}

impl ParsedSource {
    /// Resolve every record into a defaulted [`SensorReading`].
    pub fn readings(&self) -> Vec<SensorReading> {
        self.records.iter().map(SensorReading::from_raw).collect()
    }
}

/// Parse line-delimited JSON records from a reader.
///
/// A line that cannot be read (e.g. invalid UTF-8) is counted as skipped like
/// any other malformed line.
pub fn parse_records<R: BufRead>(reader: R) -> ParsedSource {
    let mut parsed = ParsedSource::default();
    for line in reader.lines() {
        let Ok(line) = line else {
            parsed.skipped_lines += 1;
            continue;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<RawRecord>(line) {
            Ok(record) => parsed.records.push(record),
            Err(_) => parsed.skipped_lines += 1,
        }
    }
    parsed
}
