//! Live Predictor: rule-based risk score over the latest factor values.
//!
//! The score and the level are exact and deterministic. Probability,
//! confidence and slope stability are presentation fields; when jitter is
//! enabled they vary per call, but they never feed back into the level.

use rand::Rng;
use serde::Serialize;

use crate::risk::RiskCategory;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Scoring bands
// ---------------------------------------------------------------------------

/// `(exclusive lower bound, points)` pairs, most severe band first.
type Bands = &'static [(f64, u32)];

const PPV_BANDS: Bands = &[(15.0, 25), (10.0, 15), (5.0, 10)];
const PWP_BANDS: Bands = &[(0.7, 20), (0.5, 15), (0.3, 10)];
const RAINFALL_BANDS: Bands = &[(30.0, 15), (20.0, 10), (10.0, 5)];
const THERMAL_BANDS: Bands = &[(0.8, 15), (0.6, 10)];

pub const CRITICAL_SCORE: u32 = 50;
pub const HIGH_SCORE: u32 = 30;
pub const MODERATE_SCORE: u32 = 15;

/// Upper bound of the presented probability.
pub const MAX_PROBABILITY: f64 = 95.0;

const JITTER_RANGE: std::ops::Range<f64> = 5.0..15.0;
const CONFIDENCE_RANGE: std::ops::Range<f64> = 85.0..98.0;
const SLOPE_STABILITY_RANGE: std::ops::Range<f64> = 0.1..0.9;

const ELEVATED_RECOMMENDATIONS: &[&str] = &[
    "Monitor sensor readings closely",
    "Consider evacuation if risk increases",
    "Review slope stability measures",
];

const ROUTINE_RECOMMENDATIONS: &[&str] = &[
    "Continue normal monitoring",
    "Regular sensor maintenance recommended",
];

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// The four factors the predictor scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskFactors {
    /// Peak particle velocity, mm/s.
    pub ppv: f64,
    /// Pore water pressure, fraction.
    pub pwp: f64,
    /// 3-day rainfall, mm.
    pub rainfall: f64,
    /// Thermal stress index, 0..1.
    pub thermal_stress: f64,
}

fn band_points(value: f64, bands: Bands) -> u32 {
    bands
        .iter()
        .find(|(bound, _)| value > *bound)
        .map_or(0, |&(_, points)| points)
}

/// Sum of per-factor points; each factor contributes at most one band.
pub fn risk_score(factors: &RiskFactors) -> u32 {
    band_points(factors.ppv, PPV_BANDS)
        + band_points(factors.pwp, PWP_BANDS)
        + band_points(factors.rainfall, RAINFALL_BANDS)
        + band_points(factors.thermal_stress, THERMAL_BANDS)
}

pub fn level_for_score(score: u32) -> RiskCategory {
    if score >= CRITICAL_SCORE {
        RiskCategory::Critical
    } else if score >= HIGH_SCORE {
        RiskCategory::High
    } else if score >= MODERATE_SCORE {
        RiskCategory::Moderate
    } else {
        RiskCategory::Low
    }
}

pub fn timeframe(level: RiskCategory) -> &'static str {
    match level {
        RiskCategory::Critical => "2-4 hours",
        RiskCategory::High => "6-12 hours",
        RiskCategory::Moderate => "1-2 days",
        RiskCategory::Low => "7+ days",
    }
}

pub fn recommendations(level: RiskCategory) -> &'static [&'static str] {
    if level.is_elevated() {
        ELEVATED_RECOMMENDATIONS
    } else {
        ROUTINE_RECOMMENDATIONS
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Factor values reported alongside a prediction.
#[derive(Debug, Clone, Serialize)]
pub struct ContributingFactors {
    pub ppv: f64,
    pub pwp: f64,
    pub rainfall: f64,
    pub thermal_stress: f64,
    pub slope_stability: f64,
}

/// A live prediction for one site. Recomputed on every request.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub mine_id: String,
    pub mine_name: String,
    pub risk_level: RiskCategory,
    pub risk_score: u32,
    pub risk_probability: f64,
    pub prediction_timeframe: &'static str,
    pub confidence_score: f64,
    pub contributing_factors: ContributingFactors,
    pub recommendations: Vec<&'static str>,
    pub timestamp: Timestamp,
}

/// Source of the cosmetic presentation values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Presentation {
    /// Fixed midpoints of each presentation range.
    #[default]
    Deterministic,
    /// Uniform random draws from each presentation range.
    Jittered,
}

struct PresentationValues {
    jitter: f64,
    confidence: f64,
    slope_stability: f64,
}

impl Presentation {
    fn values<R: Rng + ?Sized>(self, rng: &mut R) -> PresentationValues {
        match self {
            Presentation::Deterministic => PresentationValues {
                jitter: midpoint(&JITTER_RANGE),
                confidence: midpoint(&CONFIDENCE_RANGE),
                slope_stability: midpoint(&SLOPE_STABILITY_RANGE),
            },
            Presentation::Jittered => PresentationValues {
                jitter: rng.random_range(JITTER_RANGE),
                confidence: rng.random_range(CONFIDENCE_RANGE),
                slope_stability: rng.random_range(SLOPE_STABILITY_RANGE),
            },
        }
    }
}

fn midpoint(range: &std::ops::Range<f64>) -> f64 {
    (range.start + range.end) / 2.0
}

/// Score the factors for one site and attach the presentation fields.
pub fn predict<R: Rng + ?Sized>(
    mine_id: &str,
    mine_name: &str,
    factors: &RiskFactors,
    presentation: Presentation,
    rng: &mut R,
    now: Timestamp,
) -> Prediction {
    let score = risk_score(factors);
    let level = level_for_score(score);
    let shown = presentation.values(rng);

    Prediction {
        mine_id: mine_id.to_string(),
        mine_name: mine_name.to_string(),
        risk_level: level,
        risk_score: score,
        risk_probability: (f64::from(score) + shown.jitter).min(MAX_PROBABILITY),
        prediction_timeframe: timeframe(level),
        confidence_score: shown.confidence,
        contributing_factors: ContributingFactors {
            ppv: factors.ppv,
            pwp: factors.pwp,
            rainfall: factors.rainfall,
            thermal_stress: factors.thermal_stress,
            slope_stability: shown.slope_stability,
        },
        recommendations: recommendations(level).to_vec(),
        timestamp: now,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn factors(ppv: f64, pwp: f64, rainfall: f64, thermal_stress: f64) -> RiskFactors {
        RiskFactors {
            ppv,
            pwp,
            rainfall,
            thermal_stress,
        }
    }

    fn run(f: &RiskFactors, presentation: Presentation) -> Prediction {
        predict("mine-001", "Test", f, presentation, &mut rand::rng(), Utc::now())
    }

    // -- scoring --------------------------------------------------------------

    #[test]
    fn all_factors_in_top_band_is_critical() {
        let f = factors(20.0, 0.8, 35.0, 0.9);
        assert_eq!(risk_score(&f), 75);
        let p = run(&f, Presentation::Deterministic);
        assert_eq!(p.risk_level, RiskCategory::Critical);
        assert_eq!(p.prediction_timeframe, "2-4 hours");
    }

    #[test]
    fn lowest_bands_sum_to_moderate() {
        let f = factors(6.0, 0.4, 12.0, 0.4);
        assert_eq!(risk_score(&f), 25);
        let p = run(&f, Presentation::Deterministic);
        assert_eq!(p.risk_level, RiskCategory::Moderate);
        assert_eq!(p.prediction_timeframe, "1-2 days");
    }

    #[test]
    fn quiet_site_scores_zero() {
        let f = factors(2.0, 0.1, 2.0, 0.1);
        assert_eq!(risk_score(&f), 0);
        assert_eq!(run(&f, Presentation::Deterministic).risk_level, RiskCategory::Low);
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(risk_score(&factors(5.0, 0.3, 10.0, 0.6)), 0);
        assert_eq!(risk_score(&factors(15.0, 0.0, 0.0, 0.0)), 15);
        assert_eq!(risk_score(&factors(0.0, 0.7, 0.0, 0.0)), 15);
        assert_eq!(risk_score(&factors(0.0, 0.0, 30.0, 0.0)), 10);
        assert_eq!(risk_score(&factors(0.0, 0.0, 0.0, 0.8)), 10);
    }

    #[test]
    fn level_boundaries_are_exact() {
        assert_eq!(level_for_score(49), RiskCategory::High);
        assert_eq!(level_for_score(50), RiskCategory::Critical);
        assert_eq!(level_for_score(29), RiskCategory::Moderate);
        assert_eq!(level_for_score(30), RiskCategory::High);
        assert_eq!(level_for_score(14), RiskCategory::Low);
        assert_eq!(level_for_score(15), RiskCategory::Moderate);
        assert_eq!(level_for_score(0), RiskCategory::Low);
    }

    fn assert_monotonic(make: impl Fn(f64) -> RiskFactors, values: &[f64]) {
        let scores: Vec<u32> = values.iter().map(|&v| risk_score(&make(v))).collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn score_is_monotonic_in_each_factor() {
        let steps: Vec<f64> = (0..=400).map(|i| f64::from(i) * 0.1).collect();
        let fractions: Vec<f64> = (0..=100).map(|i| f64::from(i) * 0.01).collect();
        let base = factors(7.0, 0.4, 15.0, 0.5);

        assert_monotonic(|v| RiskFactors { ppv: v, ..base }, &steps);
        assert_monotonic(|v| RiskFactors { pwp: v, ..base }, &fractions);
        assert_monotonic(|v| RiskFactors { rainfall: v, ..base }, &steps);
        assert_monotonic(|v| RiskFactors { thermal_stress: v, ..base }, &fractions);
    }

    // -- presentation ---------------------------------------------------------

    #[test]
    fn deterministic_presentation_uses_midpoints() {
        let p = run(&factors(6.0, 0.4, 12.0, 0.4), Presentation::Deterministic);
        assert_eq!(p.risk_probability, 35.0);
        assert_eq!(p.confidence_score, 91.5);
        assert_eq!(p.contributing_factors.slope_stability, 0.5);
    }

    #[test]
    fn probability_never_exceeds_cap() {
        let f = factors(20.0, 0.8, 35.0, 0.9);
        for _ in 0..200 {
            let p = run(&f, Presentation::Jittered);
            assert!(p.risk_probability <= MAX_PROBABILITY);
            assert!(p.risk_probability >= 80.0);
        }
    }

    #[test]
    fn jitter_stays_in_range_and_never_changes_level() {
        let f = factors(11.0, 0.6, 0.0, 0.0);
        for _ in 0..200 {
            let p = run(&f, Presentation::Jittered);
            assert_eq!(p.risk_score, 30);
            assert_eq!(p.risk_level, RiskCategory::High);
            assert!((35.0..45.0).contains(&p.risk_probability));
            assert!((85.0..98.0).contains(&p.confidence_score));
            assert!((0.1..0.9).contains(&p.contributing_factors.slope_stability));
        }
    }

    #[test]
    fn recommendations_split_on_elevated_levels() {
        assert_eq!(recommendations(RiskCategory::Critical).len(), 3);
        assert_eq!(
            recommendations(RiskCategory::High),
            recommendations(RiskCategory::Critical)
        );
        assert_eq!(recommendations(RiskCategory::Low).len(), 2);
        assert_eq!(
            recommendations(RiskCategory::Moderate),
            recommendations(RiskCategory::Low)
        );
    }

    #[test]
    fn timeframes_per_level() {
        assert_eq!(timeframe(RiskCategory::High), "6-12 hours");
        assert_eq!(timeframe(RiskCategory::Low), "7+ days");
    }
}
