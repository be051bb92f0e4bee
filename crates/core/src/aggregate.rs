//! Risk Aggregator: category distribution and historical-mode risk label.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::reading::SensorReading;
use crate::risk::RiskCategory;

/// Count of readings (or sites) per risk category.
///
/// The four counts always sum to the number of items counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskDistribution {
    counts: [u64; 4],
}

impl RiskDistribution {
    /// Frequency count over the labelled category of every reading.
    pub fn from_readings(readings: &[SensorReading]) -> Self {
        Self::from_categories(readings.iter().map(|r| r.risk_category))
    }

    /// Frequency count over any sequence of categories.
    pub fn from_categories(categories: impl IntoIterator<Item = RiskCategory>) -> Self {
        let mut dist = Self::default();
        for category in categories {
            dist.counts[category.index()] += 1;
        }
        dist
    }

    pub fn count(&self, category: RiskCategory) -> u64 {
        self.counts[category.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Counts in [`RiskCategory::ALL`] order.
    pub fn counts(&self) -> [u64; 4] {
        self.counts
    }

    /// Readings that count as alerts: `Critical` plus `High`.
    pub fn alerts(&self) -> u64 {
        self.count(RiskCategory::Critical) + self.count(RiskCategory::High)
    }

    /// The most frequent category across the whole history.
    ///
    /// Ties go to the more severe category. An all-zero distribution is `Low`.
    pub fn mode(&self) -> RiskCategory {
        if self.total() == 0 {
            return RiskCategory::Low;
        }
        RiskCategory::ALL
            .into_iter()
            .max_by_key(|&c| (self.count(c), c))
            .unwrap_or_default()
    }
}

impl Serialize for RiskDistribution {
    /// `{"Low": n, "Moderate": n, "High": n, "Critical": n}`
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        for category in RiskCategory::ALL {
            map.serialize_entry(category.as_str(), &self.count(category))?;
        }
        map.end()
    }
}

/// Derived risk snapshot for one site's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskSummary {
    pub distribution: RiskDistribution,
    pub current: RiskCategory,
    pub alerts: u64,
}

/// Aggregate a site's full reading history.
pub fn summarize(readings: &[SensorReading]) -> RiskSummary {
    let distribution = RiskDistribution::from_readings(readings);
    RiskSummary {
        distribution,
        current: distribution.mode(),
        alerts: distribution.alerts(),
    }
}
