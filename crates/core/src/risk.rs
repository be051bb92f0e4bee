//! Risk categories shared by the aggregator, the live predictor and the charts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Risk category of a reading or a site, ordered by increasing severity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RiskCategory {
    #[default]
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskCategory {
    /// All categories in chart order (least to most severe).
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::Low,
        RiskCategory::Moderate,
        RiskCategory::High,
        RiskCategory::Critical,
    ];

    /// Canonical label as it appears in source data and API responses.
    pub fn as_str(self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
            RiskCategory::Critical => "Critical",
        }
    }

    /// Parse a label case-insensitively, ignoring surrounding whitespace.
    ///
    /// Returns `None` for anything that is not one of the four labels.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(label))
    }

    /// Position of this category in [`RiskCategory::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Dashboard chart colour.
    pub fn color(self) -> &'static str {
        match self {
            RiskCategory::Low => "#22c55e",
            RiskCategory::Moderate => "#eab308",
            RiskCategory::High => "#f59e0b",
            RiskCategory::Critical => "#ef4444",
        }
    }

    /// Whether a site at this level counts toward alerts and evacuation advice.
    pub fn is_elevated(self) -> bool {
        matches!(self, RiskCategory::High | RiskCategory::Critical)
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(RiskCategory::from_label("critical"), Some(RiskCategory::Critical));
        assert_eq!(RiskCategory::from_label(" High "), Some(RiskCategory::High));
        assert_eq!(RiskCategory::from_label("MODERATE"), Some(RiskCategory::Moderate));
    }

    #[test]
    fn unknown_label_is_none() {
        assert_eq!(RiskCategory::from_label("Severe"), None);
        assert_eq!(RiskCategory::from_label(""), None);
    }

    #[test]
    fn severity_ordering() {
        assert!(RiskCategory::Low < RiskCategory::Moderate);
        assert!(RiskCategory::Moderate < RiskCategory::High);
        assert!(RiskCategory::High < RiskCategory::Critical);
    }

    #[test]
    fn index_matches_all_order() {
        for (i, c) in RiskCategory::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&RiskCategory::Moderate).unwrap();
        assert_eq!(json, "\"Moderate\"");
    }
}
