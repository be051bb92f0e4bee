//! Site Registry: immutable snapshot of every loaded site.
//!
//! Built once by [`SiteRegistry::load`] from the Reading Store and the static
//! catalog, then shared read-only. Nothing mutates a registry after it is
//! built; a reload produces a new snapshot.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::Serialize;

use crate::aggregate::{summarize, RiskDistribution};
use crate::catalog::{CatalogEntry, OperationalStatus, SiteCatalog};
use crate::error::CoreError;
use crate::predict::{predict, Prediction, Presentation, RiskFactors};
use crate::reading::{
    SensorReading, DEFAULT_COHESION, DEFAULT_FRICTION, DEFAULT_PPV, DEFAULT_PWP,
    DEFAULT_RAINFALL, DEFAULT_SLOPE_ANGLE, DEFAULT_SLOPE_HEIGHT, DEFAULT_THERMAL_STRESS,
    DEFAULT_UNIT_WEIGHT,
};
use crate::risk::RiskCategory;
use crate::site_id::SiteId;
use crate::store::ReadingStore;
use crate::types::{SiteOrdinal, Timestamp};

/// Published model accuracy shown on the dashboard.
///
/// A static figure, not measured by this engine.
pub const PUBLISHED_ACCURACY: f64 = 94.2;

// ---------------------------------------------------------------------------
// Site snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteLocation {
    pub lat: f64,
    pub lng: f64,
    pub state: String,
    pub district: String,
}

/// Field values of the most recent reading, or the documented defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    pub unit_weight: f64,
    pub cohesion: f64,
    pub friction: f64,
    pub slope_angle: f64,
    pub slope_height: f64,
    pub rainfall: f64,
    pub thermal_stress: f64,
    pub ppv: f64,
    pub pwp: f64,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            unit_weight: DEFAULT_UNIT_WEIGHT,
            cohesion: DEFAULT_COHESION,
            friction: DEFAULT_FRICTION,
            slope_angle: DEFAULT_SLOPE_ANGLE,
            slope_height: DEFAULT_SLOPE_HEIGHT,
            rainfall: DEFAULT_RAINFALL,
            thermal_stress: DEFAULT_THERMAL_STRESS,
            ppv: DEFAULT_PPV,
            pwp: DEFAULT_PWP,
        }
    }
}

impl From<&SensorReading> for SensorSnapshot {
    fn from(r: &SensorReading) -> Self {
        Self {
            unit_weight: r.unit_weight,
            cohesion: r.cohesion,
            friction: r.friction,
            slope_angle: r.slope_angle,
            slope_height: r.slope_height,
            rainfall: r.rainfall,
            thermal_stress: r.thermal_stress,
            ppv: r.ppv,
            pwp: r.pwp,
        }
    }
}

/// One monitored site: catalog metadata plus its derived risk snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    pub location: SiteLocation,
    pub coordinates: [f64; 2],
    pub mine_type: String,
    pub operational_status: OperationalStatus,
    pub production_volume: String,
    pub sensors_online: u32,
    pub total_sensors: u32,
    pub risk_level: RiskCategory,
    pub alerts: u64,
    pub risk_distribution: RiskDistribution,
    pub last_updated: Timestamp,
    pub sensor_data: SensorSnapshot,
    #[serde(skip)]
    pub ordinal: SiteOrdinal,
}

impl Site {
    /// Combine catalog metadata with the aggregate of a full history.
    pub fn build(
        id: SiteId,
        entry: &CatalogEntry,
        readings: &[SensorReading],
        loaded_at: Timestamp,
    ) -> Self {
        let summary = summarize(readings);
        Self {
            id: id.to_string(),
            name: entry.name.clone(),
            location: SiteLocation {
                lat: entry.latitude,
                lng: entry.longitude,
                state: entry.state.clone(),
                district: entry.district.clone(),
            },
            coordinates: [entry.latitude, entry.longitude],
            mine_type: entry.mine_type.clone(),
            operational_status: entry.operational_status,
            production_volume: format!("{:.1} MT", entry.production_volume_mt),
            sensors_online: entry.sensors_online,
            total_sensors: entry.total_sensors,
            risk_level: summary.current,
            alerts: summary.alerts,
            risk_distribution: summary.distribution,
            last_updated: loaded_at,
            sensor_data: readings.last().map(SensorSnapshot::from).unwrap_or_default(),
            ordinal: id.ordinal(),
        }
    }

    /// Latest factor values used by the live predictor.
    pub fn risk_factors(&self) -> RiskFactors {
        RiskFactors {
            ppv: self.sensor_data.ppv,
            pwp: self.sensor_data.pwp,
            rainfall: self.sensor_data.rainfall,
            thermal_stress: self.sensor_data.thermal_stress,
        }
    }
}

// ---------------------------------------------------------------------------
// Load report
// ---------------------------------------------------------------------------

/// Per-source outcome of a registry load, for the caller to log.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// `(ordinal, parsed readings, skipped lines)` for each loaded site.
    pub loaded: Vec<(SiteOrdinal, usize, usize)>,
    /// Ordinals with no backing source.
    pub missing: Vec<SiteOrdinal>,
    /// Ordinals whose source exists but could not be read.
    pub failed: Vec<(SiteOrdinal, String)>,
}

// ---------------------------------------------------------------------------
// Dashboard views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_mines: usize,
    pub active_mines: usize,
    pub total_alerts: u64,
    pub critical_mines: usize,
    pub accuracy: f64,
    pub last_updated: Timestamp,
}

/// Sites counted by risk level, in fixed Low/Moderate/High/Critical order.
#[derive(Debug, Clone, Serialize)]
pub struct RiskChart {
    pub labels: Vec<&'static str>,
    pub data: Vec<u64>,
    pub colors: Vec<&'static str>,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: Vec<Site>,
    by_ordinal: BTreeMap<SiteOrdinal, usize>,
}

impl SiteRegistry {
    /// Build a registry from already-constructed sites. Sites are kept in
    /// ordinal order; a later duplicate ordinal replaces an earlier one.
    pub fn from_sites(sites: impl IntoIterator<Item = Site>) -> Self {
        let deduped: BTreeMap<SiteOrdinal, Site> =
            sites.into_iter().map(|s| (s.ordinal, s)).collect();
        let sites: Vec<Site> = deduped.into_values().collect();
        let by_ordinal = sites
            .iter()
            .enumerate()
            .map(|(i, s)| (s.ordinal, i))
            .collect();
        Self { sites, by_ordinal }
    }

    /// Load every site known to the catalog or present in the data directory.
    ///
    /// Sites without a source are left out of the registry; nothing here
    /// fails the load as a whole.
    pub fn load(
        store: &ReadingStore,
        catalog: &SiteCatalog,
        loaded_at: Timestamp,
    ) -> (Self, LoadReport) {
        let ordinals: BTreeSet<SiteOrdinal> = catalog
            .ordinals()
            .chain(store.discover_ordinals())
            .collect();

        let mut report = LoadReport::default();
        let mut sites = Vec::with_capacity(ordinals.len());

        for ordinal in ordinals {
            let Ok(id) = SiteId::new(ordinal) else {
                continue;
            };
            match store.load(ordinal) {
                Ok(parsed) => {
                    let readings = parsed.readings();
                    report
                        .loaded
                        .push((ordinal, readings.len(), parsed.skipped_lines));
                    let entry = catalog.entry_or_fallback(ordinal);
                    sites.push(Site::build(id, &entry, &readings, loaded_at));
                }
                Err(CoreError::NotFound { .. }) => report.missing.push(ordinal),
                Err(e) => report.failed.push((ordinal, e.to_string())),
            }
        }

        (Self::from_sites(sites), report)
    }

    pub fn all(&self) -> &[Site] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Look up a site by its identifier string.
    pub fn get(&self, id: &str) -> Result<&Site, CoreError> {
        let site_id: SiteId = id.parse()?;
        self.by_ordinal
            .get(&site_id.ordinal())
            .map(|&i| &self.sites[i])
            .ok_or_else(|| CoreError::site_not_found(id))
    }

    pub fn dashboard_stats(&self, now: Timestamp) -> DashboardStats {
        DashboardStats {
            total_mines: self.sites.len(),
            active_mines: self
                .sites
                .iter()
                .filter(|s| s.operational_status == OperationalStatus::Active)
                .count(),
            total_alerts: self.sites.iter().map(|s| s.alerts).sum(),
            critical_mines: self
                .sites
                .iter()
                .filter(|s| s.risk_level == RiskCategory::Critical)
                .count(),
            accuracy: PUBLISHED_ACCURACY,
            last_updated: now,
        }
    }

    /// Count sites (not readings) by their current risk level.
    pub fn risk_chart(&self) -> RiskChart {
        let dist = RiskDistribution::from_categories(self.sites.iter().map(|s| s.risk_level));
        RiskChart {
            labels: RiskCategory::ALL.iter().map(|c| c.as_str()).collect(),
            data: dist.counts().to_vec(),
            colors: RiskCategory::ALL.iter().map(|c| c.color()).collect(),
        }
    }

    /// One live prediction per site, in registry order.
    pub fn predictions<R: Rng + ?Sized>(
        &self,
        presentation: Presentation,
        rng: &mut R,
        now: Timestamp,
    ) -> Vec<Prediction> {
        self.sites
            .iter()
            .map(|s| predict(&s.id, &s.name, &s.risk_factors(), presentation, rng, now))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
