//! Static site catalog: names, locations and operational metadata.
//!
//! This is lookup data, kept apart from the derived risk snapshot. The
//! built-in table describes the sites of the current deployment; a JSON file
//! with the same shape can replace it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::SiteOrdinal;

/// Operational status of a site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationalStatus {
    #[default]
    Active,
    Inactive,
    #[serde(rename = "Under Development")]
    UnderDevelopment,
}

/// Static metadata for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub ordinal: SiteOrdinal,
    pub name: String,
    pub state: String,
    pub district: String,
    pub latitude: f64,
    pub longitude: f64,
    pub mine_type: String,
    #[serde(default)]
    pub operational_status: OperationalStatus,
    /// Annual production in million tonnes.
    pub production_volume_mt: f64,
    pub sensors_online: u32,
    pub total_sensors: u32,
}

impl CatalogEntry {
    /// Placeholder metadata for a site that has a data source but no entry.
    pub fn fallback(ordinal: SiteOrdinal) -> Self {
        Self {
            ordinal,
            name: format!("Mine {ordinal}"),
            state: format!("State {ordinal}"),
            district: format!("District {ordinal}"),
            latitude: 0.0,
            longitude: 0.0,
            mine_type: "Unknown".to_string(),
            operational_status: OperationalStatus::Active,
            production_volume_mt: 0.0,
            sensors_online: 0,
            total_sensors: 0,
        }
    }
}

/// Catalog of known sites keyed by ordinal.
#[derive(Debug, Clone, Default)]
pub struct SiteCatalog {
    entries: BTreeMap<SiteOrdinal, CatalogEntry>,
}

impl SiteCatalog {
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.ordinal, e)).collect(),
        }
    }

    /// Load a catalog from a JSON array of entries.
    pub fn from_json_file(path: &Path) -> Result<Self, CoreError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(text)
            .map_err(|e| CoreError::Validation(format!("invalid site catalog: {e}")))?;
        if let Some(bad) = entries.iter().find(|e| e.ordinal == 0) {
            return Err(CoreError::Validation(format!(
                "site catalog entry '{}' has ordinal 0; ordinals start at 1",
                bad.name
            )));
        }
        Ok(Self::from_entries(entries))
    }

    /// The built-in catalog for the current deployment.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.iter().enumerate().map(|(i, row)| {
            let (name, state, district, mine_type, lat, lng, volume, online, total) = *row;
            CatalogEntry {
                ordinal: i as SiteOrdinal + 1,
                name: name.to_string(),
                state: state.to_string(),
                district: district.to_string(),
                latitude: lat,
                longitude: lng,
                mine_type: mine_type.to_string(),
                operational_status: OperationalStatus::Active,
                production_volume_mt: volume,
                sensors_online: online,
                total_sensors: total,
            }
        }))
    }

    pub fn get(&self, ordinal: SiteOrdinal) -> Option<&CatalogEntry> {
        self.entries.get(&ordinal)
    }

    /// Entry for `ordinal`, or a fallback when the catalog has none.
    pub fn entry_or_fallback(&self, ordinal: SiteOrdinal) -> CatalogEntry {
        self.get(ordinal)
            .cloned()
            .unwrap_or_else(|| CatalogEntry::fallback(ordinal))
    }

    pub fn ordinals(&self) -> impl Iterator<Item = SiteOrdinal> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// (name, state, district, type, lat, lng, production MT, sensors online, total sensors)
type BuiltinRow = (&'static str, &'static str, &'static str, &'static str, f64, f64, f64, u32, u32);

const BUILTIN: &[BuiltinRow] = &[
    ("Jharia Coalfields", "Jharkhand", "Dhanbad", "Coal", 23.7644, 86.4084, 45.2, 46, 120),
    ("Singareni Collieries", "Telangana", "Khammam", "Coal", 17.5125, 80.6425, 38.7, 44, 110),
    ("Neyveli Lignite", "Tamil Nadu", "Cuddalore", "Lignite", 11.5415, 79.4826, 24.9, 41, 105),
    ("Talcher Coalfields", "Odisha", "Angul", "Coal", 20.9498, 85.2336, 32.4, 48, 140),
    ("Korba Coalfields", "Chhattisgarh", "Korba", "Coal", 22.3595, 82.7501, 41.6, 47, 135),
    ("Ramagundam Opencast", "Telangana", "Peddapalli", "Coal", 18.7550, 79.4740, 18.3, 42, 100),
    ("Malanjkhand Copper Mine", "Madhya Pradesh", "Balaghat", "Copper", 22.0167, 80.7167, 12.1, 40, 115),
    ("Kusunda Underground", "Jharkhand", "Dhanbad", "Coal", 23.7820, 86.3950, 10.8, 43, 102),
    ("Jhanjra Project", "Jharkhand", "Dhanbad", "Coal", 23.6480, 87.1320, 14.5, 45, 118),
    ("Churcha Rohini", "Odisha", "Sundargarh", "Coal", 22.1240, 84.0310, 11.7, 40, 108),
    ("Dipka Mine", "Chhattisgarh", "Korba", "Coal", 22.3290, 82.5480, 35.0, 49, 148),
    ("Gevra Mine", "Chhattisgarh", "Korba", "Coal", 22.3330, 82.5950, 49.3, 50, 150),
    ("Kusmunda Mine", "Chhattisgarh", "Korba", "Coal", 22.3410, 82.6880, 46.8, 48, 145),
    ("Durgapur Steel Plant", "West Bengal", "Bardhaman", "Steel", 23.5204, 87.3119, 20.2, 42, 112),
    ("Bokaro Steel Plant", "Jharkhand", "Bokaro", "Steel", 23.6693, 86.1511, 27.5, 44, 125),
    ("Rourkela Steel Plant", "Odisha", "Sundargarh", "Steel", 22.2270, 84.8640, 22.9, 41, 130),
];

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn builtin_catalog_is_one_based() {
        let catalog = SiteCatalog::builtin();
        assert_eq!(catalog.len(), BUILTIN.len());
        assert_eq!(catalog.get(1).unwrap().name, "Jharia Coalfields");
        assert_eq!(catalog.get(16).unwrap().name, "Rourkela Steel Plant");
        assert!(catalog.get(0).is_none());
    }

    #[test]
    fn unknown_ordinal_gets_fallback() {
        let entry = SiteCatalog::builtin().entry_or_fallback(42);
        assert_eq!(entry.name, "Mine 42");
        assert_eq!(entry.state, "State 42");
        assert_eq!(entry.operational_status, OperationalStatus::Active);
    }

    #[test]
    fn loads_catalog_from_json() {
        let json = r#"[{
            "ordinal": 3,
            "name": "Test Pit",
            "state": "Goa",
            "district": "North Goa",
            "latitude": 15.5,
            "longitude": 73.9,
            "mineType": "Iron Ore",
            "operationalStatus": "Under Development",
            "productionVolumeMt": 5.5,
            "sensorsOnline": 10,
            "totalSensors": 20
        }]"#;
        let catalog = SiteCatalog::from_json_str(json).unwrap();
        let entry = catalog.get(3).unwrap();
        assert_eq!(entry.mine_type, "Iron Ore");
        assert_eq!(entry.operational_status, OperationalStatus::UnderDevelopment);
        assert_eq!(catalog.ordinals().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn status_defaults_to_active() {
        let json = r#"[{"ordinal":1,"name":"A","state":"S","district":"D","latitude":0,"longitude":0,
            "mineType":"Coal","productionVolumeMt":1,"sensorsOnline":1,"totalSensors":1}]"#;
        let catalog = SiteCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.get(1).unwrap().operational_status, OperationalStatus::Active);
    }

    #[test]
    fn rejects_malformed_catalog() {
        assert_matches!(SiteCatalog::from_json_str("{"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_zero_ordinal() {
        let json = r#"[{"ordinal":0,"name":"A","state":"S","district":"D","latitude":0,"longitude":0,
            "mineType":"Coal","productionVolumeMt":1,"sensorsOnline":1,"totalSensors":1}]"#;
        assert_matches!(SiteCatalog::from_json_str(json), Err(CoreError::Validation(_)));
    }
}
