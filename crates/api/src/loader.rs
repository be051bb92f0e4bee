//! Startup construction of the site registry.

use chrono::Utc;
use rockfall_core::catalog::SiteCatalog;
use rockfall_core::error::CoreError;
use rockfall_core::registry::{LoadReport, SiteRegistry};
use rockfall_core::store::ReadingStore;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Resolve the site catalog: the configured file if set, else the built-in table.
pub fn load_catalog(config: &ServerConfig) -> Result<SiteCatalog, CoreError> {
    match &config.site_catalog_path {
        Some(path) => {
            let catalog = SiteCatalog::from_json_file(path)?;
            tracing::info!(path = %path.display(), sites = catalog.len(), "Loaded site catalog");
            Ok(catalog)
        }
        None => Ok(SiteCatalog::builtin()),
    }
}

/// Build the application state: catalog, reading store and registry snapshot.
///
/// Only an unreadable catalog file fails; per-site problems are logged and the
/// affected site is left out.
pub fn build_state(config: ServerConfig) -> Result<AppState, CoreError> {
    let catalog = load_catalog(&config)?;
    let store = ReadingStore::new(config.data_dir.clone());
    let (registry, report) = SiteRegistry::load(&store, &catalog, Utc::now());
    log_report(&store, &report, registry.len());
    Ok(AppState::new(config, registry, store))
}

fn log_report(store: &ReadingStore, report: &LoadReport, site_count: usize) {
    for &(ordinal, readings, skipped) in &report.loaded {
        if skipped > 0 {
            tracing::warn!(
                path = %store.source_path(ordinal).display(),
                skipped,
                "Skipped malformed sensor lines"
            );
        }
        tracing::debug!(ordinal, readings, "Loaded sensor source");
    }
    for &ordinal in &report.missing {
        tracing::warn!(
            path = %store.source_path(ordinal).display(),
            "Sensor source not found, site excluded"
        );
    }
    for (ordinal, error) in &report.failed {
        tracing::error!(ordinal, error = %error, "Failed to read sensor source, site excluded");
    }
    tracing::info!(
        data_dir = %store.data_dir().display(),
        sites = site_count,
        missing = report.missing.len(),
        failed = report.failed.len(),
        "Site registry built"
    );
}
