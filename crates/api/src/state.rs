use std::sync::Arc;

use rockfall_core::predict::Presentation;
use rockfall_core::registry::SiteRegistry;
use rockfall_core::store::ReadingStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The registry is an
/// immutable snapshot built at startup; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Site snapshot built from every available sensor source.
    pub registry: Arc<SiteRegistry>,
    /// Read-through access to raw sensor sources for on-demand endpoints.
    pub store: Arc<ReadingStore>,
}

impl AppState {
    pub fn new(config: ServerConfig, registry: SiteRegistry, store: ReadingStore) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            store: Arc::new(store),
        }
    }

    pub fn presentation(&self) -> Presentation {
        self.config.presentation()
    }
}
