pub mod charts;
pub mod dashboard;
pub mod mines;
pub mod predictions;

use rockfall_core::reading::ParsedSource;
use rockfall_core::site_id::SiteId;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Read a site's source on a blocking worker, bypassing the cached snapshot.
///
/// An identifier that does not parse, or a site with no source, is not-found.
pub(crate) async fn read_source(state: &AppState, id: &str) -> AppResult<ParsedSource> {
    let site_id: SiteId = id.parse()?;
    let store = state.store.clone();
    let parsed = tokio::task::spawn_blocking(move || store.load(site_id.ordinal()))
        .await
        .map_err(|e| AppError::InternalError(format!("sensor read task failed: {e}")))??;
    if parsed.skipped_lines > 0 {
        tracing::debug!(site = %site_id, skipped = parsed.skipped_lines, "Skipped malformed sensor lines");
    }
    Ok(parsed)
}
