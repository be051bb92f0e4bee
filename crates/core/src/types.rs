/// All timestamps produced by the engine are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Numeric ordinal of a site (the `1` in `mine-001`).
pub type SiteOrdinal = u32;
