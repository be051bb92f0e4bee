//! Site identifier parsing (`mine-001` <-> ordinal `1`).

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::SiteOrdinal;

/// Prefix shared by every site identifier.
pub const SITE_ID_PREFIX: &str = "mine-";

/// A parsed site identifier.
///
/// Formats with an ordinal zero-padded to at least three digits. Parsing only
/// accepts that canonical form, so `mine-7` and `mine-0007` name no site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SiteId(SiteOrdinal);

impl SiteId {
    /// Build an identifier from an ordinal. Ordinals start at 1.
    pub fn new(ordinal: SiteOrdinal) -> Result<Self, CoreError> {
        if ordinal == 0 {
            return Err(CoreError::Validation(
                "site ordinal must be >= 1".to_string(),
            ));
        }
        Ok(Self(ordinal))
    }

    pub fn ordinal(self) -> SiteOrdinal {
        self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SITE_ID_PREFIX}{:03}", self.0)
    }
}

impl FromStr for SiteId {
    type Err = CoreError;

    /// Any string that does not parse is reported as an unknown site.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(SITE_ID_PREFIX)
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| CoreError::site_not_found(s))?;
        let ordinal: SiteOrdinal = digits.parse().map_err(|_| CoreError::site_not_found(s))?;
        let id = SiteId::new(ordinal).map_err(|_| CoreError::site_not_found(s))?;
        if id.to_string() != s {
            return Err(CoreError::site_not_found(s));
        }
        Ok(id)
    }
}
