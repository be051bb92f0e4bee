//! File-backed Reading Store.
//!
//! Each site has one line-delimited JSON source at
//! `<data_dir>/part_<ordinal>.json`. The store holds no parse state, so any
//! number of callers can read through it concurrently.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::reading::{parse_records, ParsedSource};
use crate::site_id::SiteId;
use crate::types::SiteOrdinal;

const SOURCE_PREFIX: &str = "part_";
const SOURCE_SUFFIX: &str = ".json";

/// Locates and parses per-site sensor sources under one directory.
#[derive(Debug, Clone)]
pub struct ReadingStore {
    data_dir: PathBuf,
}

impl ReadingStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the backing source for a site ordinal.
    pub fn source_path(&self, ordinal: SiteOrdinal) -> PathBuf {
        self.data_dir
            .join(format!("{SOURCE_PREFIX}{ordinal}{SOURCE_SUFFIX}"))
    }

    /// Read and parse the source for one site.
    ///
    /// A missing source is `CoreError::NotFound`; any other I/O failure is
    /// `CoreError::Io`. Malformed lines never fail the call.
    pub fn load(&self, ordinal: SiteOrdinal) -> Result<ParsedSource, CoreError> {
        let path = self.source_path(ordinal);
        let file = File::open(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CoreError::NotFound {
                entity: "Sensor source",
                id: source_label(ordinal),
            },
            _ => CoreError::Io(format!("{}: {e}", path.display())),
        })?;
        Ok(parse_records(BufReader::new(file)))
    }

    /// Ordinals of every `part_<n>.json` file present in the data directory.
    ///
    /// A missing or unreadable directory yields an empty set; absent sources
    /// are simply not loaded.
    pub fn discover_ordinals(&self) -> BTreeSet<SiteOrdinal> {
        let Ok(entries) = std::fs::read_dir(&self.data_dir) else {
            return BTreeSet::new();
        };
        entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name();
                parse_source_name(name.to_str()?)
            })
            .collect()
    }
}

/// Extract the ordinal from a `part_<n>.json` file name.
fn parse_source_name(name: &str) -> Option<SiteOrdinal> {
    let digits = name
        .strip_prefix(SOURCE_PREFIX)?
        .strip_suffix(SOURCE_SUFFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|&n| n > 0)
}

fn source_label(ordinal: SiteOrdinal) -> String {
    match SiteId::new(ordinal) {
        Ok(id) => id.to_string(),
        Err(_) => ordinal.to_string(),
    }
}
