pub mod format;
pub mod mtime;

use std::fmt;
use std::path::Path;

use crate::error::FileError;
use crate::exiftool::TagSource;

pub use format::{parse_date, Timestamp};

/// Metadata tags queried in order of preference.
pub const DATE_TAGS: &[&str] = &["DateTimeOriginal", "CreateDate", "DateTime", "FileModifyDate"];

/// Where a resolved date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    MetadataField,
    FilesystemFallback,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MetadataField => f.write_str("metadata-field"),
            Self::FilesystemFallback => f.write_str("filesystem-fallback"),
        }
    }
}

/// Capture date plus the source that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedDate {
    pub time: Timestamp,
    pub provenance: Provenance,
}

impl ResolvedDate {
    pub fn is_metadata(&self) -> bool {
        self.provenance == Provenance::MetadataField
    }
}

/// Walks the fallback chain: metadata tags first, then the file's mtime.
pub struct DateResolver<'a> {
    tags: Option<&'a dyn TagSource>,
}

impl<'a> DateResolver<'a> {
    pub fn new(tags: Option<&'a dyn TagSource>) -> Self {
        Self { tags }
    }

    /// Only fails when the filesystem fallback itself has nothing to offer.
    pub fn resolve(&self, path: &Path) -> Result<ResolvedDate, FileError> {
        if let Some(time) = self.from_metadata(path) {
            return Ok(ResolvedDate {
                time,
                provenance: Provenance::MetadataField,
            });
        }

        let time = mtime::modified_time(path)?;
        Ok(ResolvedDate {
            time,
            provenance: Provenance::FilesystemFallback,
        })
    }

    fn from_metadata(&self, path: &Path) -> Option<Timestamp> {
        let source = self.tags?;

        for tag in DATE_TAGS {
            let raw = match source.read_tag(path, tag) {
                Ok(Some(raw)) => raw,
                Ok(None) => {
                    log::debug!("{}: {} is empty", path.display(), tag);
                    continue;
                }
                Err(e) => {
                    log::warn!("{}: reading {} failed: {}", path.display(), tag, e);
                    continue;
                }
            };

            match parse_date(&raw) {
                Ok(ts) => {
                    log::debug!("{}: {} = {}", path.display(), tag, raw);
                    return Some(ts);
                }
                Err(e) => log::warn!("{}: {} {}", path.display(), tag, e),
            }
        }

        None
    }
}
