use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use chrono::{DateTime, Local};

use super::format::Timestamp;
use crate::error::FileError;

/// File modification time in the local timezone.
///
/// A zero (epoch) mtime is what some virtual filesystems report when they
/// have nothing better, so it counts as no date at all.
pub fn modified_time(path: &Path) -> Result<Timestamp, FileError> {
    let no_date = |source| FileError::NoDateFound {
        path: path.to_path_buf(),
        source,
    };

    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| no_date(Some(e)))?;

    if modified == UNIX_EPOCH {
        return Err(no_date(None));
    }

    let local: DateTime<Local> = modified.into();
    Ok(Timestamp::with_offset(local.fixed_offset()))
}
