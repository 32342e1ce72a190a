use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A date string matched none of the known layouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to parse date: {input:?}")]
pub struct ParseError {
    pub input: String,
}

/// Failure while asking the metadata tool for a single tag.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to run {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} exited with {status}", .program.display())]
    Exit { program: PathBuf, status: String },
}

/// Directory creation or the final rename failed.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("failed to create directory {}: {source}", .dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to move {} -> {}: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Terminal failure for one file. The batch driver counts it and moves on.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("no valid date found for {}", .path.display())]
    NoDateFound {
        path: PathBuf,
        #[source]
        source: Option<io::Error>,
    },

    #[error(transparent)]
    Placement(#[from] PlacementError),
}
