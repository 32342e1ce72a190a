pub mod conflict;
pub mod date;
pub mod error;
pub mod exiftool;
pub mod media;
pub mod placement;
pub mod planner;
pub mod stats;
pub mod version;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

pub use date::{DateResolver, Provenance, ResolvedDate};
pub use error::{FileError, ParseError, PlacementError, ToolError};
pub use exiftool::{ExifTool, MetadataTool, TagSource};
pub use media::MediaFile;
pub use placement::{DestinationPlan, Mode, Placer};
pub use stats::{BatchStats, Summary};
pub use version::BuildInfo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessOptions {
    /// Single file or directory tree to organize
    pub source: PathBuf,
    /// Base of the `<year>/<month>` tree
    pub destination: PathBuf,
    #[serde(default)]
    pub dry_run: bool,
}

impl ProcessOptions {
    pub fn mode(&self) -> Mode {
        if self.dry_run {
            Mode::DryRun
        } else {
            Mode::Apply
        }
    }
}

/// Type alias for progress callback: stage, current, total, message.
pub type ProgressCallback<'a> = dyn Fn(&str, u64, u64, &str) + 'a;

/// Organize everything under `options.source`.
///
/// Only an unreadable source is fatal. Per-file failures are logged,
/// counted in the returned stats and skipped.
pub fn process(
    options: &ProcessOptions,
    tool: &MetadataTool,
    progress_callback: &ProgressCallback<'_>,
) -> anyhow::Result<BatchStats> {
    process_with_tags(options, tool.source(), progress_callback)
}

/// [`process`] with any tag source, or none.
pub fn process_with_tags(
    options: &ProcessOptions,
    tags: Option<&dyn TagSource>,
    progress_callback: &ProgressCallback<'_>,
) -> anyhow::Result<BatchStats> {
    let info = fs::metadata(&options.source)
        .with_context(|| format!("cannot access source path {}", options.source.display()))?;

    let resolver = DateResolver::new(tags);
    let mut placer = Placer::new(resolver, &options.destination, options.mode());

    if !info.is_dir() {
        let mut stats = BatchStats::new(1);
        let file = MediaFile::new(options.source.clone());
        process_file(&mut placer, &file, &mut stats, progress_callback);
        return Ok(stats);
    }

    let total = walk(options)
        .filter_map(Result::ok)
        .filter(is_media_entry)
        .count() as u64;
    log::info!("Found {} media files in {}", total, options.source.display());
    let mut stats = BatchStats::new(total);

    for entry in walk(options) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::error!("Error accessing {}: {}", display_walk_path(&e), e);
                stats.record_error();
                continue;
            }
        };
        if !is_media_entry(&entry) {
            continue;
        }
        let file = MediaFile::new(entry.into_path());
        process_file(&mut placer, &file, &mut stats, progress_callback);
    }

    Ok(stats)
}

fn process_file(
    placer: &mut Placer,
    file: &MediaFile,
    stats: &mut BatchStats,
    progress_callback: &ProgressCallback<'_>,
) {
    let current = stats.processed + stats.errors;
    match placer.place(&file.path) {
        Ok(plan) => {
            stats.record_processed(plan.date.is_metadata());
            let stage = match placer.mode() {
                Mode::DryRun => "dry-run",
                Mode::Apply => "move",
            };
            let message = format!(
                "{} -> {} ({})",
                file.filename,
                plan.destination.display(),
                plan.date.provenance
            );
            progress_callback(stage, current, stats.total, &message);
        }
        Err(e) => {
            log::error!("Error processing {}: {}", file.path.display(), e);
            stats.record_error();
            let message = format!("{}: {}", file.filename, e);
            progress_callback("error", current, stats.total, &message);
        }
    }
}

/// Walk the source in name order, skipping a destination nested inside it.
fn walk(options: &ProcessOptions) -> impl Iterator<Item = walkdir::Result<DirEntry>> + '_ {
    let nested_destination = options.destination != options.source
        && options.destination.starts_with(&options.source);
    WalkDir::new(&options.source)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| !(nested_destination && e.path().starts_with(&options.destination)))
}

fn is_media_entry(entry: &DirEntry) -> bool {
    !entry.file_type().is_dir() && media::is_media_file(entry.path())
}

fn display_walk_path(e: &walkdir::Error) -> String {
    e.path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown>".to_string())
}
