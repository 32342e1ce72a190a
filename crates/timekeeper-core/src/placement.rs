use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::conflict;
use crate::date::{DateResolver, ResolvedDate};
use crate::error::{FileError, PlacementError};
use crate::planner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Report plans only, touch nothing.
    DryRun,
    /// Create directories and move files.
    Apply,
}

/// Where one source file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPlan {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// A `_N` suffix was added to avoid a collision.
    pub renamed: bool,
    pub date: ResolvedDate,
}

impl DestinationPlan {
    /// Source is already where it belongs.
    pub fn is_in_place(&self) -> bool {
        same_file(&self.source, &self.destination)
    }
}

/// Resolves, plans and (in apply mode) moves files one at a time.
///
/// Destinations handed out earlier in the batch count as taken even when
/// nothing was written, so dry runs report the same names a real run uses.
pub struct Placer<'a> {
    resolver: DateResolver<'a>,
    base: PathBuf,
    mode: Mode,
    claimed: HashSet<PathBuf>,
}

impl<'a> Placer<'a> {
    pub fn new(resolver: DateResolver<'a>, base: impl Into<PathBuf>, mode: Mode) -> Self {
        Self {
            resolver,
            base: base.into(),
            mode,
            claimed: HashSet::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Resolve the date and pick a free destination. No filesystem changes.
    pub fn plan(&self, source: &Path) -> Result<DestinationPlan, FileError> {
        let date = self.resolver.resolve(source)?;
        let dir = planner::destination_dir(&self.base, &date);
        let candidate = match source.file_name() {
            Some(name) => dir.join(name),
            None => dir.join("file"),
        };

        let destination = if same_file(source, &candidate) {
            candidate
        } else {
            conflict::unique_path_with(&candidate, |p| {
                self.claimed.contains(p) || p.exists()
            })
        };

        Ok(DestinationPlan {
            renamed: destination.file_name() != source.file_name(),
            source: source.to_path_buf(),
            destination,
            date,
        })
    }

    /// Plan, then move when in apply mode.
    pub fn place(&mut self, source: &Path) -> Result<DestinationPlan, FileError> {
        let mut plan = self.plan(source)?;
        if self.mode == Mode::Apply {
            apply(&mut plan)?;
        }
        self.claimed.insert(plan.destination.clone());
        Ok(plan)
    }
}

/// Create the destination directory and move the file into it.
///
/// The destination is checked again right before the rename; if something
/// appeared there since planning, the plan switches to the first free
/// `<stem>_<N>` name.
pub fn apply(plan: &mut DestinationPlan) -> Result<(), PlacementError> {
    if plan.is_in_place() {
        log::info!("{} already in place", plan.source.display());
        return Ok(());
    }

    if let Some(dir) = plan.destination.parent() {
        fs::create_dir_all(dir).map_err(|source| PlacementError::CreateDir {
            dir: dir.to_path_buf(),
            source,
        })?;
    }

    if plan.destination.exists() {
        // restart from the unsuffixed name so the counter stays `<stem>_<N>`
        let candidate = match plan.source.file_name() {
            Some(name) => plan.destination.with_file_name(name),
            None => plan.destination.clone(),
        };
        let destination = conflict::unique_path(&candidate);
        log::warn!(
            "{} appeared after planning, using {}",
            plan.destination.display(),
            destination.display()
        );
        plan.renamed = destination.file_name() != plan.source.file_name();
        plan.destination = destination;
    }

    log::info!("Moving: {} -> {}", plan.source.display(), plan.destination.display());
    fs::rename(&plan.source, &plan.destination).map_err(|source| PlacementError::Rename {
        from: plan.source.clone(),
        to: plan.destination.clone(),
        source,
    })
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
