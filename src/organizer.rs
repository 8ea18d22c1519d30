//! Directory walk that sorts media files into dated directories.
//!
//! [`Organizer::run`] walks the tree below the walk root in pre-order. Each
//! entry goes through [`Organizer::visit`]:
//!
//! - directories are descended into, except the output directory, which is
//!   skipped as soon as it is seen;
//! - media files are moved to `<output>/<year>/<month>/<name>`;
//! - every other file is reported and left alone.
//!
//! The first error stops the walk.

use crate::config::OrganizerConfig;
use crate::file_organizer::{FileOrganizer, Operation, OrganizeError, OrganizeResult};
use crate::media_extension::{MediaFilter, MediaKind};
use crate::output::OutputFormatter;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// What the walk should do after an entry has been visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// Keep walking, descending into the entry if it is a directory.
    Continue,
    /// Do not descend into this directory; continue with its siblings.
    SkipDir,
}

/// Everything a successful run did.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Completed moves, in walk order.
    pub operations: Vec<Operation>,
    /// Files left in place because they are not media.
    pub ignored: Vec<PathBuf>,
    /// Destination directories created during the run.
    pub created_dirs: Vec<PathBuf>,
}

impl RunSummary {
    /// Number of moved files per media kind.
    pub fn moved_by_kind(&self) -> HashMap<MediaKind, usize> {
        let mut counts = HashMap::new();
        for op in &self.operations {
            *counts.entry(op.kind).or_insert(0) += 1;
        }
        counts
    }
}

/// Walks a directory tree and moves media files into the output directory.
///
/// # Examples
///
/// ```no_run
/// use datesort::organizer::Organizer;
/// use std::path::Path;
///
/// let mut organizer = Organizer::new(Path::new("/home/user/Pictures"))?;
/// let summary = organizer.run()?;
/// println!("moved {} files", summary.operations.len());
/// # Ok::<(), datesort::file_organizer::OrganizeError>(())
/// ```
#[derive(Debug)]
pub struct Organizer {
    walk_root: PathBuf,
    output_root: PathBuf,
    config: OrganizerConfig,
    filter: MediaFilter,
    visited_output: bool,
    summary: RunSummary,
}

impl Organizer {
    /// Creates an organizer for `walk_root` with the default configuration.
    pub fn new(walk_root: &Path) -> OrganizeResult<Self> {
        Self::with_config(walk_root, OrganizerConfig::default())
    }

    /// Creates an organizer for `walk_root` with an explicit configuration.
    ///
    /// The walk root is made absolute once, here.
    pub fn with_config(walk_root: &Path, config: OrganizerConfig) -> OrganizeResult<Self> {
        let walk_root =
            std::path::absolute(walk_root).map_err(|e| OrganizeError::InvalidWalkRoot {
                path: walk_root.to_path_buf(),
                source: e,
            })?;
        let output_root = walk_root.join(&config.output_dir_name);

        Ok(Self {
            walk_root,
            output_root,
            config,
            filter: MediaFilter::default(),
            visited_output: false,
            summary: RunSummary::default(),
        })
    }

    /// Absolute path of the walk root.
    pub fn walk_root(&self) -> &Path {
        &self.walk_root
    }

    /// Absolute path of the output directory.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Whether the output directory has been seen during the current run.
    pub fn visited_output(&self) -> bool {
        self.visited_output
    }

    /// Walks the whole tree, moving every media file found outside the output directory.
    ///
    /// Children of each directory are visited in file-name order. Returns the
    /// run summary, or the first error encountered.
    pub fn run(&mut self) -> OrganizeResult<RunSummary> {
        self.visited_output = false;
        self.summary = RunSummary::default();

        let mut walker = WalkDir::new(&self.walk_root)
            .sort_by_file_name()
            .into_iter();
        while let Some(entry) = walker.next() {
            if self.visit(entry)? == WalkControl::SkipDir {
                walker.skip_current_dir();
            }
        }

        Ok(std::mem::take(&mut self.summary))
    }

    /// Applies the per-entry policy to one walk result.
    pub fn visit(&mut self, entry: walkdir::Result<DirEntry>) -> OrganizeResult<WalkControl> {
        let entry = entry?;

        if entry.file_type().is_dir() {
            return Ok(self.check_directory(entry.path()));
        }

        self.handle_file(&entry)?;
        Ok(WalkControl::Continue)
    }

    fn check_directory(&mut self, dir: &Path) -> WalkControl {
        // Only one output directory exists per tree.
        if self.visited_output {
            return WalkControl::Continue;
        }

        if dir == self.output_root {
            self.visited_output = true;
            return WalkControl::SkipDir;
        }

        WalkControl::Continue
    }

    fn handle_file(&mut self, entry: &DirEntry) -> OrganizeResult<()> {
        let path = entry.path();

        let Some(kind) = self.filter.classify(path) else {
            OutputFormatter::ignoring(path);
            self.summary.ignored.push(path.to_path_buf());
            return Ok(());
        };

        let modified = entry
            .metadata()
            .map_err(std::io::Error::from)
            .and_then(|metadata| metadata.modified())
            .map_err(|e| OrganizeError::Metadata {
                path: path.to_path_buf(),
                source: e,
            })?;

        let dest_dir =
            FileOrganizer::destination_dir(&self.output_root, modified, self.config.month_format);
        if FileOrganizer::ensure_directory(&dest_dir, self.config.dir_mode)? {
            OutputFormatter::created_dir(&dest_dir);
            self.summary.created_dirs.push(dest_dir.clone());
        }

        let destination = FileOrganizer::resolve_destination(&dest_dir, entry.file_name())?;
        OutputFormatter::moving(path, &destination);
        let operation = FileOrganizer::move_file(path, &destination, kind)?;
        self.summary.operations.push(operation);

        Ok(())
    }
}
