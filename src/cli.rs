//! Command-line interface module for datesort.
//!
//! The binary takes no options: it organizes the directory it is started in.
//! `--help` and `--version` are the only flags.

use crate::file_organizer::OrganizeResult;
use crate::organizer::{Organizer, RunSummary};
use crate::output::OutputFormatter;
use clap::Parser;
use std::path::Path;

/// Moves media files below the current directory into output/<year>/<month>.
///
/// Images (.jpg .jpeg .png .gif .svg .bmp .raw .tiff) and videos
/// (.mov .avi .mp4) are moved according to their modification time.
/// Everything else is left in place. The output directory itself is never
/// scanned.
#[derive(Debug, Parser)]
#[command(name = "datesort", version, about, long_about)]
pub struct Cli {}

/// Organizes `walk_root` with the default configuration and prints a summary.
///
/// # Examples
///
/// ```no_run
/// use datesort::cli::run_cli;
/// use std::path::Path;
///
/// match run_cli(Path::new("/path/to/photos")) {
///     Ok(summary) => println!("Moved {} files", summary.operations.len()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(walk_root: &Path) -> OrganizeResult<RunSummary> {
    let mut organizer = Organizer::new(walk_root)?;
    let summary = organizer.run()?;
    OutputFormatter::summary(&summary);
    Ok(summary)
}
