//! Output formatting and styling module.
//!
//! All console output goes through [`OutputFormatter`]. Lines are plain text
//! with light coloring; nothing parses them.

use crate::organizer::RunSummary;
use colored::*;
use std::path::Path;

/// Prints progress lines, notices, and the end-of-run summary.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Announces a newly created destination directory.
    pub fn created_dir(dir: &Path) {
        println!("{}", created_dir_line(dir));
    }

    /// Announces a file move.
    pub fn moving(source: &Path, destination: &Path) {
        println!(
            "{} {} to {} ...",
            "Moving".green(),
            source.display(),
            destination.display()
        );
    }

    /// Notes a file that is left where it is.
    pub fn ignoring(path: &Path) {
        println!("{}", format!("Ignoring: {}", path.display()).dimmed());
    }

    /// Prints an error message in red on standard error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use datesort::output::OutputFormatter;
    /// OutputFormatter::error("getting working directory: permission denied");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{}", error_line(message));
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints counts of moved files per media kind, ignored files and created directories.
    pub fn summary(summary: &RunSummary) {
        Self::header("SUMMARY");

        let counts = summary.moved_by_kind();
        let mut kinds: Vec<_> = counts.iter().collect();
        kinds.sort_by_key(|&(kind, _)| kind.label());

        for (kind, count) in kinds {
            println!("  {:<8} {}", kind.label(), count.to_string().green());
        }
        println!(
            "  {:<8} {} {}",
            "moved".bold(),
            summary.operations.len().to_string().green().bold(),
            plural(summary.operations.len())
        );
        println!(
            "  {:<8} {} {}",
            "ignored",
            summary.ignored.len().to_string().yellow(),
            plural(summary.ignored.len())
        );
        println!(
            "  {:<8} {} {}",
            "created",
            summary.created_dirs.len(),
            if summary.created_dirs.len() == 1 {
                "directory"
            } else {
                "directories"
            }
        );
    }
}

fn created_dir_line(dir: &Path) -> String {
    format!("{} {}", "Created dir".cyan(), dir.display())
}

fn error_line(message: &str) -> String {
    format!("{} {}", "ERROR:".red().bold(), message)
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}
