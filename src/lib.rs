//! datesort - sort media files into year/month directories
//!
//! This library walks a directory tree, recognizes media files by extension,
//! and moves each one into `output/<year>/<month>/` according to its
//! modification time, without overwriting files already there.

pub mod cli;
pub mod config;
pub mod file_organizer;
pub mod media_extension;
pub mod organizer;
pub mod output;

pub use config::{MonthFormat, OrganizerConfig};
pub use file_organizer::{FileOrganizer, Operation, OrganizeError, OrganizeResult};
pub use media_extension::{MediaFilter, MediaKind};
pub use organizer::{Organizer, RunSummary, WalkControl};

pub use cli::{Cli, run_cli};
