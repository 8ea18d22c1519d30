//! Organizer configuration.
//!
//! There is no configuration file: every run uses [`OrganizerConfig::default`].
//! The struct exists so the library and its tests can point the organizer at a
//! different output directory name or month layout.
//!
//! # Defaults
//!
//! ```
//! use datesort::config::{MonthFormat, OrganizerConfig};
//!
//! let config = OrganizerConfig::default();
//! assert_eq!(config.output_dir_name, "output");
//! assert_eq!(config.month_format, MonthFormat::Name);
//! ```

use chrono::{DateTime, Datelike, TimeZone};

/// Name of the directory, relative to the walk root, that receives organized files.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Permission bits for created destination directories (before umask).
pub const DEFAULT_DIR_MODE: u32 = 0o777;

/// How the month component of a destination path is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFormat {
    /// English month name, e.g. `June`.
    #[default]
    Name,
    /// Unpadded month number, e.g. `6`.
    Number,
}

impl MonthFormat {
    /// Renders the month of `time` as a directory name.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use datesort::config::MonthFormat;
    ///
    /// let time = Utc.with_ymd_and_hms(2023, 6, 15, 12, 0, 0).unwrap();
    /// assert_eq!(MonthFormat::Name.dir_name(&time), "June");
    /// assert_eq!(MonthFormat::Number.dir_name(&time), "6");
    /// ```
    pub fn dir_name<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        match self {
            MonthFormat::Name => time.format("%B").to_string(),
            MonthFormat::Number => time.month().to_string(),
        }
    }
}

/// Settings for a single organizer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizerConfig {
    /// Output directory name, joined onto the walk root.
    pub output_dir_name: String,
    /// Layout of the month directory.
    pub month_format: MonthFormat,
    /// Mode for created directories. Ignored on non-Unix platforms.
    pub dir_mode: u32,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            output_dir_name: DEFAULT_OUTPUT_DIR.to_string(),
            month_format: MonthFormat::default(),
            dir_mode: DEFAULT_DIR_MODE,
        }
    }
}
