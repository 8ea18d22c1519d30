/// File placement for dated media directories.
///
/// This module computes where a media file belongs (`<output>/<year>/<month>`),
/// creates that directory, picks a name that does not clobber an existing file,
/// and renames the file into place.
use crate::config::MonthFormat;
use crate::media_extension::MediaKind;
use chrono::{DateTime, Datelike, Local, Utc};
use std::ffi::{OsStr, OsString};
use std::fs::{self, DirBuilder};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// How many suffixed names are tried before giving up on a destination.
pub const MAX_SUFFIX_ATTEMPTS: u64 = 16;

/// Represents a single completed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Absolute path of the file before the move.
    pub source: PathBuf,
    /// Absolute path of the file after the move.
    pub destination: PathBuf,
    /// The kind of media that was moved.
    pub kind: MediaKind,
}

/// Errors that abort an organizer run.
#[derive(Debug)]
pub enum OrganizeError {
    /// The walk root could not be resolved to an absolute path.
    InvalidWalkRoot { path: PathBuf, source: io::Error },
    /// The directory walk reported an error for an entry.
    Walk { source: walkdir::Error },
    /// The modification time of a file could not be read.
    Metadata { path: PathBuf, source: io::Error },
    /// Failed to create a destination directory.
    DirectoryCreationFailed { path: PathBuf, source: io::Error },
    /// Every suffixed candidate name was already taken.
    NoFreeName { directory: PathBuf, file_name: String },
    /// Failed to rename a file into its destination.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWalkRoot { path, source } => {
                write!(f, "Invalid walk root {}: {}", path.display(), source)
            }
            Self::Walk { source } => write!(f, "Failed to walk directory tree: {}", source),
            Self::Metadata { path, source } => {
                write!(f, "Failed to read metadata of {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::NoFreeName {
                directory,
                file_name,
            } => {
                write!(
                    f,
                    "No free name for {} in {} after {} attempts",
                    file_name,
                    directory.display(),
                    MAX_SUFFIX_ATTEMPTS
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidWalkRoot { source, .. }
            | Self::Metadata { source, .. }
            | Self::DirectoryCreationFailed { source, .. } => Some(source),
            Self::Walk { source } => Some(source),
            Self::FileMoveFailure { source_error, .. } => Some(source_error),
            Self::NoFreeName { .. } => None,
        }
    }
}

impl From<walkdir::Error> for OrganizeError {
    fn from(source: walkdir::Error) -> Self {
        Self::Walk { source }
    }
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Moves media files into `<output>/<year>/<month>` directories.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Computes the dated directory for a file modified at `modified`.
    ///
    /// The year and month are taken in the local time zone.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Local, TimeZone};
    /// use datesort::config::MonthFormat;
    /// use datesort::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let modified = Local.with_ymd_and_hms(2023, 6, 15, 12, 0, 0).unwrap().into();
    /// let dir = FileOrganizer::destination_dir(Path::new("output"), modified, MonthFormat::Name);
    /// assert_eq!(dir, Path::new("output/2023/June"));
    /// ```
    pub fn destination_dir(
        output_root: &Path,
        modified: SystemTime,
        month_format: MonthFormat,
    ) -> PathBuf {
        let local: DateTime<Local> = modified.into();
        output_root
            .join(local.year().to_string())
            .join(month_format.dir_name(&local))
    }

    /// Creates `dir` and any missing parents.
    ///
    /// Returns `true` when the directory did not exist before the call.
    pub fn ensure_directory(dir: &Path, mode: u32) -> OrganizeResult<bool> {
        if dir.is_dir() {
            return Ok(false);
        }

        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;

        builder
            .create(dir)
            .map_err(|e| OrganizeError::DirectoryCreationFailed {
                path: dir.to_path_buf(),
                source: e,
            })?;
        Ok(true)
    }

    /// Picks a destination path for `file_name` inside `dest_dir`.
    ///
    /// When `dest_dir/file_name` is free it is returned unchanged. Otherwise a
    /// `-<n>` suffix is inserted before the extension (`photo.jpg` becomes
    /// `photo-8234798234.jpg`), with `n` drawn from a time-seeded generator.
    /// Suffixed candidates are checked as well and redrawn while taken.
    ///
    /// The check and the later rename are not atomic. The organizer is the
    /// only writer to the output tree during a run.
    pub fn resolve_destination(dest_dir: &Path, file_name: &OsStr) -> OrganizeResult<PathBuf> {
        let candidate = dest_dir.join(file_name);
        if !path_taken(&candidate) {
            return Ok(candidate);
        }

        for attempt in 0..MAX_SUFFIX_ATTEMPTS {
            let candidate = dest_dir.join(suffixed_name(file_name, time_seeded_suffix(attempt)));
            if !path_taken(&candidate) {
                return Ok(candidate);
            }
        }

        Err(OrganizeError::NoFreeName {
            directory: dest_dir.to_path_buf(),
            file_name: file_name.to_string_lossy().into_owned(),
        })
    }

    /// Renames `source` to `destination` and records the move.
    pub fn move_file(
        source: &Path,
        destination: &Path,
        kind: MediaKind,
    ) -> OrganizeResult<Operation> {
        fs::rename(source, destination).map_err(|e| OrganizeError::FileMoveFailure {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            source_error: e,
        })?;

        Ok(Operation {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            kind,
        })
    }
}

/// A path is taken unless looking it up reports `NotFound`.
fn path_taken(path: &Path) -> bool {
    match fs::symlink_metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != io::ErrorKind::NotFound,
    }
}

/// Inserts `-<suffix>` before the extension of `name`.
///
/// The extension starts at the last dot, so `a.tar.gz` becomes `a.tar-1.gz`
/// and a name without a dot gets the suffix at the end.
/// The name is split on its raw bytes, so non-UTF-8 names keep every byte.
fn suffixed_name(name: &OsStr, suffix: u64) -> OsString {
    let bytes = name.as_encoded_bytes();
    let (stem, extension) = match bytes.iter().rposition(|&b| b == b'.') {
        // SAFETY: both halves come from `name` and are split right before an
        // ASCII '.', which is a valid split point for encoded OS strings.
        Some(dot) => unsafe {
            (
                OsStr::from_encoded_bytes_unchecked(&bytes[..dot]),
                OsStr::from_encoded_bytes_unchecked(&bytes[dot..]),
            )
        },
        None => (name, OsStr::new("")),
    };

    let mut suffixed = OsString::with_capacity(bytes.len() + 21);
    suffixed.push(stem);
    suffixed.push(format!("-{}", suffix));
    suffixed.push(extension);
    suffixed
}

/// Draws a non-negative pseudo-random number seeded from the current time.
///
/// `salt` separates draws made within the same clock tick.
fn time_seeded_suffix(salt: u64) -> u64 {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
    splitmix64(nanos ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15)) >> 1
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    fn local_time(year: i32, month: u32, day: u32) -> SystemTime {
        Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap()
            .into()
    }

    /// Splits `prefix-<digits><ext>` and returns the digits.
    fn suffix_digits<'a>(name: &'a str, prefix: &str, ext: &str) -> &'a str {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|rest| rest.strip_suffix(ext))
            .unwrap_or_else(|| panic!("unexpected suffixed name: {}", name))
    }

    #[test]
    fn test_destination_dir_uses_month_name() {
        let dir = FileOrganizer::destination_dir(
            Path::new("/base/output"),
            local_time(2023, 6, 15),
            MonthFormat::Name,
        );
        assert_eq!(dir, PathBuf::from("/base/output/2023/June"));
    }

    #[test]
    fn test_destination_dir_uses_month_number() {
        let dir = FileOrganizer::destination_dir(
            Path::new("output"),
            local_time(1999, 12, 31),
            MonthFormat::Number,
        );
        assert_eq!(dir, PathBuf::from("output/1999/12"));
    }

    #[test]
    fn test_ensure_directory_creates_parents() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path().join("output").join("2020").join("May");

        let created = FileOrganizer::ensure_directory(&dir, 0o777).expect("Failed to create dir");
        assert!(created);
        assert!(dir.is_dir());

        let created_again =
            FileOrganizer::ensure_directory(&dir, 0o777).expect("Failed to reuse dir");
        assert!(!created_again);
    }

    #[test]
    fn test_ensure_directory_fails_when_file_in_the_way() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let blocker = temp_dir.path().join("output");
        fs::write(&blocker, "not a directory").expect("Failed to write blocker");

        let result = FileOrganizer::ensure_directory(&blocker.join("2020"), 0o777);
        assert!(matches!(
            result,
            Err(OrganizeError::DirectoryCreationFailed { .. })
        ));
    }

    #[test]
    fn test_resolve_destination_free_name_unchanged() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dest = FileOrganizer::resolve_destination(temp_dir.path(), OsStr::new("photo.jpg"))
            .expect("Failed to resolve");
        assert_eq!(dest, temp_dir.path().join("photo.jpg"));
    }

    #[test]
    fn test_resolve_destination_adds_suffix_before_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("photo.jpg"), "existing").expect("Failed to write");

        let dest = FileOrganizer::resolve_destination(temp_dir.path(), OsStr::new("photo.jpg"))
            .expect("Failed to resolve");

        assert_eq!(dest.parent(), Some(temp_dir.path()));
        let name = dest.file_name().unwrap().to_string_lossy().to_string();
        let digits = suffix_digits(&name, "photo", ".jpg");
        assert!(!digits.is_empty());
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
        assert!(!dest.exists());
    }

    #[test]
    fn test_resolve_destination_without_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("README"), "existing").expect("Failed to write");

        let dest = FileOrganizer::resolve_destination(temp_dir.path(), OsStr::new("README"))
            .expect("Failed to resolve");
        let name = dest.file_name().unwrap().to_string_lossy().to_string();
        let digits = suffix_digits(&name, "README", "");
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_existing_directory_counts_as_taken() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join("clip.mp4")).expect("Failed to create dir");

        let dest = FileOrganizer::resolve_destination(temp_dir.path(), OsStr::new("clip.mp4"))
            .expect("Failed to resolve");
        assert_ne!(dest, temp_dir.path().join("clip.mp4"));
    }

    #[test]
    fn test_suffixed_name_uses_last_dot() {
        assert_eq!(suffixed_name(OsStr::new("photo.jpg"), 42), "photo-42.jpg");
        assert_eq!(suffixed_name(OsStr::new("a.tar.gz"), 7), "a.tar-7.gz");
        assert_eq!(suffixed_name(OsStr::new("README"), 1), "README-1");
        assert_eq!(suffixed_name(OsStr::new(".png"), 3), "-3.png");
    }

    #[cfg(unix)]
    #[test]
    fn test_suffixed_name_keeps_non_utf8_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"ph\xffoto.jpg");
        assert_eq!(
            suffixed_name(name, 5).as_bytes(),
            b"ph\xffoto-5.jpg".as_slice()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_destination_collision_keeps_non_utf8_name() {
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let name = OsStr::from_bytes(b"ph\xffoto.jpg");
        if fs::write(temp_dir.path().join(name), "existing").is_err() {
            // Filesystem refuses non-UTF-8 names.
            return;
        }

        let dest = FileOrganizer::resolve_destination(temp_dir.path(), name)
            .expect("Failed to resolve");

        let dest_name = dest.file_name().unwrap().as_bytes();
        assert!(dest_name.starts_with(b"ph\xffoto-"), "{:?}", dest_name);
        assert!(dest_name.ends_with(b".jpg"));
        let digits = &dest_name[b"ph\xffoto-".len()..dest_name.len() - b".jpg".len()];
        assert!(!digits.is_empty());
        assert!(digits.iter().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn test_time_seeded_suffix_varies_with_salt() {
        let draws: std::collections::HashSet<u64> = (0..MAX_SUFFIX_ATTEMPTS)
            .map(time_seeded_suffix)
            .collect();
        assert!(draws.len() > 1);
        assert!(draws.iter().all(|n| *n <= i64::MAX as u64));
    }

    #[test]
    fn test_move_file_records_operation() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("clip.mov");
        let destination = temp_dir.path().join("moved.mov");
        fs::write(&source, "video").expect("Failed to write");

        let op = FileOrganizer::move_file(&source, &destination, MediaKind::Video)
            .expect("Failed to move file");

        assert_eq!(op.source, source);
        assert_eq!(op.destination, destination);
        assert_eq!(op.kind, MediaKind::Video);
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&destination).unwrap(), "video");
    }

    #[test]
    fn test_move_file_missing_source() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let result = FileOrganizer::move_file(
            &temp_dir.path().join("missing.png"),
            &temp_dir.path().join("dest.png"),
            MediaKind::Image,
        );
        assert!(matches!(result, Err(OrganizeError::FileMoveFailure { .. })));
    }
}
