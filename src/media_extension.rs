/// Media file recognition by extension.
///
/// Only files whose name ends with one of a fixed set of suffixes are moved.
/// Matching is case-insensitive and looks at the name alone, never at the
/// file contents.
///
/// # Examples
///
/// ```
/// use datesort::media_extension::{MediaFilter, MediaKind};
/// use std::path::Path;
///
/// let filter = MediaFilter::default();
/// assert_eq!(filter.classify(Path::new("holiday/IMG_0001.JPG")), Some(MediaKind::Image));
/// assert_eq!(filter.classify(Path::new("clip.mov")), Some(MediaKind::Video));
/// assert_eq!(filter.classify(Path::new("notes.txt")), None);
/// ```
use std::collections::HashMap;
use std::path::Path;

/// Suffixes recognized as media, paired with the kind of media they hold.
pub const MEDIA_EXTENSIONS: &[(&str, MediaKind)] = &[
    (".jpg", MediaKind::Image),
    (".jpeg", MediaKind::Image),
    (".png", MediaKind::Image),
    (".gif", MediaKind::Image),
    (".svg", MediaKind::Image),
    (".bmp", MediaKind::Image),
    (".raw", MediaKind::Image),
    (".tiff", MediaKind::Image),
    (".mov", MediaKind::Video),
    (".avi", MediaKind::Video),
    (".mp4", MediaKind::Video),
];

/// Broad kind of a recognized media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Still images (JPG, PNG, RAW, etc.)
    Image,
    /// Video clips (MOV, AVI, MP4)
    Video,
}

impl MediaKind {
    /// Returns a human-readable label used in console output.
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Video => "videos",
        }
    }
}

/// Recognizes media files by their (case-insensitive) extension.
#[derive(Debug, Clone)]
pub struct MediaFilter {
    extension_map: HashMap<String, MediaKind>,
}

impl MediaFilter {
    /// Creates a filter holding the standard media extensions.
    pub fn new() -> Self {
        let mut filter = Self {
            extension_map: HashMap::new(),
        };
        for (suffix, kind) in MEDIA_EXTENSIONS {
            filter.extension_map.insert(suffix.to_string(), *kind);
        }
        filter
    }

    /// Returns the media kind of `path`, or `None` when it is not a media file.
    ///
    /// Every allowlisted suffix is a single `.ext` component, so comparing the
    /// text after the last dot of the lowercased name is the same as a suffix
    /// match on the whole path.
    pub fn classify(&self, path: &Path) -> Option<MediaKind> {
        let name = path.file_name()?.to_string_lossy().to_lowercase();
        let dot = name.rfind('.')?;
        self.extension_map.get(&name[dot..]).copied()
    }

    /// Whether `path` ends with an allowlisted extension.
    pub fn is_media(&self, path: &Path) -> bool {
        self.classify(path).is_some()
    }

    /// Number of recognized extensions.
    pub fn len(&self) -> usize {
        self.extension_map.len()
    }

    /// Whether the filter recognizes nothing.
    pub fn is_empty(&self) -> bool {
        self.extension_map.is_empty()
    }
}

impl Default for MediaFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_standard_extensions_recognized() {
        let filter = MediaFilter::default();
        assert_eq!(filter.len(), 11);
        for (suffix, kind) in MEDIA_EXTENSIONS {
            let name = format!("file{}", suffix);
            assert_eq!(filter.classify(Path::new(&name)), Some(*kind), "{}", name);
        }
    }

    #[test]
    fn test_classify_case_insensitive() {
        let filter = MediaFilter::default();
        assert_eq!(
            filter.classify(Path::new("photo.JPG")),
            Some(MediaKind::Image)
        );
        assert_eq!(
            filter.classify(Path::new("Photo.JpEg")),
            Some(MediaKind::Image)
        );
        assert_eq!(
            filter.classify(Path::new("MOVIE.MP4")),
            Some(MediaKind::Video)
        );
    }

    #[test]
    fn test_non_media_rejected() {
        let filter = MediaFilter::default();
        assert!(!filter.is_media(Path::new("notes.txt")));
        assert!(!filter.is_media(Path::new("archive.zip")));
        assert!(!filter.is_media(Path::new("song.mp3")));
        assert!(!filter.is_media(Path::new("README")));
    }

    #[test]
    fn test_suffix_must_end_the_name() {
        let filter = MediaFilter::default();
        assert!(!filter.is_media(Path::new("photo.jpg.bak")));
        assert!(!filter.is_media(Path::new("photojpg")));
        assert!(!filter.is_media(Path::new("album.png/readme")));
    }

    #[test]
    fn test_dotfile_with_media_suffix() {
        let filter = MediaFilter::default();
        assert!(filter.is_media(Path::new(".jpg")));
        assert!(filter.is_media(Path::new("dir/.hidden.png")));
    }

    #[test]
    fn test_nested_paths() {
        let filter = MediaFilter::default();
        assert_eq!(
            filter.classify(Path::new("/home/user/camera/2019/clip.AVI")),
            Some(MediaKind::Video)
        );
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(MediaKind::Image.label(), "images");
        assert_eq!(MediaKind::Video.label(), "videos");
    }
}
