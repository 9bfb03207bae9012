//! Media file classification.

use std::path::{Path, PathBuf};

/// Extensions accepted by the pipeline. Matching is case-sensitive.
pub const MEDIA_EXTENSIONS: [&str; 10] = [
    "mp3", "wav", "m4a", "aac", "ogg", "flac", "mp4", "mov", "avi", "mkv",
];

/// Whether the path points at a media file, by extension allowlist only.
/// Pure: no filesystem access.
pub fn is_media_file(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => MEDIA_EXTENSIONS.contains(&ext),
        None => false,
    }
}

/// A media file discovered by one pipeline pass. Ephemeral: built when the
/// file is seen, dropped once the file has been processed.
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Path the file was discovered at
    pub path: PathBuf,
}

impl MediaFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Extension of the source file, if it has one.
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|ext| ext.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowlisted_extensions_are_media() {
        for ext in MEDIA_EXTENSIONS {
            let path = PathBuf::from(format!("/watched/recording.{}", ext));
            assert!(is_media_file(&path), "expected {:?} to be media", path);
        }
    }

    #[test]
    fn test_other_extensions_are_not_media() {
        assert!(!is_media_file(Path::new("/watched/notes.txt")));
        assert!(!is_media_file(Path::new("/watched/cover.jpg")));
        assert!(!is_media_file(Path::new("/watched/README")));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!is_media_file(Path::new("/watched/RECORDING.MP3")));
        assert!(is_media_file(Path::new("/watched/recording.mp3")));
    }

    #[test]
    fn test_media_file_extension() {
        let file = MediaFile::new(PathBuf::from("/watched/song.wav"));
        assert_eq!(file.extension(), Some("wav"));
    }
}
