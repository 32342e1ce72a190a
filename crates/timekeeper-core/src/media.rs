use std::path::{Path, PathBuf};

/// Extensions (lowercase, without the dot) treated as photos or videos.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "tiff", "tif", "raw", "cr2", "nef", "arw", "dng", // images
    "mp4", "mov", "avi", "mkv", "wmv", "m4v", "3gp", "webm", // videos
];

/// Case-insensitive extension check against [`SUPPORTED_EXTENSIONS`].
pub fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Source location on disk
    pub path: PathBuf,
    /// Just the filename
    pub filename: String,
}

impl MediaFile {
    pub fn new(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, filename }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_media_file(Path::new("/a/IMG_0001.JPG")));
        assert!(is_media_file(Path::new("clip.Mov")));
        assert!(is_media_file(Path::new("raw/DSC_1.nef")));
        assert!(is_media_file(Path::new("phone.3gp")));
        assert!(!is_media_file(Path::new("notes.txt")));
        assert!(!is_media_file(Path::new("IMG_0001.jpg.json")));
        assert!(!is_media_file(Path::new("jpg")));
        assert!(!is_media_file(Path::new(".jpg")));
    }

    #[test]
    fn test_media_file_name() {
        let m = MediaFile::new(PathBuf::from("/photos/2023/beach.heic"));
        assert_eq!(m.filename, "beach.heic");
    }
}
