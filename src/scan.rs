use std::path::{Path, PathBuf};

use crate::error::Result;

/// Extensions recognized as video files, matched case-insensitively
pub const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "avi", "mov", "mkv", "flv"];

/// List video files in a directory.
///
/// Only regular files directly inside `dir` are considered; subdirectories
/// are not entered. Paths come back in the directory's native listing order,
/// unsorted.
pub fn scan_video_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        if has_video_extension(&path) {
            files.push(path);
        }
    }

    Ok(files)
}

fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.mp4"));
        touch(&dir.path().join("b.mov"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("thumb.png"));

        let mut found = scan_video_files(dir.path()).unwrap();
        found.sort();

        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.mp4", "b.mov"]);
    }

    #[test]
    fn test_scan_is_case_insensitive() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("UPPER.MP4"));
        touch(&dir.path().join("Mixed.MkV"));

        let found = scan_video_files(dir.path()).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_scan_ignores_subdirectories() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("nested.mp4");
        std::fs::create_dir(&sub).unwrap();
        touch(&sub.join("inner.mp4"));
        touch(&dir.path().join("top.mp4"));

        let found = scan_video_files(dir.path()).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("top.mp4"));
    }

    #[test]
    fn test_scan_missing_directory_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone");
        assert!(scan_video_files(&missing).is_err());
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempdir().unwrap();
        let found = scan_video_files(dir.path()).unwrap();
        assert!(found.is_empty());
    }
}
