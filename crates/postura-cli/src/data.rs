//! Image enumeration.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

/// List the files in `folder` whose name ends with `extension`
/// (case-insensitive), sorted by path.
///
/// A missing or unreadable folder yields an empty list and a warning.
pub fn get_data(folder: &Path, extension: &str) -> Vec<PathBuf> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(folder = %folder.display(), error = %e, "cannot read image folder");
            return Vec::new();
        }
    };

    let extension = extension.to_lowercase();
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name.to_string_lossy().to_lowercase().ends_with(&extension))
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_matching_files_case_insensitively() {
        let dir = tempfile::tempdir().expect("tmp dir");
        for name in ["b.jpeg", "a.JPEG", "c.png", "d.jpeg.json"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.jpeg")).unwrap();

        let files = get_data(dir.path(), ".jpeg");
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.JPEG", "b.jpeg"]);
    }

    #[test]
    fn missing_folder_is_empty() {
        let dir = tempfile::tempdir().expect("tmp dir");
        assert!(get_data(&dir.path().join("nope"), ".jpeg").is_empty());
    }
}
