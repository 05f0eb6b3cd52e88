//! File entries queued for upload
//!
//! A [`DataFile`] ties a local file to its target location inside the
//! remote dataset. Entries are created one by one or by ingesting a whole
//! directory tree, and receive their remote file id once the transfer
//! succeeded.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::DataverseError;

/// A local file queued for upload to a dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataFile {
    /// The filename relative to the ingestion root (may contain
    /// directory components)
    pub filename: String,

    /// Where the file content currently lives on disk. Entries without a
    /// local path are skipped during transfers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,

    /// The directory label the file is stored under in the dataset
    #[serde(default)]
    pub dv_dir: String,

    /// A free-text description of the file
    #[serde(default)]
    pub description: String,

    /// The remote file id, set after the first successful transfer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<i64>,
}

// Identity for duplicate detection covers everything except the remote
// file id.
impl PartialEq for DataFile {
    fn eq(&self, other: &Self) -> bool {
        self.filename == other.filename
            && self.local_path == other.local_path
            && self.dv_dir == other.dv_dir
            && self.description == other.description
    }
}

impl DataFile {
    /// Creates an entry for a single local file, using its basename as
    /// the filename.
    pub fn from_path(
        local_path: impl Into<PathBuf>,
        dv_dir: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let local_path = local_path.into();
        let filename = local_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        DataFile {
            filename,
            local_path: Some(local_path),
            dv_dir: dv_dir.into(),
            description: description.into(),
            file_id: None,
        }
    }
}

/// Walks a directory tree and builds the entries it contributes.
///
/// Filtering rules:
/// - a directory component beginning with `.` hides its entire subtree
///   unless `include_hidden` is set,
/// - a component containing one of the `ignores` substrings is skipped
///   regardless of `include_hidden`,
/// - files beginning with `.` are always skipped.
///
/// For each retained file, `filename` is its path relative to `root` and
/// `dv_dir` is `dv_dir` joined with the file's parent relative to `root`.
/// The walk is sorted, so results are deterministic.
pub(crate) fn collect_directory(
    root: &Path,
    dv_dir: &str,
    include_hidden: bool,
    ignores: &[String],
) -> Result<Vec<DataFile>, DataverseError> {
    if !root.is_dir() {
        return Err(DataverseError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path().to_path_buf();
        let relative = match path.strip_prefix(root) {
            Ok(relative) => relative,
            Err(_) => continue,
        };

        if !retain(relative, include_hidden, ignores) {
            continue;
        }

        files.push(DataFile {
            filename: relative.to_string_lossy().into_owned(),
            local_path: Some(path.clone()),
            dv_dir: remote_directory(dv_dir, relative),
            description: String::new(),
            file_id: None,
        });
    }

    Ok(files)
}

fn retain(relative: &Path, include_hidden: bool, ignores: &[String]) -> bool {
    let components: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let Some((filename, directories)) = components.split_last() else {
        return false;
    };

    // Hidden files are never picked up
    if filename.starts_with('.') {
        return false;
    }

    if !include_hidden && directories.iter().any(|dir| dir.starts_with('.')) {
        return false;
    }

    // Ignore patterns apply to every component and override include_hidden
    !components.iter().any(|component| {
        ignores
            .iter()
            .filter(|pattern| !pattern.is_empty())
            .any(|pattern| component.contains(&pattern.replace('/', "")))
    })
}

fn remote_directory(dv_dir: &str, relative: &Path) -> String {
    match relative.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        Some(parent) => Path::new(dv_dir).join(parent).to_string_lossy().into_owned(),
        None => dv_dir.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn create_tree(root: &Path) {
        fs::create_dir_all(root.join(".hidden")).unwrap();
        fs::create_dir_all(root.join("visible/nested")).unwrap();
        fs::write(root.join(".hidden/file.txt"), "hidden").unwrap();
        fs::write(root.join("visible/file.txt"), "visible").unwrap();
        fs::write(root.join("visible/nested/deep.txt"), "deep").unwrap();
        fs::write(root.join("visible/.dotfile"), "dot").unwrap();
        fs::write(root.join("top.txt"), "top").unwrap();
    }

    #[test]
    fn test_hidden_directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        create_tree(dir.path());

        let files = collect_directory(dir.path(), "", false, &[]).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();

        assert!(names.contains(&"visible/file.txt"));
        assert!(names.contains(&"visible/nested/deep.txt"));
        assert!(names.contains(&"top.txt"));
        assert!(!names.iter().any(|name| name.contains(".hidden")));
    }

    #[test]
    fn test_include_hidden_picks_up_hidden_directories() {
        let dir = tempfile::tempdir().unwrap();
        create_tree(dir.path());

        let files = collect_directory(dir.path(), "", true, &[]).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();

        assert!(names.contains(&".hidden/file.txt"));
    }

    #[test]
    fn test_ignore_patterns_override_include_hidden() {
        let dir = tempfile::tempdir().unwrap();
        create_tree(dir.path());

        let ignores = vec![".hidden".to_string()];
        let files = collect_directory(dir.path(), "", true, &ignores).unwrap();

        assert!(!files.iter().any(|f| f.filename.contains(".hidden")));
        assert!(files.iter().any(|f| f.filename == "visible/file.txt"));
    }

    #[test]
    fn test_hidden_files_are_always_skipped() {
        let dir = tempfile::tempdir().unwrap();
        create_tree(dir.path());

        let files = collect_directory(dir.path(), "", true, &[]).unwrap();
        assert!(!files.iter().any(|f| f.filename.ends_with(".dotfile")));
    }

    #[test]
    fn test_remote_directory_is_prefix_plus_relative_parent() {
        let dir = tempfile::tempdir().unwrap();
        create_tree(dir.path());

        let files = collect_directory(dir.path(), "data", false, &[]).unwrap();

        let top = files.iter().find(|f| f.filename == "top.txt").unwrap();
        assert_eq!(top.dv_dir, "data");

        let deep = files
            .iter()
            .find(|f| f.filename == "visible/nested/deep.txt")
            .unwrap();
        assert_eq!(deep.dv_dir, "data/visible/nested");
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = collect_directory(&missing, "", false, &[]);
        assert!(matches!(
            result,
            Err(DataverseError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_equality_ignores_file_id() {
        let mut a = DataFile::from_path("data/file.txt", "", "");
        let b = DataFile::from_path("data/file.txt", "", "");
        a.file_id = Some(42);

        assert_eq!(a, b);
    }

    #[test]
    fn test_from_path_uses_basename() {
        let file = DataFile::from_path("some/dir/file.txt", "data", "raw data");
        assert_eq!(file.filename, "file.txt");
        assert_eq!(file.dv_dir, "data");
        assert_eq!(file.description, "raw data");
    }
}
