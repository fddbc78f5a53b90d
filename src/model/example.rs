//! Example record: one discovered image and where it lives.

use std::path::{Component, Path, PathBuf};

use crate::constants::SAME_FOLDER;

/// A single image of the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// File base name, unique within the dataset
    pub file_name: String,
    /// Root folder for relative paths (empty when none is configured)
    pub base_path: PathBuf,
    /// Folder that was scanned
    pub img_folder_path: PathBuf,
    /// `img_folder_path` relative to `base_path`, or the normalized
    /// `img_folder_path` when not nested
    pub rel_folder_path: PathBuf,
}

impl Example {
    /// Create an example for `file_name` found in `img_folder` while `base_folder` is the relative root.
    pub fn new(file_name: &str, base_folder: &Path, img_folder: &Path) -> Self {
        let base_path = normalize_folder(base_folder);
        let img_folder_path = normalize_folder(img_folder);
        let rel_folder_path = relative_folder(&base_path, &img_folder_path);

        Self {
            file_name: file_name.to_string(),
            base_path,
            img_folder_path,
            rel_folder_path,
        }
    }

    /// Whether the scanned folder sits under the base folder.
    pub fn is_nested(&self) -> bool {
        if self.base_path.as_os_str().is_empty() {
            return false;
        }
        if self.base_path.as_os_str() == SAME_FOLDER {
            return self.img_folder_path.is_relative();
        }
        self.img_folder_path.starts_with(&self.base_path)
    }

    /// Folder path followed by exactly one separator and the file name.
    pub fn full_path(&self) -> PathBuf {
        self.img_folder_path.join(&self.file_name)
    }

    /// Path of the image relative to the base folder (absolute when not nested).
    pub fn relative_path(&self) -> PathBuf {
        if self.rel_folder_path.as_os_str() == SAME_FOLDER {
            PathBuf::from(&self.file_name)
        } else {
            self.rel_folder_path.join(&self.file_name)
        }
    }
}

/// Lexically normalize a folder path.
///
/// Drops trailing and repeated separators and `.` components. Symlinks and
/// `..` are left alone, nothing touches the filesystem.
pub fn normalize_folder(path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() {
        return PathBuf::new();
    }

    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if normalized.as_os_str().is_empty() {
        PathBuf::from(SAME_FOLDER)
    } else {
        normalized
    }
}

/// Both inputs are already normalized, so a non-nested result is the
/// normalized image folder rather than the raw string the user picked.
fn relative_folder(base: &Path, img_folder: &Path) -> PathBuf {
    if base.as_os_str().is_empty() {
        return img_folder.to_path_buf();
    }

    // "." lost its component during normalization: any relative folder is under it
    if base.as_os_str() == SAME_FOLDER && img_folder.is_relative() {
        return img_folder.to_path_buf();
    }

    match img_folder.strip_prefix(base) {
        Ok(rel) if rel.as_os_str().is_empty() => PathBuf::from(SAME_FOLDER),
        Ok(rel) => rel.to_path_buf(),
        Err(_) => img_folder.to_path_buf(),
    }
}
