//! Dataset index: the images discovered in the selected image folder.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::IMAGE_EXTENSIONS;
use crate::model::{Example, normalize_folder};

/// Errors reported by the dataset index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// No image folder was given, the index was left as it was
    #[error("No image folder selected")]
    NoImageFolder,

    /// The name is not part of the current index (stale selection)
    #[error("Image not in dataset: {name}")]
    UnknownImage {
        /// The name that was looked up
        name: String,
    },
}

impl IndexError {
    /// Create an unknown image error.
    pub fn unknown_image(name: impl Into<String>) -> Self {
        Self::UnknownImage { name: name.into() }
    }
}

/// Check if a file name has a supported image extension (case-insensitive).
pub fn is_image_filename(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Mapping from image file name to its [`Example`] record.
///
/// Rebuilt wholesale on every image folder selection.
#[derive(Debug, Clone, Default)]
pub struct DatasetIndex {
    /// Folder the current index was built from (empty before the first rebuild)
    folder: PathBuf,
    /// File names in display order
    file_names: Vec<String>,
    examples: HashMap<String, Example>,
}

impl DatasetIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `image_folder` and replace the whole index with what was found.
    ///
    /// Only visible regular files (no symlinks, no dotfiles) with a
    /// jpg/jpeg/png extension are kept, sorted by name in byte order, so
    /// `A.JPG` sorts before `a.jpg`.
    /// An empty `image_folder` is rejected without touching the index. A
    /// folder that cannot be listed yields an empty index.
    pub fn rebuild(
        &mut self,
        base_folder: &Path,
        image_folder: &Path,
    ) -> Result<&[String], IndexError> {
        if image_folder.as_os_str().is_empty() {
            return Err(IndexError::NoImageFolder);
        }

        let folder = normalize_folder(image_folder);
        let file_names = match scan_image_files(&folder) {
            Ok(names) => names,
            Err(e) => {
                log::warn!("Failed to read image folder {:?}: {}", folder, e);
                Vec::new()
            }
        };

        self.examples = file_names
            .iter()
            .map(|name| (name.clone(), Example::new(name, base_folder, &folder)))
            .collect();
        self.file_names = file_names;
        self.folder = folder;

        log::info!(
            "Indexed image folder {:?}: {} images",
            self.folder,
            self.file_names.len()
        );

        Ok(&self.file_names)
    }

    /// Full path of an indexed image.
    ///
    /// Fails for names not produced by the most recent rebuild; callers treat
    /// that as a stale selection.
    pub fn resolve_full_path(&self, file_name: &str) -> Result<PathBuf, IndexError> {
        self.examples
            .get(file_name)
            .map(Example::full_path)
            .ok_or_else(|| IndexError::unknown_image(file_name))
    }

    /// File names in display order.
    pub fn file_names(&self) -> &[String] {
        &self.file_names
    }

    pub fn get(&self, file_name: &str) -> Option<&Example> {
        self.examples.get(file_name)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.examples.contains_key(file_name)
    }

    /// Examples in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Example> {
        self.file_names
            .iter()
            .filter_map(|name| self.examples.get(name))
    }

    pub fn len(&self) -> usize {
        self.file_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file_names.is_empty()
    }

    /// Folder of the current index.
    pub fn folder(&self) -> &Path {
        &self.folder
    }
}

/// List image file names directly inside `folder`, sorted.
fn scan_image_files(folder: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in std::fs::read_dir(folder)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Skipping unreadable entry in {:?}: {}", folder, e);
                continue;
            }
        };

        // file_type() does not follow symlinks
        let is_regular_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_regular_file {
            continue;
        }

        match entry.file_name().into_string() {
            // Dotfiles are hidden, e.g. macOS `._photo.jpg` resource forks
            Ok(name) if name.starts_with('.') => {}
            Ok(name) if is_image_filename(&name) => names.push(name),
            Ok(_) => {}
            Err(raw) => log::debug!("Skipping non UTF-8 file name {:?}", raw),
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").expect("Failed to create file");
    }

    #[test]
    fn test_is_image_filename() {
        assert!(is_image_filename("a.jpg"));
        assert!(is_image_filename("A.JPEG"));
        assert!(is_image_filename("photo.PnG"));
        assert!(!is_image_filename("notes.txt"));
        assert!(!is_image_filename("image.bmp"));
        assert!(!is_image_filename("jpg"));
    }

    #[test]
    fn test_rebuild_sorts_and_filters() {
        let base = tempfile::tempdir().unwrap();
        let images = base.path().join("images");
        fs::create_dir(&images).unwrap();
        touch(&images, "b.png");
        touch(&images, "A.JPG");
        touch(&images, "a.jpg");
        touch(&images, "readme.txt");
        fs::create_dir(images.join("nested.png")).unwrap();

        let mut index = DatasetIndex::new();
        let names = index.rebuild(base.path(), &images).unwrap().to_vec();

        assert_eq!(names, vec!["A.JPG", "a.jpg", "b.png"]);
        assert_eq!(index.len(), 3);
        for example in index.iter() {
            assert_eq!(example.rel_folder_path, PathBuf::from("images"));
        }
    }

    #[test]
    fn test_resolve_full_path() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "cat.jpeg");

        let mut index = DatasetIndex::new();
        index.rebuild(Path::new(""), dir.path()).unwrap();

        assert_eq!(
            index.resolve_full_path("cat.jpeg").unwrap(),
            dir.path().join("cat.jpeg")
        );
        assert_eq!(
            index.resolve_full_path("dog.jpeg"),
            Err(IndexError::unknown_image("dog.jpeg"))
        );
    }

    #[test]
    fn test_rebuild_replaces_previous_entries() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        touch(first.path(), "one.png");
        touch(second.path(), "two.png");

        let mut index = DatasetIndex::new();
        index.rebuild(Path::new(""), first.path()).unwrap();
        assert!(index.resolve_full_path("one.png").is_ok());

        index.rebuild(Path::new(""), second.path()).unwrap();
        assert!(index.resolve_full_path("one.png").is_err());
        assert!(!index.contains("one.png"));
        assert_eq!(index.file_names(), ["two.png".to_string()]);
    }

    #[test]
    fn test_empty_image_folder_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "keep.jpg");

        let mut index = DatasetIndex::new();
        index.rebuild(Path::new(""), dir.path()).unwrap();

        assert_eq!(
            index.rebuild(Path::new(""), Path::new("")),
            Err(IndexError::NoImageFolder)
        );
        assert!(index.contains("keep.jpg"));
    }

    #[test]
    fn test_unreadable_folder_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "keep.jpg");

        let mut index = DatasetIndex::new();
        index.rebuild(Path::new(""), dir.path()).unwrap();

        let missing = dir.path().join("does-not-exist");
        let names = index.rebuild(Path::new(""), &missing).unwrap();
        assert!(names.is_empty());
        assert!(index.is_empty());
        assert!(!index.contains("keep.jpg"));

        // A plain file is not a directory either
        let file = dir.path().join("keep.jpg");
        assert!(index.rebuild(Path::new(""), &file).unwrap().is_empty());
    }

    #[test]
    fn test_unrelated_base_keeps_absolute_folder() {
        let base = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        touch(other.path(), "x.png");

        let mut index = DatasetIndex::new();
        index.rebuild(base.path(), other.path()).unwrap();

        let example = index.get("x.png").unwrap();
        assert_eq!(example.rel_folder_path, other.path());
        assert_eq!(example.base_path, base.path());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_excluded() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "real.png");
        std::os::unix::fs::symlink(dir.path().join("real.png"), dir.path().join("link.png"))
            .unwrap();

        let mut index = DatasetIndex::new();
        let names = index.rebuild(Path::new(""), dir.path()).unwrap();
        assert_eq!(names, ["real.png".to_string()]);
    }

    #[test]
    fn test_hidden_files_are_excluded() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.jpg");
        touch(dir.path(), ".hidden.jpg");
        touch(dir.path(), "._a.jpg");
        touch(dir.path(), ".png");

        let mut index = DatasetIndex::new();
        let names = index.rebuild(Path::new(""), dir.path()).unwrap();
        assert_eq!(names, ["a.jpg".to_string()]);
        assert!(index.resolve_full_path("._a.jpg").is_err());
    }
}
