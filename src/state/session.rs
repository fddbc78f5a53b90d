//! Tagging session: owns the dataset index and the label registry.
//!
//! Every user action goes through a [`Session`] method. Successful mutations
//! are announced to subscribed [`SessionObserver`]s so the view layer can
//! re-render; failed ones leave the state as it was and announce nothing.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::dataset::{DatasetIndex, IndexError};
use super::labels::{LabelError, LabelRegistry};
use crate::model::{LabelEntry, normalize_folder};

/// Errors returned by session operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Label(#[from] LabelError),
}

/// What changed in the session model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelChange {
    /// Base folder was set or cleared
    BaseFolderChanged,
    /// Dataset index was rebuilt from a new image folder
    DatasetRebuilt { image_count: usize },
    /// An image became the current one
    ImageSelected { name: String },
    /// A label was appended at `position`
    LabelAdded { position: usize },
    /// The label at `position` was removed and later rows renumbered
    LabelRemoved { position: usize },
    /// The label at `position` got a new name
    LabelRenamed { position: usize },
}

/// Receives a notification after each successful session mutation.
pub trait SessionObserver {
    fn model_changed(&mut self, change: &ModelChange);
}

impl<F: FnMut(&ModelChange)> SessionObserver for F {
    fn model_changed(&mut self, change: &ModelChange) {
        self(change)
    }
}

/// State of one tagging session.
#[derive(Default)]
pub struct Session {
    /// Root for relative paths (empty when not chosen yet)
    base_folder: PathBuf,
    /// Last selected image folder (empty when not chosen yet)
    image_folder: PathBuf,
    dataset: DatasetIndex,
    labels: LabelRegistry,
    /// Name of the image shown in the viewport
    current_image: Option<String>,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for model changes.
    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, change: ModelChange) {
        for observer in &mut self.observers {
            observer.model_changed(&change);
        }
    }

    // ------------------------------------------------------------------------
    // Folders and images
    // ------------------------------------------------------------------------

    /// Set the root folder for relative paths. An empty path clears it.
    pub fn select_base_folder(&mut self, folder: &Path) {
        self.base_folder = normalize_folder(folder);
        if self.base_folder.as_os_str().is_empty() {
            log::info!("Base folder cleared");
        } else {
            log::info!("Base folder set to {:?}", self.base_folder);
        }
        self.notify(ModelChange::BaseFolderChanged);
    }

    /// Whether picking an image folder makes sense yet (a base folder is set).
    pub fn image_folder_enabled(&self) -> bool {
        !self.base_folder.as_os_str().is_empty()
    }

    /// Select a new image folder and rebuild the dataset index from it.
    ///
    /// Clears the current image. Returns the new list of file names.
    pub fn select_image_folder(&mut self, folder: &Path) -> Result<&[String], SessionError> {
        let image_count = self.dataset.rebuild(&self.base_folder, folder)?.len();

        self.image_folder = normalize_folder(folder);
        self.current_image = None;
        self.notify(ModelChange::DatasetRebuilt { image_count });

        Ok(self.dataset.file_names())
    }

    /// Make `name` the current image and return its full path.
    ///
    /// Fails for names not in the current index; the selection is unchanged.
    pub fn select_image(&mut self, name: &str) -> Result<PathBuf, SessionError> {
        let path = self.dataset.resolve_full_path(name)?;

        self.current_image = Some(name.to_string());
        self.notify(ModelChange::ImageSelected {
            name: name.to_string(),
        });

        Ok(path)
    }

    pub fn base_folder(&self) -> &Path {
        &self.base_folder
    }

    pub fn image_folder(&self) -> &Path {
        &self.image_folder
    }

    pub fn current_image(&self) -> Option<&str> {
        self.current_image.as_deref()
    }

    /// Full path of the current image, if it is still indexed.
    pub fn current_image_path(&self) -> Option<PathBuf> {
        let name = self.current_image.as_deref()?;
        self.dataset.resolve_full_path(name).ok()
    }

    pub fn dataset(&self) -> &DatasetIndex {
        &self.dataset
    }

    // ------------------------------------------------------------------------
    // Labels
    // ------------------------------------------------------------------------

    /// Append a label; an empty name gets a generated placeholder.
    pub fn add_label(&mut self, requested_name: &str) -> &LabelEntry {
        let position = self.labels.add_label(requested_name).index();
        self.notify(ModelChange::LabelAdded { position });
        &self.labels.labels()[position]
    }

    /// Remove the selected label row.
    pub fn remove_label(&mut self, position: Option<usize>) -> Result<LabelEntry, SessionError> {
        let removed = self.labels.remove_label(position)?;
        self.notify(ModelChange::LabelRemoved {
            position: removed.index(),
        });
        Ok(removed)
    }

    /// Rename the label at `position`, as done by editing the name cell.
    pub fn rename_label(&mut self, position: usize, name: &str) -> Result<&LabelEntry, SessionError> {
        self.labels.rename_label(position, name)?;
        self.notify(ModelChange::LabelRenamed { position });
        Ok(&self.labels.labels()[position])
    }

    pub fn labels(&self) -> &LabelRegistry {
        &self.labels
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_folder", &self.base_folder)
            .field("image_folder", &self.image_folder)
            .field("images", &self.dataset.len())
            .field("labels", &self.labels.len())
            .field("current_image", &self.current_image)
            .field("observers", &self.observers.len())
            .finish()
    }
}
