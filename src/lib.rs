//! DatasetTagger - image dataset labelling core
//!
//! Tracks the images found in a folder and an ordered registry of labels
//! with stable display indices and colors, for annotating images before
//! training a classifier.

pub mod color_utils;
pub mod config;
pub mod constants;
pub mod model;
pub mod shell;
pub mod state;
pub mod viewer;

pub use model::{Example, LabelEntry};
pub use state::{DatasetIndex, LabelRegistry, ModelChange, Session, SessionError, SessionObserver};
