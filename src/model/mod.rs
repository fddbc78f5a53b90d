//! Data models for DatasetTagger.

mod example;
mod label;

pub use example::{Example, normalize_folder};
pub use label::LabelEntry;
