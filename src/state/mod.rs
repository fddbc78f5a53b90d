//! Application state management modules.

mod dataset;
mod labels;
mod session;

pub use dataset::{DatasetIndex, IndexError, is_image_filename};
pub use labels::{LabelError, LabelRegistry};
pub use session::{ModelChange, Session, SessionError, SessionObserver};
