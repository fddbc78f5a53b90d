//! Global constants for the DatasetTagger application

/// Image extensions picked up when scanning an image folder (matched case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Width of the zero-padded index column in the label table
pub const INDEX_WIDTH: usize = 3;

/// Prefix for label names generated when the user leaves the name empty
pub const AUTO_LABEL_PREFIX: &str = "Label_";

/// Relative folder path used when the image folder is the base folder itself
pub const SAME_FOLDER: &str = ".";

/// Viewport size (width, height) used when fitting an image for display
pub const VIEWPORT_SIZE: (f32, f32) = (800.0, 600.0);
