//! Image loading for the viewport.
//!
//! The session only hands out paths. This module turns a resolved path into
//! pixels and computes how the image fits into a viewport.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while loading an image for display.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a decodable image
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// A decoded image ready to be shown.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// RGBA8 pixel data, row-major
    pub pixels: image::RgbaImage,
    pub width: u32,
    pub height: u32,
}

/// Decode the image at `path`.
///
/// On error the caller keeps whatever the viewport showed before.
pub fn load_image(path: &Path) -> Result<LoadedImage, ViewerError> {
    let bytes = std::fs::read(path)?;
    let pixels = image::load_from_memory(&bytes)?.to_rgba8();
    let (width, height) = pixels.dimensions();

    log::trace!("Loaded {}x{} image from {:?}", width, height, path);

    Ok(LoadedImage {
        pixels,
        width,
        height,
    })
}

/// Scale that fits a `width`x`height` image into the viewport keeping its aspect ratio.
pub fn fit_scale(width: u32, height: u32, viewport_width: f32, viewport_height: f32) -> f32 {
    if width == 0 || height == 0 {
        return 1.0;
    }
    let sx = viewport_width / width as f32;
    let sy = viewport_height / height as f32;
    sx.min(sy)
}
