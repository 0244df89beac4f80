//! Image I/O

use crate::error::*;
use image::{ImageFormat, RgbaImage};
use std::path::Path;

/// Write an image to the given path as PNG.
///
/// * `path`  - Output file path.
/// * `image` - The image.
pub fn write_png(path: &Path, image: &RgbaImage) -> Result<(), DiagramError> {
    info!(
        "Writing image {} with resolution {}x{}",
        path.display(),
        image.width(),
        image.height()
    );

    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| DiagramError::Save {
            path: path.to_path_buf(),
            source,
        })
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
