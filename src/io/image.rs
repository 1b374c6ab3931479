//! PNG persistence for backdrop tiles and rendered frames

use crate::io::error::{Result, StimulusError};
use image::RgbaImage;
use std::path::Path;

/// Save an image as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn save_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| StimulusError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| StimulusError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Load a PNG as RGBA pixels
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_png(input_path: &Path) -> Result<RgbaImage> {
    let image = image::open(input_path).map_err(|e| StimulusError::ImageLoad {
        path: input_path.to_path_buf(),
        source: e,
    })?;
    Ok(image.into_rgba8())
}

/// Fraction of pixels that differ between two equally sized images
///
/// Returns `None` when the dimensions differ.
pub fn pixel_difference(a: &RgbaImage, b: &RgbaImage) -> Option<f64> {
    if a.dimensions() != b.dimensions() {
        return None;
    }
    let total = a.width() as usize * a.height() as usize;
    if total == 0 {
        return Some(0.0);
    }
    let differing = a
        .pixels()
        .zip(b.pixels())
        .filter(|(pa, pb)| pa != pb)
        .count();
    Some(differing as f64 / total as f64)
}
