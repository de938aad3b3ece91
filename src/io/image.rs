//! Tile image discovery, naming and decoding into RGB pixel grids

use crate::io::error::{ExtractionError, Result, WithPath};
use image::{ImageFormat, RgbImage};
use ndarray::Array3;
use std::path::{Path, PathBuf};

/// Decode an image file into a (row, col, channel) RGB grid, dropping any alpha
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_rgb_pixels(path: &Path) -> Result<Array3<u8>> {
    let img = image::open(path).map_err(|e| ExtractionError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(rgb_to_array(&img.to_rgb8()))
}

/// Copy an RGB image buffer into a (row, col, channel) array
pub fn rgb_to_array(img: &RgbImage) -> Array3<u8> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let mut pixels = Array3::zeros((height, width, 3));

    for (x, y, pixel) in img.enumerate_pixels() {
        for (c, &value) in pixel.0.iter().enumerate() {
            if let Some(slot) = pixels.get_mut((y as usize, x as usize, c)) {
                *slot = value;
            }
        }
    }

    pixels
}

/// Tile identifier encoded in a filename stem, e.g. `07.png` -> 7
pub fn parse_tile_id(path: &Path) -> Option<u32> {
    path.file_stem()?.to_str()?.parse().ok()
}

/// Whether the `image` crate recognizes the file's extension
pub fn is_image_file(path: &Path) -> bool {
    path.is_file() && ImageFormat::from_path(path).is_ok()
}

/// Image files directly inside `dir`, sorted by filename
///
/// # Errors
///
/// Returns an error if the directory cannot be read
pub fn list_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_path(dir, "read directory")? {
        let path = entry.with_path(dir, "read directory entry")?.path();
        if is_image_file(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Path of reference pattern `id` inside `dir`, named with two digits (`01.png`)
pub fn reference_image_path(dir: &Path, id: u8) -> PathBuf {
    dir.join(format!("{id:02}.png"))
}
