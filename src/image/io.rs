//! I/O helpers for color images and masks.
//!
//! - `load_rgb_image`: read a PNG/JPEG into an owned 8-bit RGB buffer.
//! - `save_mask_png`: write a `BinaryMask` as a 0/255 grayscale PNG.
//! - `save_grayscale_u8`: write an owned 8-bit gray buffer to a PNG.
use super::{BinaryMask, GrayImageU8, ImageView, RgbImageU8};
use crate::error::{Error, Result};
use image::{GrayImage, Luma};
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbImageU8> {
    let img = image::open(path)
        .map_err(|source| Error::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    RgbImageU8::from_raw(width, height, img.as_raw()).ok_or_else(|| Error::Format {
        path: path.to_path_buf(),
        reason: "decoded buffer does not match image dimensions".to_string(),
    })
}

/// Save a binary mask to a grayscale PNG, mapping 1 to 255.
pub fn save_mask_png(mask: &BinaryMask, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.width() as u32, mask.height() as u32);
    for (y, row) in mask.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Luma([v.saturating_mul(255)]));
        }
    }
    out.save(path).map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}

/// Save an 8-bit grayscale buffer to a PNG.
pub fn save_grayscale_u8(buffer: &GrayImageU8, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let image = GrayImage::from_raw(
        buffer.width() as u32,
        buffer.height() as u32,
        buffer.data().to_vec(),
    )
    .ok_or_else(|| Error::Format {
        path: path.to_path_buf(),
        reason: "buffer length does not match dimensions".to_string(),
    })?;
    image.save(path).map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
