//! Binary masks from gradient and color thresholds.
//!
//! Every function borrows an RGB view and returns a `BinaryMask` with the
//! same width and height. Gradient-based masks share one path:
//! grayscale → Sobel (`edges::grad`) → optional 8-bit rescale → predicate.
//!
//! Range conventions differ on purpose:
//! - gradient masks keep pixels with `low <= v <= high`;
//! - `color_thresh` keeps pixels with `low < s <= high`.
use crate::color::{rgb_to_gray, rgb_to_hls};
use crate::edges::{sobel, sobel_gradients, Orientation};
use crate::error::Result;
use crate::image::{BinaryMask, GrayImageU8, ImageF32, ImageRgb8, ImageView};
use log::debug;

/// Mask of pixels whose rescaled absolute derivative along `orientation`
/// lies in `[thresh.0, thresh.1]`.
pub fn abs_sobel_thresh(
    image: &ImageRgb8<'_>,
    orientation: Orientation,
    kernel_size: usize,
    thresh: (u8, u8),
) -> Result<BinaryMask> {
    let gray = gray_f32(image);
    let abs_sobel = sobel(&gray, orientation, kernel_size)?.map(f32::abs);
    let scaled = rescale_to_u8(&abs_sobel);
    Ok(inclusive_u8(&scaled, thresh))
}

/// Mask of pixels whose rescaled gradient magnitude lies in `[thresh.0, thresh.1]`.
pub fn mag_thresh(
    image: &ImageRgb8<'_>,
    kernel_size: usize,
    thresh: (u8, u8),
) -> Result<BinaryMask> {
    let grad = sobel_gradients(&gray_f32(image), kernel_size)?;
    let scaled = rescale_to_u8(&grad.magnitude());
    Ok(inclusive_u8(&scaled, thresh))
}

/// Mask of pixels whose folded gradient direction `atan2(|gy|, |gx|)`
/// (radians, `[0, π/2]`) lies in `[thresh.0, thresh.1]`.
///
/// Flat regions have direction 0.
pub fn dir_thresh(
    image: &ImageRgb8<'_>,
    kernel_size: usize,
    thresh: (f32, f32),
) -> Result<BinaryMask> {
    let grad = sobel_gradients(&gray_f32(image), kernel_size)?;
    let (low, high) = thresh;
    Ok(BinaryMask::from_predicate(&grad.abs_direction(), |d| {
        d >= low && d <= high
    }))
}

/// Mask of pixels whose HLS saturation `s` satisfies `low < s <= high`.
pub fn color_thresh(image: &ImageRgb8<'_>, s_thresh: (u8, u8)) -> BinaryMask {
    let (low, high) = s_thresh;
    let hls = rgb_to_hls(image);
    BinaryMask::from_predicate(&hls.s.as_view(), |s| s > low && s <= high)
}

/// Scale a non-negative map so its maximum becomes 255, truncating to `u8`.
///
/// A map whose maximum is zero (no gradient anywhere) rescales to all zeros.
pub fn rescale_to_u8(map: &ImageF32) -> GrayImageU8 {
    let mut out = GrayImageU8::zeros(map.w, map.h);
    let max = map.max_value();
    if max <= 0.0 {
        debug!(
            "rescale_to_u8: flat {}x{} map, emitting zeros",
            map.w, map.h
        );
        return out;
    }
    let max = max as f64;
    let w = map.w;
    let dst = out.data_mut();
    for (y, row) in map.rows().enumerate() {
        for (d, &v) in dst[y * w..(y + 1) * w].iter_mut().zip(row) {
            *d = (255.0 * v as f64 / max) as u8;
        }
    }
    out
}

fn gray_f32(image: &ImageRgb8<'_>) -> ImageF32 {
    ImageF32::from_u8(&rgb_to_gray(image).as_view())
}

fn inclusive_u8(scaled: &GrayImageU8, (low, high): (u8, u8)) -> BinaryMask {
    BinaryMask::from_predicate(&scaled.as_view(), |v| v >= low && v <= high)
}
