//! Color-space conversions on 8-bit RGB views.
//!
//! - `rgb_to_gray`: luminance with the BT.601 weights in 14-bit fixed point,
//!   so results are bit-exact and rounded to nearest.
//! - `rgb_to_hls`: hue/lightness/saturation planes using the common 8-bit
//!   packing (hue halved into `[0, 180]`, L and S scaled to `[0, 255]`).
use crate::image::{GrayImageU8, ImageRgb8, ImageView, Rgb8};

const GRAY_SHIFT: u32 = 14;
const GRAY_R: u32 = 4899; // 0.299 * 2^14
const GRAY_G: u32 = 9617; // 0.587 * 2^14
const GRAY_B: u32 = 1868; // 0.114 * 2^14

#[inline]
pub fn gray_pixel([r, g, b]: Rgb8) -> u8 {
    let acc = GRAY_R * r as u32 + GRAY_G * g as u32 + GRAY_B * b as u32;
    ((acc + (1 << (GRAY_SHIFT - 1))) >> GRAY_SHIFT) as u8
}

/// Convert an RGB view into a same-size grayscale buffer.
pub fn rgb_to_gray(src: &ImageRgb8<'_>) -> GrayImageU8 {
    let mut out = GrayImageU8::zeros(src.w, src.h);
    let w = src.w;
    let dst = out.data_mut();
    for (y, row) in src.rows().enumerate() {
        for (d, &px) in dst[y * w..(y + 1) * w].iter_mut().zip(row) {
            *d = gray_pixel(px);
        }
    }
    out
}

/// Separate H, L and S planes, each the size of the source.
#[derive(Clone, Debug)]
pub struct HlsImage {
    /// Hue in degrees halved, `[0, 180]`.
    pub h: GrayImageU8,
    /// Lightness, `[0, 255]`.
    pub l: GrayImageU8,
    /// Saturation, `[0, 255]`.
    pub s: GrayImageU8,
}

/// HLS triple for one RGB pixel, packed as `[h/2, l*255, s*255]`.
pub fn hls_pixel([r, g, b]: Rgb8) -> [u8; 3] {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let vmax = r.max(g).max(b);
    let vmin = r.min(g).min(b);
    let diff = vmax - vmin;
    let l = (vmax + vmin) * 0.5;

    let (h, s) = if diff > f32::EPSILON {
        let s = if l < 0.5 {
            diff / (vmax + vmin)
        } else {
            diff / (2.0 - vmax - vmin)
        };
        let scale = 60.0 / diff;
        let mut h = if vmax == r {
            (g - b) * scale
        } else if vmax == g {
            (b - r) * scale + 120.0
        } else {
            (r - g) * scale + 240.0
        };
        if h < 0.0 {
            h += 360.0;
        }
        (h, s)
    } else {
        (0.0, 0.0)
    };

    [
        saturate_u8(h * 0.5),
        saturate_u8(l * 255.0),
        saturate_u8(s * 255.0),
    ]
}

/// Convert an RGB view into HLS planes.
pub fn rgb_to_hls(src: &ImageRgb8<'_>) -> HlsImage {
    let (w, h) = src.dims();
    let mut planes = [
        GrayImageU8::zeros(w, h),
        GrayImageU8::zeros(w, h),
        GrayImageU8::zeros(w, h),
    ];
    for (y, row) in src.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let hls = hls_pixel(px);
            let i = y * w + x;
            for (plane, v) in planes.iter_mut().zip(hls) {
                plane.data_mut()[i] = v;
            }
        }
    }
    let [h, l, s] = planes;
    HlsImage { h, l, s }
}

#[inline]
fn saturate_u8(v: f32) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}
