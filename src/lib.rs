#![doc = include_str!("../README.md")]

pub mod calibration;
pub mod color;
pub mod config;
pub mod edges;
pub mod error;
pub mod image;
pub mod masks;
pub mod threshold;

// --- High-level re-exports -------------------------------------------------

pub use crate::calibration::Calibration;
pub use crate::config::MaskConfig;
pub use crate::edges::Orientation;
pub use crate::error::{Error, Result};
pub use crate::image::{BinaryMask, ImageRgb8, RgbImageU8};
pub use crate::masks::LaneMasks;
pub use crate::threshold::{abs_sobel_thresh, color_thresh, dir_thresh, mag_thresh};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use lane_masks::prelude::*;
///
/// let img = RgbImageU8::from_fn(8, 4, |x, _| if x < 4 { [0; 3] } else { [255; 3] });
/// let mask = abs_sobel_thresh(&img.as_view(), Orientation::X, 3, (20, 255)).unwrap();
/// assert_eq!(mask.count_ones(), 8);
/// ```
pub mod prelude {
    pub use crate::image::{BinaryMask, ImageRgb8, ImageView, RgbImageU8};
    pub use crate::{
        abs_sobel_thresh, color_thresh, dir_thresh, mag_thresh, Calibration, LaneMasks,
        MaskConfig, Orientation,
    };
}
