//! All lane masks for one frame, computed from a `MaskConfig`.
use crate::config::MaskConfig;
use crate::edges::Orientation;
use crate::error::Result;
use crate::image::{BinaryMask, ImageRgb8};
use crate::threshold::{abs_sobel_thresh, color_thresh, dir_thresh, mag_thresh};

/// The five masks a lane finder typically combines.
#[derive(Clone, Debug)]
pub struct LaneMasks {
    pub grad_x: BinaryMask,
    pub grad_y: BinaryMask,
    pub magnitude: BinaryMask,
    pub direction: BinaryMask,
    pub color: BinaryMask,
}

impl LaneMasks {
    pub fn compute(image: &ImageRgb8<'_>, config: &MaskConfig) -> Result<Self> {
        Ok(Self {
            grad_x: abs_sobel_thresh(
                image,
                Orientation::X,
                config.sobel_x.kernel_size,
                config.sobel_x.thresh,
            )?,
            grad_y: abs_sobel_thresh(
                image,
                Orientation::Y,
                config.sobel_y.kernel_size,
                config.sobel_y.thresh,
            )?,
            magnitude: mag_thresh(
                image,
                config.magnitude.kernel_size,
                config.magnitude.thresh,
            )?,
            direction: dir_thresh(
                image,
                config.direction.kernel_size,
                config.direction.thresh,
            )?,
            color: color_thresh(image, config.color.s_thresh),
        })
    }

    /// `(grad_x & grad_y) | (magnitude & direction) | color`.
    pub fn combined(&self) -> Result<BinaryMask> {
        let axes = self.grad_x.and(&self.grad_y)?;
        let polar = self.magnitude.and(&self.direction)?;
        axes.or(&polar)?.or(&self.color)
    }
}
