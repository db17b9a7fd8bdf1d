//! Image derivatives.
//!
//! - Sobel first derivatives along x, y or both, for any odd aperture up to
//!   `MAX_KERNEL_SIZE`.
//! - Border handling clamps indices (replicate), so output maps always have
//!   the input's shape.

pub mod grad;

pub use grad::{
    sobel, sobel_gradients, validate_kernel_size, Grad, Orientation, SobelKernels,
    MAX_KERNEL_SIZE,
};
