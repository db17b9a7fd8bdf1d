//! Sobel first derivatives with a configurable aperture.
//!
//! - Builds separable taps for odd kernel sizes 3..=31: a binomial smoothing
//!   row of length `k` and a derivative row `[-1, 0, 1] * binomial(k - 2)`.
//! - Applies them as two 1D correlation passes with border clamping
//!   (replicate), so a dark→bright step along +x gives a positive `gx`.
//! - Taps and both passes run in f64 and results are stored as f32 after the
//!   vertical pass. Mirrored derivative taps are applied to differences, so a
//!   signal that is constant along the derivative axis yields exactly zero at
//!   every aperture.
//! - Outputs keep the source scale; nothing is normalized here.
//!
//! Complexity: O(W·H·k) per derivative.
use crate::error::{Error, Result};
use crate::image::{ImageF32, ImageView, ImageViewMut};
use std::fmt;
use std::str::FromStr;

/// Largest aperture accepted by the derivative filters.
pub const MAX_KERNEL_SIZE: usize = 31;

/// Axis along which a single derivative is taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Horizontal derivative `d/dx` (responds to vertical edges).
    X,
    /// Vertical derivative `d/dy` (responds to horizontal edges).
    Y,
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x" | "X" => Ok(Orientation::X),
            "y" | "Y" => Ok(Orientation::Y),
            other => Err(Error::invalid(
                "orientation",
                format!("expected \"x\" or \"y\", got {other:?}"),
            )),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::X => f.write_str("x"),
            Orientation::Y => f.write_str("y"),
        }
    }
}

/// Horizontal and vertical derivatives of the same image.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative
    pub gx: ImageF32,
    /// Vertical derivative
    pub gy: ImageF32,
}

impl Grad {
    /// Euclidean magnitude per pixel: `sqrt(gx^2 + gy^2)`.
    ///
    /// Uses `hypot`; large apertures produce derivatives whose squares exceed
    /// the f32 range.
    pub fn magnitude(&self) -> ImageF32 {
        self.gx.zip_map(&self.gy, f32::hypot)
    }

    /// Direction folded into the first quadrant: `atan2(|gy|, |gx|)` ∈ [0, π/2].
    pub fn abs_direction(&self) -> ImageF32 {
        self.gx.zip_map(&self.gy, |x, y| y.abs().atan2(x.abs()))
    }
}

/// Separable Sobel taps for one aperture.
#[derive(Clone, Debug, PartialEq)]
pub struct SobelKernels {
    /// Binomial smoothing row, length `k`.
    pub smooth: Vec<f64>,
    /// First-derivative row, length `k`.
    pub deriv: Vec<f64>,
}

impl SobelKernels {
    pub fn new(kernel_size: usize) -> Result<Self> {
        validate_kernel_size(kernel_size)?;
        let smooth = binomial_row(kernel_size);
        let base = binomial_row(kernel_size - 2);
        let mut deriv = vec![0.0f64; kernel_size];
        for (i, &b) in base.iter().enumerate() {
            deriv[i] -= b;
            deriv[i + 2] += b;
        }
        Ok(Self { smooth, deriv })
    }
}

/// Reject apertures that are even, below 3 or above `MAX_KERNEL_SIZE`.
pub fn validate_kernel_size(kernel_size: usize) -> Result<()> {
    if kernel_size < 3 || kernel_size % 2 == 0 || kernel_size > MAX_KERNEL_SIZE {
        return Err(Error::invalid(
            "kernel_size",
            format!("must be odd and in 3..={MAX_KERNEL_SIZE}, got {kernel_size}"),
        ));
    }
    Ok(())
}

/// Derivative along one axis.
pub fn sobel(l: &ImageF32, orientation: Orientation, kernel_size: usize) -> Result<ImageF32> {
    let k = SobelKernels::new(kernel_size)?;
    Ok(match orientation {
        Orientation::X => separable_correlate(l, &k.deriv, &k.smooth),
        Orientation::Y => separable_correlate(l, &k.smooth, &k.deriv),
    })
}

/// Derivatives along both axes with a shared aperture.
pub fn sobel_gradients(l: &ImageF32, kernel_size: usize) -> Result<Grad> {
    let k = SobelKernels::new(kernel_size)?;
    Ok(Grad {
        gx: separable_correlate(l, &k.deriv, &k.smooth),
        gy: separable_correlate(l, &k.smooth, &k.deriv),
    })
}

/// Row `n` of Pascal's triangle has `n + 1` entries; return the one with `len`.
fn binomial_row(len: usize) -> Vec<f64> {
    let mut row = vec![1.0f64];
    for _ in 1..len {
        let mut next = vec![0.0f64; row.len() + 1];
        for (i, &v) in row.iter().enumerate() {
            next[i] += v;
            next[i + 1] += v;
        }
        row = next;
    }
    row
}

/// Correlate rows with `taps_x`, then columns with `taps_y`.
fn separable_correlate(src: &ImageF32, taps_x: &[f64], taps_y: &[f64]) -> ImageF32 {
    let (w, h) = src.dims();
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let mut horiz = vec![0.0f64; w * h];
    for y in 0..h {
        let src_row = src.row(y);
        let dst_row = &mut horiz[y * w..(y + 1) * w];
        for (x, dst_px) in dst_row.iter_mut().enumerate() {
            *dst_px = apply_taps(taps_x, |off| {
                src_row[clamp_index(x as isize + off, w)] as f64
            });
        }
    }

    for y in 0..h {
        let dst_row = out.row_mut(y);
        for (x, dst_px) in dst_row.iter_mut().enumerate() {
            let v = apply_taps(taps_y, |off| horiz[clamp_index(y as isize + off, h) * w + x]);
            *dst_px = v as f32;
        }
    }
    out
}

/// Centered 1D correlation; `sample(off)` reads the input at offset `off`.
///
/// Mirrored taps are paired, so antisymmetric taps see `s(+i) - s(-i)` and a
/// constant input cancels to exactly zero even when the products round.
#[inline]
fn apply_taps(taps: &[f64], sample: impl Fn(isize) -> f64) -> f64 {
    let r = taps.len() / 2;
    let mut acc = taps[r] * sample(0);
    for i in 1..=r {
        let (lo, hi) = (taps[r - i], taps[r + i]);
        let off = i as isize;
        if lo == -hi {
            acc += hi * (sample(off) - sample(-off));
        } else if lo == hi {
            acc += hi * (sample(off) + sample(-off));
        } else {
            acc += lo * sample(-off) + hi * sample(off);
        }
    }
    acc
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}
