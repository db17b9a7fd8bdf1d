//! Binary masks: same-shape grids whose cells are exactly 0 or 1.

use super::traits::ImageView;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    w: usize,
    h: usize,
    data: Vec<u8>,
}

impl BinaryMask {
    /// All-zero mask of size `w × h`.
    pub fn zeros(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    /// Mark every pixel of `src` for which `pred` holds.
    pub fn from_predicate<V, F>(src: &V, pred: F) -> Self
    where
        V: ImageView,
        F: Fn(V::Pixel) -> bool,
    {
        let (w, h) = src.dims();
        let mut data = Vec::with_capacity(w * h);
        for row in src.rows() {
            data.extend(row.iter().map(|&px| u8::from(pred(px))));
        }
        Self { w, h, data }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.get(x, y) != 0
    }

    /// Row-major cells, each 0 or 1.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn count_ones(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    /// True when every pixel set here is also set in `other`.
    pub fn is_subset_of(&self, other: &BinaryMask) -> bool {
        self.dims() == other.dims()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(&a, &b)| a == 0 || b != 0)
    }

    /// Pixel-wise logical AND.
    pub fn and(&self, other: &BinaryMask) -> Result<BinaryMask> {
        self.combine(other, |a, b| a & b)
    }

    /// Pixel-wise logical OR.
    pub fn or(&self, other: &BinaryMask) -> Result<BinaryMask> {
        self.combine(other, |a, b| a | b)
    }

    fn combine(&self, other: &BinaryMask, op: impl Fn(u8, u8) -> u8) -> Result<BinaryMask> {
        if self.dims() != other.dims() {
            return Err(Error::invalid(
                "mask",
                format!(
                    "shape mismatch: {}x{} vs {}x{}",
                    self.w, self.h, other.w, other.h
                ),
            ));
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| op(a, b))
            .collect();
        Ok(Self {
            w: self.w,
            h: self.h,
            data,
        })
    }
}

impl ImageView for BinaryMask {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.w
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageF32;

    fn ramp(w: usize, h: usize) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                img.set(x, y, (y * w + x) as f32);
            }
        }
        img
    }

    #[test]
    fn predicate_marks_matching_cells_only() {
        let mask = BinaryMask::from_predicate(&ramp(4, 3), |v| v >= 6.0);
        assert_eq!(mask.dims(), (4, 3));
        assert_eq!(mask.count_ones(), 6);
        assert!(!mask.is_set(1, 1));
        assert!(mask.is_set(2, 1));
        assert!(mask.data().iter().all(|&v| v <= 1));
    }

    #[test]
    fn and_or_combine_cellwise() {
        let img = ramp(3, 3);
        let low = BinaryMask::from_predicate(&img, |v| v < 5.0);
        let even = BinaryMask::from_predicate(&img, |v| (v as u32) % 2 == 0);
        let both = low.and(&even).unwrap();
        let either = low.or(&even).unwrap();
        assert_eq!(both.count_ones(), 3); // 0, 2, 4
        assert_eq!(either.count_ones(), 7); // 0..=4, 6, 8
        assert!(both.is_subset_of(&low));
        assert!(low.is_subset_of(&either));
    }

    #[test]
    fn combining_mismatched_shapes_fails() {
        let a = BinaryMask::zeros(2, 2);
        let b = BinaryMask::zeros(2, 3);
        assert!(matches!(a.or(&b), Err(Error::InvalidArgument { .. })));
    }
}
