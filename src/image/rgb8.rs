//! Three-channel 8-bit RGB images, interleaved per pixel.

use super::traits::ImageView;

/// One RGB pixel.
pub type Rgb8 = [u8; 3];

/// Borrowed RGB view. `stride` counts pixels between row starts.
#[derive(Clone, Debug)]
pub struct ImageRgb8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: &'a [Rgb8],
}

impl<'a> ImageRgb8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb8 {
        self.data[y * self.stride + x]
    }
}

impl<'a> ImageView for ImageRgb8<'a> {
    type Pixel = Rgb8;

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
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[Rgb8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[Rgb8]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

/// Owned, tightly packed RGB buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImageU8 {
    width: usize,
    height: usize,
    data: Vec<Rgb8>,
}

impl RgbImageU8 {
    /// Wrap row-major pixels; `None` unless `data.len() == width * height`.
    pub fn new(width: usize, height: usize, data: Vec<Rgb8>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Build from interleaved `R, G, B` bytes (e.g. `image::RgbImage::into_raw`).
    pub fn from_raw(width: usize, height: usize, raw: &[u8]) -> Option<Self> {
        if raw.len() != width * height * 3 {
            return None;
        }
        let data = raw.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Self::new(width, height, data)
    }

    /// Fill every pixel with `px`.
    pub fn filled(width: usize, height: usize, px: Rgb8) -> Self {
        Self {
            width,
            height,
            data: vec![px; width * height],
        }
    }

    /// Evaluate `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> Rgb8) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb8 {
        self.data[y * self.width + x]
    }

    pub fn pixels(&self) -> &[Rgb8] {
        &self.data
    }

    /// Borrow as a read-only `ImageRgb8` view
    pub fn as_view(&self) -> ImageRgb8<'_> {
        ImageRgb8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_reject_mismatched_lengths() {
        assert!(RgbImageU8::new(3, 2, vec![[0; 3]; 5]).is_none());
        assert!(RgbImageU8::from_raw(3, 2, &[0; 17]).is_none());
        let img = RgbImageU8::new(3, 2, vec![[7; 3]; 6]).unwrap();
        assert_eq!(img.as_view().dims(), (3, 2));
    }
}
