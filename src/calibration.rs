//! Camera intrinsics and lens distortion loaded from a calibration file.
//!
//! The file is JSON holding two named arrays:
//!
//! ```json
//! {
//!   "mtx":  [[fx, 0, cx], [0, fy, cy], [0, 0, 1]],
//!   "dist": [k1, k2, p1, p2, k3]
//! }
//! ```
//!
//! `dist` may also be a single nested row (`[[k1, k2, p1, p2, k3]]`). The
//! distortion model is Brown–Conrady with three radial and two tangential
//! terms. A loaded `Calibration` is immutable; load it once at startup and
//! hand out references.
use crate::error::{Error, Result};
use crate::image::{ImageRgb8, ImageView, Rgb8, RgbImageU8};
use log::debug;
use nalgebra::{Matrix3, Vector3, Vector5};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Location of the calibration file relative to the working directory.
pub const DEFAULT_CALIBRATION_PATH: &str = "camera_cal/calibration.json";

#[derive(Clone, Debug, PartialEq)]
pub struct Calibration {
    /// 3×3 intrinsic matrix `K`.
    pub camera_matrix: Matrix3<f64>,
    /// `(k1, k2, p1, p2, k3)`.
    pub dist_coeffs: Vector5<f64>,
}

#[derive(Deserialize)]
struct CalibrationFile {
    mtx: Vec<Vec<f64>>,
    dist: DistField,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DistField {
    Flat(Vec<f64>),
    Nested(Vec<Vec<f64>>),
}

impl Calibration {
    pub fn new(camera_matrix: Matrix3<f64>, dist_coeffs: Vector5<f64>) -> Self {
        Self {
            camera_matrix,
            dist_coeffs,
        }
    }

    /// Read `DEFAULT_CALIBRATION_PATH`.
    pub fn load_default() -> Result<Self> {
        Self::load(Path::new(DEFAULT_CALIBRATION_PATH))
    }

    /// Read and validate a calibration file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: CalibrationFile = serde_json::from_str(&data).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let calib = Self::from_file(file).map_err(|reason| Error::Format {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!(
            "Calibration::load {} fx={:.3} fy={:.3} cx={:.3} cy={:.3}",
            path.display(),
            calib.camera_matrix[(0, 0)],
            calib.camera_matrix[(1, 1)],
            calib.camera_matrix[(0, 2)],
            calib.camera_matrix[(1, 2)]
        );
        Ok(calib)
    }

    fn from_file(file: CalibrationFile) -> std::result::Result<Self, String> {
        if file.mtx.len() != 3 || file.mtx.iter().any(|row| row.len() != 3) {
            return Err(format!(
                "mtx must be 3x3, got rows of lengths {:?}",
                file.mtx.iter().map(Vec::len).collect::<Vec<_>>()
            ));
        }
        let camera_matrix = Matrix3::from_fn(|r, c| file.mtx[r][c]);

        let dist = match file.dist {
            DistField::Flat(v) => v,
            DistField::Nested(mut rows) if rows.len() == 1 => rows.remove(0),
            DistField::Nested(rows) => {
                return Err(format!("dist must be a single row, got {} rows", rows.len()))
            }
        };
        if dist.len() != 5 {
            return Err(format!("dist must have 5 coefficients, got {}", dist.len()));
        }
        Ok(Self::new(camera_matrix, Vector5::from_column_slice(&dist)))
    }

    /// Apply the lens model to a point on the normalized image plane.
    pub fn distort_normalized(&self, x: f64, y: f64) -> (f64, f64) {
        let d = &self.dist_coeffs;
        let (k1, k2, p1, p2, k3) = (d[0], d[1], d[2], d[3], d[4]);
        let r2 = x * x + y * y;
        let radial = 1.0 + r2 * (k1 + r2 * (k2 + r2 * k3));
        let xy2 = 2.0 * x * y;
        let xd = x * radial + p1 * xy2 + p2 * (r2 + 2.0 * x * x);
        let yd = y * radial + p1 * (r2 + 2.0 * y * y) + p2 * xy2;
        (xd, yd)
    }

    /// Pixel in the distorted source that lands on `(u, v)` after correction.
    pub fn undistort_point(&self, u: f64, v: f64) -> Result<(f64, f64)> {
        let k_inv = self.inverse_camera_matrix()?;
        Ok(self.source_coords(&k_inv, u, v))
    }

    /// Remove lens distortion, keeping the same intrinsics and image size.
    ///
    /// Bilinear resampling; pixels mapping outside the source are black.
    pub fn undistort(&self, image: &ImageRgb8<'_>) -> Result<RgbImageU8> {
        let k_inv = self.inverse_camera_matrix()?;
        let (w, h) = image.dims();
        Ok(RgbImageU8::from_fn(w, h, |x, y| {
            let (sx, sy) = self.source_coords(&k_inv, x as f64, y as f64);
            sample_bilinear(image, sx, sy)
        }))
    }

    fn inverse_camera_matrix(&self) -> Result<Matrix3<f64>> {
        self.camera_matrix.try_inverse().ok_or_else(|| {
            debug!("Calibration: camera matrix is singular");
            Error::invalid("camera_matrix", "matrix is not invertible")
        })
    }

    fn source_coords(&self, k_inv: &Matrix3<f64>, u: f64, v: f64) -> (f64, f64) {
        let ray = k_inv * Vector3::new(u, v, 1.0);
        let (x, y) = (ray.x / ray.z, ray.y / ray.z);
        let (xd, yd) = self.distort_normalized(x, y);
        let p = self.camera_matrix * Vector3::new(xd, yd, 1.0);
        (p.x / p.z, p.y / p.z)
    }
}

fn sample_bilinear(image: &ImageRgb8<'_>, x: f64, y: f64) -> Rgb8 {
    if !x.is_finite() || !y.is_finite() {
        return [0; 3];
    }
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let fetch = |xi: i64, yi: i64| -> [f64; 3] {
        if xi < 0 || yi < 0 || xi >= image.w as i64 || yi >= image.h as i64 {
            return [0.0; 3];
        }
        let px = image.get(xi as usize, yi as usize);
        [px[0] as f64, px[1] as f64, px[2] as f64]
    };

    let taps = [
        (fetch(x0, y0), (1.0 - fx) * (1.0 - fy)),
        (fetch(x0 + 1, y0), fx * (1.0 - fy)),
        (fetch(x0, y0 + 1), (1.0 - fx) * fy),
        (fetch(x0 + 1, y0 + 1), fx * fy),
    ];
    let mut out = [0u8; 3];
    for (c, dst) in out.iter_mut().enumerate() {
        let acc: f64 = taps.iter().map(|(px, wgt)| px[c] * wgt).sum();
        *dst = acc.round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intrinsics() -> Matrix3<f64> {
        Matrix3::new(100.0, 0.0, 4.0, 0.0, 100.0, 3.0, 0.0, 0.0, 1.0)
    }

    #[test]
    fn zero_distortion_is_identity() {
        let calib = Calibration::new(intrinsics(), Vector5::zeros());
        let (u, v) = calib.undistort_point(7.0, 1.0).unwrap();
        assert!((u - 7.0).abs() < 1e-9 && (v - 1.0).abs() < 1e-9);

        let img = RgbImageU8::from_fn(8, 6, |x, y| [(x * 30) as u8, (y * 40) as u8, 7]);
        let out = calib.undistort(&img.as_view()).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn barrel_distortion_pulls_points_inward() {
        let calib = Calibration::new(
            intrinsics(),
            Vector5::new(-0.2, 0.0, 0.0, 0.0, 0.0),
        );
        let (xd, yd) = calib.distort_normalized(0.5, -0.5);
        assert!(xd < 0.5 && xd > 0.0);
        assert!(yd > -0.5 && yd < 0.0);
        // r^2 = 0.5, radial factor 0.9
        assert!((xd - 0.45).abs() < 1e-12);
    }

    #[test]
    fn tangential_terms_shift_the_axes() {
        let calib = Calibration::new(intrinsics(), Vector5::new(0.0, 0.0, 0.01, 0.02, 0.0));
        let (xd, yd) = calib.distort_normalized(0.0, 0.0);
        assert_eq!((xd, yd), (0.0, 0.0));
        let (xd, yd) = calib.distort_normalized(1.0, 0.0);
        assert!((xd - (1.0 + 0.02 * 3.0)).abs() < 1e-12);
        assert!((yd - 0.01).abs() < 1e-12);
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let calib = Calibration::new(Matrix3::zeros(), Vector5::zeros());
        let img = RgbImageU8::filled(2, 2, [1, 2, 3]);
        assert!(matches!(
            calib.undistort(&img.as_view()),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn samples_outside_the_source_are_black() {
        let img = RgbImageU8::filled(2, 2, [200, 100, 50]);
        let view = img.as_view();
        assert_eq!(sample_bilinear(&view, -5.0, 0.0), [0, 0, 0]);
        assert_eq!(sample_bilinear(&view, 0.5, 0.0), [200, 100, 50]);
        assert_eq!(sample_bilinear(&view, 1.5, 0.0), [100, 50, 25]);
    }
}
