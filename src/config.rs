//! JSON-backed threshold parameters for the full set of lane masks.
//!
//! Every section is optional; missing fields fall back to the permissive
//! defaults (aperture 3, full 8-bit range, full `[0, π/2]` direction range).
//!
//! ```json
//! {
//!   "sobel_x":   { "kernel_size": 3, "thresh": [12, 255] },
//!   "sobel_y":   { "kernel_size": 3, "thresh": [25, 255] },
//!   "magnitude": { "kernel_size": 9, "thresh": [30, 100] },
//!   "direction": { "kernel_size": 15, "thresh": [0.7, 1.3] },
//!   "color":     { "s_thresh": [100, 255] }
//! }
//! ```
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MaskConfig {
    pub sobel_x: AxisThreshold,
    pub sobel_y: AxisThreshold,
    pub magnitude: MagnitudeThreshold,
    pub direction: DirectionThreshold,
    pub color: ColorThreshold,
}

/// Parameters for one axis-aligned gradient mask.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AxisThreshold {
    pub kernel_size: usize,
    /// Inclusive range on the rescaled absolute derivative.
    pub thresh: (u8, u8),
}

impl Default for AxisThreshold {
    fn default() -> Self {
        Self {
            kernel_size: 3,
            thresh: (0, 255),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MagnitudeThreshold {
    pub kernel_size: usize,
    /// Inclusive range on the rescaled gradient magnitude.
    pub thresh: (u8, u8),
}

impl Default for MagnitudeThreshold {
    fn default() -> Self {
        Self {
            kernel_size: 3,
            thresh: (0, 255),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectionThreshold {
    pub kernel_size: usize,
    /// Inclusive range in radians.
    pub thresh: (f32, f32),
}

impl Default for DirectionThreshold {
    fn default() -> Self {
        Self {
            kernel_size: 3,
            thresh: (0.0, FRAC_PI_2),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorThreshold {
    /// Saturation range, exclusive below and inclusive above.
    pub s_thresh: (u8, u8),
}

impl Default for ColorThreshold {
    fn default() -> Self {
        Self { s_thresh: (0, 255) }
    }
}

/// Read a `MaskConfig` from a JSON file.
pub fn load_config(path: &Path) -> Result<MaskConfig> {
    let data = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}
