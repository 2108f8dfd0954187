//! Dispatch configuration
//!
//! Controls when the accelerated backend is used and how the determinant
//! boundary cleans up floating-point residue.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

/// Square size above which `inv` is delegated to the accelerated backend.
///
/// Below this, marshalling into flat buffers costs more than the fallback.
pub const DEFAULT_INVERSE_THRESHOLD: usize = 10;

/// Absolute threshold under which a determinant is reported as exactly zero
pub const DEFAULT_DET_SNAP: f64 = 1e-15;

/// How small a determinant must be before it is snapped to `0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum SnapTolerance {
    /// Fixed threshold, independent of the input
    #[serde(rename = "absolute")]
    Absolute(f64),
    /// Threshold `eps * max|a_ij|^n`, following the scale of the matrix
    #[serde(rename = "relative")]
    Relative(f64),
    /// Never snap (negative zero is still reported as `0`)
    #[serde(rename = "none")]
    Disabled,
}

impl Default for SnapTolerance {
    fn default() -> Self {
        SnapTolerance::Absolute(DEFAULT_DET_SNAP)
    }
}

impl SnapTolerance {
    /// Threshold for a determinant of `a`
    pub fn threshold(&self, a: &ArrayView2<'_, f64>) -> f64 {
        match *self {
            SnapTolerance::Absolute(tol) => tol,
            SnapTolerance::Relative(eps) => {
                let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
                eps * scale.powi(a.nrows() as i32)
            }
            SnapTolerance::Disabled => 0.0,
        }
    }

    /// Snap `det` to exactly zero when it is negative zero or below the threshold
    pub fn snap(&self, det: f64, a: &ArrayView2<'_, f64>) -> f64 {
        if det == 0.0 || det.abs() < self.threshold(a) {
            0.0
        } else {
            det
        }
    }
}

/// Backend dispatch configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Use the accelerated backend when one is compiled in
    #[serde(default = "default_use_backend")]
    pub use_backend: bool,
    /// `inv` goes to the backend only for `n > inverse_threshold`
    #[serde(default = "default_inverse_threshold")]
    pub inverse_threshold: usize,
    /// Determinant snapping rule
    #[serde(default)]
    pub det_snap: SnapTolerance,
}

fn default_use_backend() -> bool {
    true
}

fn default_inverse_threshold() -> usize {
    DEFAULT_INVERSE_THRESHOLD
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            use_backend: true,
            inverse_threshold: DEFAULT_INVERSE_THRESHOLD,
            det_snap: SnapTolerance::default(),
        }
    }
}
