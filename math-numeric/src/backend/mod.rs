//! Backend dispatch
//!
//! Every primitive that has an accelerated implementation goes through the
//! [`Backend`] trait. Its provided methods are the pure-Rust implementation,
//! so [`PureBackend`] is an empty impl and accelerated backends only override
//! what they do faster. Buffers crossing this boundary are flat and
//! row-major, with explicit dimensions.
//!
//! - [`PureBackend`]: always available
//! - `NalgebraBackend`: `accelerated` feature (default)
//! - `LapackBackend`: `native` feature, LAPACK through `ndarray-linalg`
//!
//! [`Dispatcher`] picks one of them per call according to
//! [`DispatchConfig`](crate::config::DispatchConfig).

mod dispatch;
mod flat;
#[cfg(feature = "native")]
mod lapack_backend;
#[cfg(feature = "accelerated")]
mod nalgebra_backend;

pub use dispatch::{Dispatcher, Operation};
pub use flat::FlatMatrix;
#[cfg(feature = "native")]
pub use lapack_backend::LapackBackend;
#[cfg(feature = "accelerated")]
pub use nalgebra_backend::NalgebraBackend;

use crate::error::{NumericError, Result};
use crate::linalg::lu;
use crate::stats::{cov, moments};
use crate::types::Flag;

/// Flat-buffer entry points shared by every backend.
///
/// # Errors
///
/// Entry points that take a matrix buffer return
/// [`NumericError::DimensionMismatch`] when its length disagrees with the
/// dimensions passed alongside it.
pub trait Backend: Send + Sync {
    /// Name used in log output
    fn name(&self) -> &'static str;

    /// `rows_a x cols_b` product of two row-major matrices
    fn multiply(
        &self,
        a: &[f64],
        b: &[f64],
        rows_a: usize,
        cols_a: usize,
        cols_b: usize,
    ) -> Result<Vec<f64>> {
        let lhs = flat::view(a, rows_a, cols_a)?;
        let rhs = flat::view(b, cols_a, cols_b)?;
        Ok(lhs.dot(&rhs).iter().copied().collect())
    }

    /// Arithmetic mean (`NaN` for an empty slice)
    fn mean(&self, arr: &[f64]) -> f64 {
        arr.iter().sum::<f64>() / arr.len() as f64
    }

    /// Standard deviation (Welford)
    fn std(&self, arr: &[f64], flag: Flag) -> f64 {
        moments::welford(arr.iter().copied()).std(flag)
    }

    /// Variance (Welford)
    fn variance(&self, arr: &[f64], flag: Flag) -> f64 {
        moments::welford(arr.iter().copied()).variance(flag)
    }

    /// Standard scores; a constant input gives all zeros
    fn zscore(&self, arr: &[f64], flag: Flag) -> Vec<f64> {
        moments::zscore_slice(arr, flag)
    }

    /// LU factorization encoded as `[sign, pivots..., LU...]`
    fn lu(&self, a: &[f64], rows: usize, cols: usize) -> Result<Vec<f64>> {
        Ok(lu::decompose(flat::view(a, rows, cols)?.to_owned()).to_flat())
    }

    /// Inverse of an `n x n` matrix.
    ///
    /// Returns [`NumericError::SingularMatrix`] when a pivot is negligible.
    fn inverse(&self, a: &[f64], n: usize) -> Result<Vec<f64>> {
        let m = flat::view(a, n, n)?;
        let factor = lu::lu(&m);
        if factor.has_negligible_pivot(&m) {
            return Err(NumericError::SingularMatrix);
        }
        let x = factor.solve(&ndarray::Array2::<f64>::eye(n).view())?;
        Ok(x.iter().copied().collect())
    }

    /// Raw determinant of an `n x n` matrix; snapping is left to the caller
    fn determinant(&self, a: &[f64], n: usize) -> Result<f64> {
        Ok(lu::decompose(flat::view(a, n, n)?.to_owned()).determinant())
    }

    /// `cols x cols` covariance between the columns of a `rows x cols` data matrix
    fn covariance(&self, data: &[f64], rows: usize, cols: usize, flag: Flag) -> Result<Vec<f64>> {
        let view = flat::view(data, rows, cols)?;
        Ok(cov::covariance_pairwise(&view, flag).iter().copied().collect())
    }
}

/// The fallback implementation, available everywhere
#[derive(Debug, Clone, Copy, Default)]
pub struct PureBackend;

impl Backend for PureBackend {
    fn name(&self) -> &'static str {
        "pure-rust"
    }
}

pub(crate) static PURE: PureBackend = PureBackend;

/// The accelerated backend compiled into this build, if any.
///
/// LAPACK wins over nalgebra when both are enabled; the `pure-rust` feature
/// disables both.
#[cfg(all(feature = "native", not(feature = "pure-rust")))]
pub fn accelerated() -> Option<&'static dyn Backend> {
    Some(&LapackBackend)
}

/// The accelerated backend compiled into this build, if any.
#[cfg(all(
    feature = "accelerated",
    not(feature = "native"),
    not(feature = "pure-rust")
))]
pub fn accelerated() -> Option<&'static dyn Backend> {
    Some(&NalgebraBackend)
}

/// The accelerated backend compiled into this build, if any.
#[cfg(any(
    feature = "pure-rust",
    not(any(feature = "accelerated", feature = "native"))
))]
pub fn accelerated() -> Option<&'static dyn Backend> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pure_multiply() {
        // [[1, 2], [3, 4]] * [[5], [6]]
        let out = PURE.multiply(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0], 2, 2, 1).unwrap();
        assert_eq!(out, vec![17.0, 39.0]);
    }

    #[test]
    fn test_pure_moments() {
        let arr = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(PURE.mean(&arr), 5.0);
        assert_relative_eq!(PURE.variance(&arr, Flag::Population), 4.0, epsilon = 1e-12);
        assert_relative_eq!(PURE.std(&arr, Flag::Population), 2.0, epsilon = 1e-12);
        assert!(PURE.mean(&[]).is_nan());
    }

    #[test]
    fn test_pure_inverse_singular() {
        assert_eq!(PURE.inverse(&[1.0, 2.0, 2.0, 4.0], 2), Err(NumericError::SingularMatrix));
    }

    #[test]
    fn test_pure_lu_layout() {
        let out = PURE.lu(&[3.0, 2.0, 5.0, 2.0], 2, 2).unwrap();
        assert_eq!(out[0], -1.0);
        assert_eq!(&out[1..3], &[1.0, 0.0]);
        assert_eq!(&out[3..5], &[5.0, 2.0]);
    }

    #[test]
    fn test_pure_determinant_unsnapped() {
        let det = PURE.determinant(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0], 3).unwrap();
        assert!(det.abs() < 1e-14);
        assert_relative_eq!(PURE.determinant(&[1.0, 5.0, 6.0, 2.0], 2).unwrap(), -28.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bad_buffer_length_is_an_error() {
        let short = [1.0, 2.0, 3.0];
        let mismatch = NumericError::DimensionMismatch {
            op: "backend input",
            expected: 4,
            got: 3,
        };
        assert_eq!(PURE.multiply(&short, &[1.0, 1.0], 2, 2, 1).unwrap_err(), mismatch);
        assert_eq!(PURE.lu(&short, 2, 2).unwrap_err(), mismatch);
        assert_eq!(PURE.inverse(&short, 2).unwrap_err(), mismatch);
        assert_eq!(PURE.determinant(&short, 2).unwrap_err(), mismatch);
        assert_eq!(PURE.covariance(&short, 2, 2, Flag::Sample).unwrap_err(), mismatch);
    }

    #[test]
    fn test_accelerated_matches_features() {
        let backend = accelerated();
        #[cfg(all(feature = "accelerated", not(feature = "native"), not(feature = "pure-rust")))]
        assert_eq!(backend.map(|b| b.name()), Some("nalgebra"));
        #[cfg(not(any(feature = "accelerated", feature = "native")))]
        assert!(backend.is_none());
        let _ = backend;
    }
}
