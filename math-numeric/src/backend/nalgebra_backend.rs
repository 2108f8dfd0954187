//! Accelerated backend on top of nalgebra
//!
//! Overrides the entry points where nalgebra is faster than the fallback:
//! multiply, mean, inverse, determinant and covariance. Inputs arrive
//! row-major and results leave row-major; nalgebra itself is column-major.

use super::{Backend, flat};
use crate::error::{NumericError, Result};
use crate::types::Flag;
use nalgebra::{DMatrix, DVector};

/// nalgebra-backed implementation of [`Backend`]
#[derive(Debug, Clone, Copy, Default)]
pub struct NalgebraBackend;

/// Column-major nalgebra matrix from a row-major buffer of checked length
fn from_rows(a: &[f64], rows: usize, cols: usize) -> Result<DMatrix<f64>> {
    flat::check_len(a, rows, cols)?;
    Ok(DMatrix::from_row_slice(rows, cols, a))
}

fn to_row_major(m: &DMatrix<f64>) -> Vec<f64> {
    m.transpose().as_slice().to_vec()
}

impl Backend for NalgebraBackend {
    fn name(&self) -> &'static str {
        "nalgebra"
    }

    fn multiply(
        &self,
        a: &[f64],
        b: &[f64],
        rows_a: usize,
        cols_a: usize,
        cols_b: usize,
    ) -> Result<Vec<f64>> {
        let mat_a = from_rows(a, rows_a, cols_a)?;
        let mat_b = from_rows(b, cols_a, cols_b)?;
        Ok(to_row_major(&(&mat_a * &mat_b)))
    }

    fn mean(&self, arr: &[f64]) -> f64 {
        if arr.is_empty() {
            return f64::NAN;
        }
        DVector::from_row_slice(arr).mean()
    }

    fn inverse(&self, a: &[f64], n: usize) -> Result<Vec<f64>> {
        from_rows(a, n, n)?
            .try_inverse()
            .map(|inv| to_row_major(&inv))
            .ok_or(NumericError::SingularMatrix)
    }

    fn determinant(&self, a: &[f64], n: usize) -> Result<f64> {
        Ok(from_rows(a, n, n)?.determinant())
    }

    fn covariance(&self, data: &[f64], rows: usize, cols: usize, flag: Flag) -> Result<Vec<f64>> {
        let mut centered = from_rows(data, rows, cols)?;
        for j in 0..cols {
            let mean = centered.column(j).sum() / rows as f64;
            centered.column_mut(j).add_scalar_mut(-mean);
        }

        let denom = (rows - flag.ddof()) as f64;
        let cov = (centered.transpose() * &centered) / denom;
        Ok(to_row_major(&cov))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PURE;
    use approx::assert_relative_eq;

    fn assert_close(a: &[f64], b: &[f64], eps: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert_relative_eq!(*x, *y, epsilon = eps, max_relative = eps);
        }
    }

    #[test]
    fn test_multiply_row_major() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let out = NalgebraBackend.multiply(&a, &b, 2, 3, 2).unwrap();
        assert_eq!(out, vec![58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_inverse_matches_pure() {
        let a = [4.0, 7.0, 2.0, 6.0];
        assert_close(&NalgebraBackend.inverse(&a, 2).unwrap(), &PURE.inverse(&a, 2).unwrap(), 1e-12);
    }

    #[test]
    fn test_inverse_singular() {
        assert_eq!(
            NalgebraBackend.inverse(&[1.0, 2.0, 2.0, 4.0], 2),
            Err(NumericError::SingularMatrix)
        );
    }

    #[test]
    fn test_bad_buffer_length() {
        assert!(matches!(
            NalgebraBackend.multiply(&[1.0, 2.0, 3.0], &[1.0, 1.0], 2, 2, 1),
            Err(NumericError::DimensionMismatch { expected: 4, got: 3, .. })
        ));
        assert!(NalgebraBackend.determinant(&[1.0; 8], 3).is_err());
    }

    #[test]
    fn test_determinant_and_mean() {
        let a = [1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 1.0, 0.0, 6.0];
        assert_relative_eq!(NalgebraBackend.determinant(&a, 3).unwrap(), 22.0, epsilon = 1e-12);
        assert_relative_eq!(NalgebraBackend.mean(&[5.0, 6.0, 3.0]), 14.0 / 3.0);
        assert!(NalgebraBackend.mean(&[]).is_nan());
    }

    #[test]
    fn test_covariance_matches_pure() {
        let data = [1.0, 1.0, -1.0, 1.0, -2.0, 3.0, 2.0, 3.0, 1.0];
        for flag in [Flag::Population, Flag::Sample] {
            assert_close(
                &NalgebraBackend.covariance(&data, 3, 3, flag).unwrap(),
                &PURE.covariance(&data, 3, 3, flag).unwrap(),
                1e-12,
            );
        }
    }
}
