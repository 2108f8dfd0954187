//! Determinant
//!
//! `det = sign · Π diag(U)`. The accelerated backend is preferred at every
//! size. A (near-)singular matrix has determinant `0` by convention; this is
//! the only primitive that snaps floating-point residue.

use super::lu;
use crate::backend::{Dispatcher, FlatMatrix, Operation};
use crate::error::Result;
use crate::types::Operand;

impl Dispatcher {
    /// Determinant of a square matrix
    ///
    /// # Errors
    ///
    /// [`NumericError::Shape`](crate::NumericError::Shape) for scalars,
    /// vectors and non-square matrices.
    pub fn det<'a>(&self, x: impl Into<Operand<'a>>) -> Result<f64> {
        let a = x.into().square_matrix("det")?;
        let n = a.nrows();

        let flat = FlatMatrix::from_view(&a);
        let raw = self
            .select(Operation::Determinant, n)
            .determinant(flat.as_slice(), n)?;

        Ok(self.config().det_snap.snap(raw, &a))
    }
}

/// Determinant of a square matrix, using the default [`Dispatcher`]
pub fn det<'a>(x: impl Into<Operand<'a>>) -> Result<f64> {
    Dispatcher::default().det(x)
}

/// Whether a square matrix has an exactly zero pivot after factorization
pub fn is_singular<'a>(x: impl Into<Operand<'a>>) -> Result<bool> {
    let a = x.into().square_matrix("is_singular")?;
    Ok(lu::lu(&a).is_singular(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NumericError;
    use crate::config::{DispatchConfig, SnapTolerance};
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_det_examples() {
        for d in [Dispatcher::default(), Dispatcher::fallback()] {
            assert_relative_eq!(d.det(&array![[1.0, 5.0], [6.0, 2.0]]).unwrap(), -28.0, epsilon = 1e-12);
            assert_relative_eq!(d.det(&array![[2.0, 2.0], [2.0, 3.0]]).unwrap(), 2.0, epsilon = 1e-12);
            assert_relative_eq!(
                d.det(&array![[1.0, 2.0, 3.0], [0.0, 4.0, 5.0], [1.0, 0.0, 6.0]]).unwrap(),
                22.0,
                epsilon = 1e-12
            );
            assert_relative_eq!(
                d.det(&array![[0.0, 2.0, 3.0], [0.0, 4.0, 5.0], [1.0, 0.0, 6.0]]).unwrap(),
                -2.0,
                epsilon = 1e-12
            );
            assert_relative_eq!(
                d.det(&array![[4.0, 8.0, 2.0], [4.0, 6.0, 8.0], [4.0, 2.0, 8.0]]).unwrap(),
                96.0,
                epsilon = 1e-12
            );
            assert_relative_eq!(
                d.det(&array![[-40.54, 34.02], [91.81, 57.47]]).unwrap(),
                -5453.21,
                max_relative = 1e-12
            );
            assert_eq!(d.det(&array![[1.0, 0.0], [0.0, 1.0]]).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_det_singular_is_zero() {
        for d in [Dispatcher::default(), Dispatcher::fallback()] {
            let det = d.det(&array![[1.0, 2.0], [2.0, 4.0]]).unwrap();
            assert!(det == 0.0 && det.is_sign_positive());

            let det = d
                .det(&array![
                    [1.0, 2.0, 3.0, 4.0],
                    [5.0, 6.0, 7.0, 8.0],
                    [9.0, 10.0, 11.0, 12.0],
                    [13.0, 14.0, 15.0, 16.0]
                ])
                .unwrap();
            assert_eq!(det, 0.0);
        }
    }

    #[test]
    fn test_det_rejects_non_matrices() {
        assert!(matches!(det(3.0), Err(NumericError::Shape { op: "det", .. })));
        assert!(matches!(
            det(&array![1.0, 2.0]),
            Err(NumericError::Shape { .. })
        ));
        assert!(matches!(
            det(&array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]),
            Err(NumericError::Shape { .. })
        ));
    }

    #[test]
    fn test_det_1x1() {
        assert_eq!(det(&array![[-3.5]]).unwrap(), -3.5);
    }

    #[test]
    fn test_snap_is_configurable() {
        let tiny = array![[1e-8, 0.0], [0.0, 1e-8]];
        assert_eq!(det(&tiny).unwrap(), 0.0);

        let config = DispatchConfig {
            det_snap: SnapTolerance::Relative(1e-15),
            ..DispatchConfig::default()
        };
        let d = Dispatcher::fallback().with_config(config);
        assert_relative_eq!(d.det(&tiny).unwrap(), 1e-16, max_relative = 1e-12);
    }

    #[test]
    fn test_is_singular() {
        assert!(is_singular(&array![[1.0, 2.0], [2.0, 4.0]]).unwrap());
        assert!(is_singular(&array![[0.0, 1.0], [0.0, 2.0]]).unwrap());
        assert!(!is_singular(&array![[3.0, 2.0], [5.0, 2.0]]).unwrap());
        assert!(is_singular(&array![1.0, 2.0]).is_err());
    }
}
