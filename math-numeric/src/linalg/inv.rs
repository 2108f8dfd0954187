//! Matrix inverse
//!
//! Every input is first factorized by the LU solver and rejected as
//! [`NumericError::SingularMatrix`] when a pivot is negligible next to its
//! row, whichever backend then computes the inverse. Small matrices are
//! inverted by solving `A·X = I` with that factor; above
//! [`DispatchConfig::inverse_threshold`](crate::config::DispatchConfig) the
//! accelerated backend takes over.

use super::lu;
use crate::backend::{Dispatcher, FlatMatrix, Operation};
use crate::error::{NumericError, Result};
use crate::types::{Operand, Value};
use ndarray::{Array2, ArrayView2};

impl Dispatcher {
    /// Inverse of a square matrix, or the reciprocal of a scalar.
    ///
    /// # Errors
    ///
    /// - [`NumericError::Shape`] for vectors and non-square matrices
    /// - [`NumericError::SingularMatrix`] for singular matrices and a zero scalar
    pub fn inv<'a>(&self, x: impl Into<Operand<'a>>) -> Result<Value> {
        match x.into() {
            Operand::Scalar(s) if s == 0.0 => Err(NumericError::SingularMatrix),
            Operand::Scalar(s) => Ok(Value::Scalar(1.0 / s)),
            other => {
                let a = other.square_matrix("inv")?;
                self.inv_matrix(&a).map(Value::Matrix)
            }
        }
    }

    /// Inverse of a square matrix view
    pub(crate) fn inv_matrix(&self, a: &ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let n = a.nrows();
        let factor = lu::lu(a);
        if factor.has_negligible_pivot(a) {
            return Err(NumericError::SingularMatrix);
        }

        let Some(backend) = self.accelerated_for(Operation::Inverse, n) else {
            return factor.solve(&Array2::<f64>::eye(n).view());
        };

        let flat = FlatMatrix::from_view(a);
        let out = match backend.inverse(flat.as_slice(), n) {
            Ok(out) if out.iter().all(|v| v.is_finite()) => out,
            Ok(_) | Err(NumericError::SingularMatrix) => {
                log::warn!("inv: {} backend reported a singular {}x{} matrix", backend.name(), n, n);
                return Err(NumericError::SingularMatrix);
            }
            Err(e) => return Err(e),
        };
        FlatMatrix::new(out, n, n).into_array()
    }
}

/// Inverse using the default [`Dispatcher`]
pub fn inv<'a>(x: impl Into<Operand<'a>>) -> Result<Value> {
    Dispatcher::default().inv(x)
}
