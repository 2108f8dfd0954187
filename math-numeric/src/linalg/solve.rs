//! Linear system solver
//!
//! Solves `A·X = B` by LU factorization, forward substitution with the unit
//! lower factor and back substitution with the upper factor. Each column of
//! `B` is an independent right-hand side.

use super::lu::{self, LuDecomposition};
use crate::error::{NumericError, Result};
use crate::types::{Operand, Value, require_square};
use ndarray::{Array2, ArrayView2, ArrayViewMut1, Axis};

impl LuDecomposition {
    /// Solve `A·X = B` with this factorization of a square `A`.
    ///
    /// Fails with [`NumericError::SingularMatrix`] before any substitution
    /// when a pivot is exactly zero. [`linsolve`] also rejects pivots that are
    /// negligible next to their row of `A`; see
    /// [`has_negligible_pivot`](LuDecomposition::has_negligible_pivot).
    pub fn solve(&self, b: &ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let n = self.nrows();
        if n != self.ncols() {
            return Err(NumericError::shape(
                "linsolve",
                format!("matrix must be square, got {}x{}", n, self.ncols()),
            ));
        }
        if b.nrows() != n {
            return Err(NumericError::DimensionMismatch {
                op: "linsolve",
                expected: n,
                got: b.nrows(),
            });
        }
        if self.is_singular(0.0) {
            return Err(NumericError::SingularMatrix);
        }

        let mut x = self.permute_rows(b);
        for col in x.columns_mut() {
            self.substitute(col);
        }
        Ok(x)
    }

    /// Forward then back substitution on one permuted right-hand side
    fn substitute(&self, mut x: ArrayViewMut1<'_, f64>) {
        let lu = &self.lu;
        let n = x.len();

        // L·y = P·b, unit diagonal
        for i in 1..n {
            let mut sum = x[i];
            for j in 0..i {
                sum -= lu[[i, j]] * x[j];
            }
            x[i] = sum;
        }

        // U·x = y
        for i in (0..n).rev() {
            let mut sum = x[i];
            for j in (i + 1)..n {
                sum -= lu[[i, j]] * x[j];
            }
            x[i] = sum / lu[[i, i]];
        }
    }
}

/// Solve `A·X = B` for a square matrix view and a matrix of right-hand sides
pub(crate) fn solve_matrix(a: &ArrayView2<'_, f64>, b: &ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    require_square(a, "linsolve")?;
    if b.nrows() != a.nrows() {
        return Err(NumericError::DimensionMismatch {
            op: "linsolve",
            expected: a.nrows(),
            got: b.nrows(),
        });
    }
    let factor = lu::lu(a);
    if factor.has_negligible_pivot(a) {
        return Err(NumericError::SingularMatrix);
    }
    factor.solve(b)
}

/// Solve the linear system `A·x = b`.
///
/// `b` may be a vector of length n (the result is a vector) or an n x k
/// matrix (the result is n x k, one solution per column). Neither input is
/// modified.
///
/// # Errors
///
/// - [`NumericError::Shape`] if `a` is not a square matrix
/// - [`NumericError::DimensionMismatch`] if `b` does not have n rows
/// - [`NumericError::SingularMatrix`] if `a` is singular
/// - [`NumericError::InvalidArgument`] if `b` is a scalar
pub fn linsolve<'a, 'b>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'b>>) -> Result<Value> {
    let a = a.into().square_matrix("linsolve")?;
    match b.into() {
        Operand::Vector(v) => {
            let x = solve_matrix(&a, &v.insert_axis(Axis(1)))?;
            Ok(Value::Vector(x.index_axis_move(Axis(1), 0)))
        }
        Operand::Matrix(m) => solve_matrix(&a, &m).map(Value::Matrix),
        Operand::Scalar(_) => Err(NumericError::invalid(
            "b",
            "right-hand side must be a vector or a matrix",
        )),
    }
}
