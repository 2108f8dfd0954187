//! Matrix products and division
//!
//! `mtimes` is the matrix product over [`Operand`]; `mldivide` and
//! `mrdivide` are left and right division through the inverse. Every product
//! that involves a matrix goes through the backend `multiply` entry point.

use crate::backend::{Dispatcher, FlatMatrix, Operation};
use crate::error::{NumericError, Result};
use crate::types::{Operand, Value};
use ndarray::{Array2, ArrayView2, Axis};

fn mismatch(op: &'static str, expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(NumericError::DimensionMismatch { op, expected, got });
    }
    Ok(())
}

impl Dispatcher {
    /// `rows_a x cols_b` product of two matrix views with matching inner size
    fn multiply_views(&self, a: &ArrayView2<'_, f64>, b: &ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let (rows_a, cols_a) = a.dim();
        let cols_b = b.ncols();

        let lhs = FlatMatrix::from_view(a);
        let rhs = FlatMatrix::from_view(b);
        let out = self
            .select(Operation::Multiply, rows_a.max(cols_b))
            .multiply(lhs.as_slice(), rhs.as_slice(), rows_a, cols_a, cols_b)?;
        FlatMatrix::new(out, rows_a, cols_b).into_array()
    }

    /// Matrix product `a · b`.
    ///
    /// A scalar on either side scales the other operand. Two vectors give
    /// their dot product; a vector on the left is a row, on the right a
    /// column.
    ///
    /// # Errors
    ///
    /// [`NumericError::DimensionMismatch`] when the inner sizes differ.
    pub fn mtimes<'a, 'b>(&self, a: impl Into<Operand<'a>>, b: impl Into<Operand<'b>>) -> Result<Value> {
        match (a.into(), b.into()) {
            (Operand::Scalar(s), x) => Ok(x.mapv(|v| s * v)),
            (x, Operand::Scalar(s)) => Ok(x.mapv(|v| v * s)),
            (Operand::Vector(u), Operand::Vector(v)) => {
                mismatch("mtimes", u.len(), v.len())?;
                Ok(Value::Scalar(u.dot(&v)))
            }
            (Operand::Matrix(m), Operand::Vector(v)) => {
                mismatch("mtimes", m.ncols(), v.len())?;
                let out = self.multiply_views(&m, &v.insert_axis(Axis(1)))?;
                Ok(Value::Vector(out.index_axis_move(Axis(1), 0)))
            }
            (Operand::Vector(v), Operand::Matrix(m)) => {
                mismatch("mtimes", m.nrows(), v.len())?;
                let out = self.multiply_views(&v.insert_axis(Axis(0)), &m)?;
                Ok(Value::Vector(out.index_axis_move(Axis(0), 0)))
            }
            (Operand::Matrix(l), Operand::Matrix(r)) => {
                mismatch("mtimes", l.ncols(), r.nrows())?;
                self.multiply_views(&l, &r).map(Value::Matrix)
            }
        }
    }

    /// Left division `a \ b = inv(a) · b`; a scalar `a` divides element-wise.
    ///
    /// # Errors
    ///
    /// - [`NumericError::Shape`] if `a` is a vector or a non-square matrix
    /// - [`NumericError::DimensionMismatch`] if `b` does not have `n` rows
    /// - [`NumericError::SingularMatrix`] if `a` is singular
    pub fn mldivide<'a, 'b>(&self, a: impl Into<Operand<'a>>, b: impl Into<Operand<'b>>) -> Result<Value> {
        let b = b.into();
        let a = match a.into() {
            Operand::Scalar(s) => return Ok(b.mapv(|v| v / s)),
            other => other.square_matrix("mldivide")?,
        };
        if !matches!(b, Operand::Scalar(_)) {
            mismatch("mldivide", a.nrows(), b.nrows())?;
        }

        let inverse = self.inv_matrix(&a)?;
        self.mtimes(&inverse, b)
    }

    /// Right division `a / b = a · inv(b)`; a scalar `b` divides element-wise.
    ///
    /// # Errors
    ///
    /// - [`NumericError::Shape`] if `b` is a vector or a non-square matrix
    /// - [`NumericError::DimensionMismatch`] if `a` does not have `n` columns
    /// - [`NumericError::SingularMatrix`] if `b` is singular
    pub fn mrdivide<'a, 'b>(&self, a: impl Into<Operand<'a>>, b: impl Into<Operand<'b>>) -> Result<Value> {
        let a = a.into();
        let b = match b.into() {
            Operand::Scalar(s) => return Ok(a.mapv(|v| v / s)),
            other => other.square_matrix("mrdivide")?,
        };
        if !matches!(a, Operand::Scalar(_)) {
            mismatch("mrdivide", b.ncols(), a.ncols())?;
        }

        let inverse = self.inv_matrix(&b)?;
        self.mtimes(a, &inverse)
    }
}

/// Matrix product using the default [`Dispatcher`]
pub fn mtimes<'a, 'b>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'b>>) -> Result<Value> {
    Dispatcher::default().mtimes(a, b)
}

/// Left division using the default [`Dispatcher`]
pub fn mldivide<'a, 'b>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'b>>) -> Result<Value> {
    Dispatcher::default().mldivide(a, b)
}

/// Right division using the default [`Dispatcher`]
pub fn mrdivide<'a, 'b>(a: impl Into<Operand<'a>>, b: impl Into<Operand<'b>>) -> Result<Value> {
    Dispatcher::default().mrdivide(a, b)
}
