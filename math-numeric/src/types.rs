//! Operand types and reduction parameters
//!
//! - [`Operand`]: borrowed scalar / vector / matrix input of the overloaded entry points
//! - [`Value`]: the owned result of those entry points
//! - [`Flag`]: population or sample normalization
//! - [`Dim`]: row-wise or column-wise reduction

use crate::error::{NumericError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Borrowed input of an overloaded primitive
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// A single number
    Scalar(f64),
    /// A one-dimensional array
    Vector(ArrayView1<'a, f64>),
    /// A two-dimensional array
    Matrix(ArrayView2<'a, f64>),
}

impl<'a> Operand<'a> {
    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Scalar(_) => "scalar",
            Operand::Vector(_) => "vector",
            Operand::Matrix(_) => "matrix",
        }
    }

    /// Number of rows when the operand is used as a left/right factor.
    ///
    /// A vector counts as a column of `len` rows.
    pub fn nrows(&self) -> usize {
        match self {
            Operand::Scalar(_) => 1,
            Operand::Vector(v) => v.len(),
            Operand::Matrix(m) => m.nrows(),
        }
    }

    /// Number of columns; a vector counts as a row of `len` columns.
    pub fn ncols(&self) -> usize {
        match self {
            Operand::Scalar(_) => 1,
            Operand::Vector(v) => v.len(),
            Operand::Matrix(m) => m.ncols(),
        }
    }

    /// Return the matrix view, rejecting scalars, vectors and non-square matrices
    pub(crate) fn square_matrix(self, op: &'static str) -> Result<ArrayView2<'a, f64>> {
        match self {
            Operand::Matrix(m) => {
                require_square(&m, op)?;
                Ok(m)
            }
            other => Err(NumericError::shape(
                op,
                format!("input must be a square matrix, got a {}", other.kind()),
            )),
        }
    }

    /// Apply `f` to every element, keeping the variant
    pub fn mapv(&self, f: impl Fn(f64) -> f64) -> Value {
        match self {
            Operand::Scalar(s) => Value::Scalar(f(*s)),
            Operand::Vector(v) => Value::Vector(v.mapv(f)),
            Operand::Matrix(m) => Value::Matrix(m.mapv(f)),
        }
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a> From<&'a Array1<f64>> for Operand<'a> {
    fn from(value: &'a Array1<f64>) -> Self {
        Operand::Vector(value.view())
    }
}

impl<'a> From<ArrayView1<'a, f64>> for Operand<'a> {
    fn from(value: ArrayView1<'a, f64>) -> Self {
        Operand::Vector(value)
    }
}

impl<'a> From<&'a Array2<f64>> for Operand<'a> {
    fn from(value: &'a Array2<f64>) -> Self {
        Operand::Matrix(value.view())
    }
}

impl<'a> From<ArrayView2<'a, f64>> for Operand<'a> {
    fn from(value: ArrayView2<'a, f64>) -> Self {
        Operand::Matrix(value)
    }
}

impl<'a> From<&'a Value> for Operand<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Scalar(s) => Operand::Scalar(*s),
            Value::Vector(v) => Operand::Vector(v.view()),
            Value::Matrix(m) => Operand::Matrix(m.view()),
        }
    }
}

/// Owned result of an overloaded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    Vector(Array1<f64>),
    Matrix(Array2<f64>),
}

impl Value {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    pub fn into_vector(self) -> Option<Array1<f64>> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_matrix(self) -> Option<Array2<f64>> {
        match self {
            Value::Matrix(m) => Some(m),
            _ => None,
        }
    }
}

/// Normalization used by variance-like reductions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Flag {
    /// Divide by `n`
    Population,
    /// Divide by `n - 1` (Bessel's correction)
    #[default]
    Sample,
}

impl Flag {
    /// Delta degrees of freedom subtracted from `n`
    #[inline]
    pub fn ddof(self) -> usize {
        match self {
            Flag::Population => 0,
            Flag::Sample => 1,
        }
    }
}

impl TryFrom<u8> for Flag {
    type Error = NumericError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Flag::Population),
            1 => Ok(Flag::Sample),
            other => Err(NumericError::invalid(
                "flag",
                format!("normalization flag must be 0 or 1, got {other}"),
            )),
        }
    }
}

/// Direction of a reduction over a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dim {
    /// One result per row
    #[default]
    Rows,
    /// One result per column
    Columns,
}

impl Dim {
    /// Axis along which the lanes of this reduction run
    #[inline]
    pub(crate) fn lane_axis(self) -> Axis {
        match self {
            Dim::Rows => Axis(1),
            Dim::Columns => Axis(0),
        }
    }
}

impl TryFrom<usize> for Dim {
    type Error = NumericError;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            0 => Ok(Dim::Rows),
            1 => Ok(Dim::Columns),
            other => Err(NumericError::invalid(
                "dim",
                format!("dimension must be 0 or 1, got {other}"),
            )),
        }
    }
}

pub(crate) fn require_square(m: &ArrayView2<'_, f64>, op: &'static str) -> Result<()> {
    if !m.is_square() {
        return Err(NumericError::shape(
            op,
            format!("matrix must be square, got {}x{}", m.nrows(), m.ncols()),
        ));
    }
    require_non_empty(m, op)
}

pub(crate) fn require_non_empty(m: &ArrayView2<'_, f64>, op: &'static str) -> Result<()> {
    if m.is_empty() {
        return Err(NumericError::invalid(
            "x",
            format!("'{op}' requires a non-empty matrix"),
        ));
    }
    Ok(())
}
