//! Row-major flat buffers exchanged with backends

use crate::error::{NumericError, Result};
use ndarray::{Array2, ArrayView2};

/// A matrix marshalled into a contiguous row-major buffer
#[derive(Debug, Clone, PartialEq)]
pub struct FlatMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl FlatMatrix {
    /// Wrap a backend result; the length is checked by [`into_array`](Self::into_array)
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        Self { data, rows, cols }
    }

    /// Copy any matrix view, whatever its memory layout, in row-major order
    pub fn from_view(a: &ArrayView2<'_, f64>) -> Self {
        Self {
            data: a.iter().copied().collect(),
            rows: a.nrows(),
            cols: a.ncols(),
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Rebuild the nested matrix
    pub fn into_array(self) -> Result<Array2<f64>> {
        let got = self.data.len();
        Array2::from_shape_vec((self.rows, self.cols), self.data).map_err(|_| {
            NumericError::DimensionMismatch {
                op: "backend result",
                expected: self.rows * self.cols,
                got,
            }
        })
    }
}

/// Check that a flat buffer holds exactly `rows * cols` values
pub(crate) fn check_len(a: &[f64], rows: usize, cols: usize) -> Result<()> {
    if a.len() != rows * cols {
        return Err(NumericError::DimensionMismatch {
            op: "backend input",
            expected: rows * cols,
            got: a.len(),
        });
    }
    Ok(())
}

/// Borrow a row-major buffer as a matrix view
pub(crate) fn view(a: &[f64], rows: usize, cols: usize) -> Result<ArrayView2<'_, f64>> {
    check_len(a, rows, cols)?;
    ArrayView2::from_shape((rows, cols), a).map_err(|e| NumericError::shape("backend input", e.to_string()))
}
