//! LU decomposition with partial pivoting
//!
//! Doolittle elimination on an owned copy of the input. Works for square and
//! rectangular matrices and never fails: a zero pivot column is skipped and
//! left for callers to detect on the diagonal.

use crate::backend::{Dispatcher, FlatMatrix, Operation};
use crate::error::{NumericError, Result};
use crate::types::Operand;
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// LU factorization result
///
/// `P·A = L·U`, where `P` is the row permutation recorded in `pivots`.
/// `L` and `U` are not stored separately; see [`lower`](Self::lower) and
/// [`upper`](Self::upper).
#[derive(Debug, Clone, PartialEq)]
pub struct LuDecomposition {
    /// Combined factor: multipliers of L strictly below the diagonal
    /// (the unit diagonal is implicit), U on and above it
    pub lu: Array2<f64>,
    /// Original row index of each row of the factor
    pub pivots: Vec<usize>,
    /// Parity of the row swaps: `+1.0` or `-1.0`
    pub sign: f64,
}

/// Factorize `a` (m x n) with partial row pivoting.
///
/// The input is not modified.
pub fn lu(a: &ArrayView2<'_, f64>) -> LuDecomposition {
    decompose(a.to_owned())
}

/// Factorize an owned working matrix in place
pub(crate) fn decompose(mut work: Array2<f64>) -> LuDecomposition {
    let (m, n) = work.dim();
    let mut pivots: Vec<usize> = (0..m).collect();
    let mut sign = 1.0;

    for j in 0..m.min(n) {
        // Largest magnitude in column j; the first one wins ties
        let mut max_row = j;
        for i in (j + 1)..m {
            if work[[i, j]].abs() > work[[max_row, j]].abs() {
                max_row = i;
            }
        }

        if max_row != j {
            for k in 0..n {
                work.swap([max_row, k], [j, k]);
            }
            pivots.swap(max_row, j);
            sign = -sign;
        }

        let pivot = work[[j, j]];
        if pivot != 0.0 {
            for i in (j + 1)..m {
                let mult = work[[i, j]] / pivot;
                work[[i, j]] = mult;
                for k in (j + 1)..n {
                    let update = mult * work[[j, k]];
                    work[[i, k]] -= update;
                }
            }
        }
    }

    LuDecomposition {
        lu: work,
        pivots,
        sign,
    }
}

impl LuDecomposition {
    pub fn nrows(&self) -> usize {
        self.lu.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.lu.ncols()
    }

    /// Unit lower-trapezoidal factor, m x min(m, n)
    pub fn lower(&self) -> Array2<f64> {
        let (m, n) = self.lu.dim();
        let k = m.min(n);
        Array2::from_shape_fn((m, k), |(i, j)| match i.cmp(&j) {
            std::cmp::Ordering::Greater => self.lu[[i, j]],
            std::cmp::Ordering::Equal => 1.0,
            std::cmp::Ordering::Less => 0.0,
        })
    }

    /// Upper-trapezoidal factor, min(m, n) x n
    pub fn upper(&self) -> Array2<f64> {
        let (m, n) = self.lu.dim();
        let k = m.min(n);
        Array2::from_shape_fn((k, n), |(i, j)| if j >= i { self.lu[[i, j]] } else { 0.0 })
    }

    /// Diagonal of the U factor
    pub fn diagonal(&self) -> Array1<f64> {
        self.lu.diag().to_owned()
    }

    /// Product of the pivots times the permutation sign
    pub fn determinant(&self) -> f64 {
        self.lu.diag().iter().fold(self.sign, |acc, &d| acc * d)
    }

    /// Reorder the rows of `b` the way the factorization reordered `A`
    pub fn permute_rows(&self, b: &ArrayView2<'_, f64>) -> Array2<f64> {
        b.select(Axis(0), &self.pivots)
    }

    /// Whether a pivot is negligible next to the row of `a` it came from.
    ///
    /// Row `i` of the factor is what elimination left of row `pivots[i]` of
    /// `a`. Its pivot counts as zero at or below `k·ε` times the largest
    /// magnitude of that original row, so a large entry in another row never
    /// hides a small but genuine pivot. `a` must be the factorized matrix.
    pub fn has_negligible_pivot(&self, a: &ArrayView2<'_, f64>) -> bool {
        let k = self.nrows().min(self.ncols());
        (0..k).any(|i| {
            let scale = a.row(self.pivots[i]).fold(0.0_f64, |acc, v| acc.max(v.abs()));
            self.lu[[i, i]].abs() <= k as f64 * f64::EPSILON * scale
        })
    }

    /// Whether any pivot of the square part is at or below `tol` in magnitude
    pub fn is_singular(&self, tol: f64) -> bool {
        self.lu.diag().iter().any(|d| d.abs() <= tol)
    }

    /// Encode as the flat backend layout `[sign, pivots..., LU row-major...]`
    pub fn to_flat(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(1 + self.pivots.len() + self.lu.len());
        out.push(self.sign);
        out.extend(self.pivots.iter().map(|&p| p as f64));
        out.extend(self.lu.iter().copied());
        out
    }

    /// Decode the flat backend layout produced by [`to_flat`](Self::to_flat).
    ///
    /// Returns `None` when `flat` does not hold `1 + rows + rows * cols` values.
    pub fn from_flat(flat: &[f64], rows: usize, cols: usize) -> Option<Self> {
        if flat.len() != 1 + rows + rows * cols {
            return None;
        }
        let sign = flat[0];
        let pivots = flat[1..=rows].iter().map(|&p| p as usize).collect();
        let body = &flat[1 + rows..];
        let lu = Array2::from_shape_fn((rows, cols), |(i, j)| body[i * cols + j]);
        Some(Self { lu, pivots, sign })
    }
}

impl Dispatcher {
    /// LU factorization through the backend `lu` entry point.
    ///
    /// # Errors
    ///
    /// [`NumericError::Shape`] for scalars and vectors.
    pub fn lu<'a>(&self, x: impl Into<Operand<'a>>) -> Result<LuDecomposition> {
        let a = match x.into() {
            Operand::Matrix(m) => m,
            other => {
                return Err(NumericError::shape(
                    "lu",
                    format!("input must be a matrix, got a {}", other.kind()),
                ));
            }
        };
        let (rows, cols) = a.dim();

        let flat = FlatMatrix::from_view(&a);
        let out = self
            .select(Operation::Lu, rows.max(cols))
            .lu(flat.as_slice(), rows, cols)?;
        let got = out.len();
        LuDecomposition::from_flat(&out, rows, cols).ok_or(NumericError::DimensionMismatch {
            op: "backend result",
            expected: 1 + rows + rows * cols,
            got,
        })
    }
}
