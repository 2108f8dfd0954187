//! Covariance and correlation
//!
//! Data matrices hold one observation per row and one variable per column;
//! the result is the `cols x cols` covariance between the columns.

use super::moments::welford;
use crate::backend::{Dispatcher, FlatMatrix, Operation};
use crate::error::{NumericError, Result};
use crate::types::{Flag, Operand, Value, require_non_empty};
use ndarray::{Array2, ArrayView1, ArrayView2, AsArray, Axis, Ix2, stack};

/// Centred pairwise sums divided by `rows - ddof`
pub(crate) fn covariance_pairwise(data: &ArrayView2<'_, f64>, flag: Flag) -> Array2<f64> {
    let (rows, cols) = data.dim();
    let denom = rows as f64 - flag.ddof() as f64;
    let means: Vec<f64> = data
        .columns()
        .into_iter()
        .map(|c| c.sum() / rows as f64)
        .collect();

    let mut out = Array2::zeros((cols, cols));
    for i in 0..cols {
        for j in i..cols {
            let mut acc = 0.0;
            for k in 0..rows {
                acc += (data[[k, i]] - means[i]) * (data[[k, j]] - means[j]);
            }
            let value = acc / denom;
            out[[i, j]] = value;
            out[[j, i]] = value;
        }
    }
    out
}

/// `r_ij = c_ij / sqrt(c_ii · c_jj)`
fn normalize(cov: Array2<f64>) -> Array2<f64> {
    let sigma: Vec<f64> = cov.diag().iter().map(|v| v.sqrt()).collect();
    let mut corr = cov;
    for ((i, j), v) in corr.indexed_iter_mut() {
        *v /= sigma[i] * sigma[j];
    }
    corr
}

impl Dispatcher {
    /// Covariance.
    ///
    /// A vector (or a scalar) gives its variance; a matrix gives the
    /// covariance between its columns.
    ///
    /// # Errors
    ///
    /// [`NumericError::InvalidArgument`] for an empty matrix.
    pub fn cov<'a>(&self, x: impl Into<Operand<'a>>, flag: Flag) -> Result<Value> {
        match x.into() {
            Operand::Scalar(s) => Ok(Value::Scalar(welford([s]).variance(flag))),
            Operand::Vector(v) => {
                let backend = self.select(Operation::Variance, v.len());
                Ok(Value::Scalar(backend.variance(&v.to_vec(), flag)))
            }
            Operand::Matrix(m) => self.cov_matrix(&m, flag).map(Value::Matrix),
        }
    }

    fn cov_matrix(&self, data: &ArrayView2<'_, f64>, flag: Flag) -> Result<Array2<f64>> {
        require_non_empty(data, "cov")?;
        let (rows, cols) = data.dim();

        let flat = FlatMatrix::from_view(data);
        let out = self
            .select(Operation::Covariance, cols)
            .covariance(flat.as_slice(), rows, cols, flag)?;
        FlatMatrix::new(out, cols, cols).into_array()
    }

    /// `2 x 2` covariance of two equal-length series
    ///
    /// # Errors
    ///
    /// - [`NumericError::DimensionMismatch`] if the lengths differ
    /// - [`NumericError::InvalidArgument`] if both are empty
    pub fn cov_pair<'a, 'b>(
        &self,
        x: impl AsArray<'a, f64>,
        y: impl AsArray<'b, f64>,
        flag: Flag,
    ) -> Result<Array2<f64>> {
        let data = pair(x.into(), y.into())?;
        self.cov_matrix(&data.view(), flag)
    }

    /// Correlation coefficients between the columns of a data matrix
    ///
    /// # Errors
    ///
    /// [`NumericError::InvalidArgument`] for an empty matrix.
    pub fn corrcoef<'a>(&self, x: impl AsArray<'a, f64, Ix2>, flag: Flag) -> Result<Array2<f64>> {
        let data: ArrayView2<'a, f64> = x.into();
        self.cov_matrix(&data, flag).map(normalize)
    }

    /// `2 x 2` correlation matrix of two equal-length series
    ///
    /// # Errors
    ///
    /// Same as [`cov_pair`](Self::cov_pair).
    pub fn corrcoef_pair<'a, 'b>(
        &self,
        x: impl AsArray<'a, f64>,
        y: impl AsArray<'b, f64>,
        flag: Flag,
    ) -> Result<Array2<f64>> {
        self.cov_pair(x, y, flag).map(normalize)
    }
}

/// Two series as the columns of one data matrix
fn pair(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Result<Array2<f64>> {
    if x.len() != y.len() {
        return Err(NumericError::DimensionMismatch {
            op: "cov",
            expected: x.len(),
            got: y.len(),
        });
    }
    stack(Axis(1), &[x.view(), y.view()]).map_err(|e| NumericError::shape("cov", e.to_string()))
}

/// Covariance using the default [`Dispatcher`]
pub fn cov<'a>(x: impl Into<Operand<'a>>, flag: Flag) -> Result<Value> {
    Dispatcher::default().cov(x, flag)
}

/// Pairwise covariance using the default [`Dispatcher`]
pub fn cov_pair<'a, 'b>(
    x: impl AsArray<'a, f64>,
    y: impl AsArray<'b, f64>,
    flag: Flag,
) -> Result<Array2<f64>> {
    Dispatcher::default().cov_pair(x, y, flag)
}

/// Correlation coefficients using the default [`Dispatcher`]
pub fn corrcoef<'a>(x: impl AsArray<'a, f64, Ix2>, flag: Flag) -> Result<Array2<f64>> {
    Dispatcher::default().corrcoef(x, flag)
}

/// Pairwise correlation using the default [`Dispatcher`]
pub fn corrcoef_pair<'a, 'b>(
    x: impl AsArray<'a, f64>,
    y: impl AsArray<'b, f64>,
    flag: Flag,
) -> Result<Array2<f64>> {
    Dispatcher::default().corrcoef_pair(x, y, flag)
}
