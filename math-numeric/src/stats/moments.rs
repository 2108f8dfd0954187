//! Mean, variance, standard deviation and standard scores
//!
//! Variance and standard deviation use Welford's single-pass update, which
//! stays accurate when the mean is large compared to the spread.
//!
//! A scalar input to `varc`, `std` or `zscore` gives `NaN`. Matrices are
//! reduced along [`Dim`]: one value per row or one per column.

use super::reduce::{apply_along, apply_lanes};
use crate::backend::{Backend, Dispatcher, Operation};
use crate::types::{Dim, Flag, Operand, Value};

/// Running count, mean and sum of squared deviations
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Welford {
    n: usize,
    mean: f64,
    m2: f64,
}

impl Welford {
    /// Add one observation
    #[inline]
    pub fn push(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (x - self.mean);
    }

    pub fn count(&self) -> usize {
        self.n
    }

    /// Running mean (`NaN` before the first observation)
    pub fn mean(&self) -> f64 {
        if self.n == 0 { f64::NAN } else { self.mean }
    }

    /// `M2 / (n - ddof)`.
    ///
    /// `NaN` for no observations; a single observation gives `0` for
    /// [`Flag::Population`] and `NaN` for [`Flag::Sample`].
    pub fn variance(&self, flag: Flag) -> f64 {
        match (self.n, flag) {
            (0, _) => f64::NAN,
            (1, Flag::Population) => 0.0,
            (1, Flag::Sample) => f64::NAN,
            (n, flag) => self.m2 / (n - flag.ddof()) as f64,
        }
    }

    pub fn std(&self, flag: Flag) -> f64 {
        self.variance(flag).sqrt()
    }
}

/// Accumulate a sequence of observations
pub fn welford(values: impl IntoIterator<Item = f64>) -> Welford {
    let mut acc = Welford::default();
    for x in values {
        acc.push(x);
    }
    acc
}

/// Standard scores of a slice.
///
/// Empty gives empty, a single element gives `[0]` and a constant slice
/// gives all zeros.
pub(crate) fn zscore_slice(arr: &[f64], flag: Flag) -> Vec<f64> {
    match arr.len() {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let acc = welford(arr.iter().copied());
            let std = acc.std(flag);
            if std == 0.0 {
                vec![0.0; n]
            } else {
                arr.iter().map(|&x| (x - acc.mean()) / std).collect()
            }
        }
    }
}

impl Dispatcher {
    /// Arithmetic mean; a scalar is its own mean and an empty vector gives `NaN`
    pub fn mean<'a>(&self, x: impl Into<Operand<'a>>, dim: Dim) -> Value {
        match x.into() {
            Operand::Scalar(s) => Value::Scalar(s),
            Operand::Vector(v) => {
                let backend = self.select(Operation::Mean, v.len());
                Value::Scalar(backend.mean(&v.to_vec()))
            }
            Operand::Matrix(m) => {
                let backend = self.select(Operation::Mean, m.len());
                Value::Vector(apply_along(&m, dim, |lane| backend.mean(lane)))
            }
        }
    }

    /// Variance with `flag` normalization
    pub fn varc<'a>(&self, x: impl Into<Operand<'a>>, flag: Flag, dim: Dim) -> Value {
        self.reduce(x.into(), Operation::Variance, dim, |backend, lane| {
            backend.variance(lane, flag)
        })
    }

    /// Standard deviation with `flag` normalization
    pub fn std<'a>(&self, x: impl Into<Operand<'a>>, flag: Flag, dim: Dim) -> Value {
        self.reduce(x.into(), Operation::StdDev, dim, |backend, lane| {
            backend.std(lane, flag)
        })
    }

    /// `(x - mean) / std` along `dim`, keeping the shape of `x`
    pub fn zscore<'a>(&self, x: impl Into<Operand<'a>>, flag: Flag, dim: Dim) -> Value {
        match x.into() {
            Operand::Scalar(_) => Value::Scalar(f64::NAN),
            Operand::Vector(v) => {
                let backend = self.select(Operation::ZScore, v.len());
                Value::Vector(backend.zscore(&v.to_vec(), flag).into())
            }
            Operand::Matrix(m) => {
                let backend = self.select(Operation::ZScore, m.len());
                Value::Matrix(apply_lanes(&m, dim, |lane| backend.zscore(lane, flag)))
            }
        }
    }

    fn reduce(
        &self,
        x: Operand<'_>,
        op: Operation,
        dim: Dim,
        f: impl Fn(&dyn Backend, &[f64]) -> f64,
    ) -> Value {
        match x {
            Operand::Scalar(_) => Value::Scalar(f64::NAN),
            Operand::Vector(v) => Value::Scalar(f(self.select(op, v.len()), &v.to_vec())),
            Operand::Matrix(m) => {
                let backend = self.select(op, m.len());
                Value::Vector(apply_along(&m, dim, |lane| f(backend, lane)))
            }
        }
    }
}

/// Mean using the default [`Dispatcher`]
pub fn mean<'a>(x: impl Into<Operand<'a>>, dim: Dim) -> Value {
    Dispatcher::default().mean(x, dim)
}

/// Variance using the default [`Dispatcher`]
pub fn varc<'a>(x: impl Into<Operand<'a>>, flag: Flag, dim: Dim) -> Value {
    Dispatcher::default().varc(x, flag, dim)
}

/// Standard deviation using the default [`Dispatcher`]
pub fn std<'a>(x: impl Into<Operand<'a>>, flag: Flag, dim: Dim) -> Value {
    Dispatcher::default().std(x, flag, dim)
}

/// Standard scores using the default [`Dispatcher`]
pub fn zscore<'a>(x: impl Into<Operand<'a>>, flag: Flag, dim: Dim) -> Value {
    Dispatcher::default().zscore(x, flag, dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    fn scalar(v: Value) -> f64 {
        v.as_scalar().unwrap()
    }

    #[test]
    fn test_welford_edge_cases() {
        assert!(welford([]).variance(Flag::Population).is_nan());
        assert!(welford([]).mean().is_nan());
        assert_eq!(welford([3.0]).variance(Flag::Population), 0.0);
        assert!(welford([3.0]).variance(Flag::Sample).is_nan());
        assert_eq!(welford([1.0, 2.0, 3.0]).count(), 3);
    }

    #[test]
    fn test_welford_large_offset() {
        let base = 1e9;
        let acc = welford([base + 4.0, base + 7.0, base + 13.0, base + 16.0]);
        assert_relative_eq!(acc.variance(Flag::Sample), 30.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean() {
        assert_relative_eq!(scalar(mean(&array![5.0, 6.0, 3.0], Dim::Rows)), 4.666666666666667, epsilon = 1e-12);
        assert_eq!(mean(2.5, Dim::Rows), Value::Scalar(2.5));
        assert!(scalar(mean(&Array1::<f64>::zeros(0), Dim::Rows)).is_nan());

        let m = array![[4.0, 5.0, 6.0], [1.0, 2.0, 3.0]];
        let rows = mean(&m, Dim::Rows).into_vector().unwrap();
        assert_eq!(rows.len(), 2);
        assert_relative_eq!(rows[0], 5.0, epsilon = 1e-12);
        assert_relative_eq!(rows[1], 2.0, epsilon = 1e-12);
        let cols = mean(&m, Dim::Columns).into_vector().unwrap();
        for (v, e) in cols.iter().zip([2.5, 3.5, 4.5]) {
            assert_relative_eq!(*v, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_std() {
        let x = array![5.0, 6.0, 3.0];
        assert_relative_eq!(scalar(std(&x, Flag::Sample, Dim::Rows)), 1.5275252316519465, epsilon = 1e-12);
        assert_relative_eq!(scalar(std(&x, Flag::Population, Dim::Rows)), 1.247219128924647, epsilon = 1e-12);

        let m = array![[4.0, 5.0, 6.0], [1.0, 2.0, 3.0]];
        let rows = std(&m, Flag::Population, Dim::Rows).into_vector().unwrap();
        assert_relative_eq!(rows[0], 0.816496580927726, epsilon = 1e-12);
        assert_relative_eq!(rows[1], 0.816496580927726, epsilon = 1e-12);
        let cols = std(&m, Flag::Sample, Dim::Columns).into_vector().unwrap();
        for c in cols.iter() {
            assert_relative_eq!(*c, 2.1213203435596424, epsilon = 1e-12);
        }

        assert!(scalar(std(1.0, Flag::Sample, Dim::Rows)).is_nan());
    }

    #[test]
    fn test_varc() {
        let x = array![5.0, 6.0, 3.0];
        assert_relative_eq!(scalar(varc(&x, Flag::Sample, Dim::Rows)), 2.3333333333333335, epsilon = 1e-12);
        assert_relative_eq!(scalar(varc(&x, Flag::Population, Dim::Rows)), 1.5555555555555556, epsilon = 1e-12);

        let m = array![[4.0, 5.0, 6.0], [1.0, 2.0, 3.0]];
        assert_eq!(varc(&m, Flag::Sample, Dim::Rows), Value::Vector(array![1.0, 1.0]));
        assert_eq!(varc(&m, Flag::Sample, Dim::Columns), Value::Vector(array![4.5, 4.5, 4.5]));
        assert!(scalar(varc(&array![7.0], Flag::Sample, Dim::Rows)).is_nan());
    }

    #[test]
    fn test_zscore() {
        let z = zscore(&array![1.0, 2.0, 3.0, 4.0, 5.0], Flag::Sample, Dim::Rows)
            .into_vector()
            .unwrap();
        let expected = [-1.2649110640673518, -0.6324555320336759, 0.0, 0.6324555320336759, 1.2649110640673518];
        for (v, e) in z.iter().zip(expected) {
            assert_relative_eq!(*v, e, epsilon = 1e-12);
        }

        let z = zscore(&array![10.0, 20.0, 30.0], Flag::Sample, Dim::Rows);
        assert_eq!(z, Value::Vector(array![-1.0, 0.0, 1.0]));

        let z = zscore(&array![[1.0, 2.0], [3.0, 4.0]], Flag::Sample, Dim::Rows)
            .into_matrix()
            .unwrap();
        let h = std::f64::consts::FRAC_1_SQRT_2;
        for (v, e) in z.iter().zip([-h, h, -h, h]) {
            assert_relative_eq!(*v, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zscore_degenerate() {
        assert_eq!(zscore_slice(&[], Flag::Sample), Vec::<f64>::new());
        assert_eq!(zscore_slice(&[4.0], Flag::Sample), vec![0.0]);
        assert_eq!(zscore_slice(&[2.0, 2.0, 2.0], Flag::Population), vec![0.0; 3]);
        assert!(scalar(zscore(3.0, Flag::Sample, Dim::Rows)).is_nan());
    }

    #[test]
    fn test_backend_and_fallback_agree() {
        let x = array![[2.0, 4.0, 4.0, 4.0], [5.0, 5.0, 7.0, 9.0]];
        let (fast, slow) = (Dispatcher::default(), Dispatcher::fallback());
        for dim in [Dim::Rows, Dim::Columns] {
            let a = fast.mean(&x, dim).into_vector().unwrap();
            let b = slow.mean(&x, dim).into_vector().unwrap();
            for (u, v) in a.iter().zip(b.iter()) {
                assert_relative_eq!(*u, *v, epsilon = 1e-12);
            }
        }
    }
}
