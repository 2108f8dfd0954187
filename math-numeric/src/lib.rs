//! Dense linear algebra and moment statistics on `f64` arrays
//!
//! This crate provides the numerical core that higher-level quantitative
//! formulas are built on: LU factorization with partial pivoting,
//! determinant, inverse, linear solves, matrix products, and
//! mean/variance/covariance reductions.
//!
//! # Features
//!
//! - **LU**: Doolittle with partial pivoting, square and rectangular inputs
//! - **Solvers**: `linsolve`, `inv`, `mldivide`, `mrdivide`
//! - **Moments**: Welford variance and standard deviation, z-scores,
//!   covariance and correlation, row-wise or column-wise
//! - **Backends**: an accelerated backend (nalgebra by default, LAPACK with
//!   the `native` feature) with a pure-Rust fallback that gives the same
//!   results within floating-point tolerance
//!
//! # Example
//!
//! ```
//! use math_numeric::{Dim, Flag, det, inv, linsolve, std};
//! use ndarray::array;
//!
//! let a = array![[1.0, 1.0, -1.0], [1.0, -2.0, 3.0], [2.0, 3.0, 1.0]];
//! let b = array![5.0, 6.0, 3.0];
//!
//! let x = linsolve(&a, &b)?.into_vector().unwrap();
//! assert!((x[0] - 5.846153846153846).abs() < 1e-12);
//!
//! assert!((det(&a)? - -13.0).abs() < 1e-12);
//! assert!(inv(&array![[1.0, 2.0], [2.0, 4.0]]).is_err());
//!
//! let s = std(&array![5.0, 6.0, 3.0], Flag::Sample, Dim::Rows);
//! assert!((s.as_scalar().unwrap() - 1.5275252316519465).abs() < 1e-12);
//! # Ok::<(), math_numeric::NumericError>(())
//! ```
//!
//! Every free function uses [`Dispatcher::default`]. Build a [`Dispatcher`]
//! with a [`DispatchConfig`] to force the fallback, change the inverse size
//! threshold, or change how determinants are snapped to zero.

pub mod backend;
pub mod config;
pub mod error;
pub mod linalg;
pub mod stats;
pub mod types;

pub use backend::{Backend, Dispatcher, Operation, PureBackend};
pub use config::{DispatchConfig, SnapTolerance};
pub use error::{NumericError, Result};
pub use types::{Dim, Flag, Operand, Value};

// Re-export linear algebra
pub use linalg::{LuDecomposition, det, inv, is_singular, linsolve, lu, mldivide, mrdivide, mtimes};

// Re-export statistics
pub use stats::{Welford, corrcoef, corrcoef_pair, cov, cov_pair, mean, std, varc, welford, zscore};
