//! LAPACK-accelerated backend
//!
//! Uses `ndarray-linalg` (getrf/getri) for determinant and inverse when the
//! `native` feature is enabled. The LAPACK provider (OpenBLAS, Netlib, MKL)
//! is chosen by the final binary through `ndarray-linalg` features.

use super::{Backend, flat};
use crate::error::{NumericError, Result};
use ndarray_linalg::{Determinant, Inverse};

/// LAPACK-backed implementation of [`Backend`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LapackBackend;

impl Backend for LapackBackend {
    fn name(&self) -> &'static str {
        "lapack"
    }

    fn inverse(&self, a: &[f64], n: usize) -> Result<Vec<f64>> {
        // getri fails only on an exactly zero pivot
        match flat::view(a, n, n)?.to_owned().inv() {
            Ok(inv) => Ok(inv.iter().copied().collect()),
            Err(_) => Err(NumericError::SingularMatrix),
        }
    }

    fn determinant(&self, a: &[f64], n: usize) -> Result<f64> {
        match flat::view(a, n, n)?.to_owned().det() {
            Ok(det) => Ok(det),
            // getrf reports an exactly singular factor as an error
            Err(_) => Ok(0.0),
        }
    }
}
