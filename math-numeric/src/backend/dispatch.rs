//! Per-call backend selection
//!
//! The operations themselves live next to their algorithms (`linalg`,
//! `stats`) as `impl Dispatcher` blocks; this module only decides which
//! [`Backend`] runs them.

use super::{Backend, PURE};
use crate::config::DispatchConfig;

/// Backend entry points, as seen by the dispatch policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Multiply,
    Mean,
    Determinant,
    Covariance,
    Inverse,
    Variance,
    StdDev,
    ZScore,
    Lu,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::Multiply => "multiply",
            Operation::Mean => "mean",
            Operation::Determinant => "determinant",
            Operation::Covariance => "covariance",
            Operation::Inverse => "inverse",
            Operation::Variance => "variance",
            Operation::StdDev => "std",
            Operation::ZScore => "zscore",
            Operation::Lu => "lu",
        }
    }
}

/// Chooses between the accelerated backend and the pure fallback.
///
/// Cheap to copy; holds no mutable state. The observable output of every
/// operation is the same whichever backend runs it, within floating-point
/// tolerance.
#[derive(Clone, Copy)]
pub struct Dispatcher {
    accelerated: Option<&'static dyn Backend>,
    config: DispatchConfig,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatchConfig::default())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("accelerated", &self.accelerated.map(|b| b.name()))
            .field("config", &self.config)
            .finish()
    }
}

impl Dispatcher {
    /// Use the accelerated backend compiled into this build, if any
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            accelerated: super::accelerated(),
            config,
        }
    }

    /// Always run the pure implementation
    pub fn fallback() -> Self {
        Self {
            accelerated: None,
            config: DispatchConfig::default(),
        }
    }

    /// Use a specific backend as the accelerated path
    pub fn with_backend(backend: &'static dyn Backend) -> Self {
        Self {
            accelerated: Some(backend),
            config: DispatchConfig::default(),
        }
    }

    /// Replace the configuration, keeping the backend
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Name of the accelerated backend, if one is in use
    pub fn backend_name(&self) -> Option<&'static str> {
        self.accelerated
            .filter(|_| self.config.use_backend)
            .map(|b| b.name())
    }

    /// Whether `op` on an operand of size `n` should go to the accelerated backend.
    ///
    /// Welford moments and LU always run on the fallback.
    pub fn prefers_backend(&self, op: Operation, n: usize) -> bool {
        match op {
            Operation::Inverse => n > self.config.inverse_threshold,
            Operation::Multiply
            | Operation::Mean
            | Operation::Determinant
            | Operation::Covariance => true,
            Operation::Variance | Operation::StdDev | Operation::ZScore | Operation::Lu => false,
        }
    }

    /// Accelerated backend that runs `op` on an operand of size `n`, or
    /// `None` when the fallback runs it
    pub fn accelerated_for(&self, op: Operation, n: usize) -> Option<&'static dyn Backend> {
        match self.accelerated {
            Some(backend) if self.config.use_backend && self.prefers_backend(op, n) => {
                log::debug!("{}: {} backend (n = {})", op.name(), backend.name(), n);
                Some(backend)
            }
            _ => {
                log::debug!("{}: pure-rust fallback (n = {})", op.name(), n);
                None
            }
        }
    }

    /// Backend that runs `op` on an operand of size `n`
    pub fn select(&self, op: Operation, n: usize) -> &'static dyn Backend {
        self.accelerated_for(op, n).unwrap_or(&PURE)
    }
}
