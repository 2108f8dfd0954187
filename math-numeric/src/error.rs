//! Error types for the numeric core

use thiserror::Error;

/// Result type alias using [`NumericError`]
pub type Result<T> = std::result::Result<T, NumericError>;

/// Errors raised by the linear-algebra and moment primitives
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericError {
    /// Operand does not have the shape the operation requires
    #[error("Shape error in '{op}': {reason}")]
    Shape {
        /// The operation that rejected the operand
        op: &'static str,
        /// What was wrong with the shape
        reason: String,
    },

    /// Operand sizes disagree
    #[error("Dimension mismatch in '{op}': expected {expected}, got {got}")]
    DimensionMismatch {
        /// The operation that compared the sizes
        op: &'static str,
        /// Size required by the other operand
        expected: usize,
        /// Size actually supplied
        got: usize,
    },

    /// Zero or negligible pivot encountered
    #[error("Matrix is singular or nearly singular")]
    SingularMatrix,

    /// Argument is missing, empty or out of range
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl NumericError {
    pub(crate) fn shape(op: &'static str, reason: impl Into<String>) -> Self {
        Self::Shape {
            op,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}
