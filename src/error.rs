//! Error types for the Seidel solver.
//!
//! This module provides a unified error type [`SeidelError`] that covers
//! all error conditions that can occur while reading a system, reordering
//! it for convergence, and iterating.
//!
//! Running out of iterations is deliberately absent: a Gauss-Seidel run that
//! hits its cap still yields a best-effort [`Solution`](crate::solver::Solution).

use thiserror::Error;

/// Result type alias using [`SeidelError`].
pub type Result<T> = std::result::Result<T, SeidelError>;

/// Unified error type for all Seidel operations.
#[derive(Error, Debug)]
pub enum SeidelError {
    // ============ Reordering Errors ============
    /// No row or column permutation makes the matrix diagonally dominant
    #[error("Diagonal dominance cannot be achieved by permuting rows or columns")]
    DominanceUnattainable,

    /// A zero on the diagonal cannot be removed by row or column swaps
    #[error("Zero diagonal element at position {index} cannot be removed by row or column swaps")]
    DiagonalRepairImpossible { index: usize },

    // ============ Iteration Errors ============
    /// Zero pivot met during a sweep (1-based row)
    #[error("Zero diagonal element in row {row}")]
    PivotZero { row: usize },

    // ============ Validation Errors ============
    /// Invalid argument or configuration value
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Vector or matrix length disagrees with the system size
    #[error("Dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Index sequence is not a bijection on 0..n
    #[error("Invalid permutation: {message}")]
    InvalidPermutation { message: String },

    // ============ Input Errors ============
    /// Malformed numeric token
    #[error("Invalid number '{token}'")]
    InvalidNumber { token: String },

    /// Structural error in a system description
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Error reading a system file
    #[error("Failed to read system file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error talking to the terminal
    #[error("Input error: {message}")]
    InputError { message: String },
}

impl SeidelError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid number error
    pub fn invalid_number(token: impl Into<String>) -> Self {
        Self::InvalidNumber {
            token: token.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(what: &'static str, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            what,
            expected,
            found,
        }
    }

    /// Whether this error is a reportable outcome of the method rather than bad input.
    ///
    /// The CLI exits with status 0 for these, matching "the method does not apply".
    pub fn is_method_limitation(&self) -> bool {
        matches!(
            self,
            Self::DominanceUnattainable | Self::DiagonalRepairImpossible { .. }
        )
    }
}
