//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while building or loading a calibration LUT.
///
/// All of these are configuration-time failures. Once a
/// [`CalibrationLut`](crate::CalibrationLut) exists, searching it never fails.
#[derive(Debug, Error)]
pub enum LutError {
    /// Wrong number of bounds.
    #[error("invalid LUT size: expected {expected} bounds, found {found}")]
    InvalidSize {
        /// Required bound count
        expected: usize,
        /// Bound count supplied
        found: usize,
    },

    /// A bound is smaller than its predecessor.
    #[error("LUT is not monotonic at index {index}: {value} < {previous}")]
    NonMonotonic {
        /// Index of the offending bound
        index: usize,
        /// Bound at `index - 1`
        previous: f32,
        /// Bound at `index`
        value: f32,
    },

    /// A bound is NaN or infinite.
    #[error("LUT bound {index} is not finite: {value}")]
    NonFinite {
        /// Index of the offending bound
        index: usize,
        /// Offending value
        value: f32,
    },

    /// Parse error when loading LUT files.
    #[error("parse error: {0}")]
    ParseError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
