//! Transfer error types.

use thiserror::Error;

/// Result type for transform construction.
pub type TransferResult<T> = Result<T, TransferError>;

/// Errors raised while building a transform from its description.
#[derive(Debug, Error)]
pub enum TransferError {
    /// A parameter is out of its valid range.
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// Unrecognized transform description.
    #[error("unknown transform '{0}' (expected identity, srgb, srgb-inverse, gamma:<g>, gamma-inverse:<g>, affine:<gain>[,<offset>])")]
    Unknown(String),
}
