//! Error types for encoder configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for encoder operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors raised while configuring an encoder or encoding a frame.
///
/// Encoding a single pixel never fails; only context construction and
/// buffer handling do.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Calibration ratio outside `(0, 255]` or not finite.
    #[error("invalid btrr {0}: must be finite and in (0, 255]")]
    InvalidRatio(f32),

    /// Background pixel description is inconsistent.
    #[error("invalid background pixel: {0}")]
    InvalidBackground(String),

    /// Input and output buffers differ in pixel count.
    #[error("buffer length mismatch: {expected} pixels expected, {found} supplied")]
    LengthMismatch {
        /// Input pixel count
        expected: usize,
        /// Output pixel count
        found: usize,
    },

    /// Config file not found.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: PathBuf,
    },

    /// Calibration table error.
    #[error("LUT error: {0}")]
    Lut(#[from] lumswitch_lut::LutError),

    /// Transform construction error.
    #[error("transform error: {0}")]
    Transfer(#[from] lumswitch_transfer::TransferError),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
