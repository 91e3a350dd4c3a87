//! Error types for lumswitch-core operations.
//!
//! Building an image from an existing buffer is the only fallible operation
//! in this crate. Higher-level crates wrap [`Error`] in their own error enums.
//!
//! # Usage
//!
//! ```rust
//! use lumswitch_core::{Error, LuminanceImage, Result};
//!
//! fn stimulus(width: u32, height: u32, samples: Vec<f32>) -> Result<LuminanceImage> {
//!     LuminanceImage::from_data(width, height, samples)
//! }
//!
//! assert!(matches!(
//!     stimulus(2, 2, vec![0.5; 3]),
//!     Err(Error::InvalidDimensions { width: 2, height: 2, .. })
//! ));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building image buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid image dimensions.
    ///
    /// Returned when the data length does not match `width * height * channels`
    /// or the buffer size would overflow.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{DriveImage, LuminanceImage};

    #[test]
    fn test_short_buffer_reports_counts() {
        let err = DriveImage::from_data(3, 2, vec![0.0; 20]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("3x2"), "{msg}");
        assert!(msg.contains("expected 24 elements, got 20"), "{msg}");
    }

    #[test]
    fn test_overflowing_size_is_rejected() {
        let err = DriveImage::from_data(u32::MAX, u32::MAX, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("overflows"), "{err}");
    }

    #[test]
    fn test_exact_buffer_is_accepted() {
        let img = LuminanceImage::from_data(3, 2, vec![0.5; 6]).unwrap();
        assert_eq!(img.pixel(2, 1), [0.5]);
    }
}
