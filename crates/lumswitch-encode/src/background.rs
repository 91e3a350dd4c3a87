//! Background pixel cache.
//!
//! Most pixels of a psychophysics stimulus sit at the background
//! luminance. The cache stores that one luminance together with its drive
//! pair so those pixels skip the search entirely.
//!
//! Matching is exact float equality on the raw input, before any
//! transform. A value one ulp away takes the normal path.

use crate::formatter::DRIVE_SCALE;
use crate::{EncodeError, EncodeResult, EncoderContext};

/// Cached drive pair for one reference luminance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundPixel {
    /// Raw input luminance that triggers the cache
    pub luminance: f32,
    /// Primary drive value, 0-255
    pub primary: f32,
    /// Secondary drive value, 0-255
    pub secondary: f32,
}

impl BackgroundPixel {
    /// Creates a background pixel from explicit drive values.
    ///
    /// # Errors
    ///
    /// [`EncodeError::InvalidBackground`] if the key is not finite or a
    /// drive value lies outside `[0, 255]`.
    pub fn new(luminance: f32, primary: f32, secondary: f32) -> EncodeResult<Self> {
        if !luminance.is_finite() {
            return Err(EncodeError::InvalidBackground(format!(
                "luminance key {} is not finite",
                luminance
            )));
        }
        for (name, value) in [("primary", primary), ("secondary", secondary)] {
            if !(0.0..=DRIVE_SCALE).contains(&value) {
                return Err(EncodeError::InvalidBackground(format!(
                    "{} drive {} outside [0, 255]",
                    name, value
                )));
            }
        }
        Ok(Self {
            luminance,
            primary,
            secondary,
        })
    }

    /// Computes the drive pair for `luminance` by running the full pipeline
    /// of `ctx` once, ignoring any background already installed there.
    pub fn derive(luminance: f32, ctx: &EncoderContext) -> EncodeResult<Self> {
        ctx.derive_background(luminance)
    }

    /// Returns `true` if `lum` is exactly the cached key.
    #[inline]
    pub fn matches(&self, lum: f32) -> bool {
        lum == self.luminance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_only() {
        let bg = BackgroundPixel::new(0.5, 128.0, 7.0).unwrap();
        assert!(bg.matches(0.5));
        assert!(!bg.matches(f32::from_bits(0.5f32.to_bits() + 1)));
        assert!(!bg.matches(f32::NAN));
    }

    #[test]
    fn test_rejects_out_of_range_drive() {
        assert!(BackgroundPixel::new(0.5, 256.0, 0.0).is_err());
        assert!(BackgroundPixel::new(0.5, 0.0, -1.0).is_err());
        assert!(BackgroundPixel::new(f32::INFINITY, 0.0, 0.0).is_err());
    }
}
