//! # lumswitch-transfer
//!
//! Luminance pre-transforms applied before the calibration table search.
//!
//! The encoder treats the transform as an opaque strategy: anything
//! implementing [`LuminanceTransform`] (including a plain closure) can be
//! injected. Stock transforms cover the usual cases:
//!
//! | Transform | Mapping |
//! |-----------|---------|
//! | [`Identity`] | `l` |
//! | [`Gamma`] | `l^g` or `l^(1/g)` |
//! | [`Srgb`] | sRGB EOTF or OETF |
//! | [`Affine`] | `gain * l + offset` |
//!
//! Configuration files describe a transform with [`TransformSpec`].
//!
//! # Usage
//!
//! ```rust
//! use lumswitch_transfer::{LuminanceTransform, TransformSpec};
//!
//! let t = "gamma:2.0".parse::<TransformSpec>().unwrap().build().unwrap();
//! assert!((t.apply(0.5) - 0.25).abs() < 1e-6);
//!
//! let halve = |l: f32| l * 0.5;
//! assert_eq!(halve.apply(0.5), 0.25);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod gamma;
pub mod srgb;
mod error;
mod description;

pub use error::{TransferError, TransferResult};
pub use description::TransformSpec;

/// Scalar luminance transform applied to every pixel before the search.
///
/// Implementations must be pure: the same input always maps to the same
/// output, and they are called concurrently from many threads.
pub trait LuminanceTransform: Send + Sync {
    /// Maps a luminance value.
    fn apply(&self, lum: f32) -> f32;

    /// Short human-readable description.
    fn describe(&self) -> String {
        "custom".into()
    }
}

impl<F> LuminanceTransform for F
where
    F: Fn(f32) -> f32 + Send + Sync,
{
    #[inline]
    fn apply(&self, lum: f32) -> f32 {
        self(lum)
    }
}

/// Pass-through transform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Identity;

impl LuminanceTransform for Identity {
    #[inline]
    fn apply(&self, lum: f32) -> f32 {
        lum
    }

    fn describe(&self) -> String {
        "identity".into()
    }
}

/// Power-law transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gamma {
    /// Exponent, > 0
    pub gamma: f32,
    /// Apply `l^(1/gamma)` instead of `l^gamma`
    pub inverse: bool,
}

impl LuminanceTransform for Gamma {
    #[inline]
    fn apply(&self, lum: f32) -> f32 {
        if self.inverse {
            gamma::gamma_oetf(lum, self.gamma)
        } else {
            gamma::gamma_eotf(lum, self.gamma)
        }
    }

    fn describe(&self) -> String {
        if self.inverse {
            format!("gamma 1/{}", self.gamma)
        } else {
            format!("gamma {}", self.gamma)
        }
    }
}

/// sRGB transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Srgb {
    /// Encode (OETF) instead of decode (EOTF)
    pub inverse: bool,
}

impl LuminanceTransform for Srgb {
    #[inline]
    fn apply(&self, lum: f32) -> f32 {
        if self.inverse {
            srgb::oetf(lum)
        } else {
            srgb::eotf(lum)
        }
    }

    fn describe(&self) -> String {
        if self.inverse { "srgb encode" } else { "srgb decode" }.into()
    }
}

/// Linear rescale `gain * l + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    /// Multiplier
    pub gain: f32,
    /// Additive offset
    pub offset: f32,
}

impl LuminanceTransform for Affine {
    #[inline]
    fn apply(&self, lum: f32) -> f32 {
        self.gain * lum + self.offset
    }

    fn describe(&self) -> String {
        format!("affine {} * l + {}", self.gain, self.offset)
    }
}
