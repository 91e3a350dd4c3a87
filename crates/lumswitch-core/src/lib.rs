//! # lumswitch-core
//!
//! Core types shared by every lumswitch crate.
//!
//! - [`Image`] - Interleaved pixel buffer used for luminance input and drive output
//! - [`PixelFormat`] - Trait over channel storage types (u8, u16, f32)
//! - [`luminance_rec709`] - Luma of an RGB sample, for colour luminance sources
//! - [`Error`] - Error type for buffer construction
//!
//! ## Crate Structure
//!
//! ```text
//! lumswitch-core (this crate)
//!    ^
//!    |
//!    +-- lumswitch-lut (calibration table, search, residual)
//!    +-- lumswitch-encode (per-pixel encoder, frame encoder)
//!    +-- lumswitch-io (PNG input/output)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;

pub use error::{Error, Result};
pub use image::{Image, LuminanceImage, DriveImage};
pub use pixel::{luminance_rec709, PixelFormat, REC709_LUMA, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R};

/// Prelude module for convenient imports.
///
/// ```
/// use lumswitch_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::{DriveImage, Image, LuminanceImage};
    pub use crate::pixel::{luminance_rec709, PixelFormat};
}
