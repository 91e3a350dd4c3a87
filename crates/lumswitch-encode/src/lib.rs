//! # lumswitch-encode
//!
//! Luminance to two-channel drive encoding for displays behind a video
//! attenuator.
//!
//! Each pixel's target luminance becomes a primary (red) drive level found
//! by searching the calibration table, plus a secondary (blue) drive that
//! covers the remainder within that level:
//!
//! ```text
//! lum --> background cache --> transform --> search --> residual --> RGBA
//! ```
//!
//! The output pixel is `(primary/255, 0, secondary/255, probes/255)`.
//!
//! # Usage
//!
//! ```rust
//! use lumswitch_encode::{encode_frame, BackgroundPixel, EncoderContext};
//! use lumswitch_lut::CalibrationLut;
//!
//! let ctx = EncoderContext::new(CalibrationLut::gamma(2.2), 127.5)
//!     .unwrap()
//!     .with_derived_background(0.5)
//!     .unwrap();
//!
//! let (pixels, stats) = encode_frame(&ctx, &[0.5, 0.25, 1.0]);
//! assert_eq!(pixels.len(), 3);
//! assert_eq!(stats.background_hits, 1);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - frame encoding on the rayon pool
//!
//! # Dependencies
//!
//! - [`lumswitch_lut`] - table search and residual
//! - [`lumswitch_transfer`] - luminance pre-transforms
//! - [`serde_yaml`] - configuration files
//! - [`tracing`] - frame diagnostics

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod background;
mod config;
mod encoder;
mod error;
mod formatter;
mod frame;

pub use background::BackgroundPixel;
pub use config::{BackgroundSpec, EncoderConfig, LutSource};
pub use encoder::{EncodedPixel, EncoderContext, PixelSource};
pub use error::{EncodeError, EncodeResult};
pub use formatter::{format_pixel, to_rgba8, DRIVE_SCALE};
pub use frame::{encode_frame, encode_frame_into, encode_image, FrameStats};
