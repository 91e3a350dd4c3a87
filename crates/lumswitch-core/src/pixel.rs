//! Channel storage formats and luminance helpers.
//!
//! Luminance sources arrive as 8-bit, 16-bit or single precision
//! samples. [`PixelFormat`] normalizes all of them to `f32` in `[0, 1]`
//! so the encoder only ever sees one representation.
//!
//! # Used By
//!
//! - [`crate::image::Image`] - buffer storage
//! - `lumswitch-io` - PNG sample decoding
//! - `lumswitch-encode` - drive image quantization

/// Rec.709 luminance coefficient for red channel.
///
/// Used in the standard luminance formula: `Y = 0.2126*R + 0.7152*G + 0.0722*B`
pub const REC709_LUMA_R: f32 = 0.2126;

/// Rec.709 luminance coefficient for green channel.
pub const REC709_LUMA_G: f32 = 0.7152;

/// Rec.709 luminance coefficient for blue channel.
pub const REC709_LUMA_B: f32 = 0.0722;

/// Rec.709 luminance coefficients as an array [R, G, B].
pub const REC709_LUMA: [f32; 3] = [REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B];

/// Calculate Rec.709 luminance from RGB values.
///
/// Used when a luminance stimulus is supplied as an RGB image.
///
/// # Example
///
/// ```rust
/// use lumswitch_core::luminance_rec709;
///
/// let y = luminance_rec709([1.0, 1.0, 1.0]);
/// assert!((y - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn luminance_rec709(rgb: [f32; 3]) -> f32 {
    rgb[0] * REC709_LUMA_R + rgb[1] * REC709_LUMA_G + rgb[2] * REC709_LUMA_B
}

/// Trait for channel storage types.
///
/// Implemented for:
/// - `u8` - 8-bit unsigned (0-255), the drive image format
/// - `u16` - 16-bit unsigned (0-65535), high precision luminance stimuli
/// - `f32` - 32-bit float, the working format
///
/// # Example
///
/// ```rust
/// use lumswitch_core::PixelFormat;
///
/// let byte_val: u8 = 255;
/// assert_eq!(byte_val.to_f32(), 1.0);
///
/// let back: u16 = PixelFormat::from_f32(0.5);
/// assert_eq!(back, 32768);
/// ```
pub trait PixelFormat: Copy + Clone + Default + Send + Sync + PartialOrd + 'static {
    /// Number of bits per channel.
    const BITS: u32;

    /// Convert to f32.
    ///
    /// For integers, normalizes to [0.0, 1.0] range.
    /// For floats, returns the value directly.
    fn to_f32(self) -> f32;

    /// Convert from f32.
    ///
    /// For integers, expects [0.0, 1.0] range, clamps and rounds.
    fn from_f32(v: f32) -> Self;

    /// Zero value.
    fn zero() -> Self;
}

impl PixelFormat for u8 {
    const BITS: u32 = 8;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32 / 255.0
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    #[inline]
    fn zero() -> Self {
        0
    }
}

impl PixelFormat for u16 {
    const BITS: u32 = 16;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32 / 65535.0
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        (v.clamp(0.0, 1.0) * 65535.0).round() as u16
    }

    #[inline]
    fn zero() -> Self {
        0
    }
}

impl PixelFormat for f32 {
    const BITS: u32 = 32;

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }
}
