//! Output pixel packing.
//!
//! Drive values are computed in 8-bit drive units (0-255). The output
//! pixel stores them normalized for an 8-bit-per-channel framebuffer:
//!
//! | channel | content |
//! |---------|---------|
//! | R | primary drive / 255 |
//! | G | trigger, always 0 |
//! | B | secondary drive / 255 |
//! | A | probe count / 255 (diagnostic) |
//!
//! No clamping happens here. A drive value outside 0-255 is an upstream
//! problem and shows up in [`FrameStats`](crate::FrameStats).

use lumswitch_core::PixelFormat;

/// Full-scale value of an 8-bit drive channel.
pub const DRIVE_SCALE: f32 = 255.0;

/// Packs drive values and the probe count into a normalized RGBA pixel.
///
/// # Example
///
/// ```rust
/// use lumswitch_encode::format_pixel;
///
/// let px = format_pixel(255.0, 51.0, 0);
/// assert_eq!(px, [1.0, 0.0, 0.2, 0.0]);
/// ```
#[inline]
pub fn format_pixel(primary: f32, secondary: f32, iterations: u32) -> [f32; 4] {
    [
        primary / DRIVE_SCALE,
        0.0,
        secondary / DRIVE_SCALE,
        iterations as f32 / DRIVE_SCALE,
    ]
}

/// Quantizes a normalized pixel to 8 bits per channel.
///
/// Integer drive values survive exactly: `round((v / 255) * 255) == v`.
#[inline]
pub fn to_rgba8(pixel: [f32; 4]) -> [u8; 4] {
    pixel.map(u8::from_f32)
}
