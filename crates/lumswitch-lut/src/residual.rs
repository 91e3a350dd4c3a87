//! Secondary-channel residual.
//!
//! The primary level only gets the luminance to within one interval. The
//! remainder is expressed on the secondary channel, which the video
//! attenuator mixes in at `1 / btrr` of the primary's gain:
//!
//! ```text
//! secondary = floor((lum - low) * btrr / (high - low) + 0.5)
//! ```

use crate::table::LutEntry;

/// Residual of a target luminance within its interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Residual {
    /// Secondary drive value, integer valued.
    pub value: f32,
    /// The interval had zero width; `value` was forced to 0.
    pub degenerate: bool,
}

/// Round half up: `floor(x + 0.5)`.
#[inline]
pub fn round_half_up(x: f32) -> f32 {
    (x + 0.5).floor()
}

/// Computes the secondary drive value for `lum` inside `entry`.
///
/// # Example
///
/// ```rust
/// use lumswitch_lut::{residual, LutEntry};
///
/// let r = residual(LutEntry::new(0.5, 0.6), 0.55, 10.0);
/// assert_eq!(r.value, 5.0);
/// assert!(!r.degenerate);
/// ```
#[inline]
pub fn residual(entry: LutEntry, lum: f32, btrr: f32) -> Residual {
    if entry.is_degenerate() {
        return Residual { value: 0.0, degenerate: true };
    }
    Residual {
        value: round_half_up((lum - entry.low) * btrr / entry.width()),
        degenerate: false,
    }
}
