//! Pure power-law transfer.
//!
//! # Range
//!
//! - Input/Output: [0, 1], non-positive input maps to 0

/// Decode: `v^gamma`.
///
/// # Example
///
/// ```rust
/// use lumswitch_transfer::gamma::gamma_eotf;
///
/// let linear = gamma_eotf(0.5, 2.0);
/// assert!((linear - 0.25).abs() < 1e-6);
/// ```
#[inline]
pub fn gamma_eotf(v: f32, gamma: f32) -> f32 {
    if v <= 0.0 {
        0.0
    } else {
        v.powf(gamma)
    }
}

/// Encode: `l^(1/gamma)`.
#[inline]
pub fn gamma_oetf(l: f32, gamma: f32) -> f32 {
    if l <= 0.0 {
        0.0
    } else {
        l.powf(1.0 / gamma)
    }
}
