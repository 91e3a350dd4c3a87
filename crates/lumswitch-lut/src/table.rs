//! Calibration lookup table.
//!
//! A [`CalibrationLut`] holds the measured luminance produced by each of the
//! 256 primary-channel drive levels, as 257 non-decreasing bounds. Level `i`
//! covers the half-open interval `[bounds[i], bounds[i + 1])`:
//!
//! ```text
//! bounds:  b0    b1    b2          b255   b256
//!          |-----|-----|-- ... ----|------|
//! level:      0     1                255
//! ```
//!
//! Adjacent equal bounds (a degenerate, zero-width level) are accepted; the
//! search still terminates and the residual is guarded.

use crate::{LutError, LutResult};
use tracing::{debug, warn};

/// Number of bounds in a calibration table.
pub const BOUND_COUNT: usize = 257;

/// Number of primary drive levels (intervals) in a calibration table.
pub const LEVEL_COUNT: usize = BOUND_COUNT - 1;

/// Highest valid primary drive level.
pub const MAX_LEVEL: usize = LEVEL_COUNT - 1;

/// One table entry: the luminance interval `[low, high)` of a drive level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LutEntry {
    /// Luminance at the start of the level (inclusive)
    pub low: f32,
    /// Luminance at the start of the next level (exclusive)
    pub high: f32,
}

impl LutEntry {
    /// Creates an entry from its two bounds.
    #[inline]
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// Returns `true` if `low <= lum < high`.
    #[inline]
    pub fn contains(&self, lum: f32) -> bool {
        self.low <= lum && lum < self.high
    }

    /// Interval width `high - low`.
    #[inline]
    pub fn width(&self) -> f32 {
        self.high - self.low
    }

    /// Zero-width interval (equal adjacent bounds).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0)
    }
}

/// Validated 257-bound calibration table.
///
/// # Example
///
/// ```rust
/// use lumswitch_lut::CalibrationLut;
///
/// let lut = CalibrationLut::gamma(2.2);
/// let entry = lut.entry(128);
/// assert!(entry.low < entry.high);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationLut {
    bounds: Vec<f32>,
}

impl CalibrationLut {
    /// Creates a table from raw bounds.
    ///
    /// # Errors
    ///
    /// - [`LutError::InvalidSize`] unless exactly [`BOUND_COUNT`] values are given
    /// - [`LutError::NonFinite`] for NaN or infinite bounds
    /// - [`LutError::NonMonotonic`] if any bound is below its predecessor
    pub fn new(bounds: Vec<f32>) -> LutResult<Self> {
        if bounds.len() != BOUND_COUNT {
            return Err(LutError::InvalidSize {
                expected: BOUND_COUNT,
                found: bounds.len(),
            });
        }

        if let Some((index, &value)) = bounds.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(LutError::NonFinite { index, value });
        }

        for (index, pair) in bounds.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(LutError::NonMonotonic {
                    index: index + 1,
                    previous: pair[0],
                    value: pair[1],
                });
            }
        }

        let lut = Self { bounds };
        let degenerate = lut.degenerate_levels();
        if !degenerate.is_empty() {
            warn!(
                count = degenerate.len(),
                first = degenerate[0],
                "calibration table has zero-width levels"
            );
        }
        debug!(min = lut.min(), max = lut.max(), "calibration table validated");
        Ok(lut)
    }

    /// Creates a table by evaluating `f` at every bound index `0..=256`.
    pub fn from_fn<F>(f: F) -> LutResult<Self>
    where
        F: Fn(usize) -> f32,
    {
        Self::new((0..BOUND_COUNT).map(f).collect())
    }

    /// Linear display model: bound `i` is `i / 256`.
    pub fn linear() -> Self {
        Self {
            bounds: (0..BOUND_COUNT).map(|i| i as f32 / LEVEL_COUNT as f32).collect(),
        }
    }

    /// Power-law display model: bound `i` is `(i / 256)^gamma`.
    ///
    /// Useful for synthetic tables when no photometer measurement exists.
    /// A non-positive or non-finite `gamma` falls back to the linear model.
    pub fn gamma(gamma: f32) -> Self {
        if !(gamma.is_finite() && gamma > 0.0) {
            return Self::linear();
        }
        Self {
            bounds: (0..BOUND_COUNT)
                .map(|i| (i as f32 / LEVEL_COUNT as f32).powf(gamma))
                .collect(),
        }
    }

    /// Raw bounds, [`BOUND_COUNT`] values.
    #[inline]
    pub fn bounds(&self) -> &[f32] {
        &self.bounds
    }

    /// Lowest representable luminance.
    #[inline]
    pub fn min(&self) -> f32 {
        self.bounds[0]
    }

    /// Luminance at the top of the last level.
    #[inline]
    pub fn max(&self) -> f32 {
        self.bounds[LEVEL_COUNT]
    }

    /// Returns the interval of drive level `level`.
    ///
    /// # Panics
    ///
    /// Panics if `level > MAX_LEVEL`.
    #[inline]
    pub fn entry(&self, level: usize) -> LutEntry {
        LutEntry::new(self.bounds[level], self.bounds[level + 1])
    }

    /// Returns the interval of drive level `level`, or `None` past the table.
    #[inline]
    pub fn get(&self, level: usize) -> Option<LutEntry> {
        (level <= MAX_LEVEL).then(|| self.entry(level))
    }

    /// Iterates `(level, entry)` over all 256 levels.
    pub fn entries(&self) -> impl Iterator<Item = (usize, LutEntry)> + '_ {
        self.bounds
            .windows(2)
            .enumerate()
            .map(|(i, w)| (i, LutEntry::new(w[0], w[1])))
    }

    /// Levels whose interval has zero width.
    pub fn degenerate_levels(&self) -> Vec<usize> {
        self.entries()
            .filter(|(_, e)| e.is_degenerate())
            .map(|(i, _)| i)
            .collect()
    }

    /// Predicts the luminance displayed for a drive pair.
    ///
    /// Inverse of the residual step: `low + secondary * (high - low) / btrr`.
    /// `primary` is clamped to [`MAX_LEVEL`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use lumswitch_lut::CalibrationLut;
    ///
    /// let lut = CalibrationLut::linear();
    /// let lum = lut.forward(10, 64.0, 128.0);
    /// assert!((lum - 10.5 / 256.0).abs() < 1e-6);
    /// ```
    pub fn forward(&self, primary: usize, secondary: f32, btrr: f32) -> f32 {
        let entry = self.entry(primary.min(MAX_LEVEL));
        if btrr == 0.0 {
            return entry.low;
        }
        entry.low + secondary * entry.width() / btrr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_bounds() {
        let lut = CalibrationLut::linear();
        assert_eq!(lut.bounds().len(), BOUND_COUNT);
        assert_eq!(lut.min(), 0.0);
        assert_eq!(lut.max(), 1.0);
        assert_relative_eq!(lut.entry(128).low, 0.5);
    }

    #[test]
    fn test_wrong_size_rejected() {
        let err = CalibrationLut::new(vec![0.0; 256]).unwrap_err();
        assert!(matches!(err, LutError::InvalidSize { expected: 257, found: 256 }));
    }

    #[test]
    fn test_non_monotonic_rejected() {
        let mut bounds = CalibrationLut::linear().bounds().to_vec();
        bounds[100] = 0.0;
        let err = CalibrationLut::new(bounds).unwrap_err();
        assert!(matches!(err, LutError::NonMonotonic { index: 100, .. }));
    }

    #[test]
    fn test_nan_rejected() {
        let mut bounds = CalibrationLut::linear().bounds().to_vec();
        bounds[7] = f32::NAN;
        let err = CalibrationLut::new(bounds).unwrap_err();
        assert!(matches!(err, LutError::NonFinite { index: 7, .. }));
    }

    #[test]
    fn test_equal_adjacent_bounds_accepted() {
        let lut = CalibrationLut::from_fn(|i| if i == 11 { 10.0 / 256.0 } else { i as f32 / 256.0 }).unwrap();
        assert_eq!(lut.degenerate_levels(), vec![10]);
        assert!(lut.entry(10).is_degenerate());
    }

    #[test]
    fn test_get_past_table() {
        let lut = CalibrationLut::linear();
        assert!(lut.get(MAX_LEVEL).is_some());
        assert!(lut.get(LEVEL_COUNT).is_none());
    }

    #[test]
    fn test_gamma_is_monotonic() {
        let lut = CalibrationLut::gamma(2.2);
        assert!(CalibrationLut::new(lut.bounds().to_vec()).is_ok());
        assert!(lut.degenerate_levels().is_empty());
        assert_eq!(CalibrationLut::gamma(-1.0), CalibrationLut::linear());
    }

    #[test]
    fn test_forward_endpoints() {
        let lut = CalibrationLut::gamma(2.0);
        let e = lut.entry(40);
        assert_relative_eq!(lut.forward(40, 0.0, 100.0), e.low);
        assert_relative_eq!(lut.forward(40, 100.0, 100.0), e.high, epsilon = 1e-7);
    }
}
