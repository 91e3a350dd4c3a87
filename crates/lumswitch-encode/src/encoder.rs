//! Per-pixel encoder.
//!
//! [`EncoderContext`] bundles everything a processing pass reads: the
//! calibration table, the calibration ratio, the luminance transform and
//! the optional background pixel. It is built once per frame, never
//! mutated afterwards, and shared by reference across worker threads.
//!
//! ```text
//! lum --> background? --hit--> cached pair ------------------+
//!            | miss                                          |
//!            v                                               v
//!        transform --> search --> residual --> (primary, secondary, probes)
//! ```

use crate::background::BackgroundPixel;
use crate::formatter::{format_pixel, DRIVE_SCALE};
use crate::{EncodeError, EncodeResult};
use lumswitch_lut::{residual, search, CalibrationLut, Resolution, SearchOutcome};
use lumswitch_transfer::{Identity, LuminanceTransform};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Immutable inputs of a processing pass.
#[derive(Clone)]
pub struct EncoderContext {
    lut: Arc<CalibrationLut>,
    btrr: f32,
    transform: Arc<dyn LuminanceTransform>,
    background: Option<BackgroundPixel>,
}

impl fmt::Debug for EncoderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncoderContext")
            .field("lut_range", &(self.lut.min(), self.lut.max()))
            .field("btrr", &self.btrr)
            .field("transform", &self.transform.describe())
            .field("background", &self.background)
            .finish()
    }
}

/// How an encoded pixel was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelSource {
    /// Background cache hit; no search ran.
    Background,
    /// Table search with the given resolution.
    Search(Resolution),
}

/// Drive values for one pixel, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodedPixel {
    /// Primary (red) drive, 0-255
    pub primary: f32,
    /// Secondary (blue) drive, nominally 0-255
    pub secondary: f32,
    /// Table probes consumed, 0 for background hits
    pub iterations: u32,
    /// Where the values came from
    pub source: PixelSource,
    /// The adopted level had zero width; `secondary` was forced to 0
    pub degenerate: bool,
}

impl EncodedPixel {
    /// Normalized `(R, G, B, A)` output pixel.
    #[inline]
    pub fn rgba(&self) -> [f32; 4] {
        format_pixel(self.primary, self.secondary, self.iterations)
    }

    /// Returns `true` for background cache hits.
    #[inline]
    pub fn is_background(&self) -> bool {
        self.source == PixelSource::Background
    }

    /// Returns `true` if the secondary drive exceeds the 8-bit range.
    #[inline]
    pub fn is_out_of_range(&self) -> bool {
        !(0.0..=DRIVE_SCALE).contains(&self.secondary)
    }
}

impl EncoderContext {
    /// Creates a context with an identity transform and no background.
    ///
    /// # Errors
    ///
    /// [`EncodeError::InvalidRatio`] unless `btrr` is finite and in `(0, 255]`.
    /// With a larger ratio the secondary drive leaves the 8-bit range.
    pub fn new(lut: CalibrationLut, btrr: f32) -> EncodeResult<Self> {
        if !(btrr.is_finite() && btrr > 0.0 && btrr <= DRIVE_SCALE) {
            return Err(EncodeError::InvalidRatio(btrr));
        }
        Ok(Self {
            lut: Arc::new(lut),
            btrr,
            transform: Arc::new(Identity),
            background: None,
        })
    }

    /// Replaces the luminance transform.
    pub fn with_transform<T>(self, transform: T) -> Self
    where
        T: LuminanceTransform + 'static,
    {
        self.with_shared_transform(Arc::new(transform))
    }

    /// Replaces the luminance transform with a shared one.
    pub fn with_shared_transform(mut self, transform: Arc<dyn LuminanceTransform>) -> Self {
        self.transform = transform;
        self
    }

    /// Installs an explicit background pixel.
    pub fn with_background(mut self, background: BackgroundPixel) -> Self {
        self.background = Some(background);
        self
    }

    /// Installs a background pixel whose drive pair is computed by running
    /// the full pipeline once for `luminance`.
    pub fn with_derived_background(self, luminance: f32) -> EncodeResult<Self> {
        let background = self.derive_background(luminance)?;
        Ok(self.with_background(background))
    }

    /// Computes the background pixel for `luminance` without installing it.
    pub fn derive_background(&self, luminance: f32) -> EncodeResult<BackgroundPixel> {
        let px = self.encode_uncached(luminance);
        debug!(
            luminance,
            primary = px.primary,
            secondary = px.secondary,
            "derived background pixel"
        );
        BackgroundPixel::new(luminance, px.primary, px.secondary.min(DRIVE_SCALE))
    }

    /// Removes the background pixel.
    pub fn without_background(mut self) -> Self {
        self.background = None;
        self
    }

    /// Calibration table.
    #[inline]
    pub fn lut(&self) -> &CalibrationLut {
        &self.lut
    }

    /// Calibration ratio.
    #[inline]
    pub fn btrr(&self) -> f32 {
        self.btrr
    }

    /// Luminance transform.
    #[inline]
    pub fn transform(&self) -> &dyn LuminanceTransform {
        self.transform.as_ref()
    }

    /// Background pixel, if any.
    #[inline]
    pub fn background(&self) -> Option<&BackgroundPixel> {
        self.background.as_ref()
    }

    /// Encodes one raw luminance sample.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lumswitch_encode::EncoderContext;
    /// use lumswitch_lut::CalibrationLut;
    ///
    /// let ctx = EncoderContext::new(CalibrationLut::linear(), 10.0).unwrap();
    /// let px = ctx.encode(5.5 / 256.0);
    /// assert_eq!((px.primary, px.secondary), (5.0, 5.0));
    /// ```
    #[inline]
    pub fn encode(&self, lum: f32) -> EncodedPixel {
        if let Some(bg) = &self.background {
            if bg.matches(lum) {
                return EncodedPixel {
                    primary: bg.primary,
                    secondary: bg.secondary,
                    iterations: 0,
                    source: PixelSource::Background,
                    degenerate: false,
                };
            }
        }
        self.encode_uncached(lum)
    }

    /// Encodes one sample and returns the normalized output pixel.
    #[inline]
    pub fn encode_rgba(&self, lum: f32) -> [f32; 4] {
        self.encode(lum).rgba()
    }

    /// Search and residual, bypassing the background cache.
    pub fn encode_uncached(&self, lum: f32) -> EncodedPixel {
        let target = self.transform.apply(lum);
        let outcome = search(&self.lut, target);
        self.finish(outcome, target)
    }

    /// Runs the residual step on a finished search.
    fn finish(&self, outcome: SearchOutcome, target: f32) -> EncodedPixel {
        let res = residual(outcome.entry, target, self.btrr);
        let secondary = if outcome.is_clamped() {
            // NaN targets end here too.
            if res.value.is_nan() {
                0.0
            } else {
                res.value.clamp(0.0, self.btrr.round())
            }
        } else {
            res.value
        };
        EncodedPixel {
            primary: outcome.level as f32,
            secondary,
            iterations: outcome.iterations,
            source: PixelSource::Search(outcome.resolution),
            degenerate: res.degenerate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use lumswitch_lut::{ClampReason, MAX_ITERATIONS, MAX_PROBES};

    fn linear_ctx(btrr: f32) -> EncoderContext {
        EncoderContext::new(CalibrationLut::linear(), btrr).unwrap()
    }

    #[test]
    fn test_btrr_validation() {
        for bad in [0.0, -1.0, 256.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                EncoderContext::new(CalibrationLut::linear(), bad),
                Err(EncodeError::InvalidRatio(_))
            ));
        }
        assert!(EncoderContext::new(CalibrationLut::linear(), 255.0).is_ok());
    }

    #[test]
    fn test_midpoint_residual() {
        let px = linear_ctx(10.0).encode(5.5 / 256.0);
        assert_eq!(px.primary, 5.0);
        assert_eq!(px.secondary, 5.0);
        assert_eq!(px.source, PixelSource::Search(Resolution::Matched));
        let rgba = px.rgba();
        assert_eq!(rgba[0], 5.0 / 255.0);
        assert_eq!(rgba[1], 0.0);
        assert_eq!(rgba[2], 5.0 / 255.0);
        assert_abs_diff_eq!(
            CalibrationLut::linear().forward(5, px.secondary, 10.0),
            5.5 / 256.0,
            epsilon = 1e-7
        );
    }

    #[test]
    fn test_background_short_circuit_ignores_lut() {
        let bg = BackgroundPixel::new(0.42, 200.0, 33.0).unwrap();
        for lut in [CalibrationLut::linear(), CalibrationLut::gamma(3.0)] {
            let ctx = EncoderContext::new(lut, 100.0).unwrap().with_background(bg);
            let px = ctx.encode(0.42);
            assert!(px.is_background());
            assert_eq!(px.rgba(), [200.0 / 255.0, 0.0, 33.0 / 255.0, 0.0]);
        }
    }

    #[test]
    fn test_background_key_is_raw_luminance() {
        // The transform maps 0.25 onto 0.5; only the raw 0.25 hits the cache.
        let bg = BackgroundPixel::new(0.25, 1.0, 2.0).unwrap();
        let ctx = linear_ctx(100.0)
            .with_transform(|l: f32| l * 2.0)
            .with_background(bg);
        assert!(ctx.encode(0.25).is_background());
        assert!(!ctx.encode(0.5).is_background());
    }

    #[test]
    fn test_derived_background_matches_search() {
        let ctx = EncoderContext::new(CalibrationLut::gamma(2.2), 120.0).unwrap();
        let expected = ctx.encode(0.3);
        let ctx = ctx.with_derived_background(0.3).unwrap();
        let cached = ctx.encode(0.3);
        assert!(cached.is_background());
        assert_eq!((cached.primary, cached.secondary), (expected.primary, expected.secondary));
        assert_eq!(cached.iterations, 0);
    }

    #[test]
    fn test_full_scale_escapes_to_top_level() {
        let px = linear_ctx(100.0).encode(1.0);
        assert_eq!(px.primary, 255.0);
        assert_eq!(px.secondary, 100.0);
        assert_eq!(px.iterations, MAX_PROBES);
        assert_eq!(
            px.source,
            PixelSource::Search(Resolution::Clamped(ClampReason::EscapePastTable))
        );
    }

    #[test]
    fn test_escape_inside_table_keeps_raw_residual() {
        // Table starts at 2.0, so 1.5 misses every level and escapes to level 1.
        let lut = CalibrationLut::from_fn(|i| 2.0 + i as f32).unwrap();
        let px = EncoderContext::new(lut, 10.0).unwrap().encode(1.5);
        assert_eq!(px.source, PixelSource::Search(Resolution::Escaped));
        assert_eq!(px.primary, 1.0);
        assert_eq!(px.iterations, MAX_PROBES);
        // floor((1.5 - 3.0) * 10 / 1 + 0.5); escaped residuals are not clamped.
        assert_abs_diff_eq!(px.secondary, -15.0);
        assert!(px.is_out_of_range());
    }

    #[test]
    fn test_below_table_residual_clamped_to_zero() {
        let lut = CalibrationLut::from_fn(|i| 0.2 + 0.8 * i as f32 / 256.0).unwrap();
        let px = EncoderContext::new(lut, 100.0).unwrap().encode(0.0);
        assert_eq!(px.primary, 0.0);
        assert_eq!(px.secondary, 0.0);
        assert_eq!(px.iterations, MAX_ITERATIONS);
    }

    #[test]
    fn test_degenerate_level_does_not_divide_by_zero() {
        // Levels 10..=12 have zero width; an exhausted escape can land on them.
        let lut = CalibrationLut::from_fn(|i| {
            let i = if (10..=13).contains(&i) { 10 } else { i };
            i as f32 / 256.0
        })
        .unwrap();
        let ctx = EncoderContext::new(lut, 100.0).unwrap();
        for i in 0..=2048 {
            let px = ctx.encode(i as f32 / 2048.0);
            assert!(px.secondary.is_finite());
            assert!(px.iterations <= MAX_PROBES);
        }
    }
}
