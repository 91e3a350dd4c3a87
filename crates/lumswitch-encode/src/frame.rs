//! Whole-frame encoding.
//!
//! Pixels are independent, so a frame is a data-parallel map over the
//! luminance buffer. With the `parallel` feature (default) the map runs on
//! the rayon pool; per-thread [`FrameStats`] are merged at the end.

use crate::encoder::{EncodedPixel, EncoderContext, PixelSource};
use crate::{EncodeError, EncodeResult};
use lumswitch_core::{DriveImage, LuminanceImage};
use lumswitch_lut::{ClampReason, Resolution};
use tracing::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Smallest pixel run handed to one rayon task.
#[cfg(feature = "parallel")]
const MIN_PIXELS_PER_TASK: usize = 4096;

/// Per-frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Pixels encoded
    pub pixels: usize,
    /// Background cache hits
    pub background_hits: usize,
    /// Pixels resolved by the escape probe
    pub escapes: usize,
    /// Pixels whose level was clamped into range
    pub clamped: usize,
    /// Pixels below the table or NaN (search exhausted without escape)
    pub uncovered: usize,
    /// Pixels adopted on a zero-width level
    pub degenerate: usize,
    /// Secondary drive outside `[0, 255]`
    pub out_of_range: usize,
    /// Largest probe count seen
    pub max_iterations: u32,
    /// Sum of probe counts
    pub total_iterations: u64,
}

impl FrameStats {
    /// Accounts for one encoded pixel.
    #[inline]
    pub fn record(&mut self, px: &EncodedPixel) {
        self.pixels += 1;
        match px.source {
            PixelSource::Background => self.background_hits += 1,
            PixelSource::Search(Resolution::Matched) => {}
            PixelSource::Search(Resolution::Escaped) => self.escapes += 1,
            PixelSource::Search(Resolution::Clamped(ClampReason::EscapePastTable)) => {
                self.escapes += 1;
                self.clamped += 1;
            }
            PixelSource::Search(Resolution::Clamped(ClampReason::Exhausted)) => {
                self.clamped += 1;
                self.uncovered += 1;
            }
        }
        self.degenerate += px.degenerate as usize;
        self.out_of_range += px.is_out_of_range() as usize;
        self.max_iterations = self.max_iterations.max(px.iterations);
        self.total_iterations += u64::from(px.iterations);
    }

    /// Combines counters of two disjoint pixel sets.
    pub fn merge(self, other: Self) -> Self {
        Self {
            pixels: self.pixels + other.pixels,
            background_hits: self.background_hits + other.background_hits,
            escapes: self.escapes + other.escapes,
            clamped: self.clamped + other.clamped,
            uncovered: self.uncovered + other.uncovered,
            degenerate: self.degenerate + other.degenerate,
            out_of_range: self.out_of_range + other.out_of_range,
            max_iterations: self.max_iterations.max(other.max_iterations),
            total_iterations: self.total_iterations + other.total_iterations,
        }
    }

    /// Mean probe count, 0 for an empty frame.
    pub fn mean_iterations(&self) -> f64 {
        if self.pixels == 0 {
            0.0
        } else {
            self.total_iterations as f64 / self.pixels as f64
        }
    }
}

#[inline]
fn encode_into(ctx: &EncoderContext, lum: f32, out: &mut [f32], stats: &mut FrameStats) {
    let px = ctx.encode(lum);
    out.copy_from_slice(&px.rgba());
    stats.record(&px);
}

/// Encodes `input` into an interleaved RGBA buffer.
///
/// # Errors
///
/// [`EncodeError::LengthMismatch`] unless `output.len() == 4 * input.len()`.
pub fn encode_frame_into(
    ctx: &EncoderContext,
    input: &[f32],
    output: &mut [f32],
) -> EncodeResult<FrameStats> {
    if input.len().checked_mul(4) != Some(output.len()) {
        return Err(EncodeError::LengthMismatch {
            expected: input.len(),
            found: output.len() / 4,
        });
    }
    let stats = encode_slices(ctx, input, output);
    log_stats(&stats);
    Ok(stats)
}

fn log_stats(stats: &FrameStats) {
    debug!(
        pixels = stats.pixels,
        background = stats.background_hits,
        max_iterations = stats.max_iterations,
        "frame encoded"
    );
    if stats.uncovered > 0 {
        warn!(
            uncovered = stats.uncovered,
            pixels = stats.pixels,
            "frame contains luminance outside the calibrated range"
        );
    }
    if stats.out_of_range > 0 {
        warn!(count = stats.out_of_range, "secondary drive exceeds 8-bit range");
    }
}

/// Encodes `input` into `output`, whose length is `4 * input.len()`.
fn encode_slices(ctx: &EncoderContext, input: &[f32], output: &mut [f32]) -> FrameStats {
    #[cfg(feature = "parallel")]
    return output
        .par_chunks_mut(4)
        .zip(input.par_iter())
        .with_min_len(MIN_PIXELS_PER_TASK)
        .fold(FrameStats::default, |mut stats, (out, &lum)| {
            encode_into(ctx, lum, out, &mut stats);
            stats
        })
        .reduce(FrameStats::default, FrameStats::merge);

    #[cfg(not(feature = "parallel"))]
    return output.chunks_mut(4).zip(input).fold(
        FrameStats::default(),
        |mut stats, (out, &lum)| {
            encode_into(ctx, lum, out, &mut stats);
            stats
        },
    );
}

/// Encodes a luminance buffer, returning one RGBA pixel per sample.
pub fn encode_frame(ctx: &EncoderContext, input: &[f32]) -> (Vec<[f32; 4]>, FrameStats) {
    let mut output = vec![[0.0f32; 4]; input.len()];
    let stats = encode_slices(ctx, input, output.as_flattened_mut());
    log_stats(&stats);
    (output, stats)
}

/// Encodes a single-channel luminance image into a drive image.
pub fn encode_image(
    ctx: &EncoderContext,
    image: &LuminanceImage,
) -> EncodeResult<(DriveImage, FrameStats)> {
    let (width, height) = image.dimensions();
    let mut drive = DriveImage::new(width, height);
    let stats = encode_frame_into(ctx, image.data(), drive.data_mut())?;
    Ok((drive, stats))
}
