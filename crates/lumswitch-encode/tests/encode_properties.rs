//! Behavioural properties of the encoder over whole tables.

use approx::assert_abs_diff_eq;
use lumswitch_encode::{encode_frame, to_rgba8, BackgroundPixel, EncoderContext, PixelSource};
use lumswitch_lut::{CalibrationLut, Resolution, MAX_ITERATIONS, MAX_PROBES};

/// Strictly increasing table with irregular steps, normalized to `[0, 1]`.
fn irregular_lut(seed: u32) -> CalibrationLut {
    let mut state = seed;
    let mut acc = 0.0f64;
    let mut bounds = vec![0.0f64];
    for _ in 0..256 {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        acc += 0.25 + (state >> 8) as f64 / (1u32 << 24) as f64;
        bounds.push(acc);
    }
    let top = acc;
    CalibrationLut::new(bounds.into_iter().map(|b| (b / top) as f32).collect()).unwrap()
}

fn tables() -> Vec<CalibrationLut> {
    vec![
        CalibrationLut::linear(),
        CalibrationLut::gamma(2.2),
        CalibrationLut::gamma(0.45),
        irregular_lut(7),
        irregular_lut(12345),
    ]
}

fn samples() -> impl Iterator<Item = f32> {
    (0..4096).map(|i| i as f32 / 4096.0)
}

#[test]
fn monotonic_table_matches_within_bound() {
    for lut in tables() {
        let ctx = EncoderContext::new(lut, 100.0).unwrap();
        for lum in samples() {
            let px = ctx.encode(lum);
            assert_eq!(px.source, PixelSource::Search(Resolution::Matched), "lum {}", lum);
            assert!(px.iterations <= MAX_ITERATIONS);
            let entry = ctx.lut().entry(px.primary as usize);
            assert!(entry.low <= lum && lum < entry.high, "lum {} not in {:?}", lum, entry);
        }
    }
}

#[test]
fn full_scale_lands_on_top_level() {
    for lut in tables() {
        let ctx = EncoderContext::new(lut, 64.0).unwrap();
        let px = ctx.encode(1.0);
        assert_eq!(px.primary, 255.0);
        assert_eq!(px.iterations, MAX_PROBES);
        assert_eq!(to_rgba8(px.rgba())[0], 255);
    }
}

#[test]
fn background_bypasses_table() {
    let bg = BackgroundPixel::new(0.3, 17.0, 250.0).unwrap();
    for lut in tables() {
        let ctx = EncoderContext::new(lut, 10.0).unwrap().with_background(bg);
        let rgba = ctx.encode_rgba(0.3);
        assert_eq!(rgba, [17.0 / 255.0, 0.0, 250.0 / 255.0, 0.0]);
    }
}

#[test]
fn forward_model_reproduces_target() {
    for btrr in [1.0, 10.0, 127.5, 255.0] {
        for lut in tables() {
            let ctx = EncoderContext::new(lut, btrr).unwrap();
            for lum in samples() {
                let px = ctx.encode(lum);
                let entry = ctx.lut().entry(px.primary as usize);
                let shown = ctx.lut().forward(px.primary as usize, px.secondary, btrr);
                let step = entry.width() / btrr;
                assert_abs_diff_eq!(shown, lum, epsilon = 0.5 * step + 1e-6);
            }
        }
    }
}

#[test]
fn linear_table_residual_example() {
    // Level 5 spans [5/256, 6/256); the target sits exactly halfway.
    let ctx = EncoderContext::new(CalibrationLut::linear(), 10.0).unwrap();
    let px = ctx.encode(5.5 / 256.0);
    assert_eq!(to_rgba8(px.rgba()), [5, 0, 5, px.iterations as u8]);

    let ctx = EncoderContext::new(CalibrationLut::linear(), 1.0).unwrap();
    let px = ctx.encode(5.5 / 256.0);
    assert_eq!((px.primary, px.secondary), (5.0, 1.0));
}

#[test]
fn near_degenerate_table_terminates() {
    // Long runs of equal and one-ulp-apart bounds.
    let mut bounds = Vec::with_capacity(257);
    let mut v = 0.25f32;
    for i in 0..257 {
        if i % 3 == 0 {
            v = f32::from_bits(v.to_bits() + 1);
        }
        if i > 200 {
            v += 0.01;
        }
        bounds.push(v);
    }
    let lut = CalibrationLut::new(bounds).unwrap();
    let ctx = EncoderContext::new(lut, 255.0).unwrap();
    let odd = [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -1.0, 2.0, 0.25, 0.2500001];
    for lum in samples().chain(odd) {
        let px = ctx.encode(lum);
        assert!(px.iterations <= MAX_PROBES);
        assert!(px.primary <= 255.0);
        assert!(px.secondary.is_finite(), "lum {}", lum);
    }
}

#[test]
fn probes_never_exceed_bound() {
    let ctx = EncoderContext::new(irregular_lut(99), 200.0).unwrap();
    let input: Vec<f32> = (-100..1200).map(|i| i as f32 / 1000.0).collect();
    let (pixels, stats) = encode_frame(&ctx, &input);
    assert!(stats.max_iterations <= MAX_PROBES);
    assert!(pixels.iter().all(|p| p[1] == 0.0 && p[3] <= MAX_PROBES as f32 / 255.0));
}
