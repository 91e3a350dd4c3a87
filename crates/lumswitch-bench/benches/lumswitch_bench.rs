//! Benchmarks for the luminance encoder.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use lumswitch_encode::{encode_frame, EncoderContext};
use lumswitch_lut::{residual, search, CalibrationLut};
use lumswitch_transfer::Srgb;

/// Benchmark the table search alone.
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    let linear = CalibrationLut::linear();
    let gamma = CalibrationLut::gamma(2.2);
    let values: Vec<f32> = (0..10000).map(|i| i as f32 / 10000.0).collect();
    group.throughput(Throughput::Elements(10000));

    group.bench_function("linear", |b| {
        b.iter(|| values.iter().map(|&v| search(&linear, black_box(v)).level).collect::<Vec<_>>())
    });

    group.bench_function("gamma_2.2", |b| {
        b.iter(|| values.iter().map(|&v| search(&gamma, black_box(v)).level).collect::<Vec<_>>())
    });

    group.bench_function("full_scale_escape", |b| {
        b.iter(|| search(&gamma, black_box(1.0)))
    });

    group.bench_function("search_and_residual", |b| {
        b.iter(|| {
            values
                .iter()
                .map(|&v| {
                    let hit = search(&gamma, black_box(v));
                    residual(hit.entry, v, 127.5).value
                })
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

/// Benchmark whole-frame encoding at common resolutions.
fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    group.sample_size(20);

    let ctx = EncoderContext::new(CalibrationLut::gamma(2.2), 127.5)
        .expect("valid ratio")
        .with_derived_background(0.5)
        .expect("valid background");
    let srgb_ctx = ctx.clone().with_transform(Srgb { inverse: false });

    for (w, h) in [(512usize, 512usize), (1920, 1080)] {
        let n = w * h;
        // Half the pixels sit on the background, like a grating on grey.
        let frame: Vec<f32> = (0..n)
            .map(|i| if (i / w) % 2 == 0 { 0.5 } else { (i % w) as f32 / w as f32 })
            .collect();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("identity", format!("{}x{}", w, h)), &frame, |b, f| {
            b.iter(|| encode_frame(&ctx, black_box(f)))
        });

        group.bench_with_input(BenchmarkId::new("srgb", format!("{}x{}", w, h)), &frame, |b, f| {
            b.iter(|| encode_frame(&srgb_ctx, black_box(f)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search, bench_frame);
criterion_main!(benches);
