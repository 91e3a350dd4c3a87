//! Image encoding command.

use crate::FrameArgs;
use anyhow::{Context, Result};
use lumswitch_encode::encode_image;
use std::time::Instant;
use tracing::info;

/// Encodes a luminance image into an RGBA8 drive image.
pub fn run(args: FrameArgs, verbose: bool) -> Result<()> {
    let ctx = super::build_context(&args.encoder)?;

    let image = lumswitch_io::read_luminance(&args.input)
        .with_context(|| format!("Failed to load: {}", args.input.display()))?;
    let (width, height) = image.dimensions();

    let start = Instant::now();
    let (drive, stats) = encode_image(&ctx, &image)?;
    let elapsed = start.elapsed();

    lumswitch_io::write_drive(&args.output, &drive)
        .with_context(|| format!("Failed to save: {}", args.output.display()))?;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        width,
        height,
        ms = elapsed.as_secs_f64() * 1000.0,
        "frame encoded"
    );

    if verbose {
        println!("{} -> {}", args.input.display(), args.output.display());
        println!("  Resolution:      {}x{}", width, height);
        println!("  Background hits: {}", stats.background_hits);
        println!("  Escapes:         {}", stats.escapes);
        println!("  Clamped:         {} ({} uncovered)", stats.clamped, stats.uncovered);
        println!("  Degenerate:      {}", stats.degenerate);
        println!("  Out of range:    {}", stats.out_of_range);
        println!(
            "  Probes:          max {}, mean {:.2}",
            stats.max_iterations,
            stats.mean_iterations()
        );
    }
    Ok(())
}
