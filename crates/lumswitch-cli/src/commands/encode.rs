//! Per-value encoding command.

use crate::EncodeArgs;
use anyhow::Result;
use lumswitch_encode::{to_rgba8, EncodedPixel, PixelSource};
use lumswitch_lut::Resolution;

/// Encodes each value and prints one line per value.
pub fn run(args: EncodeArgs, verbose: bool) -> Result<()> {
    let ctx = super::build_context(&args.encoder)?;
    if verbose {
        println!(
            "Table {:.6}..{:.6}, btrr {}, transform {}",
            ctx.lut().min(),
            ctx.lut().max(),
            ctx.btrr(),
            ctx.transform().describe()
        );
    }

    for &lum in &args.values {
        let px = ctx.encode(lum);
        if args.rgba8 {
            let [r, g, b, a] = to_rgba8(px.rgba());
            println!("{:<12} {:3} {:3} {:3} {:3}", lum, r, g, b, a);
        } else {
            println!(
                "{:<12} primary {:3}  secondary {:3}  probes {:2}  {}",
                lum,
                px.primary,
                px.secondary,
                px.iterations,
                describe(&px)
            );
        }
    }
    Ok(())
}

/// Short tag for how a pixel was resolved.
pub fn describe(px: &EncodedPixel) -> String {
    let mut tag = match px.source {
        PixelSource::Background => "background".to_string(),
        PixelSource::Search(Resolution::Matched) => "matched".to_string(),
        PixelSource::Search(Resolution::Escaped) => "escaped".to_string(),
        PixelSource::Search(Resolution::Clamped(reason)) => format!("clamped ({:?})", reason),
    };
    if px.degenerate {
        tag.push_str(", degenerate level");
    }
    if px.is_out_of_range() {
        tag.push_str(", secondary out of range");
    }
    tag
}
