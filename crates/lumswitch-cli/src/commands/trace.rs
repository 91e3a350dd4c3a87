//! Search trace command.

use crate::TraceArgs;
use anyhow::Result;
use lumswitch_lut::{residual, search_traced, ProbeDecision};

/// Prints every probe of the table search for one luminance.
pub fn run(args: TraceArgs) -> Result<()> {
    let ctx = super::build_context(&args.encoder)?;
    let lum = args.value;

    if let Some(bg) = ctx.background().filter(|bg| bg.matches(lum)) {
        println!(
            "{} is the background luminance: primary {}, secondary {}, no search",
            lum, bg.primary, bg.secondary
        );
        return Ok(());
    }

    let target = ctx.transform().apply(lum);
    println!("input {}  target {}  ({})", lum, target, ctx.transform().describe());

    let (outcome, probes) = search_traced(ctx.lut(), target);
    for (n, probe) in probes.iter().enumerate() {
        let decision = match probe.decision {
            ProbeDecision::Hit => "hit",
            ProbeDecision::Lower => "lower",
            ProbeDecision::Raise => "raise",
            ProbeDecision::Escape => "escape",
        };
        println!(
            "  #{:<2} level {:3}  [{:.9}, {:.9})  {}",
            n + 1,
            probe.level,
            probe.entry.low,
            probe.entry.high,
            decision
        );
    }

    let px = ctx.encode_uncached(lum);
    let res = residual(outcome.entry, target, ctx.btrr());
    let shown = ctx.lut().forward(px.primary as usize, px.secondary, ctx.btrr());
    println!(
        "level {}  raw residual {}  secondary {}  {:?}",
        outcome.level, res.value, px.secondary, outcome.resolution
    );
    println!("forward model {:.9}  error {:+.3e}", shown, shown - target);
    Ok(())
}
