//! Calibration table commands.

use crate::LutCommand;
use anyhow::{bail, Context, Result};
use lumswitch_lut::{write_lum, CalibrationLut, LEVEL_COUNT, MAX_LEVEL};
use std::ops::RangeInclusive;
use std::path::Path;

pub fn run(command: LutCommand, verbose: bool) -> Result<()> {
    match command {
        LutCommand::Validate { input } => {
            let mut failed = 0;
            for path in &input {
                if let Err(e) = validate(path, verbose) {
                    println!("{}: INVALID: {:#}", path.display(), e);
                    failed += 1;
                }
            }
            if failed > 0 {
                bail!("{} of {} tables invalid", failed, input.len());
            }
            Ok(())
        }
        LutCommand::Generate { output, gamma, black, white, title } => {
            let lut = generate(gamma, black, white)?;
            write_lum(&output, &lut, title.as_deref())
                .with_context(|| format!("Failed to save: {}", output.display()))?;
            if verbose {
                println!("Wrote {} (gamma {}, {}..{})", output.display(), gamma, black, white);
            }
            Ok(())
        }
        LutCommand::Inspect { input, levels } => {
            let lut = super::load_lut(&input)?;
            let range = match levels.as_deref() {
                Some(text) => parse_levels(text)?,
                None => 0..=MAX_LEVEL,
            };
            println!("{:>5}  {:>12}  {:>12}  {:>12}", "level", "low", "high", "width");
            for level in range {
                let e = lut.entry(level);
                println!("{:>5}  {:>12.9}  {:>12.9}  {:>12.3e}", level, e.low, e.high, e.width());
            }
            Ok(())
        }
    }
}

fn validate(path: &Path, verbose: bool) -> Result<()> {
    let lut = super::load_lut(path)?;
    let degenerate = lut.degenerate_levels();
    let (narrow, wide) = lut.entries().fold((f32::INFINITY, 0.0f32), |(lo, hi), (_, e)| {
        (lo.min(e.width()), hi.max(e.width()))
    });

    println!(
        "{}: OK  range {:.6}..{:.6}  degenerate levels {}",
        path.display(),
        lut.min(),
        lut.max(),
        degenerate.len()
    );
    if verbose {
        println!("  Narrowest level: {:.3e}", narrow);
        println!("  Widest level:    {:.3e}", wide);
        if !degenerate.is_empty() {
            println!("  Degenerate:      {:?}", degenerate);
        }
    }
    Ok(())
}

/// Power-law table scaled to `[black, white]`.
fn generate(gamma: f32, black: f32, white: f32) -> Result<CalibrationLut> {
    if !(gamma.is_finite() && gamma > 0.0) {
        bail!("gamma must be positive, got {}", gamma);
    }
    if !(black < white) {
        bail!("black {} must be below white {}", black, white);
    }
    let lut = CalibrationLut::from_fn(|i| {
        black + (white - black) * (i as f32 / LEVEL_COUNT as f32).powf(gamma)
    })?;
    Ok(lut)
}

/// Parses `N`, `A..B` or `A..=B`, clamped to valid levels.
fn parse_levels(text: &str) -> Result<RangeInclusive<usize>> {
    let num = |s: &str| -> Result<usize> {
        s.trim()
            .parse()
            .with_context(|| format!("Invalid level range: {}", text))
    };
    let (start, end) = if let Some((a, b)) = text.split_once("..=") {
        (num(a)?, num(b)?)
    } else if let Some((a, b)) = text.split_once("..") {
        let b = num(b)?;
        if b == 0 {
            bail!("Empty level range: {}", text);
        }
        (num(a)?, b - 1)
    } else {
        let n = num(text)?;
        (n, n)
    };
    if start > end || start > MAX_LEVEL {
        bail!("Empty level range: {}", text);
    }
    Ok(start..=end.min(MAX_LEVEL))
}
