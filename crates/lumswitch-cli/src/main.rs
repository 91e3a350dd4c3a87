//! lumswitch - luminance to drive-signal encoder
//!
//! Encodes luminance values and stimulus images into the two-channel drive
//! format of a display behind a video attenuator, and manages the
//! calibration tables that describe such a display.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lumswitch_transfer::TransformSpec;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "lumswitch")]
#[command(author, version, about = "Luminance to two-channel drive encoder")]
#[command(long_about = "
Encodes luminance into (primary, secondary) drive values for a display
calibrated by a 257-bound luminance table.

Examples:
  lumswitch encode 0.25 0.5 1.0 --lut monitor.lum --btrr 127.5
  lumswitch frame stimulus.png -o drive.png --config encoder.yaml
  lumswitch trace 0.3 --gamma 2.2
  lumswitch lut generate -o synthetic.lum --gamma 2.2
  lumswitch lut validate monitor.lum
  lumswitch lut inspect monitor.lum --levels 0..8
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode luminance values and print drive values
    #[command(visible_alias = "e")]
    Encode(EncodeArgs),

    /// Encode a luminance image into a drive image
    #[command(visible_alias = "f")]
    Frame(FrameArgs),

    /// Show every table probe of the search for one luminance
    #[command(visible_alias = "t")]
    Trace(TraceArgs),

    /// Calibration table tools
    Lut(LutArgs),
}

/// Encoder setup shared by every encoding command.
#[derive(Args, Debug, Clone)]
struct EncoderOpts {
    /// YAML encoder configuration; other encoder options override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Calibration table (.lum)
    #[arg(short, long, conflicts_with = "gamma")]
    lut: Option<PathBuf>,

    /// Synthetic power-law table instead of a measured one
    #[arg(short, long)]
    gamma: Option<f32>,

    /// Calibration ratio (secondary drive steps per primary level)
    #[arg(short, long)]
    btrr: Option<f32>,

    /// Luminance pre-transform: identity, srgb, srgb-inverse, gamma:G,
    /// gamma-inverse:G, affine:GAIN[,OFFSET]
    #[arg(short, long)]
    transform: Option<TransformSpec>,

    /// Background luminance; its drive pair is derived from the table
    #[arg(long)]
    background: Option<f32>,
}

#[derive(Args)]
struct EncodeArgs {
    /// Luminance values in [0, 1]
    #[arg(required = true, allow_negative_numbers = true)]
    values: Vec<f32>,

    #[command(flatten)]
    encoder: EncoderOpts,

    /// Print 8-bit RGBA instead of drive values
    #[arg(long)]
    rgba8: bool,
}

#[derive(Args)]
struct FrameArgs {
    /// Input luminance image (PNG)
    input: PathBuf,

    /// Output drive image (PNG, RGBA8)
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    encoder: EncoderOpts,
}

#[derive(Args)]
struct TraceArgs {
    /// Luminance value
    #[arg(allow_negative_numbers = true)]
    value: f32,

    #[command(flatten)]
    encoder: EncoderOpts,
}

#[derive(Args)]
struct LutArgs {
    #[command(subcommand)]
    command: LutCommand,
}

#[derive(Subcommand)]
enum LutCommand {
    /// Check a table file and report degenerate levels
    Validate {
        /// Table files
        #[arg(required = true)]
        input: Vec<PathBuf>,
    },

    /// Write a synthetic power-law table
    Generate {
        /// Output table file
        #[arg(short, long)]
        output: PathBuf,

        /// Display exponent
        #[arg(short, long, default_value = "2.2")]
        gamma: f32,

        /// Luminance of the lowest bound
        #[arg(long, default_value = "0.0")]
        black: f32,

        /// Luminance of the highest bound
        #[arg(long, default_value = "1.0")]
        white: f32,

        /// Title line
        #[arg(long)]
        title: Option<String>,
    },

    /// Print the intervals of a table
    Inspect {
        /// Table file
        input: PathBuf,

        /// Level range, e.g. 0..16 or 250..=255
        #[arg(long)]
        levels: Option<String>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let verbose = cli.verbose > 0;
    match cli.command {
        Commands::Encode(args) => commands::encode::run(args, verbose),
        Commands::Frame(args) => commands::frame::run(args, verbose),
        Commands::Trace(args) => commands::trace::run(args),
        Commands::Lut(args) => commands::lut::run(args.command, verbose),
    }
}
