//! CLI command implementations

pub mod encode;
pub mod frame;
pub mod lut;
pub mod trace;

use crate::EncoderOpts;
use anyhow::{Context, Result};
use lumswitch_encode::{BackgroundSpec, EncoderConfig, EncoderContext, LutSource};
use std::path::Path;
use tracing::debug;

/// Default calibration ratio when neither a config nor `--btrr` gives one.
const DEFAULT_BTRR: f32 = 127.5;

/// Default display exponent of the synthetic table.
const DEFAULT_GAMMA: f32 = 2.2;

/// Merges the config file (if any) with command-line overrides.
pub fn encoder_config(opts: &EncoderOpts) -> Result<EncoderConfig> {
    let mut config = match &opts.config {
        Some(path) => EncoderConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => EncoderConfig::new(LutSource::Gamma { gamma: DEFAULT_GAMMA }, DEFAULT_BTRR),
    };

    if let Some(path) = &opts.lut {
        // Command-line paths are relative to the current directory.
        config.lut = LutSource::File(std::path::absolute(path)?);
    }
    if let Some(gamma) = opts.gamma {
        config.lut = LutSource::Gamma { gamma };
    }
    if let Some(btrr) = opts.btrr {
        config.btrr = btrr;
    }
    if let Some(transform) = &opts.transform {
        config.transform = transform.clone();
    }
    if let Some(luminance) = opts.background {
        config.background = Some(BackgroundSpec {
            luminance,
            primary: None,
            secondary: None,
        });
    }
    debug!(?config, "encoder options");
    Ok(config)
}

/// Builds the encoder context for a command.
pub fn build_context(opts: &EncoderOpts) -> Result<EncoderContext> {
    encoder_config(opts)?
        .build()
        .context("Invalid encoder configuration")
}

/// Loads a calibration table file.
pub fn load_lut(path: &Path) -> Result<lumswitch_lut::CalibrationLut> {
    lumswitch_lut::read_lum(path).with_context(|| format!("Failed to load table: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumswitch_transfer::TransformSpec;

    fn opts() -> EncoderOpts {
        EncoderOpts {
            config: None,
            lut: None,
            gamma: None,
            btrr: None,
            transform: None,
            background: None,
        }
    }

    #[test]
    fn test_defaults() {
        let config = encoder_config(&opts()).unwrap();
        assert_eq!(config.btrr, DEFAULT_BTRR);
        assert_eq!(config.lut, LutSource::Gamma { gamma: DEFAULT_GAMMA });
        assert!(build_context(&opts()).is_ok());
    }

    #[test]
    fn test_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("enc.yaml");
        std::fs::write(&cfg, "lut: { gamma: 1.8 }\nbtrr: 50\n").unwrap();

        let mut o = opts();
        o.config = Some(cfg);
        o.btrr = Some(20.0);
        o.transform = Some(TransformSpec::Srgb { inverse: false });
        o.background = Some(0.5);

        let config = encoder_config(&o).unwrap();
        assert_eq!(config.lut, LutSource::Gamma { gamma: 1.8 });
        assert_eq!(config.btrr, 20.0);
        let ctx = build_context(&o).unwrap();
        assert_eq!(ctx.background().map(|b| b.luminance), Some(0.5));
    }

    #[test]
    fn test_bad_ratio_is_reported() {
        let mut o = opts();
        o.btrr = Some(0.0);
        assert!(build_context(&o).is_err());
    }
}
