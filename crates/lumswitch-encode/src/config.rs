//! YAML encoder configuration.
//!
//! ```yaml
//! lut: calibration/monitor3.lum   # relative to this file
//! btrr: 127.5
//! transform:
//!   kind: gamma
//!   gamma: 2.2
//!   inverse: true
//! background:
//!   luminance: 0.5                # drive pair derived from the table
//! ```
//!
//! A synthetic table can stand in for a measured one with
//! `lut: { gamma: 2.2 }`. An explicit background pair is given with
//! `primary` and `secondary` next to `luminance`.

use crate::background::BackgroundPixel;
use crate::encoder::EncoderContext;
use crate::{EncodeError, EncodeResult};
use lumswitch_lut::{read_lum, CalibrationLut};
use lumswitch_transfer::{TransferError, TransformSpec};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the calibration table comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LutSource {
    /// `.lum` file
    File(PathBuf),
    /// Power-law display model
    Gamma {
        /// Display exponent
        gamma: f32,
    },
}

/// Background pixel section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundSpec {
    /// Raw luminance key
    pub luminance: f32,
    /// Explicit primary drive; derived when absent
    #[serde(default)]
    pub primary: Option<f32>,
    /// Explicit secondary drive; derived when absent
    #[serde(default)]
    pub secondary: Option<f32>,
}

/// Encoder configuration as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Calibration table
    pub lut: LutSource,
    /// Calibration ratio
    pub btrr: f32,
    /// Luminance pre-transform
    #[serde(default)]
    pub transform: TransformSpec,
    /// Background pixel
    #[serde(default)]
    pub background: Option<BackgroundSpec>,
    /// Directory relative LUT paths resolve against
    #[serde(skip)]
    working_dir: PathBuf,
}

impl EncoderConfig {
    /// Minimal configuration: identity transform, no background, paths
    /// relative to the current directory.
    pub fn new(lut: LutSource, btrr: f32) -> Self {
        Self {
            lut,
            btrr,
            transform: TransformSpec::Identity,
            background: None,
            working_dir: PathBuf::from("."),
        }
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> EncodeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EncodeError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let working_dir = path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Self::from_yaml_str(&content, working_dir)
    }

    /// Loads configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str, working_dir: PathBuf) -> EncodeResult<Self> {
        let mut config: Self = serde_yaml::from_str(yaml)?;
        config.working_dir = working_dir;
        Ok(config)
    }

    /// Directory relative paths resolve against.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Resolved path of the `.lum` file, if the table comes from one.
    pub fn lut_path(&self) -> Option<PathBuf> {
        match &self.lut {
            LutSource::File(p) => Some(self.resolve(p)),
            LutSource::Gamma { .. } => None,
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    /// Loads or synthesizes the calibration table.
    pub fn load_lut(&self) -> EncodeResult<CalibrationLut> {
        match &self.lut {
            LutSource::File(p) => Ok(read_lum(self.resolve(p))?),
            LutSource::Gamma { gamma } => {
                if !(gamma.is_finite() && *gamma > 0.0) {
                    return Err(TransferError::InvalidParameter {
                        name: "lut.gamma",
                        value: *gamma,
                    }
                    .into());
                }
                Ok(CalibrationLut::gamma(*gamma))
            }
        }
    }

    /// Validates everything and builds the immutable encoder context.
    pub fn build(&self) -> EncodeResult<EncoderContext> {
        let lut = self.load_lut()?;
        let transform = self.transform.build()?;
        let ctx = EncoderContext::new(lut, self.btrr)?.with_shared_transform(transform);

        let ctx = match &self.background {
            None => ctx,
            Some(BackgroundSpec { luminance, primary: Some(p), secondary: Some(s) }) => {
                ctx.with_background(BackgroundPixel::new(*luminance, *p, *s)?)
            }
            Some(BackgroundSpec { luminance, primary: None, secondary: None }) => {
                ctx.with_derived_background(*luminance)?
            }
            Some(_) => {
                return Err(EncodeError::InvalidBackground(
                    "give both primary and secondary, or neither".into(),
                ))
            }
        };
        debug!(?ctx, "encoder configured");
        Ok(ctx)
    }
}
