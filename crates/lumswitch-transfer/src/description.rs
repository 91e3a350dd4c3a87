//! Serializable transform descriptions.

use crate::{Affine, Gamma, Identity, LuminanceTransform, Srgb, TransferError, TransferResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Describes a stock transform in configuration files.
///
/// ```yaml
/// transform:
///   kind: gamma
///   gamma: 2.2
///   inverse: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformSpec {
    /// [`Identity`]
    #[default]
    Identity,
    /// [`Gamma`]
    Gamma {
        /// Exponent
        gamma: f32,
        /// Use `1/gamma`
        #[serde(default)]
        inverse: bool,
    },
    /// [`Srgb`]
    Srgb {
        /// Encode instead of decode
        #[serde(default)]
        inverse: bool,
    },
    /// [`Affine`]
    Affine {
        /// Multiplier
        gain: f32,
        /// Additive offset
        #[serde(default)]
        offset: f32,
    },
}

impl TransformSpec {
    /// Validates parameters and instantiates the transform.
    pub fn build(&self) -> TransferResult<Arc<dyn LuminanceTransform>> {
        Ok(match *self {
            Self::Identity => Arc::new(Identity),
            Self::Gamma { gamma, inverse } => {
                if !(gamma.is_finite() && gamma > 0.0) {
                    return Err(TransferError::InvalidParameter { name: "gamma", value: gamma });
                }
                Arc::new(Gamma { gamma, inverse })
            }
            Self::Srgb { inverse } => Arc::new(Srgb { inverse }),
            Self::Affine { gain, offset } => {
                if !gain.is_finite() {
                    return Err(TransferError::InvalidParameter { name: "gain", value: gain });
                }
                if !offset.is_finite() {
                    return Err(TransferError::InvalidParameter { name: "offset", value: offset });
                }
                Arc::new(Affine { gain, offset })
            }
        })
    }
}

impl FromStr for TransformSpec {
    type Err = TransferError;

    /// Parses the compact command-line form, e.g. `gamma:2.2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let (name, args) = match lower.split_once(':') {
            Some((name, args)) => (name, Some(args)),
            None => (lower.as_str(), None),
        };
        let number = |text: &str| -> TransferResult<f32> {
            text.trim().parse().map_err(|_| TransferError::Unknown(s.to_string()))
        };

        match (name, args) {
            ("identity" | "none", None) => Ok(Self::Identity),
            ("srgb", None) => Ok(Self::Srgb { inverse: false }),
            ("srgb-inverse", None) => Ok(Self::Srgb { inverse: true }),
            ("gamma", Some(g)) => Ok(Self::Gamma { gamma: number(g)?, inverse: false }),
            ("gamma-inverse", Some(g)) => Ok(Self::Gamma { gamma: number(g)?, inverse: true }),
            ("affine", Some(params)) => {
                let mut parts = params.split(',');
                let gain = number(parts.next().unwrap_or_default())?;
                let offset = parts.next().map(number).transpose()?.unwrap_or(0.0);
                Ok(Self::Affine { gain, offset })
            }
            _ => Err(TransferError::Unknown(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_forms() {
        assert_eq!("identity".parse::<TransformSpec>().unwrap(), TransformSpec::Identity);
        assert_eq!(
            "gamma-inverse:2.4".parse::<TransformSpec>().unwrap(),
            TransformSpec::Gamma { gamma: 2.4, inverse: true }
        );
        assert_eq!(
            "affine:0.5,0.1".parse::<TransformSpec>().unwrap(),
            TransformSpec::Affine { gain: 0.5, offset: 0.1 }
        );
        assert_eq!(
            "SRGB".parse::<TransformSpec>().unwrap(),
            TransformSpec::Srgb { inverse: false }
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("gamma".parse::<TransformSpec>().is_err());
        assert!("gamma:abc".parse::<TransformSpec>().is_err());
        assert!("lanczos".parse::<TransformSpec>().is_err());
    }

    #[test]
    fn test_build_validates_gamma() {
        let err = TransformSpec::Gamma { gamma: 0.0, inverse: false }.build();
        assert!(matches!(err, Err(TransferError::InvalidParameter { name: "gamma", .. })));
    }

    #[test]
    fn test_yaml_tagged() {
        let spec: TransformSpec = serde_yaml::from_str("kind: gamma\ngamma: 2.2\n").unwrap();
        assert_eq!(spec, TransformSpec::Gamma { gamma: 2.2, inverse: false });
        let spec: TransformSpec = serde_yaml::from_str("kind: identity\n").unwrap();
        assert_eq!(spec.build().unwrap().describe(), "identity");
    }
}
