//! # lumswitch-lut
//!
//! Calibration tables and the numeric core of the luminance encoder.
//!
//! A display driven through a video attenuator is characterised by the
//! luminance it emits at each of its 256 primary drive levels. This crate
//! stores that measurement and answers two questions for a target luminance:
//!
//! - which primary level contains it ([`search`])
//! - how much secondary drive makes up the remainder ([`residual`])
//!
//! # Usage
//!
//! ```rust
//! use lumswitch_lut::{residual, search, CalibrationLut};
//!
//! let lut = CalibrationLut::gamma(2.2);
//! let hit = search(&lut, 0.25);
//! let blue = residual(hit.entry, 0.25, 120.0);
//!
//! let shown = lut.forward(hit.level as usize, blue.value, 120.0);
//! assert!((shown - 0.25).abs() <= hit.entry.width() / 120.0);
//! ```
//!
//! # File Format
//!
//! - `.lum` - 257 bounds as text ([`lumfile`] module)
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Validation diagnostics
//!
//! # Used By
//!
//! - `lumswitch-encode` - per-pixel encoder
//! - `lumswitch-cli` - table management commands

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod residual;
mod table;
pub mod lumfile;
pub mod search;

pub use error::{LutError, LutResult};
pub use lumfile::{format_lum, parse_lum, read_lum, write_lum};
pub use residual::{residual, round_half_up, Residual};
pub use search::{
    search, search_traced, ClampReason, Probe, ProbeDecision, Resolution, SearchOutcome,
    SearchPhase, SearchState, MAX_ITERATIONS, MAX_PROBES,
};
pub use table::{CalibrationLut, LutEntry, BOUND_COUNT, LEVEL_COUNT, MAX_LEVEL};
