//! Bounded interval search over a calibration table.
//!
//! Finds the drive level whose interval contains a target luminance by
//! halving `[lower, upper)` from `(0, 256)` with the first probe at 128.
//! Because the table has 256 levels, a monotonic table resolves in at most
//! [`MAX_ITERATIONS`] probes.
//!
//! The search is an explicit state machine:
//!
//! ```text
//!             hit
//! Searching ------------------------------> Found
//!     |  exhausted, last high <= lum
//!     |  or lum >= 1.0
//!     +------------> EscapeProbe --+-------> Found (escaped)
//!     |                            | past table
//!     |  exhausted, otherwise      +-------> Clamped
//!     +----------------------------------> Clamped
//! ```
//!
//! The escape probe exists for `lum == 1.0`: with half-open intervals the
//! top of the table is never contained in any level. An escape past level
//! 255 is clamped to 255 and reported rather than returned out of range.

use crate::table::{CalibrationLut, LutEntry, LEVEL_COUNT, MAX_LEVEL};

/// Maximum ordinary probes before the search is considered exhausted.
pub const MAX_ITERATIONS: u32 = 9;

/// Upper bound on probes including the escape probe.
pub const MAX_PROBES: u32 = MAX_ITERATIONS + 1;

/// Luminance at or above which an exhausted search always escapes.
pub const ESCAPE_LUMINANCE: f32 = 1.0;

/// Mutable bookkeeping of an ongoing search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState {
    /// Inclusive lower level bound
    pub lower: usize,
    /// Exclusive upper level bound
    pub upper: usize,
    /// Level fetched by the next probe
    pub probe: usize,
    /// Probes performed so far
    pub iterations: u32,
}

impl SearchState {
    /// Initial state `(0, 256, 128, 0)`.
    pub const fn new() -> Self {
        Self {
            lower: 0,
            upper: LEVEL_COUNT,
            probe: LEVEL_COUNT / 2,
            iterations: 0,
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a search ended in [`SearchPhase::Clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampReason {
    /// The escape probe pointed past the last level.
    EscapePastTable,
    /// No level matched and the escape condition did not hold. The target
    /// lies below the table or is NaN; the calibration does not cover it.
    Exhausted,
}

/// State of the search state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchPhase {
    /// Ordinary probing.
    Searching(SearchState),
    /// Ordinary probes exhausted; one extra probe at `level`.
    EscapeProbe {
        /// Level to probe
        level: usize,
        /// Probes performed so far
        iterations: u32,
    },
    /// Terminal: a level was adopted.
    Found {
        /// Adopted level
        level: usize,
        /// Its interval
        entry: LutEntry,
        /// Total probes
        iterations: u32,
        /// Adopted by the escape probe rather than a containment hit
        escaped: bool,
    },
    /// Terminal: the level was clamped into range.
    Clamped {
        /// Clamped level
        level: usize,
        /// Its interval
        entry: LutEntry,
        /// Total probes
        iterations: u32,
        /// What forced the clamp
        reason: ClampReason,
    },
}

/// Direction taken after a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeDecision {
    /// The probed interval contains the target.
    Hit,
    /// Target below the interval's upper bound; `upper` moved down.
    Lower,
    /// Target at or above the interval's upper bound; `lower` moved up.
    Raise,
    /// Escape probe adopting the interval unconditionally.
    Escape,
}

/// One probe of a traced search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    /// Probed level
    pub level: usize,
    /// Fetched interval
    pub entry: LutEntry,
    /// Decision taken
    pub decision: ProbeDecision,
}

/// How a search result was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The level's interval contains the target.
    Matched,
    /// Adopted by the escape probe.
    Escaped,
    /// Clamped into the valid range.
    Clamped(ClampReason),
}

/// Result of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Primary drive level, always `<= 255`.
    pub level: u8,
    /// Interval of `level`.
    pub entry: LutEntry,
    /// Probes consumed, at most [`MAX_PROBES`].
    pub iterations: u32,
    /// How the level was obtained.
    pub resolution: Resolution,
}

impl SearchOutcome {
    /// Returns `true` if the calibration did not cover the target.
    #[inline]
    pub fn is_clamped(&self) -> bool {
        matches!(self.resolution, Resolution::Clamped(_))
    }

    /// Returns `true` if the escape probe was taken.
    #[inline]
    pub fn is_escape(&self) -> bool {
        matches!(
            self.resolution,
            Resolution::Escaped | Resolution::Clamped(ClampReason::EscapePastTable)
        )
    }
}

impl SearchPhase {
    /// Returns `true` for `Found` and `Clamped`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Found { .. } | Self::Clamped { .. })
    }

    /// Advances the machine by one probe, reporting it to `on_probe`.
    ///
    /// Terminal phases are returned unchanged.
    pub fn step<F>(self, lut: &CalibrationLut, lum: f32, on_probe: &mut F) -> Self
    where
        F: FnMut(Probe),
    {
        match self {
            Self::Searching(state) => probe(state, lut, lum, on_probe),
            Self::EscapeProbe { level, iterations } => {
                let iterations = iterations + 1;
                match lut.get(level) {
                    Some(entry) => {
                        on_probe(Probe { level, entry, decision: ProbeDecision::Escape });
                        Self::Found { level, entry, iterations, escaped: true }
                    }
                    None => {
                        let entry = lut.entry(MAX_LEVEL);
                        on_probe(Probe { level: MAX_LEVEL, entry, decision: ProbeDecision::Escape });
                        Self::Clamped {
                            level: MAX_LEVEL,
                            entry,
                            iterations,
                            reason: ClampReason::EscapePastTable,
                        }
                    }
                }
            }
            terminal => terminal,
        }
    }

    fn into_outcome(self) -> Option<SearchOutcome> {
        match self {
            Self::Found { level, entry, iterations, escaped } => Some(SearchOutcome {
                level: level as u8,
                entry,
                iterations,
                resolution: if escaped { Resolution::Escaped } else { Resolution::Matched },
            }),
            Self::Clamped { level, entry, iterations, reason } => Some(SearchOutcome {
                level: level as u8,
                entry,
                iterations,
                resolution: Resolution::Clamped(reason),
            }),
            _ => None,
        }
    }
}

fn probe<F>(state: SearchState, lut: &CalibrationLut, lum: f32, on_probe: &mut F) -> SearchPhase
where
    F: FnMut(Probe),
{
    let SearchState { mut lower, mut upper, probe: level, iterations } = state;
    let iterations = iterations + 1;
    let entry = lut.entry(level);

    if entry.contains(lum) {
        on_probe(Probe { level, entry, decision: ProbeDecision::Hit });
        return SearchPhase::Found { level, entry, iterations, escaped: false };
    }

    let decision = if lum < entry.high {
        upper = level;
        ProbeDecision::Lower
    } else {
        lower = level;
        ProbeDecision::Raise
    };
    on_probe(Probe { level, entry, decision });
    let next = (lower + upper) / 2;

    if iterations < MAX_ITERATIONS {
        return SearchPhase::Searching(SearchState { lower, upper, probe: next, iterations });
    }

    if entry.high <= lum || lum >= ESCAPE_LUMINANCE {
        SearchPhase::EscapeProbe { level: next + 1, iterations }
    } else {
        let level = next.min(MAX_LEVEL);
        SearchPhase::Clamped {
            level,
            entry: lut.entry(level),
            iterations,
            reason: ClampReason::Exhausted,
        }
    }
}

fn run<F>(lut: &CalibrationLut, lum: f32, mut on_probe: F) -> SearchOutcome
where
    F: FnMut(Probe),
{
    let mut phase = SearchPhase::Searching(SearchState::new());
    loop {
        if let Some(outcome) = phase.into_outcome() {
            return outcome;
        }
        phase = phase.step(lut, lum, &mut on_probe);
    }
}

/// Finds the drive level whose interval contains `lum`.
///
/// `lum` is the already transformed target luminance. The search never
/// fails; anomalies are reported through [`SearchOutcome::resolution`].
///
/// # Example
///
/// ```rust
/// use lumswitch_lut::{search, CalibrationLut, Resolution};
///
/// let lut = CalibrationLut::linear();
/// let out = search(&lut, 0.3);
/// assert_eq!(out.level, 76);
/// assert_eq!(out.resolution, Resolution::Matched);
/// assert!(out.iterations <= 9);
/// ```
#[inline]
pub fn search(lut: &CalibrationLut, lum: f32) -> SearchOutcome {
    run(lut, lum, |_| {})
}

/// Like [`search`], also returning every probe in order.
pub fn search_traced(lut: &CalibrationLut, lum: f32) -> (SearchOutcome, Vec<Probe>) {
    let mut probes = Vec::with_capacity(MAX_PROBES as usize);
    let outcome = run(lut, lum, |p| probes.push(p));
    (outcome, probes)
}
