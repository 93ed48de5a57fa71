//! Signal Vector - the 12 simulated biosignal inputs
//!
//! Values come from the control panel sliders. Every field is constrained to
//! [0.0, 1.0]; the classifier was trained only on that range, so anything else
//! is rejected at construction rather than clamped.

use serde::{Deserialize, Serialize};

use super::layout::{FEATURE_LAYOUT, SIGNAL_COUNT};
use crate::logic::error::{EngineError, EngineResult};

/// Indices into the raw signal array, in layout order
pub mod idx {
    pub const AF7: usize = 0;
    pub const TP9: usize = 1;
    pub const AF8: usize = 2;
    pub const TP10: usize = 3;
    pub const ALPHA: usize = 4;
    pub const BETA: usize = 5;
    pub const DELTA: usize = 6;
    pub const M1: usize = 7;
    pub const M2: usize = 8;
    pub const ION1: usize = 9;
    pub const ION2: usize = 10;
    pub const MEMBRANE: usize = 11;
}

/// Slider defaults of the reference control panel
pub const REFERENCE_DEFAULTS: [f64; SIGNAL_COUNT] = [
    0.90, 0.80, 0.90, 0.80, // AF7, TP9, AF8, TP10
    0.95, 0.10, 0.10,       // Alpha, Beta, Delta
    0.90, 0.60,             // M1, M2
    0.90, 0.30,             // Ion1, Ion2
    0.75,                   // Membrane
];

/// Validated, immutable set of raw signals for one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SignalValues", into = "SignalValues")]
pub struct SignalVector {
    values: [f64; SIGNAL_COUNT],
}

impl SignalVector {
    /// Build from values in layout order, rejecting anything outside [0, 1]
    pub fn new(values: [f64; SIGNAL_COUNT]) -> EngineResult<Self> {
        for (i, &value) in values.iter().enumerate() {
            check_range(FEATURE_LAYOUT[i], value)?;
        }
        Ok(Self { values })
    }

    /// The control panel's initial slider positions
    pub fn reference_defaults() -> Self {
        Self { values: REFERENCE_DEFAULTS }
    }

    /// Return a copy with one named signal replaced
    pub fn with_signal(self, name: &str, value: f64) -> EngineResult<Self> {
        let index = signal_index(name).ok_or_else(|| EngineError::UnknownSignal(name.to_string()))?;
        check_range(FEATURE_LAYOUT[index], value)?;

        let mut values = self.values;
        values[index] = value;
        Ok(Self { values })
    }

    pub fn as_array(&self) -> &[f64; SIGNAL_COUNT] {
        &self.values
    }

    /// Get signal by name (case-sensitive, layout spelling)
    pub fn get(&self, name: &str) -> Option<f64> {
        signal_index(name).map(|i| self.values[i])
    }

    pub fn af7(&self) -> f64 { self.values[idx::AF7] }
    pub fn tp9(&self) -> f64 { self.values[idx::TP9] }
    pub fn af8(&self) -> f64 { self.values[idx::AF8] }
    pub fn tp10(&self) -> f64 { self.values[idx::TP10] }
    pub fn alpha(&self) -> f64 { self.values[idx::ALPHA] }
    pub fn beta(&self) -> f64 { self.values[idx::BETA] }
    pub fn delta(&self) -> f64 { self.values[idx::DELTA] }
    pub fn m1(&self) -> f64 { self.values[idx::M1] }
    pub fn m2(&self) -> f64 { self.values[idx::M2] }
    pub fn ion1(&self) -> f64 { self.values[idx::ION1] }
    pub fn ion2(&self) -> f64 { self.values[idx::ION2] }
    pub fn membrane(&self) -> f64 { self.values[idx::MEMBRANE] }
}

impl Default for SignalVector {
    fn default() -> Self {
        Self::reference_defaults()
    }
}

impl TryFrom<[f64; SIGNAL_COUNT]> for SignalVector {
    type Error = EngineError;

    fn try_from(values: [f64; SIGNAL_COUNT]) -> EngineResult<Self> {
        Self::new(values)
    }
}

fn signal_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT[..SIGNAL_COUNT].iter().position(|&n| n == name)
}

fn check_range(field: &'static str, value: f64) -> EngineResult<()> {
    // NaN fails `contains` as well
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::InvalidInput { field, value })
    }
}

// ============================================================================
// WIRE FORM
// ============================================================================

/// Named form used for JSON input/output. Missing fields take the reference
/// slider defaults; names outside the layout are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignalValues {
    #[serde(rename = "AF7")]
    pub af7: f64,
    #[serde(rename = "TP9")]
    pub tp9: f64,
    #[serde(rename = "AF8")]
    pub af8: f64,
    #[serde(rename = "TP10")]
    pub tp10: f64,
    #[serde(rename = "Alpha")]
    pub alpha: f64,
    #[serde(rename = "Beta")]
    pub beta: f64,
    #[serde(rename = "Delta")]
    pub delta: f64,
    #[serde(rename = "M1")]
    pub m1: f64,
    #[serde(rename = "M2")]
    pub m2: f64,
    #[serde(rename = "Ion1")]
    pub ion1: f64,
    #[serde(rename = "Ion2")]
    pub ion2: f64,
    #[serde(rename = "Membrane")]
    pub membrane: f64,
}

impl SignalValues {
    fn to_array(self) -> [f64; SIGNAL_COUNT] {
        [
            self.af7, self.tp9, self.af8, self.tp10,
            self.alpha, self.beta, self.delta,
            self.m1, self.m2, self.ion1, self.ion2, self.membrane,
        ]
    }

    fn from_array(v: [f64; SIGNAL_COUNT]) -> Self {
        Self {
            af7: v[0], tp9: v[1], af8: v[2], tp10: v[3],
            alpha: v[4], beta: v[5], delta: v[6],
            m1: v[7], m2: v[8], ion1: v[9], ion2: v[10], membrane: v[11],
        }
    }
}

impl Default for SignalValues {
    fn default() -> Self {
        Self::from_array(REFERENCE_DEFAULTS)
    }
}

impl TryFrom<SignalValues> for SignalVector {
    type Error = EngineError;

    fn try_from(values: SignalValues) -> EngineResult<Self> {
        Self::new(values.to_array())
    }
}

impl From<SignalVector> for SignalValues {
    fn from(signals: SignalVector) -> Self {
        Self::from_array(signals.values)
    }
}

// ============================================================================
// TESTS
// ============================================================================
