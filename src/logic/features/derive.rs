//! Feature Deriver
//!
//! Secondary features computed from the raw signals. Pure, no side effects.

use serde::{Deserialize, Serialize};

use super::signals::SignalVector;

/// Guard added to the Beta denominator so a zero Beta never yields infinity.
/// Kept bit-exact: reproducible tests depend on it.
pub const SYN_RATIO_EPSILON: f64 = 0.0001;

/// Computed features, never set by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    /// AF7 + TP9 + AF8 + TP10, range [0, 4]
    pub total_power: f64,
    /// Alpha / (Beta + eps), unbounded above as Beta → 0
    pub syn_ratio: f64,
}

/// Derive secondary features from a validated signal vector
pub fn derive(signals: &SignalVector) -> DerivedFeatures {
    // Summation order matters for bit parity at the override boundary
    let total_power = signals.af7() + signals.tp9() + signals.af8() + signals.tp10();
    let syn_ratio = signals.alpha() / (signals.beta() + SYN_RATIO_EPSILON);

    DerivedFeatures { total_power, syn_ratio }
}
