//! Engine Types
//!
//! Data structures only, no logic.

use serde::{Deserialize, Serialize};

pub use crate::logic::model::ActivityState;

/// Outcome of one analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub state: ActivityState,
    /// Probability of `state` (0.0 - 1.0)
    pub confidence: f64,
    /// True when the power threshold rule fired instead of the classifier
    pub overridden: bool,
}

impl Verdict {
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}
