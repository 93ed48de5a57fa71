//! Classification Rules & Thresholds
//!
//! Constants and config only, no classify logic.

use serde::{Deserialize, Serialize};

use crate::logic::error::{EngineError, EngineResult};

// ============================================================================
// OVERRIDE RULE (Constants)
// ============================================================================

/// Total input power at or above which the classifier is bypassed and the
/// verdict is forced to ACTIVE.
///
/// This is a deliberate bypass ("extreme computational load"), NOT a fallback
/// for classifier failure. It fires regardless of every other signal value.
pub const FORCE_POWER_THRESHOLD: f64 = 3.5;

/// Confidence reported for a forced ACTIVE verdict
pub const OVERRIDE_CONFIDENCE: f64 = 0.99;

// ============================================================================
// CONFIGURABLE RULES (for runtime adjustment)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `total_power >= force_power_threshold` forces ACTIVE
    pub force_power_threshold: f64,
    /// Confidence of a forced verdict
    pub override_confidence: f64,
    /// When true, the override cannot produce a verdict without a loaded
    /// classifier; `ClassifierUnavailable` is reported first.
    pub override_requires_classifier: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            force_power_threshold: FORCE_POWER_THRESHOLD,
            override_confidence: OVERRIDE_CONFIDENCE,
            override_requires_classifier: false,
        }
    }
}

impl EngineConfig {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            force_power_threshold: threshold,
            ..Default::default()
        }
    }

    /// Override rule never fires: every verdict comes from the classifier
    pub fn override_disabled() -> Self {
        Self {
            force_power_threshold: f64::INFINITY,
            ..Default::default()
        }
    }

    /// Refuse to classify at all without a model
    pub fn strict() -> Self {
        Self {
            override_requires_classifier: true,
            ..Default::default()
        }
    }

    /// Threshold must be comparable (infinity is allowed and disables the
    /// override); the forced confidence must be a probability.
    pub fn validate(&self) -> EngineResult<()> {
        if self.force_power_threshold.is_nan() {
            return Err(EngineError::InvalidConfig {
                field: "force_power_threshold",
                value: self.force_power_threshold,
            });
        }
        if !(0.0..=1.0).contains(&self.override_confidence) {
            return Err(EngineError::InvalidConfig {
                field: "override_confidence",
                value: self.override_confidence,
            });
        }
        Ok(())
    }

    /// Whether the override rule fires for this power level
    pub fn is_forced(&self, total_power: f64) -> bool {
        total_power >= self.force_power_threshold
    }
}
