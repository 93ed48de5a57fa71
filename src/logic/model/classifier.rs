//! Classifier capability
//!
//! The engine only sees this trait. Concrete models (ONNX, JSON linear) live
//! next to it and are loaded once per process by `loader`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logic::features::{FeatureVector, LayoutMismatchError};

// ============================================================================
// CLASS LABELS
// ============================================================================

/// Binary organoid state, encoded as the classifier's class label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityState {
    Inactive = 0,
    Active = 1,
}

impl ActivityState {
    pub fn from_label(label: i64) -> Option<Self> {
        match label {
            0 => Some(ActivityState::Inactive),
            1 => Some(ActivityState::Active),
            _ => None,
        }
    }

    pub fn label(&self) -> i64 {
        *self as i64
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityState::Inactive => "INACTIVE",
            ActivityState::Active => "ACTIVE",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ActivityState::Active)
    }
}

impl std::fmt::Display for ActivityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Probability mass per class label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub inactive: f64,
    pub active: f64,
}

impl ClassProbabilities {
    pub fn new(inactive: f64, active: f64) -> Self {
        Self { inactive, active }
    }

    /// Two-class row in label order `[p(0), p(1)]`
    pub fn from_row(row: &[f64]) -> Option<Self> {
        match row {
            [inactive, active, ..] => Some(Self::new(*inactive, *active)),
            _ => None,
        }
    }

    /// Probability assigned to one specific label
    pub fn for_state(&self, state: ActivityState) -> f64 {
        match state {
            ActivityState::Inactive => self.inactive,
            ActivityState::Active => self.active,
        }
    }

    /// Label with the highest probability (ties go to ACTIVE)
    pub fn most_likely(&self) -> ActivityState {
        if self.active >= self.inactive {
            ActivityState::Active
        } else {
            ActivityState::Inactive
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Failure inside a classifier call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ClassifierError(pub String);

/// Failure loading a classifier artifact
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("model runtime error: {0}")]
    Runtime(String),
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trained binary classifier over the 14-column feature layout.
///
/// Implementations must be read-only during inference so one instance can be
/// shared by every caller for the process lifetime.
pub trait Classifier: Send + Sync {
    /// Predicted class label
    fn predict(&self, features: &FeatureVector) -> Result<ActivityState, ClassifierError>;

    /// Probability for each class label; the two values sum to 1.0
    fn predict_probability(&self, features: &FeatureVector) -> Result<ClassProbabilities, ClassifierError>;

    /// Short name for status reporting
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(ActivityState::from_label(0), Some(ActivityState::Inactive));
        assert_eq!(ActivityState::from_label(1), Some(ActivityState::Active));
        assert_eq!(ActivityState::from_label(2), None);
        assert_eq!(ActivityState::Active.label(), 1);
        assert_eq!(ActivityState::Inactive.to_string(), "INACTIVE");
    }

    #[test]
    fn test_state_serializes_uppercase() {
        let json = serde_json::to_string(&ActivityState::Active).unwrap();
        assert_eq!(json, "\"ACTIVE\"");
    }

    #[test]
    fn test_probabilities() {
        let probs = ClassProbabilities::from_row(&[0.7, 0.3]).unwrap();
        assert_eq!(probs.for_state(ActivityState::Inactive), 0.7);
        assert_eq!(probs.for_state(ActivityState::Active), 0.3);
        assert_eq!(probs.most_likely(), ActivityState::Inactive);
        assert!(ClassProbabilities::from_row(&[1.0]).is_none());
    }
}
