//! Linear (logistic) classifier persisted as JSON
//!
//! Lightweight alternative to the ONNX artifact: weights and intercept of a
//! logistic regression trained on the same 14-column layout.
//!
//! ```json
//! {
//!   "feature_version": 1,
//!   "layout_hash": 123456789,
//!   "weights": [ ...14 values... ],
//!   "intercept": -2.5,
//!   "decision_threshold": 0.5
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::classifier::{ActivityState, ClassProbabilities, Classifier, ClassifierError, ModelError};
use crate::logic::features::layout::{layout_hash, validate_layout, FEATURE_COUNT, FEATURE_VERSION};
use crate::logic::features::FeatureVector;

fn default_decision_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub feature_version: u8,
    pub layout_hash: u32,
    pub weights: Vec<f64>,
    pub intercept: f64,
    /// P(active) at or above this predicts ACTIVE
    #[serde(default = "default_decision_threshold")]
    pub decision_threshold: f64,
}

impl LinearClassifier {
    /// Build for the current layout
    pub fn new(weights: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            weights: weights.to_vec(),
            intercept,
            decision_threshold: default_decision_threshold(),
        }
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_slice(bytes)?;
        model.check()?;
        Ok(model)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check(&self) -> Result<(), ModelError> {
        validate_layout(self.feature_version, self.layout_hash)?;

        if self.weights.len() != FEATURE_COUNT {
            return Err(ModelError::InvalidModel(format!(
                "expected {} weights, got {}",
                FEATURE_COUNT,
                self.weights.len()
            )));
        }
        if !self.weights.iter().all(|w| w.is_finite()) || !self.intercept.is_finite() {
            return Err(ModelError::InvalidModel("non-finite coefficient".to_string()));
        }
        if !(self.decision_threshold > 0.0 && self.decision_threshold < 1.0) {
            return Err(ModelError::InvalidModel(format!(
                "decision threshold {} outside (0, 1)",
                self.decision_threshold
            )));
        }
        Ok(())
    }

    fn active_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        features.validate().map_err(|e| ClassifierError(e.to_string()))?;

        let z: f64 = self.weights.iter()
            .zip(features.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;

        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<ActivityState, ClassifierError> {
        let p = self.active_probability(features)?;
        Ok(if p >= self.decision_threshold {
            ActivityState::Active
        } else {
            ActivityState::Inactive
        })
    }

    fn predict_probability(&self, features: &FeatureVector) -> Result<ClassProbabilities, ClassifierError> {
        let p = self.active_probability(features)?;
        Ok(ClassProbabilities::new(1.0 - p, p))
    }

    fn name(&self) -> &str {
        "linear"
    }
}
