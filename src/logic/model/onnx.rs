//! ONNX Runtime classifier
//!
//! Runs a scikit-learn classifier exported to ONNX with `zipmap=False`:
//! input `float32[1, 14]`, outputs an int64 label tensor and a
//! `float32[1, 2]` probability tensor.

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::classifier::{ActivityState, ClassProbabilities, Classifier, ClassifierError, ModelError};
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

pub struct OnnxClassifier {
    // `run` needs exclusive access to the session
    session: Mutex<Session>,
    label_output: String,
    probability_output: String,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("label_output", &self.label_output)
            .field("probability_output", &self.probability_output)
            .finish()
    }
}

impl OnnxClassifier {
    /// Build a session from model bytes already read (and checksummed) by the loader
    pub fn from_bytes(model_bytes: &[u8]) -> Result<Self, ModelError> {
        log::info!("Loading ONNX classifier from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| ModelError::Runtime(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Runtime(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| ModelError::Runtime(format!("Load from memory error: {}", e)))?;

        Self::from_session(session)
    }

    fn from_session(session: Session) -> Result<Self, ModelError> {
        let names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let (label_output, probability_output) = select_outputs(&names)?;

        log::debug!("ONNX outputs: label={}, probability={}", label_output, probability_output);

        Ok(Self {
            session: Mutex::new(session),
            label_output,
            probability_output,
        })
    }

    /// One inference pass: predicted label and class probabilities
    fn run(&self, features: &FeatureVector) -> Result<(ActivityState, ClassProbabilities), ClassifierError> {
        features.validate().map_err(|e| ClassifierError(e.to_string()))?;

        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.to_f32().to_vec())
            .map_err(|e| ClassifierError(format!("Array error: {}", e)))?;
        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ClassifierError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| ClassifierError(format!("Inference failed: {}", e)))?;

        let label_value = outputs.get(self.label_output.as_str())
            .ok_or_else(|| ClassifierError(format!("Missing output {}", self.label_output)))?;
        let (_, labels) = label_value.try_extract_tensor::<i64>()
            .map_err(|e| ClassifierError(format!("Label extract error: {}", e)))?;
        let label = *labels.first()
            .ok_or_else(|| ClassifierError("Empty label output".to_string()))?;
        let state = ActivityState::from_label(label)
            .ok_or_else(|| ClassifierError(format!("Unexpected class label {}", label)))?;

        let prob_value = outputs.get(self.probability_output.as_str())
            .ok_or_else(|| ClassifierError(format!("Missing output {}", self.probability_output)))?;
        let (_, probs) = prob_value.try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError(format!("Probability extract error: {}", e)))?;
        let row: Vec<f64> = probs.iter().take(2).map(|&p| p as f64).collect();
        let probabilities = ClassProbabilities::from_row(&row)
            .ok_or_else(|| ClassifierError(format!("Expected 2 class probabilities, got {}", probs.len())))?;

        Ok((state, probabilities))
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<ActivityState, ClassifierError> {
        self.run(features).map(|(state, _)| state)
    }

    fn predict_probability(&self, features: &FeatureVector) -> Result<ClassProbabilities, ClassifierError> {
        self.run(features).map(|(_, probs)| probs)
    }

    fn name(&self) -> &str {
        "onnx"
    }
}

/// Pick the label and probability outputs by name, falling back to position
fn select_outputs(names: &[String]) -> Result<(String, String), ModelError> {
    if names.len() < 2 {
        return Err(ModelError::InvalidModel(format!(
            "classifier needs label and probability outputs, found {}",
            names.len()
        )));
    }

    let label = names.iter()
        .find(|n| n.to_lowercase().contains("label"))
        .unwrap_or(&names[0])
        .clone();
    let probability = names.iter()
        .find(|n| n.to_lowercase().contains("prob"))
        .or_else(|| names.iter().find(|n| **n != label))
        .unwrap_or(&names[1])
        .clone();

    Ok((label, probability))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_sklearn_outputs() {
        let (label, prob) = select_outputs(&names(&["output_label", "output_probability"])).unwrap();
        assert_eq!(label, "output_label");
        assert_eq!(prob, "output_probability");
    }

    #[test]
    fn test_select_outputs_reordered() {
        let (label, prob) = select_outputs(&names(&["probabilities", "label"])).unwrap();
        assert_eq!(label, "label");
        assert_eq!(prob, "probabilities");
    }

    #[test]
    fn test_select_outputs_positional() {
        let (label, prob) = select_outputs(&names(&["y", "p"])).unwrap();
        assert_eq!(label, "y");
        assert_eq!(prob, "p");
    }

    #[test]
    fn test_select_outputs_too_few() {
        assert!(matches!(
            select_outputs(&names(&["variable"])),
            Err(ModelError::InvalidModel(_))
        ));
    }
}
