//! Model Loader
//!
//! Reads a persisted classifier artifact once at process start. A load failure
//! is returned to the caller, which runs without a classifier; the engine then
//! reports `ClassifierUnavailable` instead of guessing a verdict.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::classifier::{Classifier, ModelError};
use super::guard;
use super::linear::LinearClassifier;
use super::onnx::OnnxClassifier;
use crate::logic::features::FEATURE_COUNT;

/// Artifact format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Onnx,
    Linear,
}

impl ModelKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "onnx" => Some(ModelKind::Onnx),
            "json" => Some(ModelKind::Linear),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Onnx => "onnx",
            ModelKind::Linear => "linear",
        }
    }
}

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_kind: ModelKind,
    pub features: usize,
    pub sha256: String,
    pub size_bytes: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// A classifier ready to share across callers
#[derive(Clone)]
pub struct LoadedModel {
    pub classifier: Arc<dyn Classifier>,
    pub metadata: ModelMetadata,
}

impl LoadedModel {
    /// Wrap a classifier built in memory (no artifact on disk)
    pub fn in_memory(classifier: Arc<dyn Classifier>, kind: ModelKind) -> Self {
        Self {
            classifier,
            metadata: ModelMetadata {
                model_path: "<memory>".to_string(),
                model_kind: kind,
                features: FEATURE_COUNT,
                sha256: String::new(),
                size_bytes: 0,
                loaded_at: chrono::Utc::now(),
            },
        }
    }
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("classifier", &self.classifier.name())
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Load a classifier artifact, optionally verifying its SHA-256 first
pub fn load_classifier(path: impl AsRef<Path>, expected_sha256: Option<&str>) -> Result<LoadedModel, ModelError> {
    let path = path.as_ref();
    log::info!("Loading classifier from: {}", path.display());

    if !path.exists() {
        return Err(ModelError::NotFound(path.to_path_buf()));
    }

    let kind = ModelKind::from_path(path)
        .ok_or_else(|| ModelError::UnsupportedFormat(path.display().to_string()))?;

    let bytes = std::fs::read(path)?;
    let sha256 = guard::verify_checksum(&bytes, expected_sha256)?;

    let classifier: Arc<dyn Classifier> = match kind {
        ModelKind::Onnx => Arc::new(OnnxClassifier::from_bytes(&bytes)?),
        ModelKind::Linear => Arc::new(LinearClassifier::from_json_slice(&bytes)?),
    };

    log::info!("Classifier loaded ({}, sha256 {})", kind.as_str(), &sha256[..12]);

    Ok(LoadedModel {
        classifier,
        metadata: ModelMetadata {
            model_path: path.display().to_string(),
            model_kind: kind,
            features: FEATURE_COUNT,
            sha256,
            size_bytes: bytes.len(),
            loaded_at: chrono::Utc::now(),
        },
    })
}
