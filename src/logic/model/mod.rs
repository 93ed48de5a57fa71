//! Model Module - classifier capability and artifact loading
//!
//! The engine depends only on the `Classifier` trait. Concrete models are
//! swappable: ONNX Runtime for exported scikit-learn models, or a JSON
//! logistic model.

pub mod classifier;
pub mod guard;
pub mod linear;
pub mod loader;
pub mod onnx;

// Re-export common types
pub use classifier::{ActivityState, ClassProbabilities, Classifier, ClassifierError, ModelError};
pub use linear::LinearClassifier;
pub use loader::{load_classifier, LoadedModel, ModelKind, ModelMetadata};
pub use onnx::OnnxClassifier;
