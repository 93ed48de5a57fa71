//! Central Configuration Constants
//!
//! Single source of truth for configuration defaults and the environment
//! variable names that override them.

/// Default classifier artifact, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "my_best_model.onnx";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Organoid Bio-Computer";

// ============================================
// Environment variable names
// ============================================

pub const ENV_MODEL_PATH: &str = "ORGANOID_MODEL_PATH";
pub const ENV_MODEL_SHA256: &str = "ORGANOID_MODEL_SHA256";
pub const ENV_FORCE_POWER_THRESHOLD: &str = "ORGANOID_FORCE_POWER_THRESHOLD";
pub const ENV_OVERRIDE_CONFIDENCE: &str = "ORGANOID_OVERRIDE_CONFIDENCE";
pub const ENV_STRICT_CLASSIFIER: &str = "ORGANOID_STRICT_CLASSIFIER";
