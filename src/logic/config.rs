//! Application configuration
//!
//! Read once at startup from the environment (a `.env` file is loaded first
//! when present). Unparsable values fall back to the defaults.

use std::path::PathBuf;

use crate::constants::{
    DEFAULT_MODEL_PATH, ENV_FORCE_POWER_THRESHOLD, ENV_MODEL_PATH, ENV_MODEL_SHA256,
    ENV_OVERRIDE_CONFIDENCE, ENV_STRICT_CLASSIFIER,
};
use crate::logic::engine::EngineConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Classifier artifact (.onnx or .json)
    pub model_path: PathBuf,
    /// Expected SHA-256 of the artifact, hex
    pub model_sha256: Option<String>,
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            model_sha256: None,
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load `.env` (if any) and read the environment
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }
        Self::from_env()
    }

    /// Read configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, test map)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EngineConfig::default();

        let force_power_threshold = lookup(ENV_FORCE_POWER_THRESHOLD)
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|t| !t.is_nan())
            .unwrap_or(defaults.force_power_threshold);

        let override_confidence = lookup(ENV_OVERRIDE_CONFIDENCE)
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|c| (0.0..=1.0).contains(c))
            .unwrap_or(defaults.override_confidence);

        let override_requires_classifier = lookup(ENV_STRICT_CLASSIFIER)
            .map(|s| {
                let s = s.trim().to_lowercase();
                s == "true" || s == "1"
            })
            .unwrap_or(defaults.override_requires_classifier);

        Self {
            model_path: lookup(ENV_MODEL_PATH)
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
            model_sha256: lookup(ENV_MODEL_SHA256).filter(|s| !s.trim().is_empty()),
            engine: EngineConfig {
                force_power_threshold,
                override_confidence,
                override_requires_classifier,
            },
        }
    }
}
