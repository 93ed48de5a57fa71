use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub app_version: String,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub feature_count: usize,

    pub force_power_threshold: f64,
    pub model: ModelStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub engine: String, // "onnx" | "linear" | "none"
    pub loaded: bool,
    /// `Classifier::name()` of the loaded model
    pub name: Option<String>,
    pub model_path: Option<String>,
    pub sha256: Option<String>,
    pub loaded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl ModelStatus {
    pub fn unavailable() -> Self {
        Self {
            engine: "none".to_string(),
            loaded: false,
            name: None,
            model_path: None,
            sha256: None,
            loaded_at: None,
        }
    }
}
