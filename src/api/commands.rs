//! Analysis commands for the presentation layer
//!
//! One `AnalysisService` per process: it owns the loaded classifier and the
//! engine rules. Session state stays with the caller and is passed in.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::engine_status::{EngineStatus, ModelStatus};
use crate::constants::APP_VERSION;
use crate::logic::config::AppConfig;
use crate::logic::engine::{classify_with_config, EngineConfig, Verdict};
use crate::logic::error::{EngineError, EngineResult};
use crate::logic::features::{derive, layout, DerivedFeatures, SignalVector};
use crate::logic::model::{load_classifier, Classifier, LoadedModel};
use crate::logic::session::{PresentationCue, SessionState, VerdictReport};

/// Result of one "Analyze Organoid State" press
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub signals: SignalVector,
    pub derived: DerivedFeatures,
    pub verdict: Verdict,
    pub cue: PresentationCue,
    pub report: VerdictReport,
}

pub struct AnalysisService {
    config: EngineConfig,
    model: Option<LoadedModel>,
}

impl AnalysisService {
    pub fn new(config: EngineConfig, model: Option<LoadedModel>) -> Self {
        Self { config, model }
    }

    /// Load the configured artifact. A failed load leaves the service
    /// without a classifier rather than failing startup.
    pub fn from_config(app: &AppConfig) -> Self {
        let model = match load_classifier(&app.model_path, app.model_sha256.as_deref()) {
            Ok(model) => Some(model),
            Err(e) => {
                log::warn!("Classifier unavailable: {}", e);
                None
            }
        };
        Self::new(app.engine.clone(), model)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn classifier(&self) -> Option<&dyn Classifier> {
        self.model.as_ref().map(|m| m.classifier.as_ref())
    }

    /// Shared handle for callers that outlive the service borrow
    pub fn shared_classifier(&self) -> Option<Arc<dyn Classifier>> {
        self.model.as_ref().map(|m| Arc::clone(&m.classifier))
    }

    /// Launcher "START EXPERIMENT"
    pub fn start(&self, session: &mut SessionState) -> EngineResult<()> {
        session.start(self.is_model_loaded())
    }

    /// Live "Computed Features" panel; no classification
    pub fn preview(&self, signals: &SignalVector) -> DerivedFeatures {
        derive(signals)
    }

    /// Derive, classify, and record the verdict in the caller's session
    pub fn analyze(&self, session: &mut SessionState, signals: SignalVector) -> EngineResult<AnalysisResponse> {
        if !session.started {
            return Err(EngineError::NotStarted);
        }

        let derived = derive(&signals);
        let verdict = classify_with_config(&signals, &derived, self.classifier(), &self.config)?;
        let cue = session.record(verdict);

        log::info!(
            "Analysis: {} (confidence {:.2}%{})",
            verdict.state,
            verdict.confidence * 100.0,
            if verdict.overridden { ", overridden" } else { "" }
        );

        Ok(AnalysisResponse {
            signals,
            derived,
            verdict,
            cue,
            report: VerdictReport::from_verdict(&verdict),
        })
    }

    pub fn status(&self) -> EngineStatus {
        let model = match &self.model {
            Some(m) => ModelStatus {
                engine: m.metadata.model_kind.as_str().to_string(),
                loaded: true,
                name: Some(m.classifier.name().to_string()),
                model_path: Some(m.metadata.model_path.clone()),
                sha256: Some(m.metadata.sha256.clone()).filter(|s| !s.is_empty()),
                loaded_at: Some(m.metadata.loaded_at),
            },
            None => ModelStatus::unavailable(),
        };

        EngineStatus {
            app_version: APP_VERSION.to_string(),
            feature_version: layout::FEATURE_VERSION,
            layout_hash: layout::layout_hash(),
            feature_count: layout::FEATURE_COUNT,
            force_power_threshold: self.config.force_power_threshold,
            model,
        }
    }
}
