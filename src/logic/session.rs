//! Presentation session state
//!
//! Everything the UI remembers between reruns: whether the experiment was
//! launched, the latest verdict, and whether the celebration video already
//! played. Owned by the caller and passed in explicitly; the engine itself
//! keeps nothing between calls.

use serde::{Deserialize, Serialize};

use crate::logic::engine::{ActivityState, Verdict};
use crate::logic::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub started: bool,
    /// At most one live verdict; a new analysis replaces it
    pub latest: Option<Verdict>,
    pub active_status: bool,
    /// Celebration video shown for the current ACTIVE run
    pub celebration_played: bool,
}

/// What the UI should do after a new verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationCue {
    pub show_override_warning: bool,
    /// Balloons on every ACTIVE result
    pub celebrate: bool,
    /// Success video, once per ACTIVE run
    pub play_video: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launch the experiment. Refused when no model is loaded.
    pub fn start(&mut self, classifier_available: bool) -> EngineResult<()> {
        if !classifier_available {
            log::warn!("Cannot start experiment: model missing");
            return Err(EngineError::ClassifierUnavailable);
        }
        if !self.started {
            log::info!("Experiment started");
        }
        self.started = true;
        Ok(())
    }

    /// Replace the latest verdict and work out the UI cue
    pub fn record(&mut self, verdict: Verdict) -> PresentationCue {
        let active = verdict.state == ActivityState::Active;

        let play_video = active && !self.celebration_played;
        if active {
            self.celebration_played = true;
        } else {
            // Next ACTIVE result gets the video again
            self.celebration_played = false;
        }

        self.active_status = active;
        self.latest = Some(verdict);

        PresentationCue {
            show_override_warning: verdict.overridden,
            celebrate: active,
            play_video,
        }
    }

    /// Back to the launcher screen
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// REPORT
// ============================================================================

pub const OVERRIDE_WARNING: &str = "System Threshold Overridden: Extreme Computational Load Detected";

/// Human-readable rendering of a verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictReport {
    pub headline: String,
    pub detail: String,
    /// e.g. "99.00%"
    pub confidence_percent: String,
    pub warning: Option<String>,
}

impl VerdictReport {
    pub fn from_verdict(verdict: &Verdict) -> Self {
        let (headline, detail) = match verdict.state {
            ActivityState::Active => (
                "SYSTEM STATE: ACTIVE - Neural computation detected!",
                "Organoid is performing computation.",
            ),
            ActivityState::Inactive => (
                "SYSTEM STATE: INACTIVE",
                "Organoid currently in resting mode.",
            ),
        };

        Self {
            headline: headline.to_string(),
            detail: detail.to_string(),
            confidence_percent: format!("{:.2}%", verdict.confidence * 100.0),
            warning: verdict.overridden.then(|| OVERRIDE_WARNING.to_string()),
        }
    }
}

impl std::fmt::Display for VerdictReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(warning) = &self.warning {
            writeln!(f, "WARNING: {}", warning)?;
        }
        writeln!(f, "{}", self.headline)?;
        writeln!(f, "{}", self.detail)?;
        write!(f, "Confidence: {}", self.confidence_percent)
    }
}
