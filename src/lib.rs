//! Organoid Bio-Computer core
//!
//! Simulated biosignal sliders in, ACTIVE/INACTIVE verdict out.
//!
//! ```text
//! SignalVector ──derive──▶ DerivedFeatures
//!      │                        │
//!      └──────── FeatureVector ◀┘
//!                     │
//!        total_power >= 3.5 ? ──yes──▶ ACTIVE 0.99 (overridden)
//!                     │ no
//!                Classifier ──▶ Verdict
//! ```

pub mod api;
pub mod constants;
pub mod logic;

pub use logic::engine::{classify, classify_with_config, ActivityState, EngineConfig, Verdict, FORCE_POWER_THRESHOLD};
pub use logic::error::{EngineError, EngineResult};
pub use logic::features::{derive, DerivedFeatures, FeatureVector, SignalVector};
pub use logic::model::{load_classifier, ClassProbabilities, Classifier, ClassifierError, ModelError};
pub use logic::session::{PresentationCue, SessionState, VerdictReport};
