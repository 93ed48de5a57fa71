//! Engine Module
//!
//! Turns a signal vector into a verdict. This is the only place that decides
//! ACTIVE vs INACTIVE.
//!
//! ## Structure
//! - `types`: Verdict
//! - `rules`: override threshold and config
//! - `classify`: classification logic
//!
//! ## Usage
//! ```ignore
//! use organoid_core::logic::engine::classify;
//! use organoid_core::logic::features::{derive, SignalVector};
//!
//! let signals = SignalVector::reference_defaults();
//! let derived = derive(&signals);
//! let verdict = classify(&signals, &derived, Some(classifier.as_ref()))?;
//! ```

pub mod types;
pub mod rules;
pub mod classify;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use types::{ActivityState, Verdict};
pub use rules::{EngineConfig, FORCE_POWER_THRESHOLD, OVERRIDE_CONFIDENCE};
pub use classify::{classify, classify_with_config};
