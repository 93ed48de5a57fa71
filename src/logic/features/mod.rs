//! Features Module - Feature Derivation
//!
//! Raw control-panel signals in, classifier-ready feature vector out.
//!
//! - `layout`: authoritative 14-column schema (versioned, hashed)
//! - `signals`: validated 12-signal input
//! - `derive`: `total_power` and `syn_ratio`
//! - `vector`: ordered classifier input

pub mod layout;
pub mod signals;
pub mod derive;
pub mod vector;


// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, SIGNAL_COUNT, LayoutInfo, LayoutMismatchError};
pub use signals::{SignalValues, SignalVector};
pub use derive::{derive, DerivedFeatures, SYN_RATIO_EPSILON};
pub use vector::FeatureVector;
