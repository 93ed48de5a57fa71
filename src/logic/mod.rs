//! Logic Module - Business Logic & Engines
//!
//! - `features/` - signal validation and feature derivation
//! - `model/` - classifier capability, ONNX / linear models, loading
//! - `engine/` - verdict with the power override rule
//! - `session` - caller-owned presentation state

pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod engine;
pub mod session;
