//! Engine errors
//!
//! All of these are expected, recoverable conditions. They are returned to
//! the immediate caller (the presentation layer) and never retried.

use crate::logic::model::ClassifierError;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No classifier artifact is loaded
    #[error("classifier unavailable: no model is loaded")]
    ClassifierUnavailable,

    /// A raw signal is outside [0.0, 1.0] (or NaN)
    #[error("invalid input: {field} = {value} is outside [0.0, 1.0]")]
    InvalidInput { field: &'static str, value: f64 },

    /// A named signal does not exist in the control panel
    #[error("unknown signal: {0}")]
    UnknownSignal(String),

    /// The classifier failed or returned an unusable result
    #[error("inference failed: {0}")]
    Inference(#[from] ClassifierError),

    /// Engine rules that cannot produce a valid verdict
    #[error("invalid engine config: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f64 },

    /// Analysis requested before the experiment was started
    #[error("experiment not started")]
    NotStarted,
}

impl EngineError {
    /// True for errors caused by the values the user supplied
    pub fn is_input_error(&self) -> bool {
        matches!(self, EngineError::InvalidInput { .. } | EngineError::UnknownSignal(_))
    }
}
