//! API Module - entry points for the presentation layer
//!
//! The classifier is loaded once per process and shared read-only by every
//! caller; `install` publishes the service, `service` retrieves it.

pub mod commands;
pub mod engine_status;

use once_cell::sync::OnceCell;

pub use commands::{AnalysisResponse, AnalysisService};
pub use engine_status::{EngineStatus, ModelStatus};

static SERVICE: OnceCell<AnalysisService> = OnceCell::new();

/// Publish the process-wide service. The first installed service wins.
pub fn install(service: AnalysisService) -> &'static AnalysisService {
    if SERVICE.get().is_some() {
        log::warn!("Analysis service already installed; keeping the existing classifier");
    }
    SERVICE.get_or_init(|| service)
}

/// The process-wide service, if installed
pub fn service() -> Option<&'static AnalysisService> {
    SERVICE.get()
}
