//! Shared application state for the web server.

use std::sync::Arc;

use cardiorisk_advisory::AdvisoryEngine;
use cardiorisk_model::RiskModel;

/// Shared state injected into every Axum handler.
pub struct AppState {
    /// Loaded classifier; `None` when the model failed to load at
    /// startup, in which case every predict request answers with the
    /// fixed service-unavailable error.
    pub model: Option<Arc<dyn RiskModel>>,
    pub advisory: AdvisoryEngine,
}

pub type SharedState = Arc<AppState>;
