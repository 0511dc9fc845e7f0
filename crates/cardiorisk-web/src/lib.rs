//! cardiorisk-web — HTTP façade for the cardiovascular risk service.
//! Provides:
//!   - POST /predict — classify a patient payload and attach advisories
//!   - GET /health   — liveness probe
//!   - static frontend served from ./static

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
