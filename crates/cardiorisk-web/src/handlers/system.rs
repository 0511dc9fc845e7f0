//! Liveness probe.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::SharedState;

pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model_loaded": state.model.is_some(),
        "advisory_remote": state.advisory.remote_enabled(),
    }))
}
