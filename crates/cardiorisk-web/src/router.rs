//! Axum router — maps URL paths to handlers.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::handlers::{predict::predict, system::health};
use crate::state::SharedState;

/// Build and return the full Axum router.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        // API endpoints
        .route("/predict", post(predict))
        .route("/health", get(health))

        // Static frontend (index.html at /)
        .fallback_service(ServeDir::new("static"))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
