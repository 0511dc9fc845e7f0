//! Cardiorisk web server.
//!
//! Run with: cargo run -p cardiorisk-web

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cardiorisk_advisory::{AdvisoryClient, AdvisoryEngine, OpenAiBackend};
use cardiorisk_model::{LogisticModel, RiskModel};
use cardiorisk_web::config::AppConfig;
use cardiorisk_web::router::build_router;
use cardiorisk_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = AppConfig::from_env();

    // A broken model file degrades to a process that answers every predict
    // request with a fixed error instead of refusing to start.
    let model: Option<Arc<dyn RiskModel>> = match LogisticModel::load(&cfg.model_path) {
        Ok(m) => Some(Arc::new(m)),
        Err(err) => {
            error!(path = %cfg.model_path, error = %err, "risk model failed to load, serving degraded");
            None
        }
    };

    let client = match &cfg.api_key {
        Some(key) => {
            let backend = OpenAiBackend::new(
                key,
                &cfg.advisory_model,
                &cfg.advisory_base_url,
                cfg.advisory_timeout,
            )?;
            info!(model = %cfg.advisory_model, "remote advisory enabled");
            Some(AdvisoryClient::new(Arc::new(backend), cfg.max_retries))
        }
        None => {
            info!("OPENAI_API_KEY not set, remote advisory disabled");
            None
        }
    };

    let advisory = AdvisoryEngine::new(client, cfg.cache_ttl, cfg.cache_capacity);

    let state = Arc::new(AppState { model, advisory });
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
