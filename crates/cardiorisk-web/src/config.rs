//! Environment-backed configuration.
//!
//! Malformed numeric values fall back to their defaults rather than
//! failing startup; an absent `OPENAI_API_KEY` disables the remote
//! advisory entirely.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the serialized risk model weights.
    pub model_path: String,
    /// Remote advisory credentials; `None` forces the rule-engine path.
    pub api_key: Option<String>,
    pub advisory_model: String,
    pub advisory_base_url: String,
    pub advisory_timeout: Duration,
    pub max_retries: u32,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            model_path: env_or("MODEL_PATH", "model.json"),
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            advisory_model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
            advisory_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com"),
            advisory_timeout: Duration::from_secs_f64(env_parse("OPENAI_TIMEOUT", 8.0)),
            max_retries: env_parse("OPENAI_MAX_RETRIES", 2),
            cache_ttl: Duration::from_secs(env_parse("CACHE_TTL_SECONDS", 300)),
            cache_capacity: env_parse("CACHE_CAPACITY", 1024),
            port: env_parse("PORT", 5000),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
