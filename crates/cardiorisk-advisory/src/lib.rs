//! cardiorisk-advisory — TTL-cached remote advisory generation with a
//! deterministic rule-table fallback.

pub mod cache;
pub mod client;
pub mod engine;
pub mod prompt;
pub mod rules;

pub use cache::{Clock, SystemClock, TtlCache};
pub use client::{AdvisoryClient, AdvisoryError, CompletionBackend, OpenAiBackend};
pub use engine::AdvisoryEngine;
pub use prompt::build_prompt;
pub use rules::{fallback_bundle, rule_based_recommendations};
