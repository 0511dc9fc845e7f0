//! Remote advisory generation — the completion backend trait, the
//! OpenAI-style HTTP backend, and the retrying client that turns
//! free-text completions into advisory bundles.
//!
//! The service answers with prose expected to contain a single JSON
//! object; extraction is lenient (first `{` to last `}`) and failure to
//! find or parse one is a typed error, retried like any transport
//! failure.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{instrument, warn};

use cardiorisk_common::AdvisoryBundle;

use crate::rules::DISCLAIMER;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error [{status}]: {message}")]
    Api { status: u16, message: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Advisory generation failed after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },
}

// ── Backend trait ─────────────────────────────────────────────────────────

pub const SYSTEM_PROMPT: &str = "Eres un asistente médico confiable y preciso.";

const MAX_OUTPUT_TOKENS: u32 = 400;
const TEMPERATURE: f32 = 0.4;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// A chat-completion endpoint answering a system + user prompt pair with
/// free text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AdvisoryError>;
    fn model_id(&self) -> &str;
}

// ── OpenAI-style backend ──────────────────────────────────────────────────

pub struct OpenAiBackend {
    pub base_url: String,
    pub model: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiBackend {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AdvisoryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AdvisoryError> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model":       &self.model,
            "messages":    [
                {"role": "system", "content": system},
                {"role": "user",   "content": user},
            ],
            "max_tokens":  MAX_OUTPUT_TOKENS,
            "temperature": TEMPERATURE,
        });
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let json = check_response_status(resp).await?;
        Ok(json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string())
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

async fn check_response_status(resp: reqwest::Response) -> Result<serde_json::Value, AdvisoryError> {
    let status = resp.status().as_u16();
    let body: serde_json::Value = resp.json().await?;
    if status >= 400 {
        let message = body["error"]["message"]
            .as_str()
            .or_else(|| body["message"].as_str())
            .unwrap_or("unknown API error")
            .to_string();
        return Err(AdvisoryError::Api { status, message });
    }
    Ok(body)
}

// ── Retrying client ───────────────────────────────────────────────────────

/// Runs the bounded retry loop around a completion backend. Worst-case
/// latency for a cold prompt is `timeout × (max_retries + 1) +
/// RETRY_DELAY × max_retries`.
pub struct AdvisoryClient {
    backend: Arc<dyn CompletionBackend>,
    max_retries: u32,
}

impl AdvisoryClient {
    pub fn new(backend: Arc<dyn CompletionBackend>, max_retries: u32) -> Self {
        Self {
            backend,
            max_retries,
        }
    }

    pub fn model_id(&self) -> &str {
        self.backend.model_id()
    }

    /// Generate an advisory bundle for an already-rendered prompt.
    /// Retries on any failure; a well-formed but sparse JSON object is
    /// accepted as success.
    #[instrument(skip(self, prompt))]
    pub async fn generate(&self, prompt: &str) -> Result<AdvisoryBundle, AdvisoryError> {
        let mut attempt = 0;
        loop {
            match self.try_generate(prompt).await {
                Ok(bundle) => return Ok(bundle),
                Err(err) if attempt < self.max_retries => {
                    attempt += 1;
                    warn!(attempt, error = %err, "advisory attempt failed, retrying");
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(err) => {
                    return Err(AdvisoryError::Exhausted {
                        attempts: attempt + 1,
                        last: err.to_string(),
                    });
                }
            }
        }
    }

    async fn try_generate(&self, prompt: &str) -> Result<AdvisoryBundle, AdvisoryError> {
        let text = self.backend.complete(SYSTEM_PROMPT, prompt).await?;
        parse_bundle(&text)
    }
}

// ── Lenient structured extraction ─────────────────────────────────────────

/// Slice the JSON object embedded in a free-text completion: everything
/// from the first `{` to the last `}` inclusive.
fn extract_json_object(text: &str) -> Result<&str, AdvisoryError> {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
        _ => Err(AdvisoryError::MalformedResponse(
            "no JSON object found in completion".to_string(),
        )),
    }
}

/// Parse the four-field bundle out of a completion, restoring the
/// disclaimer invariant when the service left it empty.
pub(crate) fn parse_bundle(text: &str) -> Result<AdvisoryBundle, AdvisoryError> {
    let raw = extract_json_object(text)?;
    let mut bundle: AdvisoryBundle =
        serde_json::from_str(raw).map_err(|e| AdvisoryError::MalformedResponse(e.to_string()))?;
    if bundle.disclaimer.is_empty() {
        bundle.disclaimer = DISCLAIMER.to_string();
    }
    Ok(bundle)
}

// ── Test backend ──────────────────────────────────────────────────────────
