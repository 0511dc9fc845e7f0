//! Advisory orchestration: cache-wrapped remote generation with silent
//! downgrade to the rule engine.

use std::time::Duration;

use tracing::{debug, warn};

use cardiorisk_common::{AdvisoryBundle, PatientProfile, PredictionResult};

use crate::cache::TtlCache;
use crate::client::AdvisoryClient;
use crate::prompt::build_prompt;
use crate::rules::fallback_bundle;

/// Serves exactly one advisory bundle per prediction: the cached or fresh
/// remote bundle when a client is configured and reachable, the local
/// rule bundle otherwise. Never fails outward.
pub struct AdvisoryEngine {
    client: Option<AdvisoryClient>,
    cache: TtlCache<AdvisoryBundle>,
}

impl AdvisoryEngine {
    /// `client: None` (no API key configured) disables the remote path
    /// entirely and every request answers from the rule engine.
    pub fn new(client: Option<AdvisoryClient>, ttl: Duration, capacity: usize) -> Self {
        Self {
            client,
            cache: TtlCache::new(ttl, capacity),
        }
    }

    pub fn remote_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Cached entries currently held.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub async fn advise(
        &self,
        profile: &PatientProfile,
        prediction: &PredictionResult,
    ) -> AdvisoryBundle {
        let Some(client) = &self.client else {
            debug!("no advisory backend configured, using rule engine");
            return fallback_bundle(profile, prediction);
        };

        let prompt = build_prompt(profile, prediction);
        match self
            .cache
            .get_or_compute(&prompt, || client.generate(&prompt))
            .await
        {
            Ok(bundle) => bundle,
            Err(err) => {
                warn!(error = %err, "advisory unavailable, falling back to rule engine");
                fallback_bundle(profile, prediction)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{ScriptedBackend, BUNDLE_JSON};
    use crate::rules::FALLBACK_SUMMARY;
    use std::sync::Arc;

    const TTL: Duration = Duration::from_secs(300);

    fn profile() -> PatientProfile {
        PatientProfile {
            age: 61.0,
            cholesterol: 250.0,
            ..PatientProfile::default()
        }
    }

    #[tokio::test]
    async fn test_no_client_answers_from_rule_engine() {
        let engine = AdvisoryEngine::new(None, TTL, 16);
        let bundle = engine.advise(&profile(), &PredictionResult::new(1, 0.9)).await;
        assert_eq!(bundle.summary, FALLBACK_SUMMARY);
        assert_eq!(engine.cached_entries(), 0);
    }

    #[tokio::test]
    async fn test_remote_bundle_is_cached_across_identical_requests() {
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(BUNDLE_JSON.to_string())]));
        let client = AdvisoryClient::new(backend.clone(), 0);
        let engine = AdvisoryEngine::new(Some(client), TTL, 16);

        let prediction = PredictionResult::new(1, 0.82);
        let first = engine.advise(&profile(), &prediction).await;
        assert_eq!(first.summary, "Riesgo moderado.");

        // The script is exhausted: a second backend call would error, so
        // an identical bundle proves the cache answered.
        let second = engine.advise(&profile(), &prediction).await;
        assert_eq!(second, first);
        assert_eq!(backend.call_count(), 1);
        assert_eq!(engine.cached_entries(), 1);
    }

    #[tokio::test]
    async fn test_distinct_profiles_do_not_share_entries() {
        let backend = Arc::new(ScriptedBackend::new(vec![
            Ok(BUNDLE_JSON.to_string()),
            Ok(BUNDLE_JSON.to_string()),
        ]));
        let client = AdvisoryClient::new(backend.clone(), 0);
        let engine = AdvisoryEngine::new(Some(client), TTL, 16);

        let prediction = PredictionResult::new(1, 0.82);
        engine.advise(&profile(), &prediction).await;

        let other = PatientProfile {
            age: 30.0,
            ..PatientProfile::default()
        };
        engine.advise(&other, &prediction).await;

        assert_eq!(backend.call_count(), 2);
        assert_eq!(engine.cached_entries(), 2);
    }

    #[tokio::test]
    async fn test_remote_failure_downgrades_silently_and_caches_nothing() {
        let backend = Arc::new(ScriptedBackend::new(vec![Err("service down".to_string())]));
        let client = AdvisoryClient::new(backend.clone(), 0);
        let engine = AdvisoryEngine::new(Some(client), TTL, 16);

        let bundle = engine.advise(&profile(), &PredictionResult::new(1, 0.9)).await;
        assert_eq!(bundle.summary, FALLBACK_SUMMARY);
        assert!(!bundle.recommendations.is_empty());
        assert_eq!(engine.cached_entries(), 0, "failures are never cached");
    }
}
