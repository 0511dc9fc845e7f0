//! Prediction endpoint — normalize, classify, advise, respond.
//!
//! Input parsing never rejects an object payload (missing fields default
//! to 0); only a non-object body, a missing model or a classifier error
//! terminate the pipeline. An unavailable advisory service is recovered
//! silently with the rule engine's bundle.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use cardiorisk_common::PatientProfile;

use crate::state::SharedState;

pub async fn predict(
    State(state): State<SharedState>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Some(model) = &state.model else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Modelo no cargado."})),
        );
    };

    if !payload.is_object() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Se esperaba un objeto JSON con los datos del paciente."})),
        );
    }

    let request_id = Uuid::new_v4();
    let profile = PatientProfile::from_value(&payload);
    let features = profile.to_vector();

    let prediction = match model.classify(&features) {
        Ok(p) => p,
        Err(err) => {
            warn!(%request_id, error = %err, "classification failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": format!("Error durante la predicción: {err}")})),
            );
        }
    };

    let bundle = state.advisory.advise(&profile, &prediction).await;

    info!(
        %request_id,
        label = prediction.label,
        probability = prediction.probability,
        "prediction served"
    );

    (
        StatusCode::OK,
        Json(json!({
            "prediccion": prediction.label,
            "probabilidad": prediction.probability_pct(),
            "recomendaciones": bundle,
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use cardiorisk_advisory::AdvisoryEngine;
    use cardiorisk_common::{PredictionResult, FEATURE_COUNT};
    use cardiorisk_model::{ModelError, RiskModel};
    use std::sync::Arc;
    use std::time::Duration;

    struct StubModel {
        label: u8,
        probability: f64,
        fail: bool,
    }

    impl RiskModel for StubModel {
        fn predict(&self, _f: &[f64; FEATURE_COUNT]) -> cardiorisk_model::Result<u8> {
            if self.fail {
                return Err(ModelError::Inference("stub failure".to_string()));
            }
            Ok(self.label)
        }
        fn predict_proba(
            &self,
            _f: &[f64; FEATURE_COUNT],
        ) -> Option<cardiorisk_model::Result<[f64; 2]>> {
            Some(Ok([1.0 - self.probability, self.probability]))
        }
        fn model_id(&self) -> &str {
            "stub"
        }
    }

    fn state_with(model: Option<Arc<dyn RiskModel>>) -> SharedState {
        Arc::new(AppState {
            model,
            advisory: AdvisoryEngine::new(None, Duration::from_secs(300), 16),
        })
    }

    fn assert_prediction(body: &Value, expected: PredictionResult) {
        assert_eq!(body["prediccion"], expected.label);
        assert_eq!(body["probabilidad"], expected.probability_pct());
    }

    #[tokio::test]
    async fn test_missing_model_fails_fast() {
        let state = state_with(None);
        let (status, Json(body)) =
            predict(State(state), Json(serde_json::json!({"age": 50}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Modelo no cargado.");
    }

    #[tokio::test]
    async fn test_non_object_payload_is_input_error() {
        let state = state_with(Some(Arc::new(StubModel {
            label: 0,
            probability: 0.1,
            fail: false,
        })));
        let (status, Json(body)) = predict(State(state), Json(serde_json::json!([1, 2, 3]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_classifier_error_is_prediction_error() {
        let state = state_with(Some(Arc::new(StubModel {
            label: 0,
            probability: 0.0,
            fail: true,
        })));
        let (status, Json(body)) =
            predict(State(state), Json(serde_json::json!({"age": 50}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Error durante la predicción"));
    }

    #[tokio::test]
    async fn test_successful_prediction_with_rule_fallback() {
        let state = state_with(Some(Arc::new(StubModel {
            label: 1,
            probability: 0.82,
            fail: false,
        })));
        let payload = serde_json::json!({
            "age": "61", "cholesterol": 260, "bp": "150", "smoke": 1
        });

        let (status, Json(body)) = predict(State(state), Json(payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_prediction(&body, PredictionResult::new(1, 0.82));

        // No remote client configured: bundle comes whole from the rules.
        let recs = body["recomendaciones"]["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 3);
        assert!(recs[0].as_str().unwrap().contains("Riesgo cardiovascular detectado"));
        assert!(!body["recomendaciones"]["disclaimer"].as_str().unwrap().is_empty());
    }
}
