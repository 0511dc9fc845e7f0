//! Classifier adapter — the pre-trained model behind an object-safe trait.

use cardiorisk_common::{PredictionResult, FEATURE_COUNT};

use crate::error::Result;

/// A pre-trained binary risk classifier.
///
/// `predict_proba` is an optional capability: models without calibrated
/// probabilities return `None` and the class label, cast to float, is
/// used as the probability.
pub trait RiskModel: Send + Sync {
    /// Class label for a feature vector: 0 (low risk) or 1 (high risk).
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<u8>;

    /// Class probabilities `[p_low, p_high]`, or `None` when the model
    /// does not expose them.
    fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> Option<Result<[f64; 2]>>;

    fn model_id(&self) -> &str;

    /// Run one classification: label plus positive-class probability.
    fn classify(&self, features: &[f64; FEATURE_COUNT]) -> Result<PredictionResult> {
        let label = self.predict(features)?;
        let probability = match self.predict_proba(features) {
            Some(proba) => proba?[1],
            None => label as f64,
        };
        Ok(PredictionResult::new(label, probability))
    }
}
