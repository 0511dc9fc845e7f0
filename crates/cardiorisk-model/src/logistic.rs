//! JSON-serialized logistic regression model.
//!
//! The weights file is exported by the training pipeline; inference is a
//! dot product, an intercept and a sigmoid. Optional per-feature
//! standardization (mean/scale) is applied before the linear term when
//! present in the file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use cardiorisk_common::FEATURE_COUNT;

use crate::classifier::RiskModel;
use crate::error::{ModelError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    #[serde(default = "default_model_id")]
    pub model_id: String,
    pub weights: Vec<f64>,
    pub intercept: f64,
    /// Decision threshold on the positive-class probability.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Per-feature means subtracted before the linear term.
    #[serde(default)]
    pub means: Option<Vec<f64>>,
    /// Per-feature scales dividing the centered value.
    #[serde(default)]
    pub scales: Option<Vec<f64>>,
}

fn default_model_id() -> String {
    "cardio-logit".to_string()
}
fn default_threshold() -> f64 {
    0.5
}

impl LogisticModel {
    /// Load and validate a weights file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ModelError::Load(format!("{}: {}", path.display(), e)))?;
        let model: Self = serde_json::from_str(&raw)?;
        model.validate()?;
        info!(model_id = %model.model_id, path = %path.display(), "risk model loaded");
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.weights.len() != FEATURE_COUNT {
            return Err(ModelError::Load(format!(
                "expected {} weights, found {}",
                FEATURE_COUNT,
                self.weights.len()
            )));
        }
        for (name, values) in [("means", &self.means), ("scales", &self.scales)] {
            if let Some(values) = values {
                if values.len() != FEATURE_COUNT {
                    return Err(ModelError::Load(format!(
                        "{name} length {} does not match feature count {}",
                        values.len(),
                        FEATURE_COUNT
                    )));
                }
            }
        }
        Ok(())
    }

    fn decision(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let mut z = self.intercept;
        for i in 0..FEATURE_COUNT {
            let mut x = features[i];
            if let Some(means) = &self.means {
                x -= means[i];
            }
            if let Some(scales) = &self.scales {
                if scales[i] != 0.0 {
                    x /= scales[i];
                }
            }
            z += self.weights[i] * x;
        }
        z
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl RiskModel for LogisticModel {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<u8> {
        let p = sigmoid(self.decision(features));
        Ok(u8::from(p >= self.threshold))
    }

    fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> Option<Result<[f64; 2]>> {
        let p = sigmoid(self.decision(features));
        Some(Ok([1.0 - p, p]))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
