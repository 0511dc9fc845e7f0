//! Classifier output attached to each prediction response.

use serde::{Deserialize, Serialize};

/// Binary risk prediction: class label plus positive-class probability.
/// Produced once per request and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 0 = low risk, 1 = high risk.
    pub label: u8,
    /// Probability of the positive class, in [0, 1].
    pub probability: f64,
}

impl PredictionResult {
    pub fn new(label: u8, probability: f64) -> Self {
        Self { label, probability }
    }

    pub fn is_high_risk(&self) -> bool {
        self.label == 1
    }

    /// Probability on the 0–100 scale, rounded to two decimals, as
    /// surfaced in the response body.
    pub fn probability_pct(&self) -> f64 {
        (self.probability * 100.0 * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_pct_rounds_to_two_decimals() {
        assert_eq!(PredictionResult::new(1, 0.82).probability_pct(), 82.0);
        assert_eq!(PredictionResult::new(1, 0.123456).probability_pct(), 12.35);
        assert_eq!(PredictionResult::new(0, 0.0).probability_pct(), 0.0);
    }

    #[test]
    fn test_high_risk_flag() {
        assert!(PredictionResult::new(1, 0.9).is_high_risk());
        assert!(!PredictionResult::new(0, 0.1).is_high_risk());
    }
}
