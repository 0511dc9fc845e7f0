//! Patient risk-factor profile and the lenient input normalizer.
//!
//! Frontend payloads are loosely typed: continuous fields may arrive as
//! numbers or numeric strings, flags as 0/1 in either form. Every field
//! defaults to 0 when absent or unparsable, so vector construction never
//! fails for an object payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of model input features; also the fixed vector length.
pub const FEATURE_COUNT: usize = 13;

/// The 13 risk factors consumed by the classifier and the advisory layers.
/// Continuous measurements are `f64`, binary flags are integer 0/1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub age: f64,
    /// 1 = male, 0 = female.
    pub gender: i64,
    /// mg/dL
    pub cholesterol: f64,
    /// Systolic, mmHg
    pub bp: f64,
    pub smoke: i64,
    pub alcohol: i64,
    /// Hours per week
    pub physical_activity: f64,
    pub glucose: f64,
    /// cm
    pub height: f64,
    /// kg
    pub weight: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    pub family_history: i64,
    pub stress_level: f64,
}

impl PatientProfile {
    /// Build a profile from a loosely-typed JSON object, defaulting every
    /// missing or unparsable field to 0.
    pub fn from_value(data: &Value) -> Self {
        Self {
            age: float_field(data, "age"),
            gender: flag_field(data, "gender"),
            cholesterol: float_field(data, "cholesterol"),
            bp: float_field(data, "bp"),
            smoke: flag_field(data, "smoke"),
            alcohol: flag_field(data, "alcohol"),
            physical_activity: float_field(data, "physical_activity"),
            glucose: float_field(data, "glucose"),
            height: float_field(data, "height"),
            weight: float_field(data, "weight"),
            bmi: float_field(data, "BMI"),
            family_history: flag_field(data, "family_history"),
            stress_level: float_field(data, "stress_level"),
        }
    }

    /// Model input vector in the fixed feature order: age, gender,
    /// cholesterol, bp, smoke, alcohol, physical_activity, glucose,
    /// height, weight, BMI, family_history, stress_level.
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age,
            self.gender as f64,
            self.cholesterol,
            self.bp,
            self.smoke as f64,
            self.alcohol as f64,
            self.physical_activity,
            self.glucose,
            self.height,
            self.weight,
            self.bmi,
            self.family_history as f64,
            self.stress_level,
        ]
    }
}

/// Coerce a JSON value to f64: numbers pass through, numeric strings
/// parse, booleans map to 0/1, anything else yields the 0 default.
fn coerce_float(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

fn float_field(data: &Value, key: &str) -> f64 {
    data.get(key).map(coerce_float).unwrap_or(0.0)
}

fn flag_field(data: &Value, key: &str) -> i64 {
    float_field(data, key) as i64
}
