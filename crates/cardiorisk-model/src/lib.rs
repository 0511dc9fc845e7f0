//! cardiorisk-model — Classifier adapter wrapping the pre-trained
//! cardiovascular risk model behind an object-safe trait.

pub mod classifier;
pub mod error;
pub mod logistic;

pub use classifier::RiskModel;
pub use error::{ModelError, Result};
pub use logistic::LogisticModel;
