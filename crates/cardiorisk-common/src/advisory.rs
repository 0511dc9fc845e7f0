//! The four-field advisory payload returned with every prediction.

use serde::{Deserialize, Serialize};

/// Structured recommendation payload. Exactly one bundle is attached to
/// each response, sourced whole from either the remote advisory service
/// or the local rule engine, never merged from both.
///
/// Fields default to empty so a well-formed but sparse remote response
/// still deserializes; the disclaimer invariant (always non-empty) is
/// restored by the advisory client after parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryBundle {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub warning: String,
    #[serde(default)]
    pub disclaimer: String,
}
