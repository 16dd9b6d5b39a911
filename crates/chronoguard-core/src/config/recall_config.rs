use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid recall configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    /// RRF k-value for rank fusion.
    pub rrf_k: u32,
    pub lexical_weight: f64,
    pub vector_weight: f64,
    /// Deadline for the whole hop loop, oracles included.
    pub timeout_ms: u64,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            rrf_k: defaults::DEFAULT_RRF_K,
            lexical_weight: defaults::DEFAULT_LEXICAL_WEIGHT,
            vector_weight: defaults::DEFAULT_VECTOR_WEIGHT,
            timeout_ms: defaults::DEFAULT_RECALL_TIMEOUT_MS,
        }
    }
}
