use serde::{Deserialize, Serialize};

use super::defaults;

/// Monotone fusion weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Weight of relevance (rerank, else recall) in the base quality score.
    pub relevance_weight: f64,
    /// Weight of source authority in the base quality score.
    pub authority_weight: f64,
    /// Share of the score gated by temporal compliance, in [0, 1].
    pub time_weight: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            relevance_weight: defaults::DEFAULT_RELEVANCE_WEIGHT,
            authority_weight: defaults::DEFAULT_AUTHORITY_WEIGHT,
            time_weight: defaults::DEFAULT_TIME_WEIGHT,
        }
    }
}
