use serde::{Deserialize, Serialize};

use super::defaults;

/// ChronoSanity gate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanityConfig {
    /// Conflict score above which the response degrades to evidence-only.
    pub overlap_threshold: f64,
    /// Relative numeric difference tolerated between overlapping passages.
    pub numeric_tolerance: f64,
    /// How many top-ranked passages are examined pairwise.
    pub examine_top_n: usize,
    pub evidence_only_reason: String,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            overlap_threshold: defaults::DEFAULT_OVERLAP_THRESHOLD,
            numeric_tolerance: defaults::DEFAULT_NUMERIC_TOLERANCE,
            examine_top_n: defaults::DEFAULT_EXAMINE_TOP_N,
            evidence_only_reason: defaults::DEFAULT_EVIDENCE_ONLY_REASON.to_string(),
        }
    }
}
