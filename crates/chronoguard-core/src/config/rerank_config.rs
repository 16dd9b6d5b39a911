use serde::{Deserialize, Serialize};

use super::defaults;

/// Cross-encoder rerank configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankConfig {
    /// Number of top fused candidates sent to the cross-encoder.
    pub top_k: usize,
    /// Maximum pairs per cross-encoder call.
    pub batch_size: usize,
    pub timeout_ms: u64,
    /// Passages kept after rerank and handed to the gate.
    pub final_top_k: usize,
    /// Also score the head with the selected generation backend and average
    /// its judgement with the cross-encoder.
    pub judge_enabled: bool,
    pub judge_max_tokens: usize,
    pub judge_temperature: f64,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_RERANK_TOP_K,
            batch_size: defaults::DEFAULT_RERANK_BATCH_SIZE,
            timeout_ms: defaults::DEFAULT_RERANK_TIMEOUT_MS,
            final_top_k: defaults::DEFAULT_FINAL_TOP_K,
            judge_enabled: false,
            judge_max_tokens: defaults::DEFAULT_JUDGE_MAX_TOKENS,
            judge_temperature: defaults::DEFAULT_JUDGE_TEMPERATURE,
        }
    }
}
