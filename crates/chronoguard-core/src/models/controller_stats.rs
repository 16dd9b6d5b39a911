use serde::{Deserialize, Serialize};

use super::HopPlan;

/// Why the hop controller reached DONE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    CoverageMet,
    #[default]
    HopsExhausted,
    /// A hop added no new passages; more hops cannot help.
    RecallExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RerankMethod {
    CrossEncoder,
    #[default]
    FusionOnly,
}

/// Hop controller and pipeline statistics, always present on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ControllerStats {
    pub planned_hops: usize,
    pub executed_hops: usize,
    pub coverage_signal: f64,
    pub hop_shortfall: bool,
    pub hops: Vec<HopPlan>,
    pub stop_reason: StopReason,
    pub domain: String,
    pub window_kind: String,
    pub rerank_method: RerankMethod,
    pub latency_ms: u64,
    pub tokens_in: usize,
    pub tokens_out: usize,
    /// Reason of the first degradation, if the request degraded.
    pub degraded: Option<String>,
}
