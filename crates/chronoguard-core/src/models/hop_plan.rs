use serde::{Deserialize, Serialize};

/// What the hop controller decided after evaluating a hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HopDecision {
    /// Coverage short, still improving: run another hop with the next page.
    Continue,
    /// Coverage short and stagnant: run another hop with a multiplied budget.
    Widen,
    Stop,
}

/// One executed retrieval hop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopPlan {
    pub hop_index: usize,
    pub candidate_budget: usize,
    /// Coverage of the merged pool after this hop.
    pub coverage_signal: f64,
    pub decision: HopDecision,
}
