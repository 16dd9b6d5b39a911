use serde::{Deserialize, Serialize};

use super::defaults;

/// DHQC hop controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub max_hops: usize,
    /// Hop cap for HARD-mode requests; the smaller of this and `max_hops` applies.
    pub hard_max_hops: usize,
    /// Coverage at or above which the controller stops.
    pub coverage_threshold: f64,
    /// Candidate budget of the first hop.
    pub initial_budget: usize,
    /// Budget added on a plain `Continue` hop.
    pub budget_step: usize,
    /// Budget multiplier applied when coverage stagnates.
    pub widen_factor: usize,
    pub budget_cap: usize,
    /// Coverage gain below which two consecutive hops count as stagnant.
    pub stagnation_epsilon: f64,
    /// Minimum fused score for a passage to count toward coverage.
    pub min_fused_score: f64,
    /// Minimum compliance for a passage to count toward sub-claim coverage.
    pub coverage_min_compliance: f64,
    /// Upper bound on time slices the requested window is split into.
    pub max_time_slices: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_hops: defaults::DEFAULT_MAX_HOPS,
            hard_max_hops: defaults::DEFAULT_HARD_MAX_HOPS,
            coverage_threshold: defaults::DEFAULT_COVERAGE_THRESHOLD,
            initial_budget: defaults::DEFAULT_INITIAL_BUDGET,
            budget_step: defaults::DEFAULT_BUDGET_STEP,
            widen_factor: defaults::DEFAULT_WIDEN_FACTOR,
            budget_cap: defaults::DEFAULT_BUDGET_CAP,
            stagnation_epsilon: defaults::DEFAULT_STAGNATION_EPSILON,
            min_fused_score: defaults::DEFAULT_MIN_FUSED_SCORE,
            coverage_min_compliance: defaults::DEFAULT_COVERAGE_MIN_COMPLIANCE,
            max_time_slices: defaults::DEFAULT_MAX_TIME_SLICES,
        }
    }
}
