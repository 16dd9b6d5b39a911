use serde::{Deserialize, Serialize};

use super::defaults;

/// Shape of the INTELLIGENT-mode compliance curve over temporal distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecayCurve {
    /// `max(0, 1 - d/span)`. Reaches zero at one span.
    #[default]
    Linear,
    /// `exp(-d/span)`. Never reaches zero.
    Exponential,
    /// `1 / (1 + d/span)`. Heavy tail, never reaches zero.
    Reciprocal,
}

/// Temporal mask configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    pub decay_curve: DecayCurve,
    /// Distance scale of the decay curve, in days.
    pub decay_span_days: f64,
    /// Compliance given to passages with no window on the query axis.
    pub undated_compliance: f64,
    /// Compliance given to passages with inverted window bounds.
    pub malformed_compliance: f64,
    /// Multiplicative compliance penalty for a transaction window disjoint from the valid window.
    pub transaction_mismatch_penalty: f64,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            decay_curve: DecayCurve::default(),
            decay_span_days: defaults::DEFAULT_DECAY_SPAN_DAYS,
            undated_compliance: defaults::DEFAULT_UNDATED_COMPLIANCE,
            malformed_compliance: defaults::DEFAULT_MALFORMED_COMPLIANCE,
            transaction_mismatch_penalty: defaults::DEFAULT_TRANSACTION_MISMATCH_PENALTY,
        }
    }
}
