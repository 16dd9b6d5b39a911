use serde::{Deserialize, Serialize};

/// Why two passages were judged to conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConflictReason {
    /// Both report a number for the same subject and they differ beyond tolerance.
    NumericDivergence {
        value_a: f64,
        value_b: f64,
        relative_delta: f64,
    },
    /// Both assert a value for the same entity key and the values differ.
    EntityMismatch {
        key: String,
        value_a: String,
        value_b: String,
    },
}

/// Audit record of a conflicting passage pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictTrace {
    pub passage_id_a: String,
    pub passage_id_b: String,
    /// Window IoU of the pair, in [0, 1].
    pub overlap_score: f64,
    pub reason: ConflictReason,
}
