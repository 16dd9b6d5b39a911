use serde::{Deserialize, Serialize};

use super::{AuditTrail, ControllerStats, NumericTimeline};
use crate::time::{TimeAxis, TimeMode, TimeWindow};

/// Terminal output of one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionCard {
    /// Validated structured answer; always `None` when `evidence_only`.
    pub answer_payload: Option<NumericTimeline>,
    pub evidence_only: bool,
    /// Why the card is evidence-only, when it is.
    pub evidence_only_reason: Option<String>,
    /// Deterministic passage digest, present when `evidence_only`.
    pub digest: Option<String>,
    pub mode: TimeMode,
    pub axis: TimeAxis,
    pub requested_window: TimeWindow,
    pub windows: Vec<CitedWindow>,
    pub authority_ladder: Vec<AuthorityRung>,
    pub confidence_band: ConfidenceBand,
    pub counterfactual_scaffold: Vec<String>,
    pub controller_stats: ControllerStats,
    pub audit_trail: AuditTrail,
}

/// A cited passage and the window it is valid for on the query axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitedWindow {
    pub passage_id: String,
    pub source_uri: String,
    /// `None` for undated or malformed passages.
    pub window: Option<TimeWindow>,
    pub temporal_compliance: f64,
    pub fused_score: f64,
    pub quote: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityTier {
    Filing,
    Regulator,
    OfficialSite,
    ReliablePress,
    Blog,
    Unknown,
}

/// One rung of the authority ladder, ordered from most to least authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityRung {
    pub passage_id: String,
    pub source_uri: String,
    pub authority_score: f64,
    pub tier: AuthorityTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub level: ConfidenceLevel,
    pub reasons: Vec<String>,
    /// Windows of retained evidence that fall outside the requested window.
    pub alternative_windows: Vec<String>,
}
