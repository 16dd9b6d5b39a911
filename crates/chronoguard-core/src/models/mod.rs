pub mod attribution_card;
pub mod audit;
pub mod candidate;
pub mod conflict_trace;
pub mod controller_stats;
pub mod generation;
pub mod hop_plan;
pub mod passage;
pub mod query;

pub use attribution_card::{
    AttributionCard, AuthorityRung, AuthorityTier, CitedWindow, ConfidenceBand, ConfidenceLevel,
};
pub use audit::{AuditTrail, DegradationEvent};
pub use candidate::ScoredCandidate;
pub use conflict_trace::{ConflictReason, ConflictTrace};
pub use controller_stats::{ControllerStats, RerankMethod, StopReason};
pub use generation::{
    ChatMessage, ChatRole, EvidenceBullet, GenerationParams, NumericRange, NumericTimeline,
};
pub use hop_plan::{HopDecision, HopPlan};
pub use passage::{Passage, SearchHit};
pub use query::QueryContext;
