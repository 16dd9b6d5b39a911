use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ConflictTrace;

/// A recovered failure: which component failed, how, and what was used instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}

impl DegradationEvent {
    pub fn now(
        component: impl Into<String>,
        failure: impl Into<String>,
        fallback_used: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            failure: failure.into(),
            fallback_used: fallback_used.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Audit trail attached to every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrail {
    pub request_id: Uuid,
    /// Version of the policy snapshot the request ran under.
    pub policy_version: String,
    pub conflict_traces: Vec<ConflictTrace>,
    pub degradations: Vec<DegradationEvent>,
}

impl AuditTrail {
    pub fn new(policy_version: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            policy_version: policy_version.into(),
            conflict_traces: Vec::new(),
            degradations: Vec::new(),
        }
    }

    pub fn record(&mut self, event: DegradationEvent) {
        self.degradations.push(event);
    }

    /// Whether any degradation was recorded for `component`.
    pub fn degraded(&self, component: &str) -> bool {
        self.degradations.iter().any(|d| d.component == component)
    }
}
