//! Record recovered failures: log them and append them to the audit trail.

use chronoguard_core::models::{AuditTrail, DegradationEvent};

use crate::tracing_setup::events;

/// Log `event` and append it to `trail`.
pub fn record_degradation(trail: &mut AuditTrail, event: DegradationEvent) {
    events::degradation_triggered(&event.component, &event.failure, &event.fallback_used);
    trail.record(event);
}

/// Record every event in order.
pub fn record_all(trail: &mut AuditTrail, events: impl IntoIterator<Item = DegradationEvent>) {
    for event in events {
        record_degradation(trail, event);
    }
}

/// Reason string of the first recorded degradation, for controller stats.
pub fn first_reason(trail: &AuditTrail) -> Option<String> {
    trail
        .degradations
        .first()
        .map(|d| format!("{}: {}", d.component, d.failure))
}
