//! Structured log events for key pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

use chronoguard_core::models::HopDecision;

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a conflict found by the sanity gate.
pub fn conflict_detected(passage_id_a: &str, passage_id_b: &str, overlap_score: f64) {
    tracing::warn!(
        event = "conflict_detected",
        passage_id_a = %passage_id_a,
        passage_id_b = %passage_id_b,
        overlap_score = overlap_score,
        "temporal conflict detected"
    );
}

/// Log the end of one DHQC hop.
pub fn hop_completed(hop_index: usize, coverage: f64, decision: HopDecision) {
    tracing::debug!(
        event = "hop_completed",
        hop_index = hop_index,
        coverage = coverage,
        decision = ?decision,
        "hop completed"
    );
}

/// Log a finished request.
pub fn request_completed(evidence_only: bool, passages: usize, latency_ms: u64) {
    tracing::info!(
        event = "request_completed",
        evidence_only = evidence_only,
        passages = passages,
        latency_ms = latency_ms,
        "request completed"
    );
}
