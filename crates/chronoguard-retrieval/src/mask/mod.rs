//! Temporal mask: scores each candidate's window against the requested
//! window on the query axis.
//!
//! HARD keeps only overlapping, dated candidates at compliance 1.0.
//! INTELLIGENT decays compliance with distance and drops a candidate only
//! when its compliance is exactly zero.

pub mod decay;

use chronoguard_core::config::MaskConfig;
use chronoguard_core::{Passage, QueryContext, ScoredCandidate, TimeAxis, TimeMode, WindowState};
use tracing::debug;

/// Result of masking one candidate pool.
#[derive(Debug, Clone, Default)]
pub struct MaskOutcome {
    pub kept: Vec<ScoredCandidate>,
    /// Ids of dropped candidates, in input order.
    pub dropped: Vec<String>,
}

/// Temporal compliance of `passage` for the query, in [0, 1].
pub fn compliance(passage: &Passage, ctx: &QueryContext, config: &MaskConfig) -> f64 {
    let requested = ctx.window();
    let state = passage.window(ctx.axis);
    match ctx.mode {
        TimeMode::Hard => match state {
            WindowState::Dated(w) if w.intersects(requested) => 1.0,
            _ => 0.0,
        },
        TimeMode::Intelligent => {
            let base = match state {
                WindowState::Dated(w) => {
                    decay::decay(w.gap_days(requested), config.decay_curve, config.decay_span_days)
                }
                WindowState::Undated => config.undated_compliance,
                WindowState::Malformed => config.malformed_compliance,
            };
            let penalty = if ctx.axis == TimeAxis::Valid && passage.transaction_mismatch() {
                1.0 - config.transaction_mismatch_penalty
            } else {
                1.0
            };
            (base * penalty).clamp(0.0, 1.0)
        }
    }
}

/// Assign compliance to every candidate and drop those at zero.
pub fn mask(candidates: Vec<ScoredCandidate>, ctx: &QueryContext, config: &MaskConfig) -> MaskOutcome {
    let mut outcome = MaskOutcome::default();
    for mut c in candidates {
        let value = compliance(&c.passage, ctx, config);
        if value > 0.0 {
            c.temporal_compliance = value;
            outcome.kept.push(c);
        } else {
            outcome.dropped.push(c.passage.id.clone());
        }
    }
    debug!(
        mode = ?ctx.mode,
        axis = ?ctx.axis,
        kept = outcome.kept.len(),
        dropped = outcome.dropped.len(),
        "temporal mask applied"
    );
    outcome
}
