//! The gate itself.

use chronoguard_core::config::{ChronoConfig, SanityConfig};
use chronoguard_core::models::ConflictTrace;
use chronoguard_core::{ScoredCandidate, TimeAxis};
use chronoguard_observability::gate_span;
use chronoguard_observability::tracing_setup::events;
use tracing::{debug, info};

use crate::{detection, reduce};

/// Result of gating a ranked passage set.
#[derive(Debug, Clone)]
pub struct GateOutcome {
    /// Reduced passage set, still in ranking order.
    pub accepted: Vec<ScoredCandidate>,
    pub conflict_traces: Vec<ConflictTrace>,
    pub evidence_only: bool,
    /// Highest conflict score among examined pairs, 0.0 when none conflict.
    pub max_conflict_score: f64,
    /// Set when `evidence_only`.
    pub reason: Option<String>,
}

/// ChronoSanity gate bound to one policy snapshot's sanity section.
#[derive(Debug, Clone)]
pub struct SanityGate {
    config: SanityConfig,
}

impl SanityGate {
    pub fn new(config: SanityConfig) -> Self {
        Self { config }
    }

    pub fn from_policy(config: &ChronoConfig) -> Self {
        Self::new(config.sanity.clone())
    }

    pub fn threshold(&self) -> f64 {
        self.config.overlap_threshold
    }

    /// Reduce, then inspect every pair among the top `examine_top_n`
    /// passages whose validity windows overlap. A pair's conflict score is
    /// the IoU of those windows, whatever axis the query was routed to.
    pub fn gate(&self, ranked: Vec<ScoredCandidate>) -> GateOutcome {
        let span = gate_span!(ranked.len(), self.config.overlap_threshold);
        let _guard = span.enter();

        let accepted = reduce(ranked);
        let top = &accepted[..accepted.len().min(self.config.examine_top_n)];

        let mut conflict_traces = Vec::new();
        let mut max_conflict_score: f64 = 0.0;
        for (i, a) in top.iter().enumerate() {
            for b in &top[i + 1..] {
                let (Some(wa), Some(wb)) = (
                    a.passage.window(TimeAxis::Valid).window().copied(),
                    b.passage.window(TimeAxis::Valid).window().copied(),
                ) else {
                    continue;
                };
                let overlap = wa.iou(&wb);
                if overlap <= 0.0 {
                    continue;
                }
                let Some(reason) =
                    detection::detect_all(&a.passage, &b.passage, self.config.numeric_tolerance)
                else {
                    continue;
                };
                events::conflict_detected(a.passage_id(), b.passage_id(), overlap);
                max_conflict_score = max_conflict_score.max(overlap);
                conflict_traces.push(ConflictTrace {
                    passage_id_a: a.passage.id.clone(),
                    passage_id_b: b.passage.id.clone(),
                    overlap_score: overlap,
                    reason,
                });
            }
        }

        let evidence_only = max_conflict_score > self.config.overlap_threshold;
        if evidence_only {
            info!(
                max_conflict_score,
                threshold = self.config.overlap_threshold,
                traces = conflict_traces.len(),
                "conflict above threshold, degrading to evidence-only"
            );
        } else {
            debug!(
                max_conflict_score,
                traces = conflict_traces.len(),
                "gate passed"
            );
        }

        GateOutcome {
            accepted,
            conflict_traces,
            evidence_only,
            max_conflict_score,
            reason: evidence_only.then(|| self.config.evidence_only_reason.clone()),
        }
    }
}
