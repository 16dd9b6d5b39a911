//! Monotone fusion.
//!
//! ```text
//! base  = (w_rel × relevance + w_auth × authority) / (w_rel + w_auth)
//! fused = base × ((1 − w_time) + w_time × compliance)
//! ```
//!
//! `base` is in [0, 1] and the compliance factor is in [0, 1], so for a fixed
//! relevance and authority the fused score never decreases as compliance grows.

use std::cmp::Ordering;

use chronoguard_core::config::FusionConfig;
use chronoguard_core::ScoredCandidate;

/// Logistic squash of an unbounded cross-encoder score.
pub fn sigmoid(x: f64) -> f64 {
    if !x.is_finite() {
        return if x > 0.0 { 1.0 } else { 0.0 };
    }
    1.0 / (1.0 + (-x).exp())
}

/// Relevance in [0, 1]: the squashed rerank score when present, otherwise
/// recall normalized by the largest recall score the request can produce.
pub fn relevance(candidate: &ScoredCandidate, recall_ceiling: f64) -> f64 {
    match candidate.rerank_score {
        Some(score) => sigmoid(score),
        None if recall_ceiling > 0.0 => (candidate.recall_score / recall_ceiling).clamp(0.0, 1.0),
        None => 0.0,
    }
}

/// The fused score for one candidate's factors.
pub fn fused_score(relevance: f64, authority: f64, compliance: f64, weights: &FusionConfig) -> f64 {
    let rel_w = weights.relevance_weight.max(0.0);
    let auth_w = weights.authority_weight.max(0.0);
    let denom = rel_w + auth_w;
    let base = if denom > 0.0 {
        (rel_w * relevance.clamp(0.0, 1.0) + auth_w * authority.clamp(0.0, 1.0)) / denom
    } else {
        0.0
    };
    let time_w = weights.time_weight.clamp(0.0, 1.0);
    let factor = (1.0 - time_w) + time_w * compliance.clamp(0.0, 1.0);
    base * factor
}

/// Canonical ranking order: fused score desc, then passage id asc.
pub fn rank_order(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.fused_score
        .total_cmp(&a.fused_score)
        .then_with(|| a.passage_id().cmp(b.passage_id()))
}

/// Score every candidate and sort into ranking order.
pub fn fuse(
    mut candidates: Vec<ScoredCandidate>,
    weights: &FusionConfig,
    recall_ceiling: f64,
) -> Vec<ScoredCandidate> {
    for c in &mut candidates {
        let rel = relevance(c, recall_ceiling);
        c.fused_score = fused_score(rel, c.passage.authority(), c.temporal_compliance, weights);
    }
    candidates.sort_by(rank_order);
    candidates
}
