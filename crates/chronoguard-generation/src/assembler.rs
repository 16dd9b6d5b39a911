//! Attribution card assembly.

use std::collections::HashSet;

use chronoguard_core::config::{AuthorityConfig, ChronoConfig};
use chronoguard_core::models::{
    AttributionCard, AuditTrail, AuthorityRung, CitedWindow, ConfidenceBand, ConfidenceLevel,
    ConflictTrace, ControllerStats, NumericTimeline,
};
use chronoguard_core::{QueryContext, ScoredCandidate};

use crate::digest::evidence_digest;
use crate::text::snippet;

/// Characters quoted per cited window.
pub const QUOTE_CHARS: usize = 280;
/// Characters per side of a counterfactual timeline.
pub const COUNTERFACTUAL_CHARS: usize = 140;
pub const MAX_COUNTERFACTUALS: usize = 3;
pub const MAX_ALTERNATIVE_WINDOWS: usize = 3;

pub const REASON_IN_WINDOW: &str = "in_window_evidence";
pub const REASON_INSUFFICIENT: &str = "insufficient_evidence";
pub const REASON_OVERLAP: &str = "chronosanity_overlap";
pub const REASON_HOP_SHORTFALL: &str = "hop_shortfall";

/// Inputs to one card.
#[derive(Debug, Clone)]
pub struct AssemblyInput<'a> {
    pub ctx: &'a QueryContext,
    pub passages: &'a [ScoredCandidate],
    /// All traces the gate recorded, including sub-threshold ones.
    pub conflict_traces: Vec<ConflictTrace>,
    /// Validated payload. `None` makes the card evidence-only.
    pub payload: Option<NumericTimeline>,
    pub evidence_only_reason: Option<String>,
    pub controller_stats: ControllerStats,
    pub audit_trail: AuditTrail,
}

#[derive(Debug, Clone)]
pub struct AttributionAssembler {
    authority: AuthorityConfig,
    snippet_chars: usize,
}

impl AttributionAssembler {
    pub fn new(authority: AuthorityConfig, snippet_chars: usize) -> Self {
        Self {
            authority,
            snippet_chars,
        }
    }

    pub fn from_policy(config: &ChronoConfig) -> Self {
        Self::new(config.authority.clone(), config.generation.snippet_chars)
    }

    pub fn assemble(&self, input: AssemblyInput<'_>) -> AttributionCard {
        let AssemblyInput {
            ctx,
            passages,
            conflict_traces,
            payload,
            evidence_only_reason,
            controller_stats,
            mut audit_trail,
        } = input;

        let evidence_only = payload.is_none();
        let evidence_only_reason = if evidence_only {
            Some(evidence_only_reason.unwrap_or_else(|| REASON_INSUFFICIENT.to_string()))
        } else {
            None
        };
        let digest = evidence_only.then(|| evidence_digest(ctx, passages, self.snippet_chars));

        let confidence_band = ConfidenceBand {
            level: confidence_level(
                passages.is_empty(),
                evidence_only,
                !conflict_traces.is_empty(),
                controller_stats.hop_shortfall,
            ),
            reasons: confidence_reasons(
                passages.is_empty(),
                evidence_only_reason.as_deref(),
                !conflict_traces.is_empty(),
                controller_stats.hop_shortfall,
            ),
            alternative_windows: alternative_windows(ctx, passages),
        };
        let counterfactual_scaffold = counterfactuals(ctx, passages, &conflict_traces);
        audit_trail.conflict_traces = conflict_traces;

        AttributionCard {
            answer_payload: payload,
            evidence_only,
            evidence_only_reason,
            digest,
            mode: ctx.mode,
            axis: ctx.axis,
            requested_window: *ctx.window(),
            windows: cited_windows(ctx, passages),
            authority_ladder: self.authority_ladder(passages),
            confidence_band,
            counterfactual_scaffold,
            controller_stats,
            audit_trail,
        }
    }

    /// Cited passages from most to least authoritative, ties by id.
    pub fn authority_ladder(&self, passages: &[ScoredCandidate]) -> Vec<AuthorityRung> {
        let mut seen = HashSet::new();
        let mut rungs: Vec<AuthorityRung> = passages
            .iter()
            .filter(|c| seen.insert(c.passage.id.as_str()))
            .map(|c| AuthorityRung {
                passage_id: c.passage.id.clone(),
                source_uri: c.passage.source_uri.clone(),
                authority_score: c.passage.authority(),
                tier: self.authority.tier_for(c.passage.authority()),
            })
            .collect();
        rungs.sort_by(|a, b| {
            b.authority_score
                .total_cmp(&a.authority_score)
                .then_with(|| a.passage_id.cmp(&b.passage_id))
        });
        rungs
    }
}

fn cited_windows(ctx: &QueryContext, passages: &[ScoredCandidate]) -> Vec<CitedWindow> {
    passages
        .iter()
        .map(|c| CitedWindow {
            passage_id: c.passage.id.clone(),
            source_uri: c.passage.source_uri.clone(),
            window: c.passage.window(ctx.axis).window().copied(),
            temporal_compliance: c.temporal_compliance,
            fused_score: c.fused_score,
            quote: snippet(&c.passage.text, QUOTE_CHARS),
        })
        .collect()
}

pub fn confidence_level(
    empty: bool,
    evidence_only: bool,
    has_conflicts: bool,
    hop_shortfall: bool,
) -> ConfidenceLevel {
    if empty || evidence_only {
        ConfidenceLevel::Low
    } else if has_conflicts || hop_shortfall {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::High
    }
}

fn confidence_reasons(
    empty: bool,
    evidence_only_reason: Option<&str>,
    has_conflicts: bool,
    hop_shortfall: bool,
) -> Vec<String> {
    let mut reasons = Vec::new();
    if let Some(reason) = evidence_only_reason {
        reasons.push(reason.to_string());
    }
    if empty {
        if !reasons.iter().any(|r| r == REASON_INSUFFICIENT) {
            reasons.push(REASON_INSUFFICIENT.to_string());
        }
    } else if evidence_only_reason.is_none() {
        reasons.push(REASON_IN_WINDOW.to_string());
    }
    if has_conflicts {
        reasons.push(REASON_OVERLAP.to_string());
    }
    if hop_shortfall {
        reasons.push(REASON_HOP_SHORTFALL.to_string());
    }
    reasons
}

/// Up to three distinct windows of retained passages that miss the
/// requested window.
pub fn alternative_windows(ctx: &QueryContext, passages: &[ScoredCandidate]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for c in passages {
        let Some(w) = c.passage.window(ctx.axis).window().copied() else {
            continue;
        };
        if w.intersects(ctx.window()) {
            continue;
        }
        let label = w.label();
        if !out.contains(&label) {
            out.push(label);
        }
        if out.len() == MAX_ALTERNATIVE_WINDOWS {
            break;
        }
    }
    out
}

/// Dual timelines for the first three conflicts:
/// `"<start-date>: <snippet>; <start-date>: <snippet>"`.
pub fn counterfactuals(
    ctx: &QueryContext,
    passages: &[ScoredCandidate],
    traces: &[ConflictTrace],
) -> Vec<String> {
    let side = |id: &str| -> Option<String> {
        let c = passages.iter().find(|c| c.passage.id == id)?;
        let start = c
            .passage
            .window(ctx.axis)
            .window()
            .map(|w| w.start.date_naive().to_string())
            .unwrap_or_else(|| "undated".to_string());
        Some(format!("{start}: {}", snippet(&c.passage.text, COUNTERFACTUAL_CHARS)))
    };
    traces
        .iter()
        .filter_map(|t| Some(format!("{}; {}", side(&t.passage_id_a)?, side(&t.passage_id_b)?)))
        .take(MAX_COUNTERFACTUALS)
        .collect()
}
