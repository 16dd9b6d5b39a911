use std::sync::Arc;

use chronoguard_core::config::ChronoConfig;
use chronoguard_core::models::{
    AuditTrail, AuthorityTier, ConfidenceLevel, ConflictReason, ConflictTrace, ControllerStats,
    EvidenceBullet, NumericRange, NumericTimeline,
};
use chronoguard_core::time::year_start;
use chronoguard_core::{Passage, QueryContext, RequestedWindow, ScoredCandidate, TimeAxis, TimeMode};
use chronoguard_generation::{AssemblyInput, AttributionAssembler};

fn ctx() -> QueryContext {
    QueryContext::new(
        "Europe GDP per capita in 1870",
        TimeAxis::Valid,
        RequestedWindow::Range {
            from: year_start(1865).unwrap(),
            to: year_start(1876).unwrap(),
        },
        TimeMode::Intelligent,
        "world-economy",
    )
    .unwrap()
}

fn candidate(id: &str, from: i32, to: i32, authority: f64) -> ScoredCandidate {
    let p = Passage {
        id: id.to_string(),
        text: format!("{id} reports GDP per capita. ").repeat(30),
        source_uri: format!("https://example.org/{id}"),
        valid_from: year_start(from),
        valid_to: year_start(to),
        transaction_from: None,
        transaction_to: None,
        authority_score: authority,
        region: None,
        unit: None,
        embedding_ref: None,
        entities: Vec::new(),
    };
    ScoredCandidate::new(Arc::new(p), 0.01)
}

fn payload() -> NumericTimeline {
    NumericTimeline {
        range: NumericRange {
            low: 1800.0,
            high: 2100.0,
            most_likely: 1974.0,
            unit: "intl_1990_usd".to_string(),
        },
        evidence: vec![
            EvidenceBullet {
                text: "a".to_string(),
                year: Some(1870),
                passage_id: None,
            },
            EvidenceBullet {
                text: "b".to_string(),
                year: Some(1871),
                passage_id: None,
            },
        ],
        summary: None,
    }
}

fn trace(a: &str, b: &str) -> ConflictTrace {
    ConflictTrace {
        passage_id_a: a.to_string(),
        passage_id_b: b.to_string(),
        overlap_score: 0.8,
        reason: ConflictReason::NumericDivergence {
            value_a: 1.0,
            value_b: 2.0,
            relative_delta: 0.5,
        },
    }
}

fn input<'a>(
    ctx: &'a QueryContext,
    passages: &'a [ScoredCandidate],
    traces: Vec<ConflictTrace>,
    payload: Option<NumericTimeline>,
    reason: Option<&str>,
    hop_shortfall: bool,
) -> AssemblyInput<'a> {
    AssemblyInput {
        ctx,
        passages,
        conflict_traces: traces,
        payload,
        evidence_only_reason: reason.map(str::to_string),
        controller_stats: ControllerStats {
            hop_shortfall,
            ..ControllerStats::default()
        },
        audit_trail: AuditTrail::new("v1"),
    }
}

fn assembler() -> AttributionAssembler {
    AttributionAssembler::from_policy(&ChronoConfig::default())
}

#[test]
fn answered_card_is_high_confidence() {
    let ctx = ctx();
    let passages = vec![candidate("p-1850", 1850, 1900, 0.9)];
    let card = assembler().assemble(input(&ctx, &passages, Vec::new(), Some(payload()), None, false));

    assert!(!card.evidence_only);
    assert!(card.answer_payload.is_some());
    assert!(card.digest.is_none());
    assert!(card.evidence_only_reason.is_none());
    assert_eq!(card.confidence_band.level, ConfidenceLevel::High);
    assert_eq!(card.confidence_band.reasons, vec!["in_window_evidence"]);
    assert_eq!(card.windows.len(), 1);
    assert_eq!(card.windows[0].quote.chars().count(), 280);
    assert_eq!(card.audit_trail.policy_version, "v1");
}

#[test]
fn evidence_only_card_has_digest_and_no_payload() {
    let ctx = ctx();
    let passages = vec![
        candidate("p-a", 1850, 1900, 0.9),
        candidate("p-b", 1860, 1900, 0.6),
    ];
    let card = assembler().assemble(input(
        &ctx,
        &passages,
        vec![trace("p-a", "p-b")],
        None,
        Some("CHRONO_SANITY"),
        false,
    ));

    assert!(card.evidence_only);
    assert!(card.answer_payload.is_none());
    assert_eq!(card.evidence_only_reason.as_deref(), Some("CHRONO_SANITY"));
    let digest = card.digest.unwrap();
    assert!(digest.contains("- p-a (1850-01-01 → 1900-01-01)"));
    assert!(digest.contains("- p-b (1860-01-01 → 1900-01-01)"));
    assert_eq!(card.confidence_band.level, ConfidenceLevel::Low);
    assert_eq!(
        card.confidence_band.reasons,
        vec!["CHRONO_SANITY", "chronosanity_overlap"]
    );
    assert_eq!(card.audit_trail.conflict_traces.len(), 1);

    assert_eq!(card.counterfactual_scaffold.len(), 1);
    let cf = &card.counterfactual_scaffold[0];
    assert!(cf.starts_with("1850-01-01: p-a reports"));
    assert!(cf.contains("; 1860-01-01: p-b reports"));
}

#[test]
fn sub_threshold_conflict_or_shortfall_is_medium() {
    let ctx = ctx();
    let passages = vec![
        candidate("p-a", 1850, 1900, 0.9),
        candidate("p-b", 1860, 1900, 0.6),
    ];
    let with_conflict = assembler().assemble(input(
        &ctx,
        &passages,
        vec![trace("p-a", "p-b")],
        Some(payload()),
        None,
        false,
    ));
    assert_eq!(with_conflict.confidence_band.level, ConfidenceLevel::Medium);

    let with_shortfall =
        assembler().assemble(input(&ctx, &passages, Vec::new(), Some(payload()), None, true));
    assert_eq!(with_shortfall.confidence_band.level, ConfidenceLevel::Medium);
    assert!(with_shortfall
        .confidence_band
        .reasons
        .contains(&"hop_shortfall".to_string()));
}

#[test]
fn empty_passage_set_is_low_with_insufficient_evidence() {
    let ctx = ctx();
    let card = assembler().assemble(input(&ctx, &[], Vec::new(), None, None, true));
    assert!(card.evidence_only);
    assert_eq!(card.confidence_band.level, ConfidenceLevel::Low);
    assert_eq!(
        card.confidence_band.reasons,
        vec!["insufficient_evidence", "hop_shortfall"]
    );
    assert!(card.digest.unwrap().starts_with("No in-window evidence found"));
    assert!(card.windows.is_empty());
}

#[test]
fn authority_ladder_orders_and_tiers() {
    let passages = vec![
        candidate("blog", 1860, 1870, 0.3),
        candidate("filing", 1860, 1870, 1.0),
        candidate("press", 1860, 1870, 0.6),
        candidate("press-b", 1860, 1870, 0.6),
    ];
    let ladder = assembler().authority_ladder(&passages);
    let ids: Vec<&str> = ladder.iter().map(|r| r.passage_id.as_str()).collect();
    assert_eq!(ids, vec!["filing", "press", "press-b", "blog"]);
    assert_eq!(ladder[0].tier, AuthorityTier::Filing);
    assert_eq!(ladder[1].tier, AuthorityTier::ReliablePress);
    assert_eq!(ladder[3].tier, AuthorityTier::Blog);
}

#[test]
fn alternative_windows_are_distinct_and_capped() {
    let ctx = ctx();
    let passages = vec![
        candidate("in", 1860, 1870, 0.5),
        candidate("a", 1900, 1910, 0.5),
        candidate("a2", 1900, 1910, 0.5),
        candidate("b", 1920, 1930, 0.5),
        candidate("c", 1940, 1950, 0.5),
        candidate("d", 1960, 1970, 0.5),
    ];
    let card = assembler().assemble(input(&ctx, &passages, Vec::new(), Some(payload()), None, false));
    assert_eq!(
        card.confidence_band.alternative_windows,
        vec![
            "1900-01-01 → 1910-01-01",
            "1920-01-01 → 1930-01-01",
            "1940-01-01 → 1950-01-01",
        ]
    );
}

#[test]
fn counterfactuals_cap_at_three() {
    let ctx = ctx();
    let passages = vec![
        candidate("a", 1860, 1870, 0.5),
        candidate("b", 1860, 1870, 0.5),
        candidate("c", 1860, 1870, 0.5),
    ];
    let traces = vec![trace("a", "b"), trace("a", "c"), trace("b", "c"), trace("b", "a")];
    let card = assembler().assemble(input(&ctx, &passages, traces, None, Some("CHRONO_SANITY"), false));
    assert_eq!(card.counterfactual_scaffold.len(), 3);
    assert_eq!(card.audit_trail.conflict_traces.len(), 4);
}
