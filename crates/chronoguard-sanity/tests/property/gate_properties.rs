use std::sync::Arc;

use chronoguard_core::config::SanityConfig;
use chronoguard_core::time::year_start;
use chronoguard_core::{Passage, ScoredCandidate};
use chronoguard_sanity::SanityGate;
use proptest::prelude::*;

fn candidate(i: usize, value: u32, from: i32, len: i32) -> ScoredCandidate {
    let p = Passage {
        id: format!("p{i:02}"),
        text: format!("GDP per capita was {value} units"),
        source_uri: "https://example.org".to_string(),
        valid_from: year_start(from),
        valid_to: year_start(from + len),
        transaction_from: None,
        transaction_to: None,
        authority_score: 0.5,
        region: Some("Europe".to_string()),
        unit: Some("intl_1990_usd".to_string()),
        embedding_ref: None,
        entities: Vec::new(),
    };
    ScoredCandidate::new(Arc::new(p), 0.01)
}

fn arb_candidates() -> impl Strategy<Value = Vec<ScoredCandidate>> {
    prop::collection::vec((1u32..5_000, 1800i32..1900, 1i32..50), 0..12).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (v, from, len))| candidate(i, v, from, len))
            .collect()
    })
}

proptest! {
    #[test]
    fn gate_is_deterministic(cands in arb_candidates(), threshold in 0.0f64..1.0) {
        let gate = SanityGate::new(SanityConfig { overlap_threshold: threshold, ..SanityConfig::default() });
        let a = gate.gate(cands.clone());
        let b = gate.gate(cands);
        prop_assert_eq!(a.conflict_traces, b.conflict_traces);
        prop_assert_eq!(a.evidence_only, b.evidence_only);
        prop_assert_eq!(a.max_conflict_score, b.max_conflict_score);
    }

    #[test]
    fn traces_reference_only_accepted_passages(cands in arb_candidates()) {
        let gate = SanityGate::new(SanityConfig { overlap_threshold: 0.3, ..SanityConfig::default() });
        let out = gate.gate(cands);
        for t in &out.conflict_traces {
            prop_assert!(out.accepted.iter().any(|c| c.passage_id() == t.passage_id_a));
            prop_assert!(out.accepted.iter().any(|c| c.passage_id() == t.passage_id_b));
            prop_assert!(t.overlap_score > 0.0 && t.overlap_score <= 1.0);
        }
    }

    #[test]
    fn evidence_only_iff_max_score_exceeds_threshold(cands in arb_candidates(), threshold in 0.0f64..1.0) {
        let gate = SanityGate::new(SanityConfig { overlap_threshold: threshold, ..SanityConfig::default() });
        let out = gate.gate(cands);
        prop_assert_eq!(out.evidence_only, out.max_conflict_score > threshold);
        prop_assert_eq!(out.reason.is_some(), out.evidence_only);
    }
}
