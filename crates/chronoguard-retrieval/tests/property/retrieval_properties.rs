use std::sync::Arc;

use chronoguard_core::config::{ControllerConfig, FusionConfig, MaskConfig};
use chronoguard_core::models::SearchHit;
use chronoguard_core::time::year_start;
use chronoguard_core::{
    Passage, QueryContext, RequestedWindow, ScoredCandidate, TimeAxis, TimeMode,
};
use chronoguard_retrieval::mask::mask;
use chronoguard_retrieval::ranking::fusion::{fuse, fused_score};
use chronoguard_retrieval::search::rrf_fusion;
use chronoguard_retrieval::HopController;
use proptest::prelude::*;

fn passage(id: String, from: i32, to: i32, authority: f64) -> Passage {
    Passage {
        id,
        text: "text".to_string(),
        source_uri: "https://example.org".to_string(),
        valid_from: year_start(from),
        valid_to: year_start(to),
        transaction_from: None,
        transaction_to: None,
        authority_score: authority,
        region: None,
        unit: None,
        embedding_ref: None,
        entities: Vec::new(),
    }
}

// ── Monotone fusion ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn fused_score_non_decreasing_in_compliance(
        relevance in 0.0f64..=1.0,
        authority in 0.0f64..=1.0,
        ca in 0.0f64..=1.0,
        cb in 0.0f64..=1.0,
        rel_w in 0.0f64..=2.0,
        auth_w in 0.0f64..=2.0,
        time_w in 0.0f64..=1.0,
    ) {
        let w = FusionConfig { relevance_weight: rel_w, authority_weight: auth_w, time_weight: time_w };
        let (hi, lo) = if ca >= cb { (ca, cb) } else { (cb, ca) };
        prop_assert!(fused_score(relevance, authority, hi, &w) >= fused_score(relevance, authority, lo, &w));
    }

    #[test]
    fn equal_rerank_and_authority_orders_by_compliance(
        rerank in -10.0f64..10.0,
        authority in 0.0f64..=1.0,
        ca in 0.0f64..=1.0,
        cb in 0.0f64..=1.0,
    ) {
        let mut a = ScoredCandidate::new(Arc::new(passage("a".into(), 1850, 1900, authority)), 0.01);
        let mut b = ScoredCandidate::new(Arc::new(passage("b".into(), 1850, 1900, authority)), 0.02);
        a.rerank_score = Some(rerank);
        b.rerank_score = Some(rerank);
        a.temporal_compliance = ca;
        b.temporal_compliance = cb;
        let ranked = fuse(vec![a, b], &FusionConfig::default(), 1.0 / 61.0);
        let fa = ranked.iter().find(|c| c.passage_id() == "a").unwrap().fused_score;
        let fb = ranked.iter().find(|c| c.passage_id() == "b").unwrap().fused_score;
        if ca >= cb {
            prop_assert!(fa >= fb);
        } else {
            prop_assert!(fb >= fa);
        }
    }

    #[test]
    fn fused_scores_stay_in_unit_interval(
        relevance in -1.0f64..2.0,
        authority in -1.0f64..2.0,
        compliance in -1.0f64..2.0,
    ) {
        let s = fused_score(relevance, authority, compliance, &FusionConfig::default());
        prop_assert!((0.0..=1.0).contains(&s));
    }
}

// ── HARD-mode exclusion ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn hard_mode_never_keeps_non_overlapping(
        windows in prop::collection::vec((1700i32..2000, 1i32..60), 1..20),
        req_start in 1800i32..1950,
        req_len in 1i32..20,
    ) {
        let ctx = QueryContext::new(
            "q",
            TimeAxis::Valid,
            RequestedWindow::Range {
                from: year_start(req_start).unwrap(),
                to: year_start(req_start + req_len).unwrap(),
            },
            TimeMode::Hard,
            "generic",
        ).unwrap();
        let candidates: Vec<ScoredCandidate> = windows
            .iter()
            .enumerate()
            .map(|(i, (from, len))| {
                ScoredCandidate::new(Arc::new(passage(format!("p{i}"), *from, from + len, 0.5)), 0.01)
            })
            .collect();
        let out = mask(candidates, &ctx, &MaskConfig::default());
        prop_assert_eq!(out.kept.len() + out.dropped.len(), windows.len());
        for c in &out.kept {
            let w = c.passage.window(TimeAxis::Valid);
            prop_assert!(w.window().unwrap().intersects(ctx.window()));
            prop_assert_eq!(c.temporal_compliance, 1.0);
        }
    }

    #[test]
    fn intelligent_compliance_is_in_unit_interval(
        from in 1500i32..2100,
        len in 0i32..100,
    ) {
        let ctx = QueryContext::new(
            "q",
            TimeAxis::Valid,
            RequestedWindow::Range { from: year_start(1870).unwrap(), to: year_start(1871).unwrap() },
            TimeMode::Intelligent,
            "generic",
        ).unwrap();
        let c = ScoredCandidate::new(Arc::new(passage("p".into(), from, from + len, 0.5)), 0.01);
        let out = mask(vec![c], &ctx, &MaskConfig::default());
        for c in &out.kept {
            prop_assert!(c.temporal_compliance > 0.0 && c.temporal_compliance <= 1.0);
        }
    }
}

// ── Hop boundedness ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn controller_terminates_within_max_hops(
        max_hops in 1usize..8,
        coverages in prop::collection::vec(0.0f64..=1.0, 16),
        new_counts in prop::collection::vec(0usize..5, 16),
        hard in any::<bool>(),
    ) {
        let cfg = ControllerConfig { max_hops, ..ControllerConfig::default() };
        let mode = if hard { TimeMode::Hard } else { TimeMode::Intelligent };
        let mut c = HopController::new(&cfg, mode, 12);
        let mut steps = 0;
        while let Some(budget) = c.plan() {
            prop_assert!(budget <= cfg.budget_cap);
            c.evaluate(coverages[steps], new_counts[steps]);
            steps += 1;
            prop_assert!(steps <= 16);
        }
        prop_assert!(c.executed_hops() <= max_hops);
        prop_assert!(c.hops().len() <= c.planned_hops());
        prop_assert!(c.is_done());
    }
}

// ── RRF determinism ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rrf_is_order_independent_for_equal_inputs(
        ids in prop::collection::vec(0u8..20, 0..15),
        scores in prop::collection::vec(0.0f64..1.0, 15),
    ) {
        let hits: Vec<SearchHit> = ids
            .iter()
            .zip(&scores)
            .map(|(id, s)| SearchHit::new(format!("p{id}"), *s))
            .collect();
        let mut reversed = hits.clone();
        reversed.reverse();
        let a = rrf_fusion::fuse(&hits, &reversed, 0.5, 0.5, 60);
        let b = rrf_fusion::fuse(&reversed, &hits, 0.5, 0.5, 60);
        let ids_a: Vec<&str> = a.iter().map(|h| h.passage_id.as_str()).collect();
        let ids_b: Vec<&str> = b.iter().map(|h| h.passage_id.as_str()).collect();
        prop_assert_eq!(ids_a, ids_b);
    }
}
