//! Weighted Reciprocal Rank Fusion: score = Σ w_i / (k + rank_i)
//!
//! Combines the lexical and vector ranked lists into one pool without
//! normalizing scores across oracles. Ranks are 1-based.

use std::collections::{BTreeMap, HashSet};

use chronoguard_core::models::SearchHit;

/// A passage id after RRF fusion.
#[derive(Debug, Clone, PartialEq)]
pub struct RrfHit {
    pub passage_id: String,
    /// Fused RRF score (higher = more relevant).
    pub rrf_score: f64,
    pub lexical_rank: Option<usize>,
    pub vector_rank: Option<usize>,
}

/// Put an oracle list in canonical order (score desc, id asc) and drop
/// repeated ids, keeping the best-ranked occurrence.
pub fn canonicalize(hits: &[SearchHit]) -> Vec<&SearchHit> {
    let mut sorted: Vec<&SearchHit> = hits.iter().collect();
    sorted.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.passage_id.cmp(&b.passage_id))
    });
    let mut seen = HashSet::new();
    sorted.retain(|h| seen.insert(h.passage_id.as_str()));
    sorted
}

/// Fuse the two lists. Output is sorted by score desc, then id asc.
pub fn fuse(
    lexical: &[SearchHit],
    vector: &[SearchHit],
    lexical_weight: f64,
    vector_weight: f64,
    k: u32,
) -> Vec<RrfHit> {
    let k = f64::from(k);
    let mut pool: BTreeMap<&str, RrfHit> = BTreeMap::new();

    for (i, hit) in canonicalize(lexical).into_iter().enumerate() {
        let rank = i + 1;
        let entry = pool.entry(hit.passage_id.as_str()).or_insert_with(|| RrfHit {
            passage_id: hit.passage_id.clone(),
            rrf_score: 0.0,
            lexical_rank: None,
            vector_rank: None,
        });
        entry.rrf_score += lexical_weight / (k + rank as f64);
        entry.lexical_rank = Some(rank);
    }

    for (i, hit) in canonicalize(vector).into_iter().enumerate() {
        let rank = i + 1;
        let entry = pool.entry(hit.passage_id.as_str()).or_insert_with(|| RrfHit {
            passage_id: hit.passage_id.clone(),
            rrf_score: 0.0,
            lexical_rank: None,
            vector_rank: None,
        });
        entry.rrf_score += vector_weight / (k + rank as f64);
        entry.vector_rank = Some(rank);
    }

    let mut fused: Vec<RrfHit> = pool.into_values().collect();
    fused.sort_by(|a, b| {
        b.rrf_score
            .total_cmp(&a.rrf_score)
            .then_with(|| a.passage_id.cmp(&b.passage_id))
    });
    fused
}

/// Largest score [`fuse`] can produce: rank 1 in both lists.
pub fn max_score(lexical_weight: f64, vector_weight: f64, k: u32) -> f64 {
    (lexical_weight + vector_weight) / (f64::from(k) + 1.0)
}
