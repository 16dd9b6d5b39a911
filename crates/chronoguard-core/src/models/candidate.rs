use std::sync::Arc;

use crate::models::Passage;

/// A passage moving through mask → fusion → rerank for a single request.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub passage: Arc<Passage>,
    /// Weighted reciprocal-rank score from recall.
    pub recall_score: f64,
    /// Temporal compliance in [0, 1]. 1.0 until masked.
    pub temporal_compliance: f64,
    /// Cross-encoder score, `None` until reranked.
    pub rerank_score: Option<f64>,
    pub fused_score: f64,
    /// 1-based rank in the lexical oracle's list, if it appeared there.
    pub lexical_rank: Option<usize>,
    /// 1-based rank in the vector oracle's list, if it appeared there.
    pub vector_rank: Option<usize>,
}

impl ScoredCandidate {
    pub fn new(passage: Arc<Passage>, recall_score: f64) -> Self {
        Self {
            passage,
            recall_score,
            temporal_compliance: 1.0,
            rerank_score: None,
            fused_score: 0.0,
            lexical_rank: None,
            vector_rank: None,
        }
    }

    pub fn passage_id(&self) -> &str {
        &self.passage.id
    }
}
