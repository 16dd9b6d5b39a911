//! Hybrid recall fanout: lexical and vector oracles queried in parallel,
//! merged with weighted RRF, hydrated from the passage store.

pub mod rrf_fusion;

use std::sync::Arc;

use chronoguard_core::errors::RetrievalError;
use chronoguard_core::models::{DegradationEvent, SearchHit};
use chronoguard_core::traits::{IEmbeddingProvider, ILexicalSearch, IPassageStore, IVectorSearch};
use chronoguard_core::{QueryContext, ScoredCandidate};
use tracing::{debug, warn};

/// Recall weights and RRF constant for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecallWeights {
    pub lexical: f64,
    pub vector: f64,
    pub rrf_k: u32,
}

impl RecallWeights {
    /// Largest recall score these weights can produce.
    pub fn ceiling(&self) -> f64 {
        rrf_fusion::max_score(self.lexical, self.vector, self.rrf_k)
    }
}

/// Candidates from one recall call plus any degradations it absorbed.
#[derive(Debug, Clone, Default)]
pub struct RecallOutcome {
    /// Sorted by recall score desc, then id asc.
    pub candidates: Vec<ScoredCandidate>,
    pub degradations: Vec<DegradationEvent>,
}

/// Fans a query out to the lexical and vector oracles.
#[derive(Clone)]
pub struct HybridSearcher {
    lexical: Arc<dyn ILexicalSearch>,
    vector: Arc<dyn IVectorSearch>,
    embedder: Arc<dyn IEmbeddingProvider>,
    store: Arc<dyn IPassageStore>,
}

impl HybridSearcher {
    pub fn new(
        lexical: Arc<dyn ILexicalSearch>,
        vector: Arc<dyn IVectorSearch>,
        embedder: Arc<dyn IEmbeddingProvider>,
        store: Arc<dyn IPassageStore>,
    ) -> Self {
        Self {
            lexical,
            vector,
            embedder,
            store,
        }
    }

    /// Recall up to `budget` hits from each oracle and merge them.
    ///
    /// One failing oracle degrades to the other; both failing is an error.
    pub fn recall(
        &self,
        ctx: &QueryContext,
        budget: usize,
        weights: RecallWeights,
    ) -> Result<RecallOutcome, RetrievalError> {
        let mut degradations = Vec::new();

        let (lexical, vector) = rayon::join(
            || self.lexical.search(&ctx.query_text, budget),
            || self.vector_search(&ctx.query_text, budget),
        );

        let lexical_hits = match lexical {
            Ok(hits) => Some(hits),
            Err(e) => {
                warn!(oracle = self.lexical.name(), error = %e, "lexical recall failed");
                degradations.push(DegradationEvent::now(
                    "recall.lexical",
                    e.to_string(),
                    "vector_only",
                ));
                None
            }
        };
        let vector_hits = match vector {
            Ok(hits) => Some(hits),
            Err(failure) => {
                warn!(oracle = self.vector.name(), error = %failure.reason, "vector recall failed");
                degradations.push(DegradationEvent::now(
                    failure.component,
                    failure.reason,
                    "lexical_only",
                ));
                None
            }
        };

        let (lexical_hits, vector_hits) = match (lexical_hits, vector_hits) {
            (None, None) => {
                return Err(RetrievalError::SearchFailed {
                    oracle: "hybrid".to_string(),
                    reason: "lexical and vector recall both failed".to_string(),
                })
            }
            (l, v) => (l.unwrap_or_default(), v.unwrap_or_default()),
        };

        let fused = rrf_fusion::fuse(
            &lexical_hits,
            &vector_hits,
            weights.lexical,
            weights.vector,
            weights.rrf_k,
        );

        let mut candidates = Vec::with_capacity(fused.len());
        for hit in fused {
            match self.store.get(&hit.passage_id)? {
                Some(passage) => {
                    let mut c = ScoredCandidate::new(passage, hit.rrf_score);
                    c.lexical_rank = hit.lexical_rank;
                    c.vector_rank = hit.vector_rank;
                    candidates.push(c);
                }
                None => debug!(passage_id = %hit.passage_id, "oracle hit missing from store"),
            }
        }

        debug!(
            budget,
            lexical = lexical_hits.len(),
            vector = vector_hits.len(),
            merged = candidates.len(),
            "hybrid recall complete"
        );

        Ok(RecallOutcome {
            candidates,
            degradations,
        })
    }

    fn vector_search(&self, query_text: &str, budget: usize) -> Result<Vec<SearchHit>, VectorFailure> {
        let embedding = self.embedder.embed(query_text).map_err(|e| VectorFailure {
            component: "recall.embedding",
            reason: e.to_string(),
        })?;
        self.vector
            .search(&embedding, budget)
            .map_err(|e| VectorFailure {
                component: "recall.vector",
                reason: e.to_string(),
            })
    }
}

struct VectorFailure {
    component: &'static str,
    reason: String,
}
