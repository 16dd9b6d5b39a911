//! RankingPipeline: mask → fuse, and re-fuse after rerank.

pub mod fusion;
pub mod reranker;

use chronoguard_core::config::{FusionConfig, MaskConfig};
use chronoguard_core::{ChronoConfig, QueryContext, ScoredCandidate};

use crate::mask::{self, MaskOutcome};
use crate::search::RecallWeights;

pub use reranker::CrossEncoderReranker;

/// Per-request ranking parameters resolved from the policy snapshot.
#[derive(Debug, Clone)]
pub struct RankingPipeline {
    mask: MaskConfig,
    weights: FusionConfig,
    recall_ceiling: f64,
}

impl RankingPipeline {
    pub fn new(mask: MaskConfig, weights: FusionConfig, recall_weights: RecallWeights) -> Self {
        Self {
            mask,
            weights,
            recall_ceiling: recall_weights.ceiling(),
        }
    }

    /// Resolve domain-specific weights from the policy.
    pub fn from_policy(config: &ChronoConfig, domain: &str) -> Self {
        Self::new(
            config.mask.clone(),
            config.fusion_weights(domain),
            recall_weights(config, domain),
        )
    }

    pub fn weights(&self) -> &FusionConfig {
        &self.weights
    }

    /// Mask then fuse a candidate pool.
    pub fn rank(&self, pool: Vec<ScoredCandidate>, ctx: &QueryContext) -> MaskOutcome {
        let MaskOutcome { kept, dropped } = mask::mask(pool, ctx, &self.mask);
        MaskOutcome {
            kept: fusion::fuse(kept, &self.weights, self.recall_ceiling),
            dropped,
        }
    }

    /// Recompute fused scores (e.g. after rerank) and re-sort.
    pub fn refuse(&self, candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
        fusion::fuse(candidates, &self.weights, self.recall_ceiling)
    }
}

/// Recall weights for a domain.
pub fn recall_weights(config: &ChronoConfig, domain: &str) -> RecallWeights {
    let (lexical, vector) = config.recall_weights(domain);
    RecallWeights {
        lexical,
        vector,
        rrf_k: config.recall.rrf_k,
    }
}
