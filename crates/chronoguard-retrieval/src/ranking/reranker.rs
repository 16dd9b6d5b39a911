//! Cross-encoder rerank of the top candidates.
//!
//! Pairs are scored in batches no larger than the encoder allows; batches
//! run on the rayon pool and results are written back in input order.

use std::sync::Arc;

use chronoguard_core::errors::BackendError;
use chronoguard_core::traits::ICrossEncoder;
use chronoguard_core::ScoredCandidate;
use rayon::prelude::*;
use tracing::debug;

/// Scores candidates with a cross-encoder.
#[derive(Clone)]
pub struct CrossEncoderReranker {
    encoder: Arc<dyn ICrossEncoder>,
    batch_size: usize,
}

impl CrossEncoderReranker {
    pub fn new(encoder: Arc<dyn ICrossEncoder>, batch_size: usize) -> Self {
        Self {
            encoder,
            batch_size,
        }
    }

    pub fn encoder_name(&self) -> &str {
        self.encoder.name()
    }

    /// Effective batch size: the configured size, capped by the encoder.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.min(self.encoder.max_batch_size()).max(1)
    }

    /// Set `rerank_score` on every candidate. On error no candidate is modified.
    pub fn rerank(&self, query_text: &str, candidates: &mut [ScoredCandidate]) -> Result<(), BackendError> {
        if candidates.is_empty() {
            return Ok(());
        }
        let texts: Vec<&str> = candidates.iter().map(|c| c.passage.text.as_str()).collect();
        let batch = self.effective_batch_size();

        let batches: Vec<Vec<f64>> = texts
            .par_chunks(batch)
            .map(|chunk| self.score_chunk(query_text, chunk))
            .collect::<Result<_, _>>()?;

        for (c, score) in candidates.iter_mut().zip(batches.into_iter().flatten()) {
            c.rerank_score = Some(score);
        }
        debug!(
            encoder = self.encoder.name(),
            candidates = candidates.len(),
            batch,
            "rerank complete"
        );
        Ok(())
    }

    fn score_chunk(&self, query_text: &str, chunk: &[&str]) -> Result<Vec<f64>, BackendError> {
        let scores = self.encoder.score_batch(query_text, chunk)?;
        if scores.len() != chunk.len() {
            return Err(BackendError::ScoreCountMismatch {
                backend: self.encoder.name().to_string(),
                expected: chunk.len(),
                actual: scores.len(),
            });
        }
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(BackendError::MalformedResponse {
                backend: self.encoder.name().to_string(),
                reason: "non-finite relevance score".to_string(),
            });
        }
        Ok(scores)
    }
}
