use crate::errors::BackendError;

/// Pairwise query/passage relevance judge.
pub trait ICrossEncoder: Send + Sync {
    /// Unbounded relevance score for one pair. Higher is more relevant.
    fn score(&self, query_text: &str, passage_text: &str) -> Result<f64, BackendError>;

    /// Score a batch. Callers never pass more than [`Self::max_batch_size`] texts.
    /// Must return exactly one score per passage, in order.
    fn score_batch(&self, query_text: &str, passages: &[&str]) -> Result<Vec<f64>, BackendError> {
        passages
            .iter()
            .map(|p| self.score(query_text, p))
            .collect()
    }

    fn max_batch_size(&self) -> usize {
        16
    }

    fn name(&self) -> &str;
}
