/// Retrieval subsystem errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RetrievalError {
    #[error("search failed on {oracle}: {reason}")]
    SearchFailed { oracle: String, reason: String },

    #[error("passage store read failed: {reason}")]
    StoreFailed { reason: String },

    #[error("ranking failed: {reason}")]
    RankingFailed { reason: String },
}
