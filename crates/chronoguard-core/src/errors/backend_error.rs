/// Model backend errors (generation, reranking, embedding, search oracles).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("backend unavailable: {backend}")]
    Unavailable { backend: String },

    #[error("backend {backend} timed out after {timeout_ms}ms")]
    Timeout { backend: String, timeout_ms: u64 },

    #[error("backend {backend} request failed: {reason}")]
    RequestFailed { backend: String, reason: String },

    #[error("backend {backend} returned a malformed response: {reason}")]
    MalformedResponse { backend: String, reason: String },

    #[error("backend {backend} returned {actual} scores for {expected} inputs")]
    ScoreCountMismatch {
        backend: String,
        expected: usize,
        actual: usize,
    },
}

impl BackendError {
    /// Name of the backend that produced the error.
    pub fn backend(&self) -> &str {
        match self {
            BackendError::Unavailable { backend }
            | BackendError::Timeout { backend, .. }
            | BackendError::RequestFailed { backend, .. }
            | BackendError::MalformedResponse { backend, .. }
            | BackendError::ScoreCountMismatch { backend, .. } => backend,
        }
    }
}
