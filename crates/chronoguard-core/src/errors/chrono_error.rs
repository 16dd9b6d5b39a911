use super::{BackendError, PolicyError, RetrievalError, SchemaError};

/// Convenience alias used throughout the workspace.
pub type ChronoResult<T> = Result<T, ChronoError>;

/// Top-level error for the ChronoGuard engine.
///
/// Only [`ChronoError::PolicyRead`] and [`ChronoError::InvalidRequest`] ever
/// reach a caller of the request pipeline. Everything else is recovered
/// locally and recorded in the response audit trail.
#[derive(Debug, thiserror::Error)]
pub enum ChronoError {
    #[error("policy read failure: {0}")]
    PolicyRead(#[from] PolicyError),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("schema validation failure: {0}")]
    SchemaValidation(#[from] SchemaError),

    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config error: {0}")]
    ConfigError(#[from] toml::de::Error),
}

impl ChronoError {
    /// Whether this error may be surfaced to the caller instead of being
    /// degraded into an evidence-only response.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            ChronoError::PolicyRead(_) | ChronoError::InvalidRequest { .. }
        )
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        ChronoError::InvalidRequest {
            reason: reason.into(),
        }
    }
}
