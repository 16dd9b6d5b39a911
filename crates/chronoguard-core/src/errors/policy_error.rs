/// Policy source errors. Any of these is fatal for the request that hit it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    #[error("policy source {source_name} unreachable: {reason}")]
    SourceUnreachable { source_name: String, reason: String },

    #[error("policy parse failed: {reason}")]
    ParseFailed { reason: String },

    #[error("invalid policy value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
