use crate::errors::BackendError;
use crate::models::{ChatMessage, GenerationParams};

/// A text generation backend.
pub trait IGenerationBackend: Send + Sync {
    /// Generate a completion for `messages`. Must honor `temperature = 0`.
    fn generate(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<String, BackendError>;

    fn name(&self) -> &str;

    /// Cheap readiness probe used when selecting a backend at startup.
    fn is_available(&self) -> bool;
}
