//! Backend chain for answer generation.
//!
//! Providers are held in priority order. [`BackendChain::probe`] picks the
//! first available one at startup; generation starts there and falls
//! through to later available providers on failure.

pub mod providers;

use std::sync::Arc;

use chronoguard_core::config::{BackendEntry, GenerationConfig};
use chronoguard_core::errors::BackendError;
use chronoguard_core::models::{ChatMessage, GenerationParams};
use chronoguard_core::traits::IGenerationBackend;
use tracing::{info, warn};

pub use providers::{clip_at_stop, OllamaBackend, OpenAiCompatBackend};

/// Priority-ordered generation backends.
#[derive(Clone, Default)]
pub struct BackendChain {
    chain: Vec<Arc<dyn IGenerationBackend>>,
    selected: Option<usize>,
}

impl std::fmt::Debug for BackendChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendChain")
            .field("backends", &self.names())
            .field("selected", &self.selected_name())
            .finish()
    }
}

impl BackendChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the HTTP providers listed under `[[generation.backends]]`.
    /// `timeout_ms` is only the providers' default; each call passes its own.
    pub fn from_config(config: &GenerationConfig) -> Self {
        let mut chain = Self::new();
        for entry in &config.backends {
            match entry {
                BackendEntry::OpenaiCompat {
                    endpoint,
                    api_key_env,
                    model,
                } => chain.push(Arc::new(OpenAiCompatBackend::from_env(
                    endpoint,
                    api_key_env,
                    model,
                    config.timeout_ms,
                ))),
                BackendEntry::Ollama { host, model } => {
                    chain.push(Arc::new(OllamaBackend::new(host, model, config.timeout_ms)))
                }
            }
        }
        chain
    }

    /// Add a backend at the lowest priority.
    pub fn push(&mut self, backend: Arc<dyn IGenerationBackend>) {
        self.chain.push(backend);
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.chain.iter().map(|b| b.name()).collect()
    }

    /// Select the first available backend. Returns its name.
    pub fn probe(&mut self) -> Option<&str> {
        self.selected = self.chain.iter().position(|b| b.is_available());
        match self.selected_name() {
            Some(name) => info!(backend = name, "generation backend selected"),
            None => warn!(
                backends = self.chain.len(),
                "no generation backend available"
            ),
        }
        self.selected_name()
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.chain.get(i))
            .map(|b| b.name())
    }

    /// Generate with the selected backend, falling through to later
    /// available ones. Returns the text and the name of the backend used.
    pub fn generate(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<(String, String), BackendError> {
        let start = self.selected.unwrap_or(0);
        let mut last_error = None;

        for backend in self.chain.iter().skip(start) {
            if !backend.is_available() {
                continue;
            }
            match backend.generate(messages, params) {
                Ok(text) => return Ok((text, backend.name().to_string())),
                Err(e) => {
                    warn!(
                        backend = backend.name(),
                        error = %e,
                        "backend failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| BackendError::Unavailable {
            backend: "all generation backends exhausted".to_string(),
        }))
    }
}
