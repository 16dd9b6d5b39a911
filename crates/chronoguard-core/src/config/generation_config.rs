use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::STOP_MARKER;

/// A generation provider entry. Entries are probed in listed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendEntry {
    /// Any OpenAI-compatible `/chat/completions` endpoint.
    OpenaiCompat {
        endpoint: String,
        /// Environment variable holding the API key.
        api_key_env: String,
        model: String,
    },
    /// A local Ollama server.
    Ollama { host: String, model: String },
}

/// Answer generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub max_tokens: usize,
    pub temperature: f64,
    pub timeout_ms: u64,
    pub stop: Vec<String>,
    /// Passages kept in the narrowed retry prompt.
    pub narrowed_passage_count: usize,
    /// Characters of each passage quoted in prompts.
    pub snippet_chars: usize,
    /// Evidence bullets (each citing a year) a payload must carry.
    pub min_evidence_bullets: usize,
    pub backends: Vec<BackendEntry>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: defaults::DEFAULT_MAX_TOKENS,
            temperature: defaults::DEFAULT_TEMPERATURE,
            timeout_ms: defaults::DEFAULT_GENERATION_TIMEOUT_MS,
            stop: vec![STOP_MARKER.to_string()],
            narrowed_passage_count: defaults::DEFAULT_NARROWED_PASSAGE_COUNT,
            snippet_chars: defaults::DEFAULT_SNIPPET_CHARS,
            min_evidence_bullets: defaults::DEFAULT_MIN_EVIDENCE_BULLETS,
            backends: Vec::new(),
        }
    }
}
