use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chronoguard_core::config::PolicySnapshot;
use chronoguard_core::errors::{BackendError, PolicyError, RetrievalError};
use chronoguard_core::models::{ChatMessage, GenerationParams, SearchHit};
use chronoguard_core::traits::{
    ICrossEncoder, IEmbeddingProvider, IGenerationBackend, ILexicalSearch, IPolicySource,
    IVectorSearch,
};

use crate::corpus::tokenize;

/// Cross-encoder scoring by query-term overlap: matched terms minus half the
/// unmatched ones, so unrelated passages score negative.
#[derive(Debug, Default, Clone)]
pub struct TermOverlapCrossEncoder;

impl ICrossEncoder for TermOverlapCrossEncoder {
    fn score(&self, query_text: &str, passage_text: &str) -> Result<f64, BackendError> {
        let terms: HashSet<String> = tokenize(query_text).into_iter().collect();
        let doc: HashSet<String> = tokenize(passage_text).into_iter().collect();
        let matched = terms.intersection(&doc).count() as f64;
        let missed = terms.len() as f64 - matched;
        Ok(matched - 0.5 * missed)
    }

    fn max_batch_size(&self) -> usize {
        4
    }

    fn name(&self) -> &str {
        "term_overlap"
    }
}

/// Cross-encoder that always fails.
#[derive(Debug, Default, Clone)]
pub struct FailingCrossEncoder;

impl ICrossEncoder for FailingCrossEncoder {
    fn score(&self, _query_text: &str, _passage_text: &str) -> Result<f64, BackendError> {
        Err(BackendError::Unavailable {
            backend: self.name().to_string(),
        })
    }

    fn name(&self) -> &str {
        "failing_cross_encoder"
    }
}

/// Cross-encoder that sleeps before every batch.
#[derive(Debug, Clone)]
pub struct SlowCrossEncoder {
    pub delay: Duration,
}

impl ICrossEncoder for SlowCrossEncoder {
    fn score(&self, query_text: &str, passage_text: &str) -> Result<f64, BackendError> {
        std::thread::sleep(self.delay);
        TermOverlapCrossEncoder.score(query_text, passage_text)
    }

    fn name(&self) -> &str {
        "slow_cross_encoder"
    }
}

/// Embedder that always fails.
#[derive(Debug, Default, Clone)]
pub struct FailingEmbedder;

impl IEmbeddingProvider for FailingEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, BackendError> {
        Err(BackendError::Unavailable {
            backend: "failing_embedder".to_string(),
        })
    }

    fn name(&self) -> &str {
        "failing_embedder"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Lexical and vector oracle that always fails.
#[derive(Debug, Default, Clone)]
pub struct FailingSearch;

impl ILexicalSearch for FailingSearch {
    fn search(&self, _query_text: &str, _limit: usize) -> Result<Vec<SearchHit>, RetrievalError> {
        Err(RetrievalError::SearchFailed {
            oracle: "failing_search".to_string(),
            reason: "index offline".to_string(),
        })
    }

    fn name(&self) -> &str {
        "failing_search"
    }
}

impl IVectorSearch for FailingSearch {
    fn search(&self, _embedding: &[f32], _limit: usize) -> Result<Vec<SearchHit>, RetrievalError> {
        Err(RetrievalError::SearchFailed {
            oracle: "failing_search".to_string(),
            reason: "index offline".to_string(),
        })
    }

    fn name(&self) -> &str {
        "failing_search"
    }
}

/// Generation backend replaying a script of responses, one per call.
/// Once the script runs out, every call fails as unavailable.
#[derive(Debug, Clone)]
pub struct ScriptedBackend {
    name: String,
    available: bool,
    script: Arc<Mutex<VecDeque<Result<String, BackendError>>>>,
    calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    params: Arc<Mutex<Vec<GenerationParams>>>,
}

impl ScriptedBackend {
    pub fn new(name: &str, script: Vec<Result<String, BackendError>>) -> Self {
        Self {
            name: name.to_string(),
            available: true,
            script: Arc::new(Mutex::new(script.into())),
            calls: Arc::new(Mutex::new(Vec::new())),
            params: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Backend answering the first `n` calls with `text`.
    pub fn repeating(name: &str, text: &str, n: usize) -> Self {
        Self::new(name, (0..n).map(|_| Ok(text.to_string())).collect())
    }

    pub fn unavailable(name: &str) -> Self {
        Self {
            available: false,
            ..Self::new(name, Vec::new())
        }
    }

    /// Number of `generate` calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Messages of every call received so far.
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Sampling parameters of every call received so far.
    pub fn params(&self) -> Vec<GenerationParams> {
        self.params.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl IGenerationBackend for ScriptedBackend {
    fn generate(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<String, BackendError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }
        if let Ok(mut seen) = self.params.lock() {
            seen.push(params.clone());
        }
        self.script
            .lock()
            .ok()
            .and_then(|mut s| s.pop_front())
            .unwrap_or_else(|| {
                Err(BackendError::Unavailable {
                    backend: self.name.clone(),
                })
            })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

/// Generation backend that sleeps before delegating to a script.
#[derive(Debug, Clone)]
pub struct SlowBackend {
    pub delay: Duration,
    pub inner: ScriptedBackend,
}

impl IGenerationBackend for SlowBackend {
    fn generate(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<String, BackendError> {
        std::thread::sleep(self.delay);
        self.inner.generate(messages, params)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Policy source that cannot be read.
#[derive(Debug, Default, Clone)]
pub struct FailingPolicySource;

impl IPolicySource for FailingPolicySource {
    fn snapshot(&self) -> Result<Arc<PolicySnapshot>, PolicyError> {
        Err(PolicyError::SourceUnreachable {
            source_name: "failing_policy".to_string(),
            reason: "connection refused".to_string(),
        })
    }
}
