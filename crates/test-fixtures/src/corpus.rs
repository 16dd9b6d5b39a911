use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chronoguard_core::errors::{BackendError, RetrievalError};
use chronoguard_core::models::SearchHit;
use chronoguard_core::traits::{IEmbeddingProvider, ILexicalSearch, IPassageStore, IVectorSearch};
use chronoguard_core::Passage;

const EMBEDDING_DIMS: usize = 64;

/// Lowercased alphanumeric terms of at least two characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 2)
        .map(|t| t.to_lowercase())
        .collect()
}

/// Deterministic bag-of-words embedding, hashed into a fixed dimension.
pub fn embed_text(text: &str) -> Vec<f32> {
    let mut v = vec![0.0f32; EMBEDDING_DIMS];
    for term in tokenize(text) {
        // FNV-1a
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        for b in term.bytes() {
            h ^= u64::from(b);
            h = h.wrapping_mul(0x0100_0000_01b3);
        }
        v[(h % EMBEDDING_DIMS as u64) as usize] += 1.0;
    }
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
    v
}

/// Embeds with [`embed_text`].
#[derive(Debug, Default, Clone)]
pub struct HashingEmbedder;

impl IEmbeddingProvider for HashingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, BackendError> {
        Ok(embed_text(text))
    }

    fn name(&self) -> &str {
        "hashing"
    }
}

/// Passage store plus lexical and vector oracles over a fixed passage set.
#[derive(Debug, Clone)]
pub struct InMemoryCorpus {
    passages: BTreeMap<String, Arc<Passage>>,
    embeddings: BTreeMap<String, Vec<f32>>,
}

impl InMemoryCorpus {
    pub fn new(passages: Vec<Passage>) -> Self {
        let embeddings = passages
            .iter()
            .map(|p| (p.id.clone(), embed_text(&p.text)))
            .collect();
        let passages = passages
            .into_iter()
            .map(|p| (p.id.clone(), Arc::new(p)))
            .collect();
        Self {
            passages,
            embeddings,
        }
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

fn top(mut hits: Vec<SearchHit>, limit: usize) -> Vec<SearchHit> {
    hits.retain(|h| h.score > 0.0);
    hits.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.passage_id.cmp(&b.passage_id))
    });
    hits.truncate(limit);
    hits
}

impl IPassageStore for InMemoryCorpus {
    fn get(&self, id: &str) -> Result<Option<Arc<Passage>>, RetrievalError> {
        Ok(self.passages.get(id).cloned())
    }
}

impl ILexicalSearch for InMemoryCorpus {
    fn search(&self, query_text: &str, limit: usize) -> Result<Vec<SearchHit>, RetrievalError> {
        let terms: HashSet<String> = tokenize(query_text).into_iter().collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        let hits = self
            .passages
            .values()
            .map(|p| {
                let doc: HashSet<String> = tokenize(&p.text).into_iter().collect();
                let matched = terms.intersection(&doc).count();
                SearchHit::new(p.id.clone(), matched as f64 / terms.len() as f64)
            })
            .collect();
        Ok(top(hits, limit))
    }

    fn name(&self) -> &str {
        "in_memory_lexical"
    }
}

impl IVectorSearch for InMemoryCorpus {
    fn search(&self, embedding: &[f32], limit: usize) -> Result<Vec<SearchHit>, RetrievalError> {
        let hits = self
            .embeddings
            .iter()
            .map(|(id, v)| {
                let dot: f32 = v.iter().zip(embedding).map(|(a, b)| a * b).sum();
                SearchHit::new(id.clone(), f64::from(dot))
            })
            .collect();
        Ok(top(hits, limit))
    }

    fn name(&self) -> &str {
        "in_memory_vector"
    }
}
