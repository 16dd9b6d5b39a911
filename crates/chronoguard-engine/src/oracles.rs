//! The external collaborators one engine talks to.

use std::sync::Arc;

use chronoguard_core::traits::{
    ICrossEncoder, IEmbeddingProvider, ILexicalSearch, IPassageStore, IVectorSearch,
};
use chronoguard_retrieval::HybridSearcher;

/// Search, embedding, store, and optional rerank oracles.
#[derive(Clone)]
pub struct Oracles {
    pub lexical: Arc<dyn ILexicalSearch>,
    pub vector: Arc<dyn IVectorSearch>,
    pub embedder: Arc<dyn IEmbeddingProvider>,
    pub store: Arc<dyn IPassageStore>,
    /// Without an encoder the final ordering is fusion-only.
    pub cross_encoder: Option<Arc<dyn ICrossEncoder>>,
}

impl Oracles {
    pub fn new(
        lexical: Arc<dyn ILexicalSearch>,
        vector: Arc<dyn IVectorSearch>,
        embedder: Arc<dyn IEmbeddingProvider>,
        store: Arc<dyn IPassageStore>,
    ) -> Self {
        Self {
            lexical,
            vector,
            embedder,
            store,
            cross_encoder: None,
        }
    }

    pub fn with_cross_encoder(mut self, encoder: Arc<dyn ICrossEncoder>) -> Self {
        self.cross_encoder = Some(encoder);
        self
    }

    pub(crate) fn searcher(&self) -> HybridSearcher {
        HybridSearcher::new(
            self.lexical.clone(),
            self.vector.clone(),
            self.embedder.clone(),
            self.store.clone(),
        )
    }
}

impl std::fmt::Debug for Oracles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Oracles")
            .field("embedder", &self.embedder.name())
            .field(
                "cross_encoder",
                &self.cross_encoder.as_ref().map(|e| e.name().to_string()),
            )
            .finish_non_exhaustive()
    }
}
