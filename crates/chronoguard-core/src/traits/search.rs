use crate::errors::RetrievalError;
use crate::models::SearchHit;

/// Keyword search oracle.
pub trait ILexicalSearch: Send + Sync {
    /// Ranked hits for `query_text`, best first, at most `limit` long.
    fn search(&self, query_text: &str, limit: usize) -> Result<Vec<SearchHit>, RetrievalError>;

    /// Oracle name for logs and degradation events.
    fn name(&self) -> &str;
}

/// Embedding similarity search oracle.
pub trait IVectorSearch: Send + Sync {
    /// Ranked hits nearest to `embedding`, best first, at most `limit` long.
    fn search(&self, embedding: &[f32], limit: usize) -> Result<Vec<SearchHit>, RetrievalError>;

    fn name(&self) -> &str;
}
