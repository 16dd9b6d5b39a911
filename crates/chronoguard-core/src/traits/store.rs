use std::sync::Arc;

use crate::errors::RetrievalError;
use crate::models::Passage;

/// Read access to ingested passages.
pub trait IPassageStore: Send + Sync {
    fn get(&self, id: &str) -> Result<Option<Arc<Passage>>, RetrievalError>;

    /// Fetch several passages, skipping ids the store does not know.
    fn get_many(&self, ids: &[String]) -> Result<Vec<Arc<Passage>>, RetrievalError> {
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(p) = self.get(id)? {
                out.push(p);
            }
        }
        Ok(out)
    }
}
