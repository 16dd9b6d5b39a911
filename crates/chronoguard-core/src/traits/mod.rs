mod cross_encoder;
mod embedding;
mod generation;
mod policy;
mod search;
mod store;

pub use cross_encoder::ICrossEncoder;
pub use embedding::IEmbeddingProvider;
pub use generation::IGenerationBackend;
pub use policy::IPolicySource;
pub use search::{ILexicalSearch, IVectorSearch};
pub use store::IPassageStore;
