mod backend_error;
mod chrono_error;
mod policy_error;
mod retrieval_error;
mod schema_error;

pub use backend_error::BackendError;
pub use chrono_error::{ChronoError, ChronoResult};
pub use policy_error::PolicyError;
pub use retrieval_error::RetrievalError;
pub use schema_error::SchemaError;
