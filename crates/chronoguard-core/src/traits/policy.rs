use std::sync::Arc;

use crate::config::PolicySnapshot;
use crate::errors::PolicyError;

/// Read-only, hot-reloadable policy source. Read once per request.
pub trait IPolicySource: Send + Sync {
    fn snapshot(&self) -> Result<Arc<PolicySnapshot>, PolicyError>;
}
