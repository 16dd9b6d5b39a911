use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use chronoguard_core::errors::PolicyError;
use chronoguard_core::traits::IPolicySource;
use chronoguard_core::PolicySnapshot;

/// Reads a TOML policy file on every snapshot, so edits take effect on the
/// next request.
#[derive(Debug, Clone)]
pub struct TomlFilePolicySource {
    path: PathBuf,
}

impl TomlFilePolicySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IPolicySource for TomlFilePolicySource {
    fn snapshot(&self) -> Result<Arc<PolicySnapshot>, PolicyError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| PolicyError::SourceUnreachable {
                source_name: self.path.display().to_string(),
                reason: e.to_string(),
            })?;
        let snapshot = PolicySnapshot::from_toml(&content)?;
        debug!(
            path = %self.path.display(),
            policy_version = %snapshot.version,
            "policy file read"
        );
        Ok(Arc::new(snapshot))
    }
}
