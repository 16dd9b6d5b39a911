//! Policy sources served to the engine.
//!
//! [`PolicyStore`] holds the current snapshot in memory and accepts partial
//! updates; [`TomlFilePolicySource`] re-reads a policy file on every request.
//! Either way a request reads exactly one snapshot.

mod file_source;

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use chronoguard_core::config::fingerprint;
use chronoguard_core::errors::PolicyError;
use chronoguard_core::traits::IPolicySource;
use chronoguard_core::{ChronoConfig, PolicySnapshot};

pub use file_source::TomlFilePolicySource;

const STORE_NAME: &str = "policy_store";

/// A partial policy change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyUpdate {
    /// Version label for the resulting snapshot. `None` versions it by
    /// content fingerprint.
    #[serde(default)]
    pub policy_version: Option<String>,
    /// TOML table merged over the current config, section by section.
    #[serde(default)]
    pub changes: toml::Table,
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyApplyResult {
    pub accepted: bool,
    pub previous_version: String,
    pub policy_version: String,
}

/// In-memory policy source with atomic snapshot swaps.
#[derive(Debug)]
pub struct PolicyStore {
    current: RwLock<Arc<PolicySnapshot>>,
}

impl PolicyStore {
    pub fn new(snapshot: PolicySnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn from_config(config: ChronoConfig) -> Self {
        Self::new(PolicySnapshot::fingerprinted(config))
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, PolicyError> {
        Ok(Self::new(PolicySnapshot::from_toml(toml_str)?))
    }

    pub fn version(&self) -> Result<String, PolicyError> {
        Ok(self.snapshot()?.version.clone())
    }

    /// Merge `update` over the current policy and swap it in.
    ///
    /// An update naming the current version with an idempotency key is a
    /// replay and changes nothing. A merged policy that fails validation is
    /// rejected and the current snapshot stays in place.
    pub fn apply(&self, update: PolicyUpdate) -> Result<PolicyApplyResult, PolicyError> {
        let mut current = self.current.write().map_err(|_| poisoned())?;
        let previous_version = current.version.clone();

        if update.idempotency_key.is_some()
            && update.policy_version.as_deref() == Some(previous_version.as_str())
        {
            info!(
                policy_version = %previous_version,
                idempotency_key = ?update.idempotency_key,
                "policy update replayed, ignoring"
            );
            return Ok(PolicyApplyResult {
                accepted: false,
                previous_version: previous_version.clone(),
                policy_version: previous_version,
            });
        }

        let config = merged_config(&current.config, &update.changes)?;
        let policy_version = update
            .policy_version
            .unwrap_or_else(|| fingerprint(&config));
        *current = Arc::new(PolicySnapshot::new(policy_version.clone(), config));

        info!(
            previous_version = %previous_version,
            policy_version = %policy_version,
            sections = update.changes.len(),
            "policy applied"
        );
        Ok(PolicyApplyResult {
            accepted: true,
            previous_version,
            policy_version,
        })
    }
}

impl Default for PolicyStore {
    fn default() -> Self {
        Self::new(PolicySnapshot::default())
    }
}

impl IPolicySource for PolicyStore {
    fn snapshot(&self) -> Result<Arc<PolicySnapshot>, PolicyError> {
        let current = self.current.read().map_err(|_| poisoned())?;
        Ok(Arc::clone(&current))
    }
}

fn poisoned() -> PolicyError {
    PolicyError::SourceUnreachable {
        source_name: STORE_NAME.to_string(),
        reason: "lock poisoned".to_string(),
    }
}

fn parse_failed(e: impl std::fmt::Display) -> PolicyError {
    PolicyError::ParseFailed {
        reason: e.to_string(),
    }
}

/// Deep-merge `changes` over `base` and validate the result.
fn merged_config(base: &ChronoConfig, changes: &toml::Table) -> Result<ChronoConfig, PolicyError> {
    let mut merged = serde_json::to_value(base).map_err(parse_failed)?;
    let overlay = serde_json::to_value(changes).map_err(parse_failed)?;
    merge_values(&mut merged, overlay);
    let config: ChronoConfig = serde_json::from_value(merged).map_err(parse_failed)?;
    config.validate()?;
    Ok(config)
}

/// Tables merge key by key; anything else replaces.
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                merge_values(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_keeps_untouched_keys() {
        let mut base = json!({"sanity": {"overlap_threshold": 0.6, "examine_top_n": 8}, "rerank": {"top_k": 30}});
        merge_values(&mut base, json!({"sanity": {"overlap_threshold": 0.7}}));
        assert_eq!(
            base,
            json!({"sanity": {"overlap_threshold": 0.7, "examine_top_n": 8}, "rerank": {"top_k": 30}})
        );
    }

    #[test]
    fn merge_replaces_arrays() {
        let mut base = json!({"generation": {"stop": ["a", "b"]}});
        merge_values(&mut base, json!({"generation": {"stop": ["c"]}}));
        assert_eq!(base, json!({"generation": {"stop": ["c"]}}));
    }
}
