//! Policy configuration. Every threshold and weight the engine reads comes
//! from here; requests see one immutable [`PolicySnapshot`] for their lifetime.

pub mod authority_config;
pub mod controller_config;
pub mod defaults;
pub mod domain_config;
pub mod fusion_config;
pub mod generation_config;
pub mod mask_config;
pub mod observability_config;
pub mod recall_config;
pub mod rerank_config;
pub mod sanity_config;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use authority_config::AuthorityConfig;
pub use controller_config::ControllerConfig;
pub use domain_config::{default_domains, DomainProfile};
pub use fusion_config::FusionConfig;
pub use generation_config::{BackendEntry, GenerationConfig};
pub use mask_config::{DecayCurve, MaskConfig};
pub use observability_config::ObservabilityConfig;
pub use recall_config::RecallConfig;
pub use rerank_config::RerankConfig;
pub use sanity_config::SanityConfig;

use crate::errors::{ChronoResult, PolicyError};
use crate::time::TimeMode;

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChronoConfig {
    pub mask: MaskConfig,
    pub recall: RecallConfig,
    pub fusion: FusionConfig,
    pub controller: ControllerConfig,
    pub rerank: RerankConfig,
    pub sanity: SanityConfig,
    pub generation: GenerationConfig,
    pub authority: AuthorityConfig,
    pub domains: BTreeMap<String, DomainProfile>,
    pub observability: ObservabilityConfig,
}

impl Default for ChronoConfig {
    fn default() -> Self {
        Self {
            mask: MaskConfig::default(),
            recall: RecallConfig::default(),
            fusion: FusionConfig::default(),
            controller: ControllerConfig::default(),
            rerank: RerankConfig::default(),
            sanity: SanityConfig::default(),
            generation: GenerationConfig::default(),
            authority: AuthorityConfig::default(),
            domains: default_domains(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ChronoConfig {
    /// Parse from a TOML string. Missing sections and fields use defaults.
    pub fn from_toml(toml_str: &str) -> ChronoResult<Self> {
        let config: ChronoConfig = toml::from_str(toml_str)?;
        Ok(config)
    }

    /// Check value ranges. A policy that fails here is never served.
    pub fn validate(&self) -> Result<(), PolicyError> {
        compliance_floor("mask.undated_compliance", self.mask.undated_compliance)?;
        compliance_floor("mask.malformed_compliance", self.mask.malformed_compliance)?;
        unit_interval(
            "mask.transaction_mismatch_penalty",
            self.mask.transaction_mismatch_penalty,
        )?;
        positive("mask.decay_span_days", self.mask.decay_span_days)?;

        non_negative("recall.lexical_weight", self.recall.lexical_weight)?;
        non_negative("recall.vector_weight", self.recall.vector_weight)?;
        if self.recall.lexical_weight + self.recall.vector_weight <= 0.0 {
            return Err(invalid("recall", "lexical and vector weights are both zero"));
        }

        non_negative("fusion.relevance_weight", self.fusion.relevance_weight)?;
        non_negative("fusion.authority_weight", self.fusion.authority_weight)?;
        unit_interval("fusion.time_weight", self.fusion.time_weight)?;

        let c = &self.controller;
        if c.max_hops == 0 || c.max_hops > crate::constants::MAX_HOPS_CEILING {
            return Err(invalid(
                "controller.max_hops",
                format!("must be in 1..={}", crate::constants::MAX_HOPS_CEILING),
            ));
        }
        if c.hard_max_hops == 0 {
            return Err(invalid("controller.hard_max_hops", "must be at least 1"));
        }
        if c.initial_budget == 0 || c.initial_budget > c.budget_cap {
            return Err(invalid(
                "controller.initial_budget",
                "must be non-zero and at most budget_cap",
            ));
        }
        if c.widen_factor < 1 {
            return Err(invalid("controller.widen_factor", "must be at least 1"));
        }
        unit_interval("controller.coverage_threshold", c.coverage_threshold)?;
        unit_interval("controller.coverage_min_compliance", c.coverage_min_compliance)?;
        non_negative("controller.stagnation_epsilon", c.stagnation_epsilon)?;
        non_negative("controller.min_fused_score", c.min_fused_score)?;
        if c.max_time_slices == 0 {
            return Err(invalid("controller.max_time_slices", "must be at least 1"));
        }

        if self.rerank.batch_size == 0 {
            return Err(invalid("rerank.batch_size", "must be at least 1"));
        }
        if self.rerank.final_top_k == 0 {
            return Err(invalid("rerank.final_top_k", "must be at least 1"));
        }
        non_negative("rerank.judge_temperature", self.rerank.judge_temperature)?;

        unit_interval("sanity.overlap_threshold", self.sanity.overlap_threshold)?;
        non_negative("sanity.numeric_tolerance", self.sanity.numeric_tolerance)?;

        for (name, profile) in &self.domains {
            for (field, value) in [
                ("lexical_weight", profile.lexical_weight),
                ("vector_weight", profile.vector_weight),
                ("relevance_weight", profile.relevance_weight),
                ("authority_weight", profile.authority_weight),
            ] {
                if let Some(v) = value {
                    non_negative(&format!("domains.{name}.{field}"), v)?;
                }
            }
            if let Some(t) = profile.time_weight {
                unit_interval(&format!("domains.{name}.time_weight"), t)?;
            }
        }
        Ok(())
    }

    fn domain(&self, domain: &str) -> Option<&DomainProfile> {
        self.domains.get(domain)
    }

    /// `(lexical, vector)` recall weights for a domain.
    pub fn recall_weights(&self, domain: &str) -> (f64, f64) {
        let p = self.domain(domain);
        (
            p.and_then(|p| p.lexical_weight)
                .unwrap_or(self.recall.lexical_weight),
            p.and_then(|p| p.vector_weight)
                .unwrap_or(self.recall.vector_weight),
        )
    }

    /// Fusion weights for a domain.
    pub fn fusion_weights(&self, domain: &str) -> FusionConfig {
        let Some(p) = self.domain(domain) else {
            return self.fusion;
        };
        FusionConfig {
            relevance_weight: p.relevance_weight.unwrap_or(self.fusion.relevance_weight),
            authority_weight: p.authority_weight.unwrap_or(self.fusion.authority_weight),
            time_weight: p.time_weight.unwrap_or(self.fusion.time_weight),
        }
    }

    /// First-hop candidate budget for a domain, capped at `budget_cap`.
    pub fn initial_budget(&self, domain: &str) -> usize {
        self.domain(domain)
            .and_then(|p| p.initial_budget)
            .unwrap_or(self.controller.initial_budget)
            .min(self.controller.budget_cap)
            .max(1)
    }

    pub fn required_unit(&self, domain: &str) -> Option<&str> {
        self.domain(domain).and_then(|p| p.required_unit.as_deref())
    }

    pub fn default_mode(&self, domain: &str) -> TimeMode {
        self.domain(domain)
            .and_then(|p| p.default_mode)
            .unwrap_or_default()
    }

    pub fn hard_mode_for_explicit_year(&self, domain: &str) -> bool {
        self.domain(domain)
            .map(|p| p.hard_mode_for_explicit_year)
            .unwrap_or(false)
    }
}

/// An immutable, versioned view of the policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicySnapshot {
    pub version: String,
    pub config: ChronoConfig,
}

impl PolicySnapshot {
    /// Snapshot with an explicit version label.
    pub fn new(version: impl Into<String>, config: ChronoConfig) -> Self {
        Self {
            version: version.into(),
            config,
        }
    }

    /// Snapshot versioned by a blake3 fingerprint of the config content.
    pub fn fingerprinted(config: ChronoConfig) -> Self {
        let version = fingerprint(&config);
        Self { version, config }
    }

    /// Parse, validate, and fingerprint a TOML policy document.
    pub fn from_toml(toml_str: &str) -> Result<Self, PolicyError> {
        let config: ChronoConfig =
            toml::from_str(toml_str).map_err(|e| PolicyError::ParseFailed {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(Self::fingerprinted(config))
    }
}

impl Default for PolicySnapshot {
    fn default() -> Self {
        Self::fingerprinted(ChronoConfig::default())
    }
}

/// Short content hash of a config, stable across processes.
pub fn fingerprint(config: &ChronoConfig) -> String {
    let bytes = serde_json::to_vec(config).unwrap_or_default();
    let hash = blake3::hash(&bytes);
    hash.to_hex()[..16].to_string()
}

fn invalid(field: &str, reason: impl Into<String>) -> PolicyError {
    PolicyError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn unit_interval(field: &str, v: f64) -> Result<(), PolicyError> {
    if v.is_finite() && (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(invalid(field, format!("{v} is outside [0, 1]")))
    }
}

/// Floors keep undated and malformed passages in INTELLIGENT mode, so 0 is out.
fn compliance_floor(field: &str, v: f64) -> Result<(), PolicyError> {
    if v.is_finite() && v > 0.0 && v <= 1.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{v} is outside (0, 1]")))
    }
}

fn non_negative(field: &str, v: f64) -> Result<(), PolicyError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{v} must be finite and non-negative")))
    }
}

fn positive(field: &str, v: f64) -> Result<(), PolicyError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{v} must be finite and positive")))
    }
}
