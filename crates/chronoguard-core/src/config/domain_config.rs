use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::UNIT_INTL_1990_USD;
use crate::time::TimeMode;

/// Per-domain overrides. Unset fields fall back to the global sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DomainProfile {
    pub lexical_weight: Option<f64>,
    pub vector_weight: Option<f64>,
    pub relevance_weight: Option<f64>,
    pub authority_weight: Option<f64>,
    pub time_weight: Option<f64>,
    pub initial_budget: Option<usize>,
    /// Canonical unit structured answers in this domain must use.
    pub required_unit: Option<String>,
    pub default_mode: Option<TimeMode>,
    /// Route explicit-year queries in this domain to HARD mode.
    pub hard_mode_for_explicit_year: bool,
}

/// Built-in domain profiles.
pub fn default_domains() -> BTreeMap<String, DomainProfile> {
    let mut domains = BTreeMap::new();

    // World economy: wide fan-out, vector-leaning, strong time gating.
    domains.insert(
        "world-economy".to_string(),
        DomainProfile {
            lexical_weight: Some(0.4),
            vector_weight: Some(0.6),
            relevance_weight: Some(0.50),
            authority_weight: Some(0.15),
            time_weight: Some(0.8),
            initial_budget: Some(60),
            required_unit: Some(UNIT_INTL_1990_USD.to_string()),
            default_mode: Some(TimeMode::Intelligent),
            hard_mode_for_explicit_year: true,
        },
    );

    // Roles: names change at precise points in time.
    domains.insert(
        "roles".to_string(),
        DomainProfile {
            relevance_weight: Some(0.45),
            authority_weight: Some(0.20),
            time_weight: Some(0.7),
            hard_mode_for_explicit_year: true,
            ..Default::default()
        },
    );

    // Finance: exact figures, lexical-leaning, authority matters.
    domains.insert(
        "finance".to_string(),
        DomainProfile {
            lexical_weight: Some(0.6),
            vector_weight: Some(0.4),
            authority_weight: Some(0.25),
            ..Default::default()
        },
    );

    domains
}
