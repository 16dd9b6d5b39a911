use chronoguard_core::config::*;
use chronoguard_core::models::AuthorityTier;
use chronoguard_core::TimeMode;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = ChronoConfig::from_toml("").unwrap();

    // Mask defaults
    assert_eq!(config.mask.decay_curve, DecayCurve::Linear);
    assert_eq!(config.mask.decay_span_days, 36_525.0);
    assert_eq!(config.mask.transaction_mismatch_penalty, 0.4);

    // Recall defaults
    assert_eq!(config.recall.rrf_k, 60);

    // Fusion defaults
    assert_eq!(config.fusion.relevance_weight, 0.55);
    assert_eq!(config.fusion.authority_weight, 0.15);

    // Controller defaults
    assert_eq!(config.controller.max_hops, 3);
    assert_eq!(config.controller.coverage_threshold, 0.8);
    assert_eq!(config.controller.initial_budget, 12);

    // Sanity defaults
    assert_eq!(config.sanity.overlap_threshold, 0.6);
    assert_eq!(config.sanity.evidence_only_reason, "CHRONO_SANITY");

    // Generation defaults
    assert_eq!(config.generation.stop, vec!["<|ATTR_CARD|>".to_string()]);
    assert!(config.generation.backends.is_empty());

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json_logs);

    assert!(config.domains.contains_key("world-economy"));
    config.validate().unwrap();
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[mask]
decay_curve = "exponential"
decay_span_days = 3650.0

[sanity]
overlap_threshold = 0.7
"#;
    let config = ChronoConfig::from_toml(toml).unwrap();
    assert_eq!(config.mask.decay_curve, DecayCurve::Exponential);
    assert_eq!(config.mask.decay_span_days, 3650.0);
    // Non-overridden fields keep defaults
    assert_eq!(config.mask.undated_compliance, 0.3);
    assert_eq!(config.sanity.overlap_threshold, 0.7);
    assert_eq!(config.sanity.numeric_tolerance, 0.05);
}

#[test]
fn config_parses_backend_entries_in_order() {
    let toml = r#"
[[generation.backends]]
kind = "ollama"
host = "http://localhost:11434"
model = "llama3"

[[generation.backends]]
kind = "openai_compat"
endpoint = "https://api.example.com/v1"
api_key_env = "EXAMPLE_API_KEY"
model = "gpt-4o-mini"
"#;
    let config = ChronoConfig::from_toml(toml).unwrap();
    assert_eq!(config.generation.backends.len(), 2);
    assert!(matches!(
        config.generation.backends[0],
        BackendEntry::Ollama { .. }
    ));
    assert!(matches!(
        config.generation.backends[1],
        BackendEntry::OpenaiCompat { .. }
    ));
}

#[test]
fn config_rejects_invalid_toml() {
    assert!(ChronoConfig::from_toml("[mask\nbroken").is_err());
}

#[test]
fn validate_rejects_out_of_range_threshold() {
    let mut config = ChronoConfig::default();
    config.sanity.overlap_threshold = 1.5;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("sanity.overlap_threshold"));
}

#[test]
fn validate_rejects_zero_compliance_floors() {
    let config = ChronoConfig::from_toml("[mask]\nundated_compliance = 0.0\n").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("mask.undated_compliance"));

    let config = ChronoConfig::from_toml("[mask]\nmalformed_compliance = 0.0\n").unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("mask.malformed_compliance"));

    let config = ChronoConfig::from_toml("[mask]\nundated_compliance = 1.0\n").unwrap();
    config.validate().unwrap();
}

#[test]
fn validate_rejects_zero_hops() {
    let mut config = ChronoConfig::default();
    config.controller.max_hops = 0;
    assert!(config.validate().is_err());
}

#[test]
fn domain_profile_overrides_global_weights() {
    let config = ChronoConfig::default();
    assert_eq!(config.recall_weights("world-economy"), (0.4, 0.6));
    assert_eq!(config.recall_weights("generic"), (0.5, 0.5));
    assert_eq!(config.initial_budget("world-economy"), 60);
    assert_eq!(config.initial_budget("generic"), 12);
    assert_eq!(config.required_unit("world-economy"), Some("intl_1990_usd"));
    assert_eq!(config.required_unit("generic"), None);
    assert!(config.hard_mode_for_explicit_year("roles"));
    assert_eq!(config.default_mode("generic"), TimeMode::Intelligent);

    let fw = config.fusion_weights("finance");
    assert_eq!(fw.authority_weight, 0.25);
    assert_eq!(fw.relevance_weight, config.fusion.relevance_weight);
}

#[test]
fn initial_budget_is_capped() {
    let toml = r#"
[controller]
budget_cap = 20

[domains.big]
initial_budget = 500
"#;
    let config = ChronoConfig::from_toml(toml).unwrap();
    assert_eq!(config.initial_budget("big"), 20);
}

#[test]
fn authority_tiers_follow_thresholds() {
    let a = AuthorityConfig::default();
    assert_eq!(a.tier_for(1.0), AuthorityTier::Filing);
    assert_eq!(a.tier_for(0.95), AuthorityTier::Regulator);
    assert_eq!(a.tier_for(0.8), AuthorityTier::OfficialSite);
    assert_eq!(a.tier_for(0.65), AuthorityTier::ReliablePress);
    assert_eq!(a.tier_for(0.3), AuthorityTier::Blog);
    assert_eq!(a.tier_for(0.1), AuthorityTier::Unknown);
}

#[test]
fn snapshot_version_is_content_fingerprint() {
    let a = PolicySnapshot::fingerprinted(ChronoConfig::default());
    let b = PolicySnapshot::fingerprinted(ChronoConfig::default());
    assert_eq!(a.version, b.version);
    assert_eq!(a.version.len(), 16);

    let mut changed = ChronoConfig::default();
    changed.controller.max_hops = 5;
    let c = PolicySnapshot::fingerprinted(changed);
    assert_ne!(a.version, c.version);
}

#[test]
fn snapshot_from_toml_validates() {
    let err = PolicySnapshot::from_toml("[fusion]\ntime_weight = 2.0\n").unwrap_err();
    assert!(matches!(
        err,
        chronoguard_core::errors::PolicyError::InvalidValue { .. }
    ));
    let err = PolicySnapshot::from_toml("not = [valid").unwrap_err();
    assert!(matches!(
        err,
        chronoguard_core::errors::PolicyError::ParseFailed { .. }
    ));
}
