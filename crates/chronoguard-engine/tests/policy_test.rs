use std::io::Write;

use chronoguard_core::config::DecayCurve;
use chronoguard_core::errors::PolicyError;
use chronoguard_core::traits::IPolicySource;
use chronoguard_core::{ChronoConfig, PolicySnapshot};
use chronoguard_engine::{PolicyStore, PolicyUpdate, TomlFilePolicySource};

fn table(toml_str: &str) -> toml::Table {
    toml_str.parse().unwrap()
}

fn update(version: Option<&str>, changes: &str, key: Option<&str>) -> PolicyUpdate {
    PolicyUpdate {
        policy_version: version.map(str::to_string),
        changes: table(changes),
        idempotency_key: key.map(str::to_string),
    }
}

// --- PolicyStore ---

#[test]
fn default_store_serves_fingerprinted_defaults() {
    let store = PolicyStore::default();
    let snap = store.snapshot().unwrap();
    assert_eq!(snap.config, ChronoConfig::default());
    assert_eq!(snap.version, PolicySnapshot::default().version);
    assert_eq!(snap.version.len(), 16);
}

#[test]
fn apply_merges_only_named_fields() {
    let store = PolicyStore::new(PolicySnapshot::new("v1", ChronoConfig::default()));
    let result = store
        .apply(update(
            Some("v2"),
            "[sanity]\noverlap_threshold = 0.7\n[controller]\nmax_hops = 5\n",
            None,
        ))
        .unwrap();

    assert!(result.accepted);
    assert_eq!(result.previous_version, "v1");
    assert_eq!(result.policy_version, "v2");

    let snap = store.snapshot().unwrap();
    assert_eq!(snap.version, "v2");
    assert_eq!(snap.config.sanity.overlap_threshold, 0.7);
    assert_eq!(snap.config.controller.max_hops, 5);
    let defaults = ChronoConfig::default();
    assert_eq!(snap.config.sanity.examine_top_n, defaults.sanity.examine_top_n);
    assert_eq!(snap.config.rerank, defaults.rerank);
    assert_eq!(snap.config.domains, defaults.domains);
}

#[test]
fn apply_merges_into_domain_profiles() {
    let store = PolicyStore::default();
    store
        .apply(update(None, "[domains.finance]\ninitial_budget = 40\n", None))
        .unwrap();
    let snap = store.snapshot().unwrap();
    assert_eq!(snap.config.initial_budget("finance"), 40);
    // Untouched profile fields survive the merge.
    assert_eq!(snap.config.recall_weights("finance"), (0.6, 0.4));
}

#[test]
fn apply_accepts_enum_values() {
    let store = PolicyStore::default();
    store
        .apply(update(None, "[mask]\ndecay_curve = \"exponential\"\n", None))
        .unwrap();
    assert_eq!(
        store.snapshot().unwrap().config.mask.decay_curve,
        DecayCurve::Exponential
    );
}

#[test]
fn apply_without_version_uses_fingerprint() {
    let store = PolicyStore::default();
    let before = store.version().unwrap();
    let result = store
        .apply(update(None, "[rerank]\nfinal_top_k = 4\n", None))
        .unwrap();
    assert!(result.accepted);
    assert_eq!(result.previous_version, before);
    assert_ne!(result.policy_version, before);
    let snap = store.snapshot().unwrap();
    assert_eq!(
        snap.version,
        chronoguard_core::config::fingerprint(&snap.config)
    );
}

#[test]
fn replayed_update_is_ignored() {
    let store = PolicyStore::new(PolicySnapshot::new("v1", ChronoConfig::default()));
    let first = store
        .apply(update(Some("v2"), "[sanity]\noverlap_threshold = 0.7\n", Some("k-1")))
        .unwrap();
    assert!(first.accepted);

    let replay = store
        .apply(update(Some("v2"), "[sanity]\noverlap_threshold = 0.9\n", Some("k-1")))
        .unwrap();
    assert!(!replay.accepted);
    assert_eq!(replay.previous_version, "v2");
    assert_eq!(replay.policy_version, "v2");
    assert_eq!(store.snapshot().unwrap().config.sanity.overlap_threshold, 0.7);
}

#[test]
fn same_version_without_key_is_applied() {
    let store = PolicyStore::new(PolicySnapshot::new("v1", ChronoConfig::default()));
    let result = store
        .apply(update(Some("v1"), "[sanity]\noverlap_threshold = 0.8\n", None))
        .unwrap();
    assert!(result.accepted);
    assert_eq!(store.snapshot().unwrap().config.sanity.overlap_threshold, 0.8);
}

#[test]
fn invalid_update_leaves_snapshot_in_place() {
    let store = PolicyStore::new(PolicySnapshot::new("v1", ChronoConfig::default()));
    let err = store
        .apply(update(Some("v2"), "[sanity]\noverlap_threshold = 1.5\n", None))
        .unwrap_err();
    assert!(matches!(err, PolicyError::InvalidValue { .. }));

    let err = store
        .apply(update(Some("v2"), "[controller]\nmax_hops = \"many\"\n", None))
        .unwrap_err();
    assert!(matches!(err, PolicyError::ParseFailed { .. }));

    let snap = store.snapshot().unwrap();
    assert_eq!(snap.version, "v1");
    assert_eq!(snap.config, ChronoConfig::default());
}

#[test]
fn update_zeroing_the_undated_floor_is_rejected() {
    let store = PolicyStore::new(PolicySnapshot::new("v1", ChronoConfig::default()));
    let err = store
        .apply(update(Some("v2"), "[mask]\nundated_compliance = 0.0\n", None))
        .unwrap_err();
    assert!(matches!(err, PolicyError::InvalidValue { .. }));
    assert_eq!(store.version().unwrap(), "v1");
}

#[test]
fn snapshots_taken_before_apply_are_unchanged() {
    let store = PolicyStore::new(PolicySnapshot::new("v1", ChronoConfig::default()));
    let held = store.snapshot().unwrap();
    store
        .apply(update(Some("v2"), "[sanity]\noverlap_threshold = 0.7\n", None))
        .unwrap();
    assert_eq!(held.version, "v1");
    assert_eq!(held.config.sanity.overlap_threshold, 0.6);
}

#[test]
fn update_deserializes_from_json() {
    let raw = r#"{"policy_version": "v9", "changes": {"sanity": {"overlap_threshold": 0.75}}, "idempotency_key": "abc"}"#;
    let parsed: PolicyUpdate = serde_json::from_str(raw).unwrap();
    assert_eq!(parsed.policy_version.as_deref(), Some("v9"));
    assert_eq!(parsed.idempotency_key.as_deref(), Some("abc"));
    let store = PolicyStore::default();
    store.apply(parsed).unwrap();
    assert_eq!(store.version().unwrap(), "v9");
}

// --- TomlFilePolicySource ---

#[test]
fn file_source_rereads_on_every_snapshot() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[sanity]\noverlap_threshold = 0.7").unwrap();
    let source = TomlFilePolicySource::new(file.path());

    let first = source.snapshot().unwrap();
    assert_eq!(first.config.sanity.overlap_threshold, 0.7);

    std::fs::write(file.path(), "[sanity]\noverlap_threshold = 0.9\n").unwrap();
    let second = source.snapshot().unwrap();
    assert_eq!(second.config.sanity.overlap_threshold, 0.9);
    assert_ne!(first.version, second.version);
}

#[test]
fn missing_file_is_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    let source = TomlFilePolicySource::new(dir.path().join("absent.toml"));
    let err = source.snapshot().unwrap_err();
    assert!(matches!(err, PolicyError::SourceUnreachable { .. }));
}

#[test]
fn malformed_file_fails_to_parse() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.toml");
    std::fs::write(&path, "[sanity\noverlap_threshold = ").unwrap();
    let err = TomlFilePolicySource::new(&path).snapshot().unwrap_err();
    assert!(matches!(err, PolicyError::ParseFailed { .. }));
}

#[test]
fn out_of_range_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.toml");
    std::fs::write(&path, "[mask]\nundated_compliance = 2.0\n").unwrap();
    let err = TomlFilePolicySource::new(&path).snapshot().unwrap_err();
    assert!(matches!(err, PolicyError::InvalidValue { .. }));
}
