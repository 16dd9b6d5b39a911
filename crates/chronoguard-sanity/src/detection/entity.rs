//! Entity claim disagreement.
//!
//! Entities are `Key:Value` strings. `Region` keys describe the passage's
//! scope rather than a claim and are never compared.

use std::collections::BTreeMap;

use chronoguard_core::models::ConflictReason;
use chronoguard_core::Passage;

const EXCLUDED_KEYS: &[&str] = &["region"];

/// Parse entity claims into `lowercased key → (key, value)`. Entries without
/// a `:` or with an empty side are ignored. The first claim per key wins.
pub fn claims(passage: &Passage) -> BTreeMap<String, (String, String)> {
    let mut out = BTreeMap::new();
    for entity in &passage.entities {
        let Some((key, value)) = entity.split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        let norm = key.to_lowercase();
        if EXCLUDED_KEYS.contains(&norm.as_str()) {
            continue;
        }
        out.entry(norm)
            .or_insert_with(|| (key.to_string(), value.to_string()));
    }
    out
}

/// Detect the first shared key (in key order) whose values differ,
/// ignoring case.
pub fn detect(a: &Passage, b: &Passage) -> Option<ConflictReason> {
    let claims_b = claims(b);
    claims(a).into_iter().find_map(|(norm, (key, value_a))| {
        let (_, value_b) = claims_b.get(&norm)?;
        (!value_a.eq_ignore_ascii_case(value_b)).then(|| ConflictReason::EntityMismatch {
            key,
            value_a,
            value_b: value_b.clone(),
        })
    })
}
