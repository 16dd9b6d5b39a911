//! Numeric-timeline schema validation.
//!
//! A payload is accepted only if it parses, its range is finite and ordered
//! `low ≤ most_likely ≤ high`, enough evidence bullets cite a year, every
//! cited passage id is in the accepted set, and its unit normalizes to the
//! domain's required unit (when one is set).

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chronoguard_core::constants::UNIT_INTL_1990_USD;
use chronoguard_core::errors::SchemaError;
use chronoguard_core::models::NumericTimeline;
use regex::Regex;

use crate::backends::clip_at_stop;

static YEAR_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(1[0-9]{3}|20[0-9]{2})\b").ok());

/// Spellings that all mean 1990 international (Geary–Khamis) dollars.
const INTL_1990_ALIASES: &[&str] = &[
    "intl_1990_usd",
    "1990 international dollars",
    "1990 international dollar",
    "international dollars (1990)",
    "1990 int'l dollars",
    "1990 intl $",
    "1990 geary-khamis dollars",
    "geary-khamis dollars",
    "1990 gk$",
];

/// Canonical unit token. Known aliases map to their canonical token;
/// anything else is lowercased with whitespace runs replaced by `_`.
pub fn normalize_unit(raw: &str) -> String {
    let collapsed = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if INTL_1990_ALIASES.contains(&collapsed.as_str()) {
        return UNIT_INTL_1990_USD.to_string();
    }
    collapsed.replace(' ', "_")
}

/// First plausible year written in `text`.
pub fn year_in_text(text: &str) -> Option<i32> {
    YEAR_PATTERN
        .as_ref()?
        .captures(text)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// The span from the first `{` to the last `}`; surrounding prose and code
/// fences are discarded.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

/// Validates raw generation output against the numeric-timeline schema.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    min_evidence_bullets: usize,
    required_unit: Option<String>,
    accepted_ids: BTreeSet<String>,
    stop: Vec<String>,
}

impl SchemaValidator {
    pub fn new(
        min_evidence_bullets: usize,
        required_unit: Option<&str>,
        accepted_ids: impl IntoIterator<Item = String>,
        stop: Vec<String>,
    ) -> Self {
        Self {
            min_evidence_bullets,
            required_unit: required_unit.map(normalize_unit),
            accepted_ids: accepted_ids.into_iter().collect(),
            stop,
        }
    }

    pub fn required_unit(&self) -> Option<&str> {
        self.required_unit.as_deref()
    }

    /// Parse and validate. On success the payload carries the canonical unit
    /// and every bullet's year is filled in from its text where missing.
    pub fn validate(&self, raw: &str) -> Result<NumericTimeline, SchemaError> {
        let clipped = clip_at_stop(raw, &self.stop);
        let json = extract_json_object(&clipped).ok_or(SchemaError::NoJsonObject)?;
        let mut payload: NumericTimeline =
            serde_json::from_str(json).map_err(|e| SchemaError::Malformed {
                reason: e.to_string(),
            })?;

        let r = &payload.range;
        let finite = r.low.is_finite() && r.high.is_finite() && r.most_likely.is_finite();
        if !finite || r.low > r.most_likely || r.most_likely > r.high {
            return Err(SchemaError::ImplausibleRange {
                low: r.low,
                high: r.high,
                most_likely: r.most_likely,
            });
        }

        for bullet in &mut payload.evidence {
            if bullet.year.is_none() {
                bullet.year = year_in_text(&bullet.text);
            }
        }
        let dated = payload
            .evidence
            .iter()
            .filter(|b| b.year.is_some())
            .count();
        if dated < self.min_evidence_bullets {
            return Err(SchemaError::MissingYearReferences {
                required: self.min_evidence_bullets,
                found: dated,
            });
        }

        if let Some(unknown) = payload
            .evidence
            .iter()
            .filter_map(|b| b.passage_id.as_ref())
            .find(|id| !self.accepted_ids.contains(*id))
        {
            return Err(SchemaError::UnknownCitation {
                passage_id: unknown.clone(),
            });
        }

        let unit = normalize_unit(&payload.range.unit);
        if let Some(required) = &self.required_unit {
            if &unit != required {
                return Err(SchemaError::UnitMismatch {
                    required: required.clone(),
                    found: payload.range.unit.clone(),
                });
            }
        }
        payload.range.unit = unit;
        Ok(payload)
    }
}
