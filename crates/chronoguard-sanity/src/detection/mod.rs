//! Pairwise conflict detection strategies.

pub mod entity;
pub mod numeric;

use chronoguard_core::models::ConflictReason;
use chronoguard_core::Passage;

/// Run all strategies against a pair, most specific first.
///
/// Returns the first conflict found, or `None`.
pub fn detect_all(a: &Passage, b: &Passage, numeric_tolerance: f64) -> Option<ConflictReason> {
    if let Some(reason) = numeric::detect(a, b, numeric_tolerance) {
        return Some(reason);
    }
    entity::detect(a, b)
}
