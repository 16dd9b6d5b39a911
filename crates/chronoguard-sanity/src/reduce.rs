//! Collapse duplicate passages before pairwise inspection.

use std::collections::HashSet;

use chronoguard_core::{ScoredCandidate, TimeAxis};

/// Lowercased text with runs of whitespace collapsed.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep the first (highest-ranked) instance of every passage with the same
/// normalized text and validity window start. Order is preserved.
pub fn reduce(ranked: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .filter(|c| {
            let start = c.passage.window(TimeAxis::Valid).window().map(|w| w.start);
            seen.insert((normalize_text(&c.passage.text), start))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_case_and_spacing() {
        assert_eq!(normalize_text("  GDP   per\tCapita "), "gdp per capita");
    }
}
