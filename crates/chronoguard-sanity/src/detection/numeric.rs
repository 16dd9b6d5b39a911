//! Numeric divergence between passages about the same region and unit.

use std::sync::LazyLock;

use chronoguard_core::models::ConflictReason;
use chronoguard_core::time::{TimeAxis, TimeWindow};
use chronoguard_core::Passage;
use regex::Regex;

/// Thousands-grouped numbers first so `1,974` is read whole.
static NUMBER_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b[0-9]{1,3}(?:,[0-9]{3})+(?:\.[0-9]+)?\b|\b[0-9]+(?:\.[0-9]+)?\b").ok()
});

/// Words that introduce a year rather than a figure.
const TEMPORAL_CUES: &[&str] = &[
    "in", "by", "since", "from", "to", "until", "during", "circa", "c.",
];

fn is_year_like(token: &str) -> Option<i32> {
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<i32>().ok().filter(|y| (1000..=2099).contains(y))
}

/// A year-like token is a year when a temporal cue introduces it or when it
/// falls inside the passage's own window. Anything else is a figure.
fn is_year(token: &str, preceding: &str, own_window: Option<&TimeWindow>) -> bool {
    let Some(year) = is_year_like(token) else {
        return false;
    };
    if preceding.ends_with('\'') || preceding.ends_with('\u{2019}') {
        return true;
    }
    let cue = preceding
        .split_whitespace()
        .next_back()
        .map(|w| w.trim_start_matches('(').to_ascii_lowercase());
    if cue.is_some_and(|w| TEMPORAL_CUES.contains(&w.as_str())) {
        return true;
    }
    own_window.is_some_and(|w| TimeWindow::years(year, year).is_some_and(|y| w.intersects(&y)))
}

/// The first figure in `text` that is not a year.
pub fn leading_value(text: &str, own_window: Option<&TimeWindow>) -> Option<f64> {
    let re = NUMBER_PATTERN.as_ref()?;
    re.find_iter(text)
        .filter(|m| !is_year(m.as_str(), &text[..m.start()], own_window))
        .find_map(|m| m.as_str().replace(',', "").parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// `|a − b| / max(|a|, |b|)`; 0 when both are 0.
pub fn relative_delta(a: f64, b: f64) -> f64 {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        0.0
    } else {
        (a - b).abs() / scale
    }
}

/// Detect a numeric conflict. Passages must agree on region and unit to be
/// comparable at all.
pub fn detect(a: &Passage, b: &Passage, tolerance: f64) -> Option<ConflictReason> {
    if a.region != b.region || a.unit != b.unit {
        return None;
    }
    let value_a = leading_value(&a.text, a.window(TimeAxis::Valid).window())?;
    let value_b = leading_value(&b.text, b.window(TimeAxis::Valid).window())?;
    let delta = relative_delta(value_a, value_b);
    (delta > tolerance).then_some(ConflictReason::NumericDivergence {
        value_a,
        value_b,
        relative_delta: delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_years_and_reads_grouped_numbers() {
        let text = "Western Europe GDP per capita in 1870 stood at 1,974 international dollars (1990).";
        assert_eq!(leading_value(text, None), Some(1974.0));
    }

    #[test]
    fn ungrouped_figure_in_year_range_is_a_figure() {
        let text = "Western Europe GDP per capita in 1870 was 1974 international dollars.";
        assert_eq!(leading_value(text, None), Some(1974.0));
    }

    #[test]
    fn year_inside_own_window_is_skipped() {
        let window = TimeWindow::years(1850, 1899);
        let text = "Estimate for 1870: 1974 international dollars.";
        assert_eq!(leading_value(text, window.as_ref()), Some(1974.0));
        assert_eq!(leading_value(text, None), Some(1870.0));
    }

    #[test]
    fn apostrophe_year_is_skipped() {
        assert_eq!(leading_value("the '1990 dollar series gives 2600", None), Some(2600.0));
    }

    #[test]
    fn grouped_year_like_number_is_a_figure() {
        assert_eq!(leading_value("output of 1,870 tonnes", None), Some(1870.0));
    }

    #[test]
    fn decimals_parse() {
        assert_eq!(leading_value("growth of 2.5 percent in 1913", None), Some(2.5));
    }

    #[test]
    fn year_only_text_has_no_value() {
        assert_eq!(leading_value("from 2012 to 2013", None), None);
    }

    #[test]
    fn relative_delta_is_symmetric() {
        assert_eq!(relative_delta(0.0, 0.0), 0.0);
        assert!((relative_delta(100.0, 80.0) - 0.2).abs() < 1e-12);
        assert_eq!(relative_delta(100.0, 80.0), relative_delta(80.0, 100.0));
    }
}
