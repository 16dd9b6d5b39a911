//! Window inference from the query text.
//!
//! Precedence: named period, then century, then explicit years, then the
//! broad fallback window.

use std::sync::LazyLock;

use chronoguard_core::time::year_start;
use chronoguard_core::TimeWindow;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Padding around a single explicit year.
pub const DECADE_PADDING_YEARS: i32 = 5;
/// Padding around a named century.
pub const CENTURY_PADDING_YEARS: i32 = 50;
pub const BROAD_START_YEAR: i32 = 1;
pub const BROAD_END_YEAR: i32 = 2100;

/// Named periods as `[start_year, end_year)`.
const PERIODS: &[(&str, i32, i32)] = &[
    ("post-war", 1945, 1960),
    ("postwar", 1945, 1960),
    ("industrial revolution", 1760, 1840),
    ("interwar", 1919, 1939),
    ("great depression", 1929, 1939),
];

static YEAR_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(1[0-9]{3}|20[0-9]{2})\b").ok());
static CENTURY_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\b([0-9]{1,2})(?:st|nd|rd|th)\s+century\b").ok());

/// How the request window was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Supplied by the caller.
    Hint,
    Period,
    Century,
    /// A single explicit year, padded.
    Decade,
    YearRange,
    Broad,
}

impl WindowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowKind::Hint => "hint",
            WindowKind::Period => "period",
            WindowKind::Century => "century",
            WindowKind::Decade => "decade",
            WindowKind::YearRange => "year_range",
            WindowKind::Broad => "broad",
        }
    }

    /// Whether the window came from years written in the query.
    pub fn is_explicit_year(&self) -> bool {
        matches!(self, WindowKind::Decade | WindowKind::YearRange)
    }
}

fn span(start_year: i32, end_year: i32) -> Option<TimeWindow> {
    TimeWindow::new(year_start(start_year)?, year_start(end_year)?)
}

/// Distinct explicit years in the query, ascending.
pub fn explicit_years(query: &str) -> Vec<i32> {
    let Some(re) = YEAR_PATTERN.as_ref() else {
        return Vec::new();
    };
    let mut years: Vec<i32> = re
        .captures_iter(query)
        .filter_map(|c| c.get(1)?.as_str().parse().ok())
        .collect();
    years.sort_unstable();
    years.dedup();
    years
}

fn period_window(query: &str) -> Option<TimeWindow> {
    let q = query.to_lowercase();
    PERIODS
        .iter()
        .find(|(name, _, _)| q.contains(name))
        .and_then(|&(_, from, to)| span(from, to))
}

fn century_window(query: &str) -> Option<TimeWindow> {
    let re = CENTURY_PATTERN.as_ref()?;
    let century: i32 = re.captures(query)?.get(1)?.as_str().parse().ok()?;
    if century < 1 {
        return None;
    }
    let start = ((century - 1) * 100 + 1 - CENTURY_PADDING_YEARS).max(1);
    let end = century * 100 + CENTURY_PADDING_YEARS + 1;
    span(start, end)
}

fn year_window(years: &[i32]) -> Option<(TimeWindow, WindowKind)> {
    match years {
        [] => None,
        [year] => span(
            (year - DECADE_PADDING_YEARS).max(1),
            year + DECADE_PADDING_YEARS + 1,
        )
        .map(|w| (w, WindowKind::Decade)),
        [first, .., last] => span(*first, last + 1).map(|w| (w, WindowKind::YearRange)),
    }
}

/// Infer the window a query is about.
pub fn infer_window(query: &str) -> (TimeWindow, WindowKind) {
    if let Some(w) = period_window(query) {
        return (w, WindowKind::Period);
    }
    if let Some(w) = century_window(query) {
        return (w, WindowKind::Century);
    }
    if let Some(found) = year_window(&explicit_years(query)) {
        return found;
    }
    let broad = span(BROAD_START_YEAR, BROAD_END_YEAR).unwrap_or_else(TimeWindow::unbounded);
    (broad, WindowKind::Broad)
}
