//! Time windows, axes, and modes.
//!
//! Windows are closed-open `[start, end)` in UTC. A zero-length window is an
//! instant and intersects any window that contains it.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_WINDOW_YEAR, MIN_WINDOW_YEAR, SECS_PER_DAY};
use crate::errors::{ChronoError, ChronoResult};

/// Which window pair of a passage a query constrains against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeAxis {
    #[default]
    Valid,
    Transaction,
}

/// Temporal strictness of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeMode {
    /// Binary overlap: non-overlapping evidence is dropped.
    Hard,
    /// Continuous decay with temporal distance.
    #[default]
    Intelligent,
}

/// A closed-open UTC interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window, rejecting inverted bounds.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// One-day window starting at `at`, used for point-in-time queries.
    /// `None` when the day would run past the representable range.
    pub fn instant_day(at: DateTime<Utc>) -> Option<Self> {
        let end = at.checked_add_signed(Duration::days(1))?;
        Some(Self { start: at, end })
    }

    /// Window covering whole calendar years `[from_year-01-01, (to_year+1)-01-01)`.
    pub fn years(from_year: i32, to_year: i32) -> Option<Self> {
        let start = year_start(from_year.min(to_year))?;
        let end = year_start(from_year.max(to_year) + 1)?;
        Self::new(start, end)
    }

    /// The broadest window the engine represents.
    pub fn unbounded() -> Self {
        Self {
            start: open_start(),
            end: open_end(),
        }
    }

    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    pub fn duration_secs(&self) -> f64 {
        (self.end - self.start).num_seconds().max(0) as f64
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        if self.is_instant() {
            t == self.start
        } else {
            self.start <= t && t < self.end
        }
    }

    pub fn intersects(&self, other: &TimeWindow) -> bool {
        if self.is_instant() {
            return other.contains(self.start);
        }
        if other.is_instant() {
            return self.contains(other.start);
        }
        self.start < other.end && other.start < self.end
    }

    pub fn intersection(&self, other: &TimeWindow) -> Option<TimeWindow> {
        if !self.intersects(other) {
            return None;
        }
        Some(TimeWindow {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    /// Intersection-over-union of the two windows' durations, in [0, 1].
    pub fn iou(&self, other: &TimeWindow) -> f64 {
        let Some(inter) = self.intersection(other) else {
            return 0.0;
        };
        let union = self.duration_secs() + other.duration_secs() - inter.duration_secs();
        if union <= 0.0 {
            // Two identical instants.
            return if self == other { 1.0 } else { 0.0 };
        }
        (inter.duration_secs() / union).clamp(0.0, 1.0)
    }

    /// Distance in days between the windows; 0.0 when they intersect.
    pub fn gap_days(&self, other: &TimeWindow) -> f64 {
        if self.intersects(other) {
            return 0.0;
        }
        let before = (other.start - self.end).num_seconds().abs();
        let after = (self.start - other.end).num_seconds().abs();
        before.min(after) as f64 / SECS_PER_DAY
    }

    /// Length of the window in fractional years.
    pub fn span_years(&self) -> f64 {
        self.duration_secs() / (SECS_PER_DAY * 365.25)
    }

    /// Split into `n` equal consecutive slices. Instants yield a single slice.
    pub fn slices(&self, n: usize) -> Vec<TimeWindow> {
        if n <= 1 || self.is_instant() {
            return vec![*self];
        }
        let total = (self.end - self.start).num_seconds();
        let step = total / n as i64;
        if step <= 0 {
            return vec![*self];
        }
        (0..n)
            .map(|i| {
                let start = self.start + Duration::seconds(step * i as i64);
                let end = if i + 1 == n {
                    self.end
                } else {
                    self.start + Duration::seconds(step * (i as i64 + 1))
                };
                TimeWindow { start, end }
            })
            .collect()
    }

    /// Short `YYYY-MM-DD → YYYY-MM-DD` label for cards and prompts.
    pub fn label(&self) -> String {
        format!(
            "{} → {}",
            self.start.date_naive(),
            self.end.date_naive()
        )
    }
}

/// The temporal state of one passage on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Dated(TimeWindow),
    /// No temporal metadata on this axis.
    Undated,
    /// Bounds present but inverted.
    Malformed,
}

impl WindowState {
    /// Build from optional bounds. A missing start is open to the past,
    /// a missing end is open to the future.
    pub fn from_bounds(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        match (from, to) {
            (None, None) => WindowState::Undated,
            (from, to) => {
                let start = from.unwrap_or_else(open_start);
                let end = to.unwrap_or_else(open_end);
                match TimeWindow::new(start, end) {
                    Some(w) => WindowState::Dated(w),
                    None => WindowState::Malformed,
                }
            }
        }
    }

    pub fn window(&self) -> Option<&TimeWindow> {
        match self {
            WindowState::Dated(w) => Some(w),
            _ => None,
        }
    }
}

/// The window a request asks about, as the caller expressed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestedWindow {
    /// Point-in-time ("as of").
    At { at: DateTime<Utc> },
    Range {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
}

impl RequestedWindow {
    /// Resolve to a concrete window. Inverted ranges are a malformed request.
    pub fn resolve(&self) -> ChronoResult<TimeWindow> {
        match *self {
            RequestedWindow::At { at } => TimeWindow::instant_day(at).ok_or_else(|| {
                ChronoError::invalid_request(format!("requested instant is out of range: {at}"))
            }),
            RequestedWindow::Range { from, to } => TimeWindow::new(from, to).ok_or_else(|| {
                ChronoError::invalid_request(format!(
                    "requested window is inverted: {from} > {to}"
                ))
            }),
        }
    }
}

/// January 1st of `year`, UTC.
pub fn year_start(year: i32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn open_start() -> DateTime<Utc> {
    year_start(MIN_WINDOW_YEAR).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn open_end() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(MAX_WINDOW_YEAR, 12, 31)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
