//! Temporal router: fills in the request fields the caller left out.
//!
//! Caller-supplied fields always win. Otherwise the domain comes from query
//! keywords, the window from period/century/year mentions, the axis from
//! transaction-time wording, and the mode from the domain's policy.

pub mod domain;
pub mod window;

use chronoguard_core::{ChronoConfig, RequestedWindow, TimeAxis, TimeMode};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use domain::detect_domain;
pub use window::{infer_window, WindowKind};

/// Wording that asks about when something was recorded, not when it held.
const TRANSACTION_KEYWORDS: &[&str] = &[
    "as reported",
    "as-reported",
    "as filed",
    "filing",
    "filed",
    "restated",
    "restatement",
    "originally reported",
];

/// Request fields the caller supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteHint {
    pub domain: Option<String>,
    pub axis: Option<TimeAxis>,
    pub mode: Option<TimeMode>,
    pub window: Option<RequestedWindow>,
}

/// Fully resolved routing for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDecision {
    pub domain: String,
    pub axis: TimeAxis,
    pub mode: TimeMode,
    pub window: RequestedWindow,
    pub window_kind: WindowKind,
}

/// Stateless router.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemporalRouter;

impl TemporalRouter {
    pub fn new() -> Self {
        Self
    }

    pub fn route(&self, query: &str, hint: &RouteHint, config: &ChronoConfig) -> RouteDecision {
        let domain = hint
            .domain
            .clone()
            .unwrap_or_else(|| detect_domain(query).to_string());

        let (window, window_kind) = match hint.window {
            Some(w) => (w, WindowKind::Hint),
            None => {
                let (w, kind) = infer_window(query);
                (
                    RequestedWindow::Range {
                        from: w.start,
                        to: w.end,
                    },
                    kind,
                )
            }
        };

        let axis = hint.axis.unwrap_or_else(|| pick_axis(query, &domain));

        let mode = hint.mode.unwrap_or_else(|| {
            if window_kind.is_explicit_year() && config.hard_mode_for_explicit_year(&domain) {
                TimeMode::Hard
            } else {
                config.default_mode(&domain)
            }
        });

        debug!(
            domain = %domain,
            axis = ?axis,
            mode = ?mode,
            window_kind = window_kind.as_str(),
            "query routed"
        );

        RouteDecision {
            domain,
            axis,
            mode,
            window,
            window_kind,
        }
    }
}

fn pick_axis(query: &str, domain: &str) -> TimeAxis {
    let q = query.to_lowercase();
    if TRANSACTION_KEYWORDS.iter().any(|k| q.contains(k)) || domain == domain::FINANCE {
        TimeAxis::Transaction
    } else {
        TimeAxis::Valid
    }
}
