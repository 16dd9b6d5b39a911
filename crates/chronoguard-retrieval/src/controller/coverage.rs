//! Coverage signal: the fraction of coverage units the ranked pool answers.
//!
//! Units are equal time slices of the requested window plus any declared
//! sub-claims. A slice is covered by a qualifying passage whose window on
//! the query axis intersects it. A sub-claim is covered by a qualifying
//! passage containing all of its terms with enough compliance.

use chronoguard_core::config::ControllerConfig;
use chronoguard_core::{QueryContext, ScoredCandidate, TimeWindow};

/// Number of time slices the requested window is split into: one per whole
/// year of span, at least one, at most `max_time_slices`.
pub fn slice_count(window: &TimeWindow, max_time_slices: usize) -> usize {
    let years = window.span_years().round();
    let years = if years.is_finite() && years >= 1.0 {
        years as usize
    } else {
        1
    };
    years.clamp(1, max_time_slices.max(1))
}

fn qualifies(c: &ScoredCandidate, config: &ControllerConfig) -> bool {
    c.temporal_compliance > 0.0 && c.fused_score >= config.min_fused_score
}

fn terms(text: &str) -> Vec<String> {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Coverage in [0, 1] of `ranked` for the query.
pub fn coverage_signal(ranked: &[ScoredCandidate], ctx: &QueryContext, config: &ControllerConfig) -> f64 {
    let slices = ctx.window().slices(slice_count(ctx.window(), config.max_time_slices));
    let qualifying: Vec<&ScoredCandidate> = ranked.iter().filter(|c| qualifies(c, config)).collect();

    let covered_slices = slices
        .iter()
        .filter(|slice| {
            qualifying.iter().any(|c| {
                c.passage
                    .window(ctx.axis)
                    .window()
                    .is_some_and(|w| w.intersects(slice))
            })
        })
        .count();

    let covered_claims = ctx
        .sub_claims
        .iter()
        .filter(|claim| {
            let wanted = terms(claim);
            !wanted.is_empty()
                && qualifying.iter().any(|c| {
                    if c.temporal_compliance < config.coverage_min_compliance {
                        return false;
                    }
                    let have = terms(&c.passage.text);
                    wanted.iter().all(|t| have.contains(t))
                })
        })
        .count();

    let units = slices.len() + ctx.sub_claims.len();
    if units == 0 {
        return 0.0;
    }
    (covered_slices + covered_claims) as f64 / units as f64
}
