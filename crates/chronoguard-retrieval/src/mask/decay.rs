//! INTELLIGENT-mode decay curves. All are 1.0 at distance zero and
//! non-increasing in distance.

use chronoguard_core::config::DecayCurve;

/// Compliance for a window `gap_days` away from the requested window.
pub fn decay(gap_days: f64, curve: DecayCurve, span_days: f64) -> f64 {
    if !gap_days.is_finite() || gap_days <= 0.0 {
        return 1.0;
    }
    if !span_days.is_finite() || span_days <= 0.0 {
        return 0.0;
    }
    let x = gap_days / span_days;
    let value = match curve {
        DecayCurve::Linear => 1.0 - x,
        DecayCurve::Exponential => (-x).exp(),
        DecayCurve::Reciprocal => 1.0 / (1.0 + x),
    };
    value.clamp(0.0, 1.0)
}
