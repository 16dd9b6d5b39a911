/// ChronoGuard version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hard ceiling on hops regardless of policy. Policy values above this are clamped.
pub const MAX_HOPS_CEILING: usize = 16;

/// Marker that separates generated prose from any trailing card text.
pub const STOP_MARKER: &str = "<|ATTR_CARD|>";

/// Seconds in a day, used for window distance computations.
pub const SECS_PER_DAY: f64 = 86_400.0;

/// Canonical unit token for 1990 international (Geary–Khamis) dollars.
pub const UNIT_INTL_1990_USD: &str = "intl_1990_usd";

/// Earliest representable calendar year for open-start windows.
pub const MIN_WINDOW_YEAR: i32 = 1;

/// Latest representable calendar year for open-ended windows.
pub const MAX_WINDOW_YEAR: i32 = 9999;
