use chronoguard_core::time::year_start;
use chronoguard_core::{ChronoConfig, RequestedWindow, TimeAxis, TimeMode};
use chronoguard_retrieval::router::window::explicit_years;
use chronoguard_retrieval::router::{RouteHint, TemporalRouter, WindowKind};

fn range(from: i32, to: i32) -> RequestedWindow {
    RequestedWindow::Range {
        from: year_start(from).unwrap(),
        to: year_start(to).unwrap(),
    }
}

#[test]
fn single_year_gets_decade_window_and_hard_mode_for_world_economy() {
    let route = TemporalRouter::new().route(
        "Europe GDP per capita in 1870",
        &RouteHint::default(),
        &ChronoConfig::default(),
    );
    assert_eq!(route.domain, "world-economy");
    assert_eq!(route.window_kind, WindowKind::Decade);
    assert_eq!(route.window, range(1865, 1876));
    assert_eq!(route.mode, TimeMode::Hard);
    assert_eq!(route.axis, TimeAxis::Valid);
}

#[test]
fn century_window_is_padded() {
    let route = TemporalRouter::new().route(
        "World GDP per capita in the 19th century",
        &RouteHint::default(),
        &ChronoConfig::default(),
    );
    assert_eq!(route.window_kind, WindowKind::Century);
    assert_eq!(route.window, range(1751, 1951));
    // Centuries are not explicit years: domain default mode applies.
    assert_eq!(route.mode, TimeMode::Intelligent);
}

#[test]
fn named_period_wins_over_years() {
    let route = TemporalRouter::new().route(
        "post-war growth from 1950",
        &RouteHint::default(),
        &ChronoConfig::default(),
    );
    assert_eq!(route.window_kind, WindowKind::Period);
    assert_eq!(route.window, range(1945, 1960));
}

#[test]
fn several_years_span_first_to_last() {
    let route = TemporalRouter::new().route(
        "Acme CEO between 2010 and 2014",
        &RouteHint::default(),
        &ChronoConfig::default(),
    );
    assert_eq!(route.domain, "roles");
    assert_eq!(route.window_kind, WindowKind::YearRange);
    assert_eq!(route.window, range(2010, 2015));
    assert_eq!(route.mode, TimeMode::Hard);
}

#[test]
fn no_time_signal_gets_broad_window() {
    let route = TemporalRouter::new().route(
        "tallest building",
        &RouteHint::default(),
        &ChronoConfig::default(),
    );
    assert_eq!(route.domain, "generic");
    assert_eq!(route.window_kind, WindowKind::Broad);
    assert_eq!(route.window, range(1, 2100));
    assert_eq!(route.mode, TimeMode::Intelligent);
}

#[test]
fn transaction_wording_and_finance_pick_transaction_axis() {
    let router = TemporalRouter::new();
    let config = ChronoConfig::default();
    let route = router.route("Acme revenue in 2015", &RouteHint::default(), &config);
    assert_eq!(route.domain, "finance");
    assert_eq!(route.axis, TimeAxis::Transaction);
    let route = router.route(
        "population figures as reported in 1990",
        &RouteHint::default(),
        &config,
    );
    assert_eq!(route.axis, TimeAxis::Transaction);
}

#[test]
fn caller_hints_always_win() {
    let hint = RouteHint {
        domain: Some("generic".to_string()),
        axis: Some(TimeAxis::Transaction),
        mode: Some(TimeMode::Intelligent),
        window: Some(range(1870, 1871)),
    };
    let route = TemporalRouter::new().route(
        "Europe GDP per capita in 1870",
        &hint,
        &ChronoConfig::default(),
    );
    assert_eq!(route.domain, "generic");
    assert_eq!(route.axis, TimeAxis::Transaction);
    assert_eq!(route.mode, TimeMode::Intelligent);
    assert_eq!(route.window_kind, WindowKind::Hint);
    assert_eq!(route.window, range(1870, 1871));
}

#[test]
fn explicit_years_are_sorted_and_distinct() {
    assert_eq!(explicit_years("1990 then 1870 and 1990"), vec![1870, 1990]);
    assert!(explicit_years("1,974 dollars").is_empty());
}
