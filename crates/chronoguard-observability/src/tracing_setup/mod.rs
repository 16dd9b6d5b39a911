//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use chronoguard_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "CHRONOGUARD_LOG";

/// Install the global subscriber.
///
/// `CHRONOGUARD_LOG` wins over `config.log_level` when set. Returns `false`
/// if a subscriber was already installed, which is not an error.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_logs {
        builder
            .json()
            .with_current_span(true)
            .try_init()
            .is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
