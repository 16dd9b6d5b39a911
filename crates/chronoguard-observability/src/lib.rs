//! # chronoguard-observability
//!
//! Tracing subscriber setup, per-stage span macros, structured events, and
//! degradation recording into the request audit trail.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::record_degradation;
pub use tracing_setup::init_tracing;
