//! # chronoguard-core
//!
//! Foundation crate for the ChronoGuard temporal retrieval engine.
//! Defines the passage and candidate model, time windows, oracle traits,
//! errors, policy config, and constants. Every other crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod time;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{ChronoConfig, PolicySnapshot};
pub use errors::{ChronoError, ChronoResult};
pub use models::{Passage, QueryContext, ScoredCandidate};
pub use time::{RequestedWindow, TimeAxis, TimeMode, TimeWindow, WindowState};
