//! # chronoguard-sanity
//!
//! The ChronoSanity gate. Inspects the final ranked passage set for pairs
//! whose windows overlap but whose claims disagree, and decides whether the
//! response must degrade to an evidence-only digest.
//!
//! ## Detection strategies
//! 1. **Numeric**: the leading figure of two same-region, same-unit passages
//!    differs beyond the configured relative tolerance
//! 2. **Entity**: two passages assert different values for one `Key:Value`
//!    entity key

pub mod detection;
pub mod gate;
pub mod reduce;

pub use gate::{GateOutcome, SanityGate};
pub use reduce::reduce;
