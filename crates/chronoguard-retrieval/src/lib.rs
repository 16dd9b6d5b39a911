//! # chronoguard-retrieval
//!
//! Everything between the query and the final ranked candidate set:
//! hybrid recall, temporal masking, monotone fusion, cross-encoder rerank,
//! the DHQC hop controller, and the temporal router that fills in omitted
//! request fields.

pub mod controller;
pub mod mask;
pub mod ranking;
pub mod router;
pub mod search;

pub use controller::{run_hops, HopController, HopLoopOutcome};
pub use mask::{mask, MaskOutcome};
pub use ranking::{CrossEncoderReranker, RankingPipeline};
pub use router::{RouteDecision, RouteHint, TemporalRouter};
pub use search::{HybridSearcher, RecallOutcome, RecallWeights};
