//! # chronoguard-engine
//!
//! The request pipeline. One [`ChronoEngine::answer`] call reads a policy
//! snapshot, routes the query, runs the hop controller, reranks, gates the
//! result through ChronoSanity, and either synthesizes a structured answer or
//! falls back to an evidence digest. Oracle calls run on the blocking pool
//! under policy deadlines.

pub mod engine;
pub mod oracles;
pub mod policy;
pub mod request;
pub mod timeouts;

pub use engine::ChronoEngine;
pub use oracles::Oracles;
pub use policy::{PolicyApplyResult, PolicyStore, PolicyUpdate, TomlFilePolicySource};
pub use request::AnswerRequest;
