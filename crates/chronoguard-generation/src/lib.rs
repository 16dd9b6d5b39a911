//! # chronoguard-generation
//!
//! Turns a gated passage set into an [`AttributionCard`]:
//!
//! - **Backends**: a priority-ordered [`BackendChain`] over generation
//!   providers (OpenAI-compatible, Ollama), probed once at startup
//! - **Synthesis**: full prompt, then one narrowed retry, then a
//!   deterministic evidence digest; malformed output never escapes
//! - **Judge**: an LLM judge reranker over the same backend chain
//! - **Schema**: numeric-timeline validation with unit normalization
//! - **Assembly**: cited windows, authority ladder, confidence band,
//!   counterfactual scaffold
//!
//! [`AttributionCard`]: chronoguard_core::models::AttributionCard

pub mod assembler;
pub mod backends;
pub mod digest;
pub mod judge;
pub mod prompts;
pub mod schema;
pub mod synthesizer;
mod text;

pub use assembler::{AssemblyInput, AttributionAssembler};
pub use backends::BackendChain;
pub use judge::LlmJudge;
pub use schema::SchemaValidator;
pub use synthesizer::{SynthesisOutcome, SynthesisRequest, Synthesizer};
pub use text::token_estimate;
