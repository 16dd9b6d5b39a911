//! Retry-then-digest synthesis.
//!
//! Attempt 1 sends the full prompt. A schema failure earns one narrowed
//! retry. A second schema failure, or any backend failure, ends synthesis
//! with no payload; the caller then emits the evidence digest.

use chronoguard_core::config::GenerationConfig;
use chronoguard_core::models::{DegradationEvent, GenerationParams, NumericTimeline};
use chronoguard_core::{QueryContext, ScoredCandidate};
use chronoguard_observability::generation_span;
use tracing::{debug, info, warn};

use crate::backends::BackendChain;
use crate::prompts;
use crate::schema::SchemaValidator;
use crate::text::token_estimate;

pub const COMPONENT_BACKEND: &str = "generation";
pub const COMPONENT_SCHEMA: &str = "generation.schema";
pub const FALLBACK_NARROWED: &str = "narrowed_retry";
pub const FALLBACK_DIGEST: &str = "evidence_digest";

/// Everything one synthesis run needs.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisRequest<'a> {
    pub ctx: &'a QueryContext,
    pub window_kind: &'a str,
    pub passages: &'a [ScoredCandidate],
    pub required_unit: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub struct SynthesisOutcome {
    /// Validated payload; `None` means fall back to the digest.
    pub payload: Option<NumericTimeline>,
    pub attempts: usize,
    pub backend: Option<String>,
    pub degradations: Vec<DegradationEvent>,
    pub tokens_out: usize,
}

#[derive(Debug, Clone)]
pub struct Synthesizer {
    chain: BackendChain,
    config: GenerationConfig,
}

impl Synthesizer {
    pub fn new(chain: BackendChain, config: GenerationConfig) -> Self {
        Self { chain, config }
    }

    pub fn chain(&self) -> &BackendChain {
        &self.chain
    }

    fn params(&self) -> GenerationParams {
        GenerationParams {
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            stop: self.config.stop.clone(),
            timeout_ms: Some(self.config.timeout_ms),
        }
    }

    pub fn synthesize(&self, request: SynthesisRequest<'_>) -> SynthesisOutcome {
        let mut outcome = SynthesisOutcome::default();
        let SynthesisRequest {
            ctx,
            window_kind,
            passages,
            required_unit,
        } = request;

        let validator = SchemaValidator::new(
            self.config.min_evidence_bullets,
            required_unit,
            passages.iter().map(|c| c.passage.id.clone()),
            self.config.stop.clone(),
        );
        let params = self.params();

        let mut messages =
            prompts::build_messages(ctx, window_kind, passages, self.config.snippet_chars);

        for attempt in 1..=2 {
            let span = generation_span!(
                self.chain.selected_name().unwrap_or("none"),
                attempt
            );
            let _guard = span.enter();
            outcome.attempts = attempt;

            let (raw, backend) = match self.chain.generate(&messages, &params) {
                Ok(generated) => generated,
                Err(e) => {
                    warn!(attempt, error = %e, "generation failed");
                    outcome.degradations.push(DegradationEvent::now(
                        COMPONENT_BACKEND,
                        e.to_string(),
                        FALLBACK_DIGEST,
                    ));
                    return outcome;
                }
            };
            outcome.tokens_out += token_estimate(&raw);
            outcome.backend = Some(backend);

            match validator.validate(&raw) {
                Ok(payload) => {
                    info!(attempt, evidence = payload.evidence.len(), "payload validated");
                    outcome.payload = Some(payload);
                    return outcome;
                }
                Err(e) => {
                    let fallback = if attempt == 1 {
                        FALLBACK_NARROWED
                    } else {
                        FALLBACK_DIGEST
                    };
                    debug!(attempt, error = %e, "payload rejected");
                    outcome
                        .degradations
                        .push(DegradationEvent::now(COMPONENT_SCHEMA, e.to_string(), fallback));
                    if attempt == 1 {
                        messages = prompts::build_narrowed_messages(
                            ctx,
                            passages,
                            self.config.narrowed_passage_count,
                            self.config.snippet_chars,
                            &e.to_string(),
                            validator.required_unit(),
                        );
                    }
                }
            }
        }
        outcome
    }
}
