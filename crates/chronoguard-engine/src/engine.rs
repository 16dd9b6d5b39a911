//! ChronoEngine: orchestrates one request end to end.
//!
//! policy snapshot → route → DHQC hops (recall → mask → fuse) → rerank →
//! ChronoSanity gate → synthesis or evidence digest → attribution card.
//! Recall, rerank, and generation each run under their policy deadline.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, Instrument};

use chronoguard_core::config::ChronoConfig;
use chronoguard_core::models::{
    AttributionCard, AuditTrail, ControllerStats, DegradationEvent, RerankMethod, StopReason,
};
use chronoguard_core::traits::{ICrossEncoder, IPolicySource};
use chronoguard_core::{ChronoResult, QueryContext, ScoredCandidate};
use chronoguard_generation::{
    token_estimate, AssemblyInput, AttributionAssembler, BackendChain, LlmJudge,
    SynthesisOutcome, SynthesisRequest, Synthesizer,
};
use chronoguard_observability::degradation::{first_reason, record_all};
use chronoguard_observability::tracing_setup::events;
use chronoguard_observability::{init_tracing, recall_span, request_span, rerank_span};
use chronoguard_retrieval::ranking::recall_weights;
use chronoguard_retrieval::router::WindowKind;
use chronoguard_retrieval::{
    run_hops, CrossEncoderReranker, HopController, HopLoopOutcome, RankingPipeline,
    TemporalRouter,
};
use chronoguard_sanity::{GateOutcome, SanityGate};

use crate::oracles::Oracles;
use crate::request::AnswerRequest;
use crate::timeouts::run_blocking;

/// Evidence-only reason when no candidate survived the temporal mask.
pub const REASON_NO_CANDIDATES: &str = "NO_COMPLIANT_CANDIDATES";
/// Evidence-only reason when the reranker failed or timed out.
pub const REASON_RERANK_FAILED: &str = "RERANK_UNAVAILABLE";
/// Evidence-only reason when synthesis produced no valid payload.
pub const REASON_GENERATION_FALLBACK: &str = "GENERATION_FALLBACK";

const FALLBACK_NO_CANDIDATES: &str = "no_candidates";
const FALLBACK_FUSION_ONLY: &str = "fusion_only";
const FALLBACK_DIGEST: &str = "evidence_digest";

/// The temporal retrieval-and-fusion engine.
///
/// Holds no per-request state; concurrent `answer` calls share only the
/// policy source, the oracles, and the probed backend chain.
pub struct ChronoEngine {
    policy: Arc<dyn IPolicySource>,
    oracles: Oracles,
    chain: BackendChain,
    router: TemporalRouter,
}

impl ChronoEngine {
    /// Build an engine, probing `chain` for the first available backend.
    pub fn new(policy: Arc<dyn IPolicySource>, oracles: Oracles, mut chain: BackendChain) -> Self {
        chain.probe();
        Self {
            policy,
            oracles,
            chain,
            router: TemporalRouter::new(),
        }
    }

    /// Build an engine from the policy's current snapshot: install the
    /// tracing subscriber and construct the configured backend chain.
    pub fn from_policy(policy: Arc<dyn IPolicySource>, oracles: Oracles) -> ChronoResult<Self> {
        let snapshot = policy.snapshot()?;
        init_tracing(&snapshot.config.observability);
        let chain = BackendChain::from_config(&snapshot.config.generation);
        info!(
            policy_version = %snapshot.version,
            backends = ?chain.names(),
            "engine starting"
        );
        Ok(Self::new(policy, oracles, chain))
    }

    /// Name of the generation backend chosen at startup.
    pub fn backend(&self) -> Option<&str> {
        self.chain.selected_name()
    }

    /// Answer one request.
    ///
    /// Fails only on a policy read failure or a malformed request. Every
    /// other failure degrades the card and is recorded in its audit trail.
    pub async fn answer(&self, request: AnswerRequest) -> ChronoResult<AttributionCard> {
        let started = Instant::now();

        // Step 1: One policy snapshot for the whole request.
        let snapshot = self.policy.snapshot()?;
        let config = &snapshot.config;

        // Step 2: Fill omitted fields and build the query context.
        let route = self.router.route(&request.query_text, &request.hint(), config);
        let ctx = QueryContext::new(
            request.query_text.clone(),
            route.axis,
            route.window,
            route.mode,
            route.domain.clone(),
        )?
        .with_sub_claims(request.sub_claims.clone());

        let audit = AuditTrail::new(snapshot.version.clone());
        let span = request_span!(audit.request_id, snapshot.version);
        let card = self
            .run(&ctx, route.window_kind, config, audit, started)
            .instrument(span)
            .await;
        Ok(card)
    }

    async fn run(
        &self,
        ctx: &QueryContext,
        window_kind: WindowKind,
        config: &ChronoConfig,
        mut audit: AuditTrail,
        started: Instant,
    ) -> AttributionCard {
        let mut degradations = Vec::new();
        let pipeline = RankingPipeline::from_policy(config, &ctx.domain);

        // Step 3: Hop loop.
        let hops = self.recall(ctx, config, &pipeline).await;
        degradations.extend(hops.degradations);
        debug!(
            ranked = hops.ranked.len(),
            dropped = hops.dropped.len(),
            "recall finished"
        );

        // Step 4: Rerank the head of the ranking, then keep the final top-k.
        let mut reranked = self.rerank(ctx, config, &pipeline, hops.ranked).await;
        if let Some(event) = reranked.degradation.take() {
            degradations.push(event);
        }
        reranked.candidates.truncate(config.rerank.final_top_k);

        // Step 5: ChronoSanity.
        let gated: GateOutcome =
            SanityGate::from_policy(config).gate(reranked.candidates);

        let mut evidence_only_reason = if gated.evidence_only {
            gated.reason.clone()
        } else if gated.accepted.is_empty() {
            degradations.push(DegradationEvent::now(
                "retrieval",
                "no temporally compliant candidates",
                FALLBACK_NO_CANDIDATES,
            ));
            Some(REASON_NO_CANDIDATES.to_string())
        } else if reranked.failed {
            Some(REASON_RERANK_FAILED.to_string())
        } else {
            None
        };

        // Step 6: Generation, only when nothing forced the digest.
        let synthesis = if evidence_only_reason.is_none() {
            self.synthesize(ctx, window_kind, config, &gated.accepted).await
        } else {
            SynthesisOutcome::default()
        };
        degradations.extend(synthesis.degradations);
        if synthesis.payload.is_none() && evidence_only_reason.is_none() {
            evidence_only_reason = Some(REASON_GENERATION_FALLBACK.to_string());
        }

        // Step 7: Stats, audit, card.
        let mut stats = ControllerStats::default();
        hops.controller.fill_stats(&mut stats);
        if gated.accepted.is_empty() {
            stats.hop_shortfall = true;
        }
        stats.domain = ctx.domain.clone();
        stats.window_kind = window_kind.as_str().to_string();
        stats.rerank_method = reranked.method;
        stats.tokens_in = token_estimate(&ctx.query_text);
        stats.tokens_out = synthesis.tokens_out;

        record_all(&mut audit, degradations);
        stats.degraded = first_reason(&audit).or_else(|| evidence_only_reason.clone());
        stats.latency_ms = started.elapsed().as_millis() as u64;
        let latency_ms = stats.latency_ms;

        let card = AttributionAssembler::from_policy(config).assemble(AssemblyInput {
            ctx,
            passages: &gated.accepted,
            conflict_traces: gated.conflict_traces,
            payload: synthesis.payload,
            evidence_only_reason,
            controller_stats: stats,
            audit_trail: audit,
        });

        events::request_completed(card.evidence_only, card.windows.len(), latency_ms);
        card
    }

    /// Run DHQC on the blocking pool. On deadline expiry the request
    /// proceeds with no candidates.
    async fn recall(
        &self,
        ctx: &QueryContext,
        config: &ChronoConfig,
        pipeline: &RankingPipeline,
    ) -> HopLoopOutcome {
        let budget = config.initial_budget(&ctx.domain);
        let weights = recall_weights(config, &ctx.domain);
        let searcher = self.oracles.searcher();
        let task_pipeline = pipeline.clone();
        let task_ctx = ctx.clone();
        let controller_config = config.controller.clone();

        let span = recall_span!(ctx.domain, budget);
        let result = run_blocking("recall", config.recall.timeout_ms, move || {
            run_hops(
                &searcher,
                &task_pipeline,
                &task_ctx,
                &controller_config,
                budget,
                weights,
            )
        })
        .instrument(span)
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(failure) => {
                let mut controller = HopController::new(&config.controller, ctx.mode, budget);
                controller.abort(StopReason::HopsExhausted);
                HopLoopOutcome {
                    ranked: Vec::new(),
                    dropped: Vec::new(),
                    degradations: vec![DegradationEvent::now(
                        "recall",
                        failure.to_string(),
                        FALLBACK_NO_CANDIDATES,
                    )],
                    controller,
                }
            }
        }
    }

    /// The scorer for this request: the oracle cross-encoder, wrapped in the
    /// LLM judge when the policy enables it and a backend was selected.
    fn scorer(&self, config: &ChronoConfig) -> Option<Arc<dyn ICrossEncoder>> {
        let encoder = self.oracles.cross_encoder.clone();
        if !config.rerank.judge_enabled || self.chain.selected_name().is_none() {
            return encoder;
        }
        let judge = LlmJudge::from_config(self.chain.clone(), &config.rerank);
        Some(match encoder {
            Some(encoder) => Arc::new(judge.with_cross_encoder(encoder)),
            None => Arc::new(judge),
        })
    }

    /// Rerank of the top `rerank.top_k` candidates. Without a scorer the
    /// fused order stands.
    async fn rerank(
        &self,
        ctx: &QueryContext,
        config: &ChronoConfig,
        pipeline: &RankingPipeline,
        ranked: Vec<ScoredCandidate>,
    ) -> Reranked {
        let head: Vec<ScoredCandidate> = ranked.into_iter().take(config.rerank.top_k).collect();
        let Some(encoder) = self.scorer(config) else {
            return Reranked::fusion_only(head);
        };
        if head.is_empty() {
            return Reranked::fusion_only(head);
        }

        let reranker = CrossEncoderReranker::new(encoder, config.rerank.batch_size);
        let span = rerank_span!(reranker.encoder_name(), head.len());
        let query = ctx.query_text.clone();
        let batch = head.clone();
        let result = run_blocking("rerank", config.rerank.timeout_ms, move || {
            let mut batch = batch;
            reranker.rerank(&query, &mut batch).map(|()| batch)
        })
        .instrument(span)
        .await;

        let failure = match result {
            Ok(Ok(scored)) => {
                return Reranked {
                    candidates: pipeline.refuse(scored),
                    method: RerankMethod::CrossEncoder,
                    failed: false,
                    degradation: None,
                };
            }
            Ok(Err(e)) => e.to_string(),
            Err(e) => e.to_string(),
        };
        Reranked {
            candidates: head,
            method: RerankMethod::FusionOnly,
            failed: true,
            degradation: Some(DegradationEvent::now(
                "rerank",
                failure,
                FALLBACK_FUSION_ONLY,
            )),
        }
    }

    /// Synthesis on the blocking pool. The deadline covers both attempts.
    async fn synthesize(
        &self,
        ctx: &QueryContext,
        window_kind: WindowKind,
        config: &ChronoConfig,
        passages: &[ScoredCandidate],
    ) -> SynthesisOutcome {
        let synthesizer = Synthesizer::new(self.chain.clone(), config.generation.clone());
        let required_unit = config.required_unit(&ctx.domain).map(str::to_string);
        let task_ctx = ctx.clone();
        let passages = passages.to_vec();
        let deadline = config.generation.timeout_ms.saturating_mul(2);

        let result = run_blocking("generation", deadline, move || {
            synthesizer.synthesize(SynthesisRequest {
                ctx: &task_ctx,
                window_kind: window_kind.as_str(),
                passages: &passages,
                required_unit: required_unit.as_deref(),
            })
        })
        .await;

        result.unwrap_or_else(|failure| SynthesisOutcome {
            degradations: vec![DegradationEvent::now(
                "generation",
                failure.to_string(),
                FALLBACK_DIGEST,
            )],
            ..SynthesisOutcome::default()
        })
    }
}

impl std::fmt::Debug for ChronoEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChronoEngine")
            .field("oracles", &self.oracles)
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

/// Result of the rerank stage.
struct Reranked {
    candidates: Vec<ScoredCandidate>,
    method: RerankMethod,
    failed: bool,
    degradation: Option<DegradationEvent>,
}

impl Reranked {
    fn fusion_only(candidates: Vec<ScoredCandidate>) -> Self {
        Self {
            candidates,
            method: RerankMethod::FusionOnly,
            failed: false,
            degradation: None,
        }
    }
}
