//! DHQC: the hop controller.
//!
//! An explicit state machine, `Planning → Executing → Evaluating →
//! {Planning | Done}`, driven by a loop. No recursion; the number of hops is
//! fixed when the controller is built and never exceeds `max_hops`.

pub mod coverage;

use std::collections::BTreeMap;

use chronoguard_core::config::ControllerConfig;
use chronoguard_core::models::{
    ControllerStats, DegradationEvent, HopDecision, HopPlan, StopReason,
};
use chronoguard_core::{QueryContext, ScoredCandidate, TimeMode};
use chronoguard_observability::hop_span;
use chronoguard_observability::tracing_setup::events;
use tracing::{debug, info, warn};

use crate::ranking::RankingPipeline;
use crate::search::{HybridSearcher, RecallWeights};

/// Where the controller is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Planning,
    Executing,
    /// Transient: held only while `evaluate` runs.
    Evaluating,
    Done,
}

/// Plans hop budgets and decides when to stop.
#[derive(Debug, Clone)]
pub struct HopController {
    state: ControllerState,
    planned_hops: usize,
    budget: usize,
    budget_step: usize,
    budget_cap: usize,
    widen_factor: usize,
    coverage_threshold: f64,
    stagnation_epsilon: f64,
    hops: Vec<HopPlan>,
    coverage: f64,
    stop_reason: StopReason,
}

impl HopController {
    pub fn new(config: &ControllerConfig, mode: TimeMode, initial_budget: usize) -> Self {
        let mode_cap = match mode {
            TimeMode::Hard => config.hard_max_hops,
            TimeMode::Intelligent => config.max_hops,
        };
        let budget_cap = config.budget_cap.max(1);
        Self {
            state: ControllerState::Planning,
            planned_hops: config.max_hops.min(mode_cap).max(1),
            budget: initial_budget.clamp(1, budget_cap),
            budget_step: config.budget_step,
            budget_cap,
            widen_factor: config.widen_factor.max(1),
            coverage_threshold: config.coverage_threshold,
            stagnation_epsilon: config.stagnation_epsilon,
            hops: Vec::new(),
            coverage: 0.0,
            stop_reason: StopReason::default(),
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ControllerState::Done
    }

    /// Planning → Executing. Returns the candidate budget for the next hop,
    /// or `None` once the controller is done.
    pub fn plan(&mut self) -> Option<usize> {
        match self.state {
            ControllerState::Planning => {
                self.state = ControllerState::Executing;
                Some(self.budget)
            }
            ControllerState::Executing | ControllerState::Evaluating => Some(self.budget),
            ControllerState::Done => None,
        }
    }

    /// Evaluate the hop just executed and decide what happens next.
    ///
    /// `coverage` is the signal over the merged pool; `new_passages` is how
    /// many passages this hop added to the pool.
    pub fn evaluate(&mut self, coverage: f64, new_passages: usize) -> HopDecision {
        if self.state != ControllerState::Executing {
            warn!(state = ?self.state, "evaluate called outside a hop");
            return HopDecision::Stop;
        }
        self.state = ControllerState::Evaluating;

        let previous = self.hops.last().map(|h| h.coverage_signal);
        let executed = self.hops.len() + 1;

        let decision = if coverage >= self.coverage_threshold {
            self.stop_reason = StopReason::CoverageMet;
            HopDecision::Stop
        } else if executed >= self.planned_hops {
            self.stop_reason = StopReason::HopsExhausted;
            HopDecision::Stop
        } else if new_passages == 0 {
            self.stop_reason = StopReason::RecallExhausted;
            HopDecision::Stop
        } else if previous.is_some_and(|p| coverage - p < self.stagnation_epsilon) {
            HopDecision::Widen
        } else {
            HopDecision::Continue
        };

        self.hops.push(HopPlan {
            hop_index: executed - 1,
            candidate_budget: self.budget,
            coverage_signal: coverage,
            decision,
        });
        self.coverage = coverage;
        events::hop_completed(executed - 1, coverage, decision);

        match decision {
            HopDecision::Stop => self.state = ControllerState::Done,
            HopDecision::Widen => {
                self.budget = self
                    .budget
                    .saturating_mul(self.widen_factor)
                    .min(self.budget_cap);
                self.state = ControllerState::Planning;
            }
            HopDecision::Continue => {
                self.budget = self
                    .budget
                    .saturating_add(self.budget_step)
                    .min(self.budget_cap);
                self.state = ControllerState::Planning;
            }
        }
        decision
    }

    /// Force DONE, e.g. when the hop loop is abandoned.
    pub fn abort(&mut self, reason: StopReason) {
        if self.state != ControllerState::Done {
            self.stop_reason = reason;
            self.state = ControllerState::Done;
        }
    }

    pub fn hops(&self) -> &[HopPlan] {
        &self.hops
    }

    pub fn planned_hops(&self) -> usize {
        self.planned_hops
    }

    pub fn executed_hops(&self) -> usize {
        self.hops.len()
    }

    pub fn coverage_signal(&self) -> f64 {
        self.coverage
    }

    pub fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    /// True when the controller stopped without meeting coverage.
    pub fn hop_shortfall(&self) -> bool {
        self.stop_reason != StopReason::CoverageMet
    }

    /// Copy the controller's view into the card statistics.
    pub fn fill_stats(&self, stats: &mut ControllerStats) {
        stats.planned_hops = self.planned_hops;
        stats.executed_hops = self.executed_hops();
        stats.coverage_signal = self.coverage;
        stats.hop_shortfall = self.hop_shortfall();
        stats.hops = self.hops.clone();
        stats.stop_reason = self.stop_reason;
    }
}

/// Everything the hop loop produced.
#[derive(Debug, Clone)]
pub struct HopLoopOutcome {
    /// Masked and fused candidates from the merged pool, in ranking order.
    pub ranked: Vec<ScoredCandidate>,
    /// Ids the temporal mask dropped in the final ranking pass.
    pub dropped: Vec<String>,
    pub degradations: Vec<DegradationEvent>,
    pub controller: HopController,
}

/// Run DHQC to completion: recall → mask → fuse per hop, evaluated over the
/// pool merged across all hops so far.
pub fn run_hops(
    searcher: &HybridSearcher,
    pipeline: &RankingPipeline,
    ctx: &QueryContext,
    config: &ControllerConfig,
    initial_budget: usize,
    weights: RecallWeights,
) -> HopLoopOutcome {
    let mut controller = HopController::new(config, ctx.mode, initial_budget);
    let mut pool: BTreeMap<String, ScoredCandidate> = BTreeMap::new();
    let mut degradations = Vec::new();
    let mut ranked = Vec::new();
    let mut dropped = Vec::new();

    while let Some(budget) = controller.plan() {
        let hop_index = controller.executed_hops();
        let span = hop_span!(hop_index, budget);
        let _guard = span.enter();

        let mut new_passages = 0;
        match searcher.recall(ctx, budget, weights) {
            Ok(outcome) => {
                degradations.extend(outcome.degradations);
                for c in outcome.candidates {
                    match pool.get_mut(c.passage_id()) {
                        Some(existing) => {
                            if c.recall_score > existing.recall_score {
                                *existing = c;
                            }
                        }
                        None => {
                            new_passages += 1;
                            pool.insert(c.passage.id.clone(), c);
                        }
                    }
                }
            }
            Err(e) => {
                warn!(hop_index, error = %e, "recall failed for hop");
                degradations.push(DegradationEvent::now(
                    "recall",
                    e.to_string(),
                    "empty_hop",
                ));
            }
        }

        let outcome = pipeline.rank(pool.values().cloned().collect(), ctx);
        let coverage = coverage::coverage_signal(&outcome.kept, ctx, config);
        ranked = outcome.kept;
        dropped = outcome.dropped;

        let decision = controller.evaluate(coverage, new_passages);
        debug!(hop_index, budget, new_passages, coverage, ?decision, "hop evaluated");
    }

    info!(
        executed_hops = controller.executed_hops(),
        planned_hops = controller.planned_hops(),
        coverage = controller.coverage_signal(),
        stop_reason = ?controller.stop_reason(),
        ranked = ranked.len(),
        "hop controller done"
    );

    HopLoopOutcome {
        ranked,
        dropped,
        degradations,
        controller,
    }
}
