//! Span definitions per pipeline stage: request, recall, hop, rerank, gate, generation.

/// Create a request span.
#[macro_export]
macro_rules! request_span {
    ($request_id:expr, $policy_version:expr) => {
        tracing::info_span!(
            "chronoguard.request",
            request_id = %$request_id,
            policy_version = %$policy_version
        )
    };
}

/// Create a recall span.
#[macro_export]
macro_rules! recall_span {
    ($domain:expr, $budget:expr) => {
        tracing::info_span!("chronoguard.recall", domain = %$domain, budget = $budget)
    };
}

/// Create a hop span.
#[macro_export]
macro_rules! hop_span {
    ($hop_index:expr, $budget:expr) => {
        tracing::debug_span!("chronoguard.hop", hop_index = $hop_index, budget = $budget)
    };
}

/// Create a rerank span.
#[macro_export]
macro_rules! rerank_span {
    ($encoder:expr, $candidates:expr) => {
        tracing::info_span!("chronoguard.rerank", encoder = %$encoder, candidates = $candidates)
    };
}

/// Create a gate span.
#[macro_export]
macro_rules! gate_span {
    ($passages:expr, $threshold:expr) => {
        tracing::info_span!("chronoguard.gate", passages = $passages, threshold = $threshold)
    };
}

/// Create a generation span.
#[macro_export]
macro_rules! generation_span {
    ($backend:expr, $attempt:expr) => {
        tracing::info_span!("chronoguard.generation", backend = %$backend, attempt = $attempt)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const REQUEST: &str = "chronoguard.request";
    pub const RECALL: &str = "chronoguard.recall";
    pub const HOP: &str = "chronoguard.hop";
    pub const RERANK: &str = "chronoguard.rerank";
    pub const GATE: &str = "chronoguard.gate";
    pub const GENERATION: &str = "chronoguard.generation";
}
