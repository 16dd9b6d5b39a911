//! LLM judge reranking over the generation backend chain.
//!
//! The judge is an [`ICrossEncoder`], so the reranker treats it like any
//! other scorer. Wrapping a cross-encoder averages the two scores per
//! passage.

use std::collections::HashMap;
use std::sync::Arc;

use chronoguard_core::config::RerankConfig;
use chronoguard_core::errors::BackendError;
use chronoguard_core::models::GenerationParams;
use chronoguard_core::traits::ICrossEncoder;
use serde::Deserialize;
use tracing::debug;

use crate::backends::BackendChain;
use crate::prompts;

pub const JUDGE_NAME: &str = "llm_judge";
const JUDGE_BATCH_SIZE: usize = 8;

#[derive(Debug, Deserialize)]
struct JudgeEntry {
    id: serde_json::Value,
    #[serde(default)]
    score: Option<f64>,
}

#[derive(Clone)]
pub struct LlmJudge {
    chain: BackendChain,
    params: GenerationParams,
    cross_encoder: Option<Arc<dyn ICrossEncoder>>,
}

impl std::fmt::Debug for LlmJudge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmJudge")
            .field("chain", &self.chain)
            .field("params", &self.params)
            .field("cross_encoder", &self.cross_encoder.as_ref().map(|c| c.name()))
            .finish()
    }
}

impl LlmJudge {
    pub fn new(chain: BackendChain, params: GenerationParams) -> Self {
        Self {
            chain,
            params,
            cross_encoder: None,
        }
    }

    pub fn from_config(chain: BackendChain, config: &RerankConfig) -> Self {
        Self::new(
            chain,
            GenerationParams {
                max_tokens: config.judge_max_tokens,
                temperature: config.judge_temperature,
                stop: Vec::new(),
                timeout_ms: Some(config.timeout_ms),
            },
        )
    }

    /// Average every judgement with `encoder`'s score for the same pair.
    pub fn with_cross_encoder(mut self, encoder: Arc<dyn ICrossEncoder>) -> Self {
        self.cross_encoder = Some(encoder);
        self
    }
}

impl ICrossEncoder for LlmJudge {
    fn score(&self, query_text: &str, passage_text: &str) -> Result<f64, BackendError> {
        self.score_batch(query_text, &[passage_text])?
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::ScoreCountMismatch {
                backend: JUDGE_NAME.to_string(),
                expected: 1,
                actual: 0,
            })
    }

    /// A passage the judge skipped keeps its cross-encoder score, or 0
    /// without one. A reply with no usable score at all is malformed.
    fn score_batch(&self, query_text: &str, passages: &[&str]) -> Result<Vec<f64>, BackendError> {
        if passages.is_empty() {
            return Ok(Vec::new());
        }
        let base = match &self.cross_encoder {
            Some(encoder) => Some(encoder.score_batch(query_text, passages)?),
            None => None,
        };

        let messages = prompts::build_judge_messages(query_text, passages);
        let (raw, backend) = self.chain.generate(&messages, &self.params)?;
        let judged = parse_scores(&raw)
            .map_err(|reason| BackendError::MalformedResponse { backend, reason })?;
        debug!(
            passages = passages.len(),
            judged = judged.len(),
            "judge scored batch"
        );

        Ok((0..passages.len())
            .map(|i| {
                let encoder_score = base.as_ref().and_then(|b| b.get(i).copied());
                match (encoder_score, judged.get(&(i + 1)).copied()) {
                    (Some(c), Some(j)) => (c + j) / 2.0,
                    (Some(c), None) => c,
                    (None, Some(j)) => j,
                    (None, None) => 0.0,
                }
            })
            .collect())
    }

    fn max_batch_size(&self) -> usize {
        self.cross_encoder
            .as_ref()
            .map_or(JUDGE_BATCH_SIZE, |c| c.max_batch_size().min(JUDGE_BATCH_SIZE))
            .max(1)
    }

    fn name(&self) -> &str {
        JUDGE_NAME
    }
}

/// Parse a `[{id, score}]` reply into 1-based id → score in [0, 1].
/// Tolerates prose around the array and a reply clipped before its `]`.
pub fn parse_scores(raw: &str) -> Result<HashMap<usize, f64>, String> {
    let trimmed = raw.trim();
    let body = &trimmed[trimmed.find('[').unwrap_or(0)..];
    let mut array = match body.rfind(']') {
        Some(end) => body[..=end].to_string(),
        None => format!("{body}]"),
    };
    if !array.starts_with('[') {
        array.insert(0, '[');
    }

    let entries: Vec<JudgeEntry> =
        serde_json::from_str(&array).map_err(|e| format!("judge reply is not a score array: {e}"))?;
    let scores: HashMap<usize, f64> = entries
        .into_iter()
        .filter_map(|entry| {
            let id = match &entry.id {
                serde_json::Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
                serde_json::Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }?;
            let score = entry.score.filter(|s| s.is_finite())?;
            Some((id, score.clamp(0.0, 1.0)))
        })
        .collect();

    if scores.is_empty() {
        return Err("judge reply contained no usable scores".to_string());
    }
    Ok(scores)
}
