// Single source of truth for all default values.

// --- Temporal mask ---
pub const DEFAULT_DECAY_SPAN_DAYS: f64 = 36_525.0; // one century
pub const DEFAULT_UNDATED_COMPLIANCE: f64 = 0.3;
pub const DEFAULT_MALFORMED_COMPLIANCE: f64 = 0.1;
pub const DEFAULT_TRANSACTION_MISMATCH_PENALTY: f64 = 0.4;

// --- Recall ---
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_LEXICAL_WEIGHT: f64 = 0.5;
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.5;
pub const DEFAULT_RECALL_TIMEOUT_MS: u64 = 10_000;

// --- Fusion ---
pub const DEFAULT_RELEVANCE_WEIGHT: f64 = 0.55;
pub const DEFAULT_AUTHORITY_WEIGHT: f64 = 0.15;
pub const DEFAULT_TIME_WEIGHT: f64 = 0.6;

// --- Hop controller ---
pub const DEFAULT_MAX_HOPS: usize = 3;
pub const DEFAULT_HARD_MAX_HOPS: usize = 3;
pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 0.8;
pub const DEFAULT_INITIAL_BUDGET: usize = 12;
pub const DEFAULT_BUDGET_STEP: usize = 12;
pub const DEFAULT_WIDEN_FACTOR: usize = 2;
pub const DEFAULT_BUDGET_CAP: usize = 1_000;
pub const DEFAULT_STAGNATION_EPSILON: f64 = 0.02;
pub const DEFAULT_MIN_FUSED_SCORE: f64 = 0.05;
pub const DEFAULT_COVERAGE_MIN_COMPLIANCE: f64 = 0.5;
pub const DEFAULT_MAX_TIME_SLICES: usize = 10;

// --- Rerank ---
pub const DEFAULT_RERANK_TOP_K: usize = 30;
pub const DEFAULT_RERANK_BATCH_SIZE: usize = 16;
pub const DEFAULT_RERANK_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_FINAL_TOP_K: usize = 6;
pub const DEFAULT_JUDGE_MAX_TOKENS: usize = 200;
pub const DEFAULT_JUDGE_TEMPERATURE: f64 = 0.1;

// --- ChronoSanity ---
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.6;
pub const DEFAULT_NUMERIC_TOLERANCE: f64 = 0.05;
pub const DEFAULT_EXAMINE_TOP_N: usize = 8;
pub const DEFAULT_EVIDENCE_ONLY_REASON: &str = "CHRONO_SANITY";

// --- Generation ---
pub const DEFAULT_MAX_TOKENS: usize = 512;
pub const DEFAULT_TEMPERATURE: f64 = 0.0;
pub const DEFAULT_GENERATION_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_NARROWED_PASSAGE_COUNT: usize = 3;
pub const DEFAULT_SNIPPET_CHARS: usize = 180;
pub const DEFAULT_MIN_EVIDENCE_BULLETS: usize = 2;

// --- Authority tiers ---
pub const AUTHORITY_FILING: f64 = 1.0;
pub const AUTHORITY_REGULATOR: f64 = 0.9;
pub const AUTHORITY_OFFICIAL_SITE: f64 = 0.8;
pub const AUTHORITY_RELIABLE_PRESS: f64 = 0.6;
pub const AUTHORITY_BLOG: f64 = 0.3;
pub const AUTHORITY_UNKNOWN: f64 = 0.0;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
