//! Deadlines for blocking oracle work.
//!
//! Oracles are synchronous. Each call runs on tokio's blocking pool and the
//! request stops waiting once the deadline passes. A timed-out task keeps
//! running to completion in the background; its result is discarded.

use std::time::Duration;

use tracing::warn;

/// Why a blocking oracle call produced no result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleFailure {
    #[error("{stage} exceeded its {timeout_ms}ms deadline")]
    TimedOut { stage: &'static str, timeout_ms: u64 },

    #[error("{stage} task failed: {reason}")]
    TaskFailed { stage: &'static str, reason: String },
}

/// Run `work` on the blocking pool, waiting at most `timeout_ms`.
pub async fn run_blocking<T, F>(stage: &'static str, timeout_ms: u64, work: F) -> Result<T, OracleFailure>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let deadline = Duration::from_millis(timeout_ms.max(1));
    match tokio::time::timeout(deadline, tokio::task::spawn_blocking(work)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(join)) => {
            warn!(stage, error = %join, "blocking oracle task failed");
            Err(OracleFailure::TaskFailed {
                stage,
                reason: join.to_string(),
            })
        }
        Err(_) => {
            warn!(stage, timeout_ms, "blocking oracle task timed out");
            Err(OracleFailure::TimedOut { stage, timeout_ms })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_value_within_deadline() {
        let out = run_blocking("unit", 1_000, || 41 + 1).await;
        assert_eq!(out, Ok(42));
    }

    #[tokio::test]
    async fn times_out_slow_work() {
        let out = run_blocking("unit", 10, || {
            std::thread::sleep(Duration::from_millis(200));
            1
        })
        .await;
        assert_eq!(
            out,
            Err(OracleFailure::TimedOut {
                stage: "unit",
                timeout_ms: 10
            })
        );
    }

    #[tokio::test]
    async fn reports_panicking_work() {
        let out: Result<(), _> = run_blocking("unit", 1_000, || panic!("boom")).await;
        assert!(matches!(out, Err(OracleFailure::TaskFailed { stage: "unit", .. })));
    }
}
