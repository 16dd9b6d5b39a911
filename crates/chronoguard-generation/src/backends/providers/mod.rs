//! HTTP generation providers.

mod ollama;
mod openai_compat;

use std::time::Duration;

use chronoguard_core::errors::BackendError;
use chronoguard_core::models::GenerationParams;

pub use ollama::OllamaBackend;
pub use openai_compat::OpenAiCompatBackend;

/// Cut `text` at the first stop marker and trim.
pub fn clip_at_stop(text: &str, stop: &[String]) -> String {
    let cut = stop
        .iter()
        .filter(|s| !s.is_empty())
        .filter_map(|s| text.find(s.as_str()))
        .min()
        .unwrap_or(text.len());
    text[..cut].trim().to_string()
}

fn blocking_client(timeout_ms: u64) -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .unwrap_or_default()
}

/// The call's own deadline when set, else the provider default.
fn call_timeout(params: &GenerationParams, default_ms: u64) -> u64 {
    params.timeout_ms.unwrap_or(default_ms)
}

fn request_error(backend: &str, timeout_ms: u64, e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout {
            backend: backend.to_string(),
            timeout_ms,
        }
    } else {
        BackendError::RequestFailed {
            backend: backend.to_string(),
            reason: e.to_string(),
        }
    }
}

fn malformed(backend: &str, reason: impl Into<String>) -> BackendError {
    BackendError::MalformedResponse {
        backend: backend.to_string(),
        reason: reason.into(),
    }
}
