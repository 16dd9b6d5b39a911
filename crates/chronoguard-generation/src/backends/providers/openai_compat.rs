//! Any OpenAI-compatible `/chat/completions` endpoint.

use chronoguard_core::errors::BackendError;
use chronoguard_core::models::{ChatMessage, GenerationParams};
use chronoguard_core::traits::IGenerationBackend;
use serde::{Deserialize, Serialize};
use tracing::debug;

use std::time::Duration;

use super::{blocking_client, call_timeout, clip_at_stop, malformed, request_error};

const NAME: &str = "openai_compat";

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: usize,
    temperature: f64,
    #[serde(skip_serializing_if = "no_stop")]
    stop: &'a [String],
}

fn no_stop(stop: &&[String]) -> bool {
    stop.is_empty()
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

pub struct OpenAiCompatBackend {
    endpoint: String,
    api_key: Option<String>,
    model: String,
    timeout_ms: u64,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for OpenAiCompatBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatBackend")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl OpenAiCompatBackend {
    pub fn new(endpoint: &str, api_key: Option<String>, model: &str, timeout_ms: u64) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model: model.to_string(),
            timeout_ms,
            client: blocking_client(timeout_ms),
        }
    }

    /// Read the API key from `api_key_env`. A missing key leaves the
    /// backend unavailable.
    pub fn from_env(endpoint: &str, api_key_env: &str, model: &str, timeout_ms: u64) -> Self {
        Self::new(endpoint, std::env::var(api_key_env).ok(), model, timeout_ms)
    }
}

impl IGenerationBackend for OpenAiCompatBackend {
    fn generate(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<String, BackendError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(BackendError::Unavailable {
                backend: NAME.to_string(),
            });
        };
        let url = format!("{}/chat/completions", self.endpoint);
        let body = CompletionRequest {
            model: &self.model,
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            stop: &params.stop,
        };
        debug!(url = %url, model = %self.model, messages = messages.len(), "chat completion request");

        let timeout_ms = call_timeout(params, self.timeout_ms);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .timeout(Duration::from_millis(timeout_ms))
            .json(&body)
            .send()
            .map_err(|e| request_error(NAME, timeout_ms, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::RequestFailed {
                backend: NAME.to_string(),
                reason: format!("HTTP {status}"),
            });
        }
        let parsed: CompletionResponse = response
            .json()
            .map_err(|e| malformed(NAME, e.to_string()))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| malformed(NAME, "no choices"))?;
        Ok(clip_at_stop(&content, &params.stop))
    }

    fn name(&self) -> &str {
        NAME
    }

    fn is_available(&self) -> bool {
        !self.endpoint.is_empty() && self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_unavailable() {
        let backend = OpenAiCompatBackend::new("https://api.example.com/v1/", None, "m", 1_000);
        assert!(!backend.is_available());
        let params = GenerationParams {
            max_tokens: 8,
            temperature: 0.0,
            stop: Vec::new(),
            timeout_ms: None,
        };
        assert!(matches!(
            backend.generate(&[ChatMessage::user("hi")], &params),
            Err(BackendError::Unavailable { .. })
        ));
    }

    #[test]
    fn request_body_omits_empty_stop() {
        let messages = [ChatMessage::system("s"), ChatMessage::user("u")];
        let body = CompletionRequest {
            model: "m",
            messages: &messages,
            max_tokens: 16,
            temperature: 0.0,
            stop: &[],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("stop").is_none());
        assert_eq!(json["messages"][0]["role"], "system");
    }
}
