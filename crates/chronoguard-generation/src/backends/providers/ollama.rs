//! A local Ollama server (`/api/chat`).

use chronoguard_core::errors::BackendError;
use chronoguard_core::models::{ChatMessage, GenerationParams};
use chronoguard_core::traits::IGenerationBackend;
use serde::{Deserialize, Serialize};
use tracing::debug;

use std::time::Duration;

use super::{blocking_client, call_timeout, clip_at_stop, malformed, request_error};

const NAME: &str = "ollama";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: ChatOptions<'a>,
}

#[derive(Serialize)]
struct ChatOptions<'a> {
    temperature: f64,
    num_predict: usize,
    stop: &'a [String],
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug)]
pub struct OllamaBackend {
    host: String,
    model: String,
    timeout_ms: u64,
    client: reqwest::blocking::Client,
}

impl OllamaBackend {
    pub fn new(host: &str, model: &str, timeout_ms: u64) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout_ms,
            client: blocking_client(timeout_ms),
        }
    }
}

impl IGenerationBackend for OllamaBackend {
    fn generate(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<String, BackendError> {
        let url = format!("{}/api/chat", self.host);
        let body = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
            options: ChatOptions {
                temperature: params.temperature,
                num_predict: params.max_tokens,
                stop: &params.stop,
            },
        };
        debug!(url = %url, model = %self.model, "ollama chat request");

        let timeout_ms = call_timeout(params, self.timeout_ms);
        let response = self
            .client
            .post(&url)
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
        let parsed: ChatResponse = response
            .json()
            .map_err(|e| malformed(NAME, e.to_string()))?;
        Ok(clip_at_stop(&parsed.message.content, &params.stop))
    }

    fn name(&self) -> &str {
        NAME
    }

    fn is_available(&self) -> bool {
        !self.host.is_empty() && !self.model.is_empty()
    }
}
