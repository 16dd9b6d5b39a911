//! The caller-facing request.

use serde::{Deserialize, Serialize};

use chronoguard_core::{RequestedWindow, TimeAxis, TimeMode};
use chronoguard_retrieval::RouteHint;

/// One answer request. Every field except the query text is optional; the
/// router fills what the caller leaves out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub query_text: String,
    #[serde(default)]
    pub axis: Option<TimeAxis>,
    #[serde(default)]
    pub window: Option<RequestedWindow>,
    #[serde(default)]
    pub mode: Option<TimeMode>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub sub_claims: Vec<String>,
}

impl AnswerRequest {
    pub fn new(query_text: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            ..Default::default()
        }
    }

    pub fn with_axis(mut self, axis: TimeAxis) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn with_window(mut self, window: RequestedWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_mode(mut self, mode: TimeMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_sub_claims(mut self, sub_claims: Vec<String>) -> Self {
        self.sub_claims = sub_claims;
        self
    }

    /// The caller-supplied fields, for the router.
    pub fn hint(&self) -> RouteHint {
        RouteHint {
            domain: self.domain.clone(),
            axis: self.axis,
            mode: self.mode,
            window: self.window,
        }
    }
}
