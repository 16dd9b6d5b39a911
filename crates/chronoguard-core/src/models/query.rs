use serde::Serialize;

use crate::errors::{ChronoError, ChronoResult};
use crate::time::{RequestedWindow, TimeAxis, TimeMode, TimeWindow};

/// Per-request query context. Immutable once retrieval starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryContext {
    pub query_text: String,
    pub axis: TimeAxis,
    pub requested_window: RequestedWindow,
    pub mode: TimeMode,
    /// Declared or detected domain, selects the fusion weight profile.
    pub domain: String,
    /// Optional sub-claims the answer must cover; each is a coverage unit.
    pub sub_claims: Vec<String>,
    window: TimeWindow,
}

impl QueryContext {
    pub fn new(
        query_text: impl Into<String>,
        axis: TimeAxis,
        requested_window: RequestedWindow,
        mode: TimeMode,
        domain: impl Into<String>,
    ) -> ChronoResult<Self> {
        let query_text = query_text.into();
        if query_text.trim().is_empty() {
            return Err(ChronoError::invalid_request("query text is empty"));
        }
        let window = requested_window.resolve()?;
        Ok(Self {
            query_text,
            axis,
            requested_window,
            mode,
            domain: domain.into(),
            sub_claims: Vec::new(),
            window,
        })
    }

    pub fn with_sub_claims(mut self, sub_claims: Vec<String>) -> Self {
        self.sub_claims = sub_claims;
        self
    }

    /// The resolved requested window.
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }
}
