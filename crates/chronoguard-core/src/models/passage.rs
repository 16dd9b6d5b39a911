use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::{TimeAxis, WindowState};

/// An immutable evidence passage produced by ingest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub id: String,
    pub text: String,
    pub source_uri: String,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub transaction_from: Option<DateTime<Utc>>,
    pub transaction_to: Option<DateTime<Utc>>,
    /// Source authority in [0, 1].
    pub authority_score: f64,
    pub region: Option<String>,
    pub unit: Option<String>,
    pub embedding_ref: Option<String>,
    /// `Key:Value` entity claims extracted at ingest (e.g. `CEO:Jane Doe`).
    #[serde(default)]
    pub entities: Vec<String>,
}

impl Passage {
    /// The passage's window on the given axis.
    pub fn window(&self, axis: TimeAxis) -> WindowState {
        match axis {
            TimeAxis::Valid => WindowState::from_bounds(self.valid_from, self.valid_to),
            TimeAxis::Transaction => {
                WindowState::from_bounds(self.transaction_from, self.transaction_to)
            }
        }
    }

    /// Whether the transaction window is recorded and disjoint from the valid window.
    pub fn transaction_mismatch(&self) -> bool {
        match (
            self.window(TimeAxis::Valid),
            self.window(TimeAxis::Transaction),
        ) {
            (WindowState::Dated(valid), WindowState::Dated(tx)) => !valid.intersects(&tx),
            _ => false,
        }
    }

    /// Authority clamped to [0, 1].
    pub fn authority(&self) -> f64 {
        if self.authority_score.is_finite() {
            self.authority_score.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// One entry of an oracle's ranked result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub passage_id: String,
    pub score: f64,
}

impl SearchHit {
    pub fn new(passage_id: impl Into<String>, score: f64) -> Self {
        Self {
            passage_id: passage_id.into(),
            score,
        }
    }
}
