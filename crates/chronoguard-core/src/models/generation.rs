use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A role-tagged chat message sent to a generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Sampling parameters for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_tokens: usize,
    pub temperature: f64,
    pub stop: Vec<String>,
    /// Deadline for this call. Providers fall back to the one they were
    /// built with when unset.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Structured answer payload: a numeric range backed by dated evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericTimeline {
    pub range: NumericRange,
    pub evidence: Vec<EvidenceBullet>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub low: f64,
    pub high: f64,
    pub most_likely: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBullet {
    pub text: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub passage_id: Option<String>,
}
