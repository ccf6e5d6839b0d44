//! Per-request user profile.

use serde::{Deserialize, Serialize};

/// Optional user profile attached to a request.
///
/// Every field is optional; absent fields fall back to neutral placeholders
/// when the prompt is assembled. `model_name` acts as a per-request model
/// override for the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub nickname: Option<String>,
    pub tone: Option<String>,
    pub topics: Option<String>,
    pub model_name: Option<String>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    pub fn with_topics(mut self, topics: impl Into<String>) -> Self {
        self.topics = Some(topics.into());
        self
    }

    pub fn with_model_name(mut self, model: impl Into<String>) -> Self {
        self.model_name = Some(model.into());
        self
    }

    pub fn nickname(&self) -> &str {
        self.nickname.as_deref().unwrap_or("friend")
    }

    pub fn tone(&self) -> &str {
        self.tone.as_deref().unwrap_or("supportive")
    }

    pub fn topics(&self) -> &str {
        self.topics.as_deref().unwrap_or("general conversation")
    }
}
