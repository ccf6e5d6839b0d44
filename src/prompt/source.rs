//! System preamble loading.
//!
//! A preamble source is either a remote URL, a local file, or a fixed
//! string. URL and file bodies may be YAML carrying a `messages` list, in
//! which case the entry with `role: system` supplies the preamble; a plain
//! text body is accepted as the preamble itself. Every failure path falls
//! back to [`DEFAULT_PREAMBLE`].

use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Built-in preamble used whenever no source yields one.
pub const DEFAULT_PREAMBLE: &str = "You are Helper, a supportive conversational assistant. \
Keep replies brief, warm, and concrete, and stay on the user's topic.";

/// Where the system preamble comes from.
#[derive(Debug, Clone)]
pub enum PreambleSource {
    Url(String),
    File(PathBuf),
    Fixed(String),
}

impl Default for PreambleSource {
    fn default() -> Self {
        PreambleSource::Fixed(DEFAULT_PREAMBLE.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
enum SourceError {
    #[error("failed to fetch preamble from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to read preamble file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("preamble body was empty")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct PromptDoc {
    #[serde(default)]
    messages: Vec<PromptMessage>,
}

#[derive(Debug, Deserialize)]
struct PromptMessage {
    role: String,
    #[serde(default)]
    content: String,
}

impl PreambleSource {
    /// Load the preamble. Never fails: any fetch or parse problem logs a
    /// warning and falls back to [`DEFAULT_PREAMBLE`].
    pub async fn load(&self) -> String {
        match self.try_load().await {
            Ok(preamble) => {
                debug!(len = preamble.len(), "preamble loaded");
                preamble
            }
            Err(err) => {
                warn!(error = %err, "preamble source unavailable, using default");
                DEFAULT_PREAMBLE.to_string()
            }
        }
    }

    async fn try_load(&self) -> Result<String, SourceError> {
        let body = match self {
            PreambleSource::Fixed(text) => text.clone(),
            PreambleSource::Url(url) => {
                let response = reqwest::get(url)
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| SourceError::Fetch {
                        url: url.clone(),
                        reason: e.to_string(),
                    })?;
                response.text().await.map_err(|e| SourceError::Fetch {
                    url: url.clone(),
                    reason: e.to_string(),
                })?
            }
            PreambleSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| SourceError::Read {
                        path: path.to_string_lossy().to_string(),
                        reason: e.to_string(),
                    })?
            }
        };
        Self::parse(&body)
    }

    /// A YAML `messages` list with a `role: system` entry wins; otherwise
    /// the raw body is the preamble.
    fn parse(body: &str) -> Result<String, SourceError> {
        if let Ok(doc) = serde_yaml::from_str::<PromptDoc>(body) {
            if let Some(system) = doc
                .messages
                .iter()
                .find(|m| m.role == "system" && !m.content.trim().is_empty())
            {
                return Ok(system.content.trim().to_string());
            }
        }

        let raw = body.trim();
        if raw.is_empty() {
            Err(SourceError::Empty)
        } else {
            Ok(raw.to_string())
        }
    }
}
