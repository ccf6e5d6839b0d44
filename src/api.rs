//! HTTP-shaped boundary types.
//!
//! The web layer itself is an external collaborator; this module only pins
//! down the request/response shapes it exchanges with the orchestrator:
//! `{prompt, settings?}` in, `{response, model_used, session_id}` or
//! `{error}` out. Every internal failure maps to the error shape — callers
//! never see a panic or a bare status code from the core.

use crate::orchestrator::Reply;
use crate::types::Profile;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Incoming chat request.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    #[serde(default)]
    pub settings: Option<Settings>,
}

impl ChatRequest {
    /// The effective profile for this request (defaults when absent).
    pub fn profile(&self) -> Profile {
        self.settings.clone().map(Into::into).unwrap_or_default()
    }
}

/// Optional per-request settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub nickname: Option<String>,
    pub tone: Option<String>,
    pub topics: Option<String>,
    pub model_name: Option<String>,
}

impl From<Settings> for Profile {
    fn from(s: Settings) -> Self {
        Profile {
            nickname: s.nickname,
            tone: s.tone,
            topics: s.topics,
            model_name: s.model_name,
        }
    }
}

/// Outgoing response: either the generated reply or a user-visible error.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Success {
        response: String,
        model_used: String,
        session_id: String,
    },
    Error {
        error: String,
    },
}

impl ChatResponse {
    /// Map an orchestrator outcome to the wire shape.
    pub fn from_result(result: Result<Reply>) -> Self {
        match result {
            Ok(reply) => reply.into(),
            Err(err) => (&err).into(),
        }
    }
}

impl From<Reply> for ChatResponse {
    fn from(reply: Reply) -> Self {
        ChatResponse::Success {
            response: reply.response,
            model_used: reply.model_used,
            session_id: reply.session_id,
        }
    }
}

impl From<&Error> for ChatResponse {
    fn from(err: &Error) -> Self {
        ChatResponse::Error {
            error: err.user_message(),
        }
    }
}
