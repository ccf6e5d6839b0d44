//! 编排模块：把会话上下文、模型解析与生成串成一次应答。
//!
//! # Conversation Orchestrator
//!
//! One entry point, [`Orchestrator::respond`], implements the full
//! request path:
//!
//! 1. reject empty input before touching anything;
//! 2. record the user turn (pre-generation, so it survives later failures);
//! 3. resolve a model handle (cached after the first request);
//! 4. assemble preamble + profile + context window + user line + cue;
//! 5. generate with the prompt bounded to the handle's context limit;
//! 6. extract the continuation after the last cue marker;
//! 7. record the assistant turn;
//! 8. return the reply with the active model label and session id.
//!
//! Failures in steps 3–6 surface as request errors; the user turn recorded
//! in step 2 is intentionally NOT rolled back (partial state is accepted by
//! design, so the turn is visible in later context windows).

use crate::config::RuntimeConfig;
use crate::prompt::PromptAssembler;
use crate::provider::InferenceProvider;
use crate::resolver::ModelResolver;
use crate::session::{SessionId, SessionStore};
use crate::types::{Profile, Turn};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// A successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub response: String,
    pub model_used: String,
    pub session_id: String,
}

/// Composes the session store, resolver, and prompt assembler into the
/// request pipeline. Construct once at process start and share by reference.
pub struct Orchestrator {
    provider: Arc<dyn InferenceProvider>,
    resolver: ModelResolver,
    sessions: SessionStore,
    assembler: PromptAssembler,
    max_new_tokens: u32,
}

impl Orchestrator {
    /// Build the orchestrator, loading the system preamble from the
    /// configured source. Preamble failures fall back to the default and are
    /// never fatal here.
    pub async fn new(provider: Arc<dyn InferenceProvider>, config: RuntimeConfig) -> Self {
        let preamble = config.preamble_source.load().await;
        let resolver = ModelResolver::new(Arc::clone(&provider), &config);
        let sessions = SessionStore::new(
            config.history_cap,
            config.context_window,
            config.assistant_name.clone(),
        );
        let assembler = PromptAssembler::new(config.assistant_name.clone(), preamble);
        info!(assistant = %config.assistant_name, "orchestrator ready");
        Self {
            provider,
            resolver,
            sessions,
            assembler,
            max_new_tokens: config.max_new_tokens,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn resolver(&self) -> &ModelResolver {
        &self.resolver
    }

    /// Handle one user message and produce the assistant's reply.
    pub async fn respond(
        &self,
        session_id: &SessionId,
        user_text: &str,
        profile: &Profile,
    ) -> Result<Reply> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }

        // Snapshot the context before recording the new turn so the prompt
        // carries the window plus exactly one copy of the new user line.
        let context = self.sessions.context_lines(session_id);
        self.sessions.append(session_id, Turn::user(text));

        let model = self
            .resolver
            .resolve(profile.model_name.as_deref())
            .await?;

        let prompt = self.assembler.assemble(profile, &context, text);
        let bounded = PromptAssembler::fit(&prompt, model.handle.context_limit);
        debug!(
            session = %session_id,
            model = %model.label(),
            prompt_len = bounded.len(),
            "generating"
        );

        let raw = self
            .provider
            .generate(&model.handle, bounded, self.max_new_tokens)
            .await
            .map_err(|e| Error::generation(e.to_string()))?;

        let reply = self.assembler.extract_reply(&raw);
        self.sessions.append(session_id, Turn::assistant(&reply));

        Ok(Reply {
            response: reply,
            model_used: model.label(),
            session_id: session_id.to_string(),
        })
    }
}
