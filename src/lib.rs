//! # chat-runtime
//!
//! 会话运行时核心：模型解析与降级回退、有界会话历史、提示编排。
//!
//! Conversation runtime core for causal-LM chat backends: ordered model
//! resolution with a quantization fallback ladder, bounded per-client
//! session history, and prompt orchestration with cue-marker extraction.
//!
//! ## Overview
//!
//! The crate is the decision core of a conversational endpoint. The web
//! layer and the actual inference engine are external collaborators: the
//! engine plugs in behind the [`provider::InferenceProvider`] trait, and the
//! web layer exchanges the JSON shapes in [`api`].
//!
//! ## Core Philosophy
//!
//! - **Policy as data**: fallback order and fidelity ladders are plain
//!   lists consumed by one generic resolution algorithm, not try/except
//!   chains.
//! - **No globals**: the store objects are constructed once and threaded
//!   through calls, so tests get fresh state and concurrent callers get
//!   real guarantees (single-flight loading, writer-exclusive appends).
//! - **Degrade, don't die**: a missing preamble source falls back to a
//!   default, a failed candidate falls to the next one, and every
//!   per-request failure maps to a JSON error shape.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`provider`] | Inference provider boundary trait and load/generate errors |
//! | [`resolver`] | Candidate ladder resolution with process-wide caching |
//! | [`session`] | Bounded per-client turn log and key derivation |
//! | [`prompt`] | Preamble sources, prompt assembly, reply extraction |
//! | [`orchestrator`] | The request pipeline tying the above together |
//! | [`api`] | HTTP-shaped request/response types |
//! | [`config`] | Runtime configuration and env overrides |
//! | [`types`] | Turns, roles, and user profiles |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chat_runtime::{Orchestrator, RuntimeConfig};
//! use chat_runtime::provider::EchoProvider;
//! use chat_runtime::session::{AddrAgentKey, SessionKeyDerivation};
//! use chat_runtime::types::Profile;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> chat_runtime::Result<()> {
//!     let provider = Arc::new(EchoProvider::new());
//!     let orchestrator = Orchestrator::new(provider, RuntimeConfig::from_env()).await;
//!
//!     let session_id = AddrAgentKey.derive("203.0.113.9", "Mozilla/5.0");
//!     let reply = orchestrator
//!         .respond(&session_id, "hello", &Profile::new())
//!         .await?;
//!     println!("{} ({})", reply.response, reply.model_used);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod resolver;
pub mod session;
pub mod types;

// Re-export main types for convenience
pub use api::{ChatRequest, ChatResponse, Settings};
pub use config::RuntimeConfig;
pub use orchestrator::{Orchestrator, Reply};
pub use resolver::{ModelResolver, ResolvedModel};
pub use session::{SessionId, SessionStore};
pub use types::{Profile, Turn, TurnRole};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;

/// Install a `tracing` subscriber honoring `RUST_LOG`. Call once from the
/// hosting binary; repeated calls are ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
