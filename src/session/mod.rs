//! 会话模块：按客户端维护有界的对话历史。
//!
//! # Session Module
//!
//! A bounded, per-client ordered log of turns. Sessions are keyed by an
//! identifier derived from the client address and user-agent, capped by FIFO
//! eviction, and windowed when assembling prompt context.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SessionStore`] | In-memory turn log with cap and windowing |
//! | [`SessionId`] | Opaque session key |
//! | [`SessionKeyDerivation`] | Pluggable key-derivation seam |
//! | [`AddrAgentKey`] | Default address+agent derivation (weak, documented) |
//! | [`ExportFormat`] | Session export rendering (text or JSON) |
//!
//! Sessions never close: a key lives until process restart or an external
//! reaper calls [`SessionStore::remove`]. Storage is process-memory only.

mod key;
mod store;

pub use key::{AddrAgentKey, SessionId, SessionKeyDerivation};
pub use store::{ExportFormat, SessionStore};
