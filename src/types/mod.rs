//! 类型模块：定义会话运行时的核心数据类型。
//!
//! # Types Module
//!
//! Core data types shared across the runtime: conversation turns and the
//! optional per-request user profile.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Turn`] | One role-tagged message in a session's history |
//! | [`TurnRole`] | Turn role (user, assistant) |
//! | [`Profile`] | Optional per-request user profile fields |
//!
//! ## Example
//!
//! ```rust
//! use chat_runtime::types::{Turn, TurnRole};
//!
//! let turn = Turn::user("hello");
//! assert!(matches!(turn.role, TurnRole::User));
//! ```

pub mod profile;
pub mod turn;

pub use profile::Profile;
pub use turn::{Turn, TurnRole};
