//! 提示模块：系统前导加载与每请求的提示装配。
//!
//! # Prompt Module
//!
//! Two concerns live here:
//!
//! - [`PreambleSource`]: where the system preamble comes from (a remote URL,
//!   a local file, or a fixed string). Sources are tried at startup; any
//!   fetch or parse failure falls back to the built-in default preamble and
//!   is never fatal.
//! - [`PromptAssembler`]: per-request assembly of preamble, profile lines,
//!   session context, the new user line, and the generation cue — plus
//!   extraction of the newly generated continuation from the raw decode.
//!
//! Assembled prompts are derived values; they are recomputed per request and
//! never cached.

mod assemble;
mod source;

pub use assemble::PromptAssembler;
pub use source::{PreambleSource, DEFAULT_PREAMBLE};
