//! Session key derivation.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Opaque session key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Pluggable derivation of a session key from untrusted client inputs.
pub trait SessionKeyDerivation: Send + Sync {
    fn derive(&self, client_addr: &str, user_agent: &str) -> SessionId;
}

/// Default derivation: `"{client_addr}_{hash(user_agent)}"`.
///
/// The hash is NOT cryptographic and this is NOT a security boundary:
/// two clients behind one proxy address with colliding hashed agent strings
/// will share a session. That weakness is a documented property of the
/// scheme; deployments needing stronger isolation should plug their own
/// [`SessionKeyDerivation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AddrAgentKey;

impl SessionKeyDerivation for AddrAgentKey {
    fn derive(&self, client_addr: &str, user_agent: &str) -> SessionId {
        let mut hasher = DefaultHasher::new();
        user_agent.hash(&mut hasher);
        SessionId::new(format!("{}_{}", client_addr, hasher.finish()))
    }
}
