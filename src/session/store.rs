//! In-memory session store.

use super::key::SessionId;
use crate::types::{Turn, TurnRole};
use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

/// Session export rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}

/// Bounded per-client turn log.
///
/// Construct one store at process start and pass it by reference; there are
/// no process-wide globals. Appends are writer-exclusive through the inner
/// lock, so concurrent appends to one session cannot interleave a partial
/// eviction.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, VecDeque<Turn>>>,
    cap: usize,
    window: usize,
    assistant_name: String,
}

impl SessionStore {
    pub fn new(cap: usize, window: usize, assistant_name: impl Into<String>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            cap,
            window,
            assistant_name: assistant_name.into(),
        }
    }

    /// Append a turn, creating the session on first use. When the log would
    /// exceed the cap, the oldest turns are dropped first.
    pub fn append(&self, id: &SessionId, turn: Turn) {
        let mut sessions = self.sessions.write().unwrap();
        let log = sessions.entry(id.clone()).or_default();
        log.push_back(turn);
        while log.len() > self.cap {
            log.pop_front();
        }
    }

    /// The last `window` turns in chronological order. Unknown ids yield an
    /// empty sequence, never an error.
    pub fn context(&self, id: &SessionId, window: usize) -> Vec<Turn> {
        let sessions = self.sessions.read().unwrap();
        match sessions.get(id) {
            Some(log) => {
                let skip = log.len().saturating_sub(window);
                log.iter().skip(skip).cloned().collect()
            }
            None => Vec::new(),
        }
    }

    /// Context window rendered as role-prefixed lines, using the configured
    /// window size. Empty string for an unknown session.
    pub fn context_lines(&self, id: &SessionId) -> String {
        self.context(id, self.window)
            .iter()
            .map(|turn| match turn.role {
                TurnRole::User => format!("User: {}", turn.content),
                TurnRole::Assistant => format!("{}: {}", self.assistant_name, turn.content),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Stored turn count for a session (0 for unknown ids).
    pub fn len(&self, id: &SessionId) -> usize {
        self.sessions
            .read()
            .unwrap()
            .get(id)
            .map(VecDeque::len)
            .unwrap_or(0)
    }

    pub fn is_empty(&self, id: &SessionId) -> bool {
        self.len(id) == 0
    }

    /// Drop a session entirely. Exists for an external reaper; nothing in
    /// the runtime calls this on its own.
    pub fn remove(&self, id: &SessionId) -> bool {
        self.sessions.write().unwrap().remove(id).is_some()
    }

    /// Render a full session for export. `None` for unknown ids.
    pub fn export(&self, id: &SessionId, format: ExportFormat) -> Option<String> {
        let sessions = self.sessions.read().unwrap();
        let log = sessions.get(id)?;
        match format {
            ExportFormat::Text => Some(
                log.iter()
                    .map(|t| format!("{}: {}", t.role, t.content))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            ExportFormat::Json => {
                let turns: Vec<&Turn> = log.iter().collect();
                serde_json::to_string_pretty(&turns).ok()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(cap: usize) -> SessionStore {
        SessionStore::new(cap, 5, "Helper")
    }

    #[test]
    fn test_append_caps_at_most_recent_entries() {
        let store = store(3);
        let id = SessionId::from("s1");
        for i in 0..7 {
            store.append(&id, Turn::user(format!("m{}", i)));
        }
        assert_eq!(store.len(&id), 3);
        let turns = store.context(&id, 10);
        let contents: Vec<_> = turns.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["m4", "m5", "m6"]);
    }

    #[test]
    fn test_length_is_min_of_appends_and_cap() {
        let store = store(10);
        let id = SessionId::from("s1");
        for i in 0..4 {
            store.append(&id, Turn::user(format!("m{}", i)));
        }
        assert_eq!(store.len(&id), 4);
    }

    #[test]
    fn test_unknown_session_yields_empty_context() {
        let store = store(10);
        let id = SessionId::from("nobody");
        assert!(store.context(&id, 5).is_empty());
        assert_eq!(store.context_lines(&id), "");
        assert_eq!(store.len(&id), 0);
    }

    #[test]
    fn test_context_lines_are_role_prefixed_and_chronological() {
        let store = store(10);
        let id = SessionId::from("s1");
        store.append(&id, Turn::user("hi"));
        store.append(&id, Turn::assistant("hello"));
        assert_eq!(store.context_lines(&id), "User: hi\nHelper: hello");
    }

    #[test]
    fn test_window_smaller_than_history_takes_the_tail() {
        let store = store(10);
        let id = SessionId::from("s1");
        for i in 0..6 {
            store.append(&id, Turn::user(format!("m{}", i)));
        }
        let turns = store.context(&id, 2);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].content, "m4");
        assert_eq!(turns[1].content, "m5");
    }

    #[test]
    fn test_export_text_and_json() {
        let store = store(10);
        let id = SessionId::from("s1");
        store.append(&id, Turn::user("hi"));
        store.append(&id, Turn::assistant("hello"));

        let text = store.export(&id, ExportFormat::Text).unwrap();
        assert_eq!(text, "user: hi\nassistant: hello");

        let json = store.export(&id, ExportFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["role"], "user");
        assert_eq!(parsed[1]["content"], "hello");

        let unknown = SessionId::from("nobody");
        assert!(store.export(&unknown, ExportFormat::Text).is_none());
    }

    #[test]
    fn test_remove_drops_the_session() {
        let store = store(10);
        let id = SessionId::from("s1");
        store.append(&id, Turn::user("hi"));
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.is_empty(&id));
    }
}
