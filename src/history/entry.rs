//! Chat entries and immutable history snapshots.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A document the assistant cited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Source {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
}

fn new_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// One message in the chat history.
///
/// `pending`, `animate` and `closed` describe an in-flight assistant reply;
/// a finalized entry has all three cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEntry {
    #[serde(default = "new_uuid")]
    pub uuid: String,
    pub role: Role,
    #[serde(default)]
    pub content: String,
    /// Unix seconds.
    #[serde(default)]
    pub sent_at: Option<i64>,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub error_msg: Option<String>,
    #[serde(default)]
    pub animate: bool,
    #[serde(default)]
    pub closed: bool,
}

impl ChatEntry {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            uuid: new_uuid(),
            role,
            content: content.into(),
            sent_at: Some(Utc::now().timestamp()),
            sources: Vec::new(),
            pending: false,
            error: false,
            error_msg: None,
            animate: false,
            closed: true,
        }
    }

    /// A finalized user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// A finalized assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Placeholder for an assistant reply that is about to stream in.
    pub fn reply_placeholder() -> Self {
        Self {
            pending: true,
            animate: true,
            closed: false,
            ..Self::new(Role::Assistant, "")
        }
    }

    /// An assistant turn that failed.
    pub fn failed(error_msg: Option<String>) -> Self {
        Self {
            error: true,
            error_msg,
            ..Self::new(Role::Assistant, "")
        }
    }

    #[must_use]
    pub fn with_sent_at(mut self, sent_at: i64) -> Self {
        self.sent_at = Some(sent_at);
        self
    }
}

/// Immutable, ordered snapshot of the chat history.
///
/// Updates produce a new snapshot; renderers holding the old one are
/// unaffected. Insertion order is chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatHistory {
    entries: Arc<Vec<ChatEntry>>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<ChatEntry>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }

    /// New snapshot with `entry` appended.
    #[must_use]
    pub fn appended(&self, entry: ChatEntry) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend_from_slice(&self.entries);
        entries.push(entry);
        Self::from_entries(entries)
    }

    /// New snapshot with the last entry modified, e.g. to grow a live reply.
    ///
    /// Returns an unchanged clone when the history is empty.
    #[must_use]
    pub fn with_last_updated(&self, update: impl FnOnce(&mut ChatEntry)) -> Self {
        let mut entries = self.entries.as_ref().clone();
        match entries.last_mut() {
            Some(last) => {
                update(last);
                Self::from_entries(entries)
            }
            None => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshots_are_independent() {
        let empty = ChatHistory::new();
        let one = empty.appended(ChatEntry::user("Hello"));
        let two = one.appended(ChatEntry::assistant("Hi there!"));

        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(two.len(), 2);
        assert_eq!(two.entries()[0].role, Role::User);
        assert_eq!(two.entries()[1].role, Role::Assistant);
    }

    #[test]
    fn test_live_reply_grows_in_new_snapshot() {
        let history = ChatHistory::new()
            .appended(ChatEntry::user("Hello"))
            .appended(ChatEntry::reply_placeholder());

        let streamed = history.with_last_updated(|reply| {
            reply.pending = false;
            reply.content.push_str("Hi");
        });

        assert!(history.last().unwrap().pending);
        assert_eq!(streamed.last().unwrap().content, "Hi");
        assert!(!streamed.last().unwrap().pending);
    }

    #[test]
    fn test_entry_deserializes_with_defaults() {
        let entry: ChatEntry =
            serde_json::from_str(r#"{"role": "assistant", "content": "Hi", "sentAt": 10}"#)
                .unwrap();
        assert_eq!(entry.role, Role::Assistant);
        assert_eq!(entry.sent_at, Some(10));
        assert!(!entry.animate);
        assert!(!entry.uuid.is_empty());
    }
}
