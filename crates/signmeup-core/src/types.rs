//! Core types — MessageEntry, Transcript, SessionState, etc.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Messages ──

/// Per-session message identifier. Strictly increasing in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out message ids for one session, starting at 1.
#[derive(Debug)]
pub(crate) struct MessageIdGen {
    next: u64,
}

impl MessageIdGen {
    pub(crate) fn new() -> Self {
        Self { next: 1 }
    }

    pub(crate) fn next_id(&mut self) -> MessageId {
        let id = MessageId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Assistant => write!(f, "assistant"),
        }
    }
}

/// One transcript line. Fields are private so an entry cannot change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    id: MessageId,
    text: String,
    sender: Sender,
    timestamp: DateTime<Utc>,
}

impl MessageEntry {
    pub(crate) fn new(id: MessageId, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

// ── Transcript ──

/// Chronological, append-only list of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<MessageEntry>,
}

impl Transcript {
    pub(crate) fn push(&mut self, entry: MessageEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&MessageEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[MessageEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a MessageEntry;
    type IntoIter = std::slice::Iter<'a, MessageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ── Session state ──

/// Everything a session owns. Only `Session::submit` and its reply task write to it.
#[derive(Debug)]
pub struct SessionState {
    pub(crate) transcript: Transcript,
    pub(crate) busy: bool,
    pub(crate) ids: MessageIdGen,
}

impl SessionState {
    /// Fresh state holding just the assistant greeting.
    pub(crate) fn seeded(greeting: &str) -> Self {
        let mut ids = MessageIdGen::new();
        let mut transcript = Transcript::default();
        transcript.push(MessageEntry::new(ids.next_id(), Sender::Assistant, greeting));
        Self {
            transcript,
            busy: false,
            ids,
        }
    }

    pub(crate) fn append(&mut self, sender: Sender, text: impl Into<String>) -> MessageEntry {
        let entry = MessageEntry::new(self.ids.next_id(), sender, text);
        self.transcript.push(entry.clone());
        entry
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_state_has_greeting() {
        let state = SessionState::seeded("hi there");
        assert_eq!(state.transcript().len(), 1);
        let first = &state.transcript().as_slice()[0];
        assert_eq!(first.sender(), Sender::Assistant);
        assert_eq!(first.text(), "hi there");
        assert_eq!(first.id().get(), 1);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_ids_increase_with_appends() {
        let mut state = SessionState::seeded("hi");
        let a = state.append(Sender::User, "one");
        let b = state.append(Sender::Assistant, "two");
        assert!(a.id() < b.id());
        assert_eq!(b.id().get(), 3);
        assert_eq!(state.transcript().last().map(|e| e.text()), Some("two"));
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&Sender::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
