//! SessionEvent enum — broadcast from a Session to frontends via tokio::broadcast.

use serde::{Deserialize, Serialize};

use crate::classifier::Topic;
use crate::intent::SignupRequest;
use crate::types::MessageEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusData {
    pub busy: bool,
}

/// What the assistant made of the utterance it answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyMeta {
    pub topic: Topic,
    /// Follow-up action labels for the utterance
    pub suggestions: Vec<String>,
    /// Target site when the utterance read as a signup request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signup: Option<SignupRequest>,
}

/// Events broadcast from a Session to all subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum SessionEvent {
    /// The user's entry was appended
    #[serde(rename = "message")]
    Message(MessageEntry),

    /// The assistant's reply was appended
    #[serde(rename = "reply")]
    Reply { entry: MessageEntry, meta: ReplyMeta },

    /// Busy flag changed
    #[serde(rename = "status")]
    Status(StatusData),

    /// Session torn down; no further events
    #[serde(rename = "closed")]
    Closed,
}

impl SessionEvent {
    /// `{"event": "...", "data": {...}}`, for structured logs.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
