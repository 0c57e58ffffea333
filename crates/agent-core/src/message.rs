//! Chat Messages
//!
//! Message format shared by the transcript and the provider layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message sender
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions (provider requests only, never stored in a transcript)
    System,
    /// Participant input
    User,
    /// Model reply or failure notice
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single chat turn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier
    pub id: Uuid,

    /// Message role
    pub role: Role,

    /// Text body
    pub content: String,

    /// Creation time
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new message stamped with the current time
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Override the timestamp
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Append-only chat history.
///
/// Timestamps never go backwards: a message stamped earlier than the
/// current tail is clamped to the tail's timestamp on append.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message
    pub fn push(&mut self, mut message: Message) {
        if let Some(last) = self.messages.last() {
            if message.timestamp < last.timestamp {
                message.timestamp = last.timestamp;
            }
        }
        self.messages.push(message);
    }

    /// All messages, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent `window` messages, oldest first
    pub fn recent(&self, window: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(window);
        &self.messages[start..]
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
        assert_ne!(msg.id, Message::user("Hello").id);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_recent_window() {
        let mut transcript = Transcript::new();
        for i in 0..15 {
            transcript.push(Message::user(format!("turn {i}")));
        }

        let recent = transcript.recent(10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].content, "turn 5");
        assert_eq!(recent[9].content, "turn 14");

        assert_eq!(transcript.recent(100).len(), 15);
        assert!(transcript.recent(0).is_empty());
    }

    #[test]
    fn test_timestamps_are_monotonic() {
        let mut transcript = Transcript::new();
        let now = Utc::now();
        transcript.push(Message::user("first").at(now));
        transcript.push(Message::assistant("second").at(now - Duration::seconds(5)));

        let messages = transcript.messages();
        assert_eq!(messages[1].timestamp, now);
        assert!(messages[0].timestamp <= messages[1].timestamp);
    }
}
