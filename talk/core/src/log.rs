//! Message Log
//!
//! Append-only, insertion-ordered. Nothing is ever mutated or removed once
//! appended, so the slice handed out by [`MessageLog::all`] only ever grows.

use chrono::{DateTime, Local};

use crate::message::{ChatMessage, Sender};

/// The conversation history
#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    messages: Vec<ChatMessage>,
}

impl MessageLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new message at the end
    pub fn append(
        &mut self,
        sender: Sender,
        text: impl Into<String>,
        at: DateTime<Local>,
    ) -> &ChatMessage {
        self.push(ChatMessage::new(sender, text, at))
    }

    /// Append an already-built message
    pub fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        tracing::debug!(
            id = %message.id(),
            sender = message.sender().label(),
            "Appended message"
        );
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// All messages in order
    #[must_use]
    pub fn all(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log has no messages
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The newest message
    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}
