//! Chat Messages
//!
//! A message is immutable once created: fields are private and only read
//! through accessors.

use chrono::{DateTime, Local};

use crate::ids::MessageId;

/// Who wrote a message (also names an avatar slot)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The scripted assistant on the left
    Bot,
    /// The local user on the right
    Me,
}

impl Sender {
    /// Short label for logs
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bot => "bot",
            Self::Me => "me",
        }
    }
}

/// A single entry in the conversation
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    id: MessageId,
    sender: Sender,
    text: String,
    created_at: DateTime<Local>,
}

impl ChatMessage {
    /// Create a message with a freshly generated id
    pub fn new(sender: Sender, text: impl Into<String>, created_at: DateTime<Local>) -> Self {
        Self::with_id(MessageId::new(), sender, text, created_at)
    }

    /// Create a message with a caller-chosen id
    pub fn with_id(
        id: MessageId,
        sender: Sender,
        text: impl Into<String>,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            sender,
            text: text.into(),
            created_at,
        }
    }

    /// Unique message ID
    #[must_use]
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Who sent this message
    #[must_use]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// The message content
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// When the message was created
    #[must_use]
    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}
