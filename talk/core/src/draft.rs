//! Draft Input
//!
//! The in-progress message. Editing always happens at the end of the text.

/// The user's not-yet-sent message text
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    text: String,
}

impl Draft {
    /// Create an empty draft
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw draft text, including surrounding whitespace
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Draft text with surrounding whitespace removed
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Whether submitting now would create a message
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.trimmed().is_empty()
    }

    /// Whether the raw text is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole draft
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Type a character
    pub fn insert(&mut self, c: char) {
        self.text.push(c);
    }

    /// Insert a literal line break
    pub fn insert_newline(&mut self) {
        self.text.push('\n');
    }

    /// Delete the last character
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Clear the draft
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Take the trimmed text for sending and clear the draft
    ///
    /// Returns `None` and leaves the draft untouched when it is blank.
    pub fn take_submission(&mut self) -> Option<String> {
        let trimmed = self.trimmed();
        if trimmed.is_empty() {
            return None;
        }
        let text = trimmed.to_string();
        self.text.clear();
        Some(text)
    }
}
