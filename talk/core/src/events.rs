//! Talk Events
//!
//! Completions of deferred work, delivered back onto the session's single
//! event queue. The surface drains the queue and hands each event to
//! [`ChatSession::handle_event`](crate::ChatSession::handle_event), so every
//! state change still happens on the surface's own loop.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::avatar::{AvatarError, AvatarImage};
use crate::message::Sender;

/// Deferred work that has finished
#[derive(Debug)]
pub enum TalkEvent {
    /// An auto-response timer fired
    ResponseDue {
        /// The user text being answered
        text: String,
        /// When the timer fired
        at: DateTime<Local>,
    },

    /// An avatar file read finished
    AvatarRead {
        /// Slot the file was picked for
        slot: Sender,
        /// Which pick for this slot started the read; only the latest applies
        seq: u64,
        /// The file that was read
        path: PathBuf,
        /// The decoded image or why it failed
        result: Result<AvatarImage, AvatarError>,
    },
}
