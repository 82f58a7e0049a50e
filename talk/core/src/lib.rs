//! Talk Core - Headless chat state for the AI톡 mock messenger
//!
//! This crate holds everything the mock messenger *does*, independent of how
//! it is drawn. A surface (the terminal UI, or a test) owns one
//! [`ChatSession`], feeds it user input, drains its [`TalkEvent`] queue, and
//! renders what it exposes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Surface                           │
//! │   keys / paths ──┐                    ┌── render(view)   │
//! └──────────────────┼────────────────────┼──────────────────┘
//!                    │                    │
//! ┌──────────────────┼────────────────────┼──────────────────┐
//! │                  ▼    ChatSession     │                  │
//! │  ┌─────────┐  ┌────────────┐  ┌──────────────┐  ┌──────┐ │
//! │  │  Draft  │  │ MessageLog │  │ AvatarStore  │  │Scroll│ │
//! │  └─────────┘  └────────────┘  └──────────────┘  └──────┘ │
//! │        │             ▲                ▲                  │
//! │        ▼             │                │                  │
//! │  ┌─────────────┐   TalkEvent queue (mpsc)                │
//! │  │AutoResponder│──► ResponseDue    AvatarRead ◄── tokio::fs
//! │  └─────────────┘                                         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Overview
//!
//! - [`avatar`]: Avatar slots, data-URI images, the hidden file input model
//! - [`clock`]: Injectable wall clock
//! - [`config`]: TOML + environment configuration
//! - [`draft`]: The in-progress message text
//! - [`events`]: Completions delivered back onto the session's event queue
//! - [`ids`]: Message identifier generation
//! - [`log`]: Append-only message log
//! - [`message`]: Chat message and sender types
//! - [`responder`]: Delayed canned replies
//! - [`scroll`]: Conversation scroll position
//! - [`session`]: The owning state machine
//! - [`timestamp`]: 12-hour Korean clock formatting
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod avatar;
pub mod clock;
pub mod config;
pub mod draft;
pub mod events;
pub mod ids;
pub mod log;
pub mod message;
pub mod responder;
pub mod scroll;
pub mod session;
pub mod timestamp;

// Re-exports for convenience
pub use avatar::{read_avatar, AvatarError, AvatarImage, AvatarStore, DataUri, FileInput};
pub use clock::{Clock, SystemClock};
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigSource,
    TalkConfig, TalkToml,
};
pub use draft::Draft;
pub use events::TalkEvent;
pub use ids::{generate_id, generate_id_with, MessageId};
pub use log::MessageLog;
pub use message::{ChatMessage, Sender};
pub use responder::AutoResponder;
pub use scroll::ScrollState;
pub use session::{ChatSession, ResponderState};
pub use timestamp::{format_timestamp, Meridiem};
