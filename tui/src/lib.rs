//! AI톡 TUI - Terminal surface for the mock messenger
//!
//! Draws the chat screen as a phone-sized frame in the middle of the
//! terminal and maps keys onto [`talk_core::ChatSession`] transitions.
//!
//! # Architecture
//!
//! - **App**: Event loop and key handling
//! - **Ui**: Phone frame layout (header, conversation, avatar buttons, input)
//! - **Widgets**: Scrollable bubble list
//! - **Theme**: Light messenger palette
//! - **Logging**: File-backed tracing so logs never touch the screen

pub mod app;
pub mod logging;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, AvatarPrompt, InputMode};
