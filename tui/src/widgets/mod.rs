//! Custom Widgets
//!
//! Borderless conversation view built from rounded message bubbles.

pub mod bubble;
pub mod conversation;

pub use bubble::Bubble;
pub use conversation::Conversation;
