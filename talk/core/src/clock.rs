//! Wall Clock
//!
//! The local clock is the only external data source. It sits behind a trait
//! so tests can pin message times.

use chrono::{DateTime, Local};

/// Source of the current local time
pub trait Clock: Send + Sync {
    /// The current local time
    fn now(&self) -> DateTime<Local>;
}

/// Reads `chrono::Local::now()`
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
