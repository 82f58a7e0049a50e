//! Auto-Responder
//!
//! After each user message a single timer is armed. When it fires it posts a
//! [`TalkEvent::ResponseDue`] stamped with the firing time; the session turns
//! that into a bot message quoting the user's text.
//!
//! Timers are fire-and-forget with respect to user input: further typing or
//! submits never cancel them, and any number may overlap. They live in a
//! `JoinSet`, so dropping the responder aborts whatever is still pending.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::clock::Clock;
use crate::events::TalkEvent;

/// Default delay before the canned reply arrives
pub const DEFAULT_RESPONSE_DELAY: Duration = Duration::from_millis(400);

/// Build the canned reply for a user message
#[must_use]
pub fn reply_text(user_text: &str) -> String {
    format!("“{user_text}”에 대한 정보를 정리해 드릴게요!")
}

/// Schedules delayed canned replies
pub struct AutoResponder {
    delay: Duration,
    clock: Arc<dyn Clock>,
    tx: mpsc::UnboundedSender<TalkEvent>,
    pending: JoinSet<()>,
}

impl AutoResponder {
    /// Create a responder posting to `tx`
    pub fn new(delay: Duration, clock: Arc<dyn Clock>, tx: mpsc::UnboundedSender<TalkEvent>) -> Self {
        Self {
            delay,
            clock,
            tx,
            pending: JoinSet::new(),
        }
    }

    /// Delay between a user message and its reply
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm a timer answering `text`
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, text: String) {
        // Reap finished timers so the set doesn't grow for the whole session
        while self.pending.try_join_next().is_some() {}

        let delay = self.delay;
        let clock = Arc::clone(&self.clock);
        let tx = self.tx.clone();
        self.pending.spawn(async move {
            tokio::time::sleep(delay).await;
            let at = clock.now();
            if tx.send(TalkEvent::ResponseDue { text, at }).is_err() {
                tracing::debug!("Session gone before response fired");
            }
        });
        tracing::debug!(delay_ms = delay.as_millis() as u64, "Scheduled auto-response");
    }
}
