//! Chat Session
//!
//! The single owner of all chat state: message log, avatar slots, draft,
//! scroll position, and the deferred work in flight. A surface creates one
//! session, calls its transition methods in response to user input, and
//! feeds completed deferred work back through [`ChatSession::handle_event`].
//!
//! # State Machine
//!
//! ```text
//!            submit (non-blank)             ResponseDue (last pending)
//!   Idle ─────────────────────────► AwaitingResponse ─────────────────► Idle
//!                                    │        ▲
//!                                    └────────┘ submit / ResponseDue
//! ```
//!
//! Every log append moves the scroll position to the bottom in the same
//! call, so a surface that renders after each transition always shows the
//! newest entry.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::avatar::{read_avatar, AvatarError, AvatarImage, AvatarStore, FileInput};
use crate::clock::{Clock, SystemClock};
use crate::config::TalkConfig;
use crate::draft::Draft;
use crate::events::TalkEvent;
use crate::ids::MessageId;
use crate::log::MessageLog;
use crate::message::{ChatMessage, Sender};
use crate::responder::{reply_text, AutoResponder};
use crate::scroll::ScrollState;

/// Whether canned replies are still on their way
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponderState {
    /// No reply pending
    Idle,
    /// At least one reply timer is armed
    AwaitingResponse {
        /// Number of replies not yet delivered
        pending: usize,
    },
}

/// All state for one mounted chat screen
pub struct ChatSession {
    title: String,
    announcement: String,
    log: MessageLog,
    avatars: AvatarStore,
    bot_input: FileInput,
    me_input: FileInput,
    draft: Draft,
    scroll: ScrollState,
    responder: AutoResponder,
    pending_responses: usize,
    avatar_reads: JoinSet<()>,
    /// Latest read started per slot, bot then me
    read_seq: [u64; 2],
    clock: Arc<dyn Clock>,
    tx: mpsc::UnboundedSender<TalkEvent>,
    rx: mpsc::UnboundedReceiver<TalkEvent>,
    revision: u64,
}

impl ChatSession {
    /// Create a session reading the system clock
    #[must_use]
    pub fn new(config: &TalkConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a session with an explicit clock
    pub fn with_clock(config: &TalkConfig, clock: Arc<dyn Clock>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let responder = AutoResponder::new(config.response_delay, Arc::clone(&clock), tx.clone());

        let mut session = Self {
            title: config.title.clone(),
            announcement: config.announcement.clone(),
            log: MessageLog::new(),
            avatars: AvatarStore::new(),
            bot_input: FileInput::new(),
            me_input: FileInput::new(),
            draft: Draft::new(),
            scroll: ScrollState::new(),
            responder,
            pending_responses: 0,
            avatar_reads: JoinSet::new(),
            read_seq: [0; 2],
            clock,
            tx,
            rx,
            revision: 0,
        };

        if !config.greeting.is_empty() {
            let now = session.clock.now();
            session.append(Sender::Bot, config.greeting.clone(), now);
        }

        session
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// Header title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// System banner text
    #[must_use]
    pub fn announcement(&self) -> &str {
        &self.announcement
    }

    /// All messages in order
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        self.log.all()
    }

    /// The message log
    #[must_use]
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Both avatar slots
    #[must_use]
    pub fn avatars(&self) -> &AvatarStore {
        &self.avatars
    }

    /// The in-progress message
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Edit the in-progress message
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Conversation scroll position
    #[must_use]
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Move the conversation scroll position
    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    /// The file control behind an avatar button
    #[must_use]
    pub fn file_input(&self, slot: Sender) -> &FileInput {
        match slot {
            Sender::Bot => &self.bot_input,
            Sender::Me => &self.me_input,
        }
    }

    /// Whether replies are pending
    #[must_use]
    pub fn state(&self) -> ResponderState {
        match self.pending_responses {
            0 => ResponderState::Idle,
            pending => ResponderState::AwaitingResponse { pending },
        }
    }

    /// Counter bumped on every log change
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Send the draft
    ///
    /// A blank draft is refused silently: nothing is appended and the draft
    /// is left as it was. Otherwise the trimmed text is appended as a `Me`
    /// message, the draft is cleared, and one reply is scheduled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self) -> Option<MessageId> {
        let Some(text) = self.draft.take_submission() else {
            tracing::trace!("Ignoring blank submit");
            return None;
        };

        let now = self.clock.now();
        let id = self.append(Sender::Me, text.clone(), now);

        self.responder.schedule(text);
        self.pending_responses += 1;

        Some(id)
    }

    /// Select an avatar file for a slot
    ///
    /// Starts an asynchronous read when the selection fires a change; the
    /// result comes back as [`TalkEvent::AvatarRead`]. Returns whether a read
    /// was started.
    ///
    /// Must be called from within a tokio runtime.
    pub fn pick_avatar(&mut self, slot: Sender, path: impl Into<PathBuf>) -> bool {
        let input = match slot {
            Sender::Bot => &mut self.bot_input,
            Sender::Me => &mut self.me_input,
        };
        let Some(path) = input.select(path) else {
            return false;
        };

        tracing::debug!(slot = slot.label(), path = %path.display(), "Reading avatar");

        // Reap finished reads
        while self.avatar_reads.try_join_next().is_some() {}

        let seq = &mut self.read_seq[slot_index(slot)];
        *seq += 1;
        let seq = *seq;

        let tx = self.tx.clone();
        self.avatar_reads.spawn(async move {
            let result = read_avatar(&path).await;
            if tx
                .send(TalkEvent::AvatarRead { slot, seq, path, result })
                .is_err()
            {
                tracing::debug!(slot = slot.label(), "Session gone before avatar read finished");
            }
        });
        true
    }

    /// Apply a finished avatar read
    ///
    /// On failure the previous avatar is kept. Either way the slot's file
    /// input is reset so the same file can be picked again.
    pub fn apply_avatar_read(&mut self, slot: Sender, result: Result<AvatarImage, AvatarError>) {
        match result {
            Ok(image) => {
                tracing::info!(slot = slot.label(), "Avatar updated");
                self.avatars.replace(slot, image);
            }
            Err(e) => {
                tracing::warn!(slot = slot.label(), error = %e, "Avatar pick failed, keeping previous");
            }
        }

        match slot {
            Sender::Bot => self.bot_input.reset(),
            Sender::Me => self.me_input.reset(),
        }
    }

    /// Apply a completed piece of deferred work
    pub fn handle_event(&mut self, event: TalkEvent) {
        match event {
            TalkEvent::ResponseDue { text, at } => {
                self.pending_responses = self.pending_responses.saturating_sub(1);
                self.append(Sender::Bot, reply_text(&text), at);
            }
            TalkEvent::AvatarRead { slot, seq, path, .. }
                if seq != self.read_seq[slot_index(slot)] =>
            {
                // A newer pick for this slot is still in flight
                tracing::debug!(slot = slot.label(), path = %path.display(), "Dropping stale avatar read");
            }
            TalkEvent::AvatarRead { slot, result, .. } => {
                self.apply_avatar_read(slot, result);
            }
        }
    }

    /// Wait for the next completed piece of deferred work
    pub async fn next_event(&mut self) -> Option<TalkEvent> {
        self.rx.recv().await
    }

    /// Apply every event already waiting, without blocking
    ///
    /// Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    fn append(&mut self, sender: Sender, text: String, at: chrono::DateTime<chrono::Local>) -> MessageId {
        let id = self.log.append(sender, text, at).id().clone();
        self.scroll.to_bottom();
        self.revision += 1;
        id
    }
}

fn slot_index(slot: Sender) -> usize {
    match slot {
        Sender::Bot => 0,
        Sender::Me => 1,
    }
}
