//! Main Application
//!
//! The App struct is a thin surface over [`ChatSession`]:
//! - Maps terminal keys and mouse wheel onto session transitions
//! - Waits on the session's event queue for replies and avatar reads
//! - Redraws after every change
//!
//! Two input modes exist. `Typing` edits the draft; `PickingAvatar` edits a
//! file path for one avatar slot, standing in for a file dialog.

use std::path::PathBuf;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;

use talk_core::{ChatSession, Sender, TalkConfig};

use crate::ui;

/// Lines moved per mouse wheel notch
const WHEEL_LINES: usize = 3;

/// Path being typed for an avatar slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarPrompt {
    pub slot: Sender,
    pub path: String,
}

/// What keystrokes currently edit
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Typing,
    PickingAvatar(AvatarPrompt),
}

/// Main application state
pub struct App {
    session: ChatSession,
    mode: InputMode,
    running: bool,
}

impl App {
    /// Create the app and start reading any configured avatars
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &TalkConfig) -> Self {
        Self::with_session(ChatSession::new(config), config)
    }

    /// Wrap an existing session
    pub fn with_session(mut session: ChatSession, config: &TalkConfig) -> Self {
        for (slot, path) in [
            (Sender::Bot, config.bot_avatar.as_ref()),
            (Sender::Me, config.me_avatar.as_ref()),
        ] {
            if let Some(path) = path {
                session.pick_avatar(slot, path);
            }
        }

        Self {
            session,
            mode: InputMode::Typing,
            running: true,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ChatSession {
        &mut self.session
    }

    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut events = EventStream::new();

        self.draw(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal input first
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                    None => self.running = false,
                },

                // Replies and avatar reads
                Some(event) = self.session.next_event() => {
                    self.session.handle_event(event);
                }
            }

            self.session.pump();
            self.draw(terminal)?;
        }

        Ok(())
    }

    /// Render one frame
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let prompt = match &self.mode {
            InputMode::Typing => None,
            InputMode::PickingAvatar(prompt) => Some(prompt),
        };
        let session = &mut self.session;
        terminal.draw(|frame| ui::render(frame, session, prompt))?;
        Ok(())
    }

    /// Handle one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        match &mut self.mode {
            InputMode::Typing => self.handle_typing_key(key),
            InputMode::PickingAvatar(prompt) => match key.code {
                KeyCode::Esc => self.mode = InputMode::Typing,
                KeyCode::Enter => self.finish_pick(),
                KeyCode::Backspace => {
                    prompt.path.pop();
                }
                KeyCode::Char(c) => prompt.path.push(c),
                _ => {}
            },
        }
    }

    fn handle_typing_key(&mut self, key: KeyEvent) {
        let line_break = key
            .modifiers
            .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT | KeyModifiers::CONTROL);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.running = false,

            // Enter sends, Enter with any modifier breaks the line
            KeyCode::Enter if line_break => self.session.draft_mut().insert_newline(),
            KeyCode::Char('j') if ctrl => self.session.draft_mut().insert_newline(),
            KeyCode::Enter => {
                self.session.submit();
            }

            KeyCode::Char(c) if !ctrl => self.session.draft_mut().insert(c),
            KeyCode::Backspace => self.session.draft_mut().backspace(),

            // Avatar buttons
            KeyCode::F(2) => self.open_picker(Sender::Bot),
            KeyCode::F(3) => self.open_picker(Sender::Me),

            // Conversation scrolling
            KeyCode::PageUp => {
                let page = self.page_size();
                self.session.scroll_mut().scroll_up(page);
            }
            KeyCode::PageDown => {
                let page = self.page_size();
                self.session.scroll_mut().scroll_down(page);
            }
            KeyCode::Up => self.session.scroll_mut().scroll_up(1),
            KeyCode::Down => self.session.scroll_mut().scroll_down(1),
            KeyCode::Home if ctrl => self.session.scroll_mut().to_top(),
            KeyCode::End if ctrl => self.session.scroll_mut().to_bottom(),

            _ => {}
        }
    }

    /// Handle mouse input
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.session.scroll_mut().scroll_up(WHEEL_LINES),
            MouseEventKind::ScrollDown => self.session.scroll_mut().scroll_down(WHEEL_LINES),
            _ => {}
        }
    }

    fn open_picker(&mut self, slot: Sender) {
        self.mode = InputMode::PickingAvatar(AvatarPrompt {
            slot,
            path: String::new(),
        });
    }

    fn finish_pick(&mut self) {
        let InputMode::PickingAvatar(prompt) = std::mem::replace(&mut self.mode, InputMode::Typing)
        else {
            return;
        };

        let Some(path) = resolve_path(&prompt.path) else {
            return;
        };
        if !self.session.pick_avatar(prompt.slot, path) {
            tracing::debug!(slot = prompt.slot.label(), "Avatar pick ignored, file unchanged");
        }
    }

    fn page_size(&self) -> usize {
        (self.session.scroll().viewport() / 2).max(1)
    }
}

/// Turn typed input into a path
///
/// Surrounding quotes from drag and drop are stripped and a leading `~`
/// expands to the home directory. Blank input yields nothing.
fn resolve_path(input: &str) -> Option<PathBuf> {
    let input = input.trim().trim_matches(|c| c == '"' || c == '\'');
    if input.is_empty() {
        return None;
    }

    if let Some(rest) = input.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') {
            if let Some(home) = dirs::home_dir() {
                return Some(home.join(rest.trim_start_matches('/')));
            }
        }
    }
    Some(PathBuf::from(input))
}
