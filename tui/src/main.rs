//! AI톡 TUI Entry Point
//!
//! Launches the mock messenger in the terminal.
//!
//! Usage:
//!   aitalk
//!
//! Environment:
//!   AITALK_CONFIG             Config file (default: $XDG_CONFIG_HOME/aitalk/aitalk.toml)
//!   AITALK_RESPONSE_DELAY_MS  Reply delay in milliseconds (default: 400)
//!   AITALK_TITLE              Header title
//!   AITALK_BOT_AVATAR         Image for the bot avatar at startup
//!   AITALK_ME_AVATAR          Image for my avatar at startup
//!   RUST_LOG                  Log filter (default: info)

use std::io::{self, IsTerminal};
use std::panic;

use anyhow::Context;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use aitalk_tui::{logging, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_file = logging::init();

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: aitalk requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin or stdout is piped, or SSH ran without -t.");
        std::process::exit(1);
    }

    let config = talk_core::load_config().context("Failed to load configuration")?;
    tracing::info!(
        source = %config.source(),
        delay_ms = config.response_delay.as_millis() as u64,
        log = ?log_file,
        "Starting aitalk"
    );

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Shift+Enter is only distinguishable with the kitty keyboard protocol
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(&config);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
