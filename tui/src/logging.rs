//! Logging
//!
//! The alternate screen owns stdout, so tracing output goes to a file:
//! `$XDG_STATE_HOME/aitalk/aitalk.log`, falling back to the cache dir.
//! With neither available, logs are discarded. `RUST_LOG` filters as
//! usual, defaulting to `info`.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Where the log file would go on this machine
#[must_use]
pub fn log_path() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|dir| dir.join("aitalk").join("aitalk.log"))
}

/// Install the global subscriber
///
/// Returns the log file path when one could be opened.
pub fn init() -> Option<PathBuf> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let opened = log_path().and_then(|path| open_log(&path).map(|file| (path, file)));

    match opened {
        Some((path, file)) => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .init();
            Some(path)
        }
        None => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::sink),
                )
                .with(filter)
                .init();
            None
        }
    }
}

fn open_log(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
