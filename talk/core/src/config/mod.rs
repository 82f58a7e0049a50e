//! TOML Configuration File Support
//!
//! Configuration lives at `~/.config/aitalk/aitalk.toml` (or wherever
//! `AITALK_CONFIG` points).
//!
//! # Configuration Priority
//!
//! Values are loaded with the following priority (highest first):
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [chat]
//! title = "AI톡"
//! announcement = "AI톡과 대화를 시작합니다."
//! response_delay_ms = 400
//!
//! [avatars]
//! bot = "/home/me/pictures/bot.png"
//! me = "/home/me/pictures/me.jpg"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::responder::DEFAULT_RESPONSE_DELAY;

/// Header title
pub const DEFAULT_TITLE: &str = "AI톡";

/// System banner shown above the conversation
pub const DEFAULT_ANNOUNCEMENT: &str = "AI톡과 대화를 시작합니다.";

/// Scripted opening message from the bot
pub const DEFAULT_GREETING: &str = "농협은행 AI가 알아서 더치페이 결제를 탐지해요! 그리고 소비와 지출 금액을 더 정확히 기록할게요. 농협은행 소비/지출 금액을 그대로 가계부로 사용해보세요!";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where the configuration came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// `[chat]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatToml {
    /// Header title
    pub title: Option<String>,

    /// System banner text
    pub announcement: Option<String>,

    /// Scripted opening bot message
    pub greeting: Option<String>,

    /// Delay before the canned reply, in milliseconds
    pub response_delay_ms: Option<u64>,
}

/// `[avatars]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarsToml {
    /// Image loaded into the bot slot at startup
    pub bot: Option<PathBuf>,

    /// Image loaded into the me slot at startup
    pub me: Option<PathBuf>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TalkToml {
    /// Chat section
    pub chat: ChatToml,

    /// Avatar section
    pub avatars: AvatarsToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved configuration for a chat session
#[derive(Clone, Debug)]
pub struct TalkConfig {
    /// Header title
    pub title: String,

    /// System banner text
    pub announcement: String,

    /// Scripted opening bot message
    pub greeting: String,

    /// Delay before the canned reply
    pub response_delay: Duration,

    /// Image loaded into the bot slot at startup
    pub bot_avatar: Option<PathBuf>,

    /// Image loaded into the me slot at startup
    pub me_avatar: Option<PathBuf>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    source: ConfigSource,
}

impl Default for TalkConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            announcement: DEFAULT_ANNOUNCEMENT.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            response_delay: DEFAULT_RESPONSE_DELAY,
            bot_avatar: None,
            me_avatar: None,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl TalkConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check values that would break the session's ordering guarantees
    ///
    /// # Errors
    ///
    /// A zero response delay is rejected: the reply must never be able to
    /// land in the same turn as the message it answers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.response_delay.is_zero() {
            return Err(ConfigError::Validation(
                "response_delay_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// `$AITALK_CONFIG` if set, otherwise `$XDG_CONFIG_HOME/aitalk/aitalk.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("AITALK_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|p| p.join("aitalk").join("aitalk.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or the
/// result fails validation. A missing config file is not an error.
pub fn load_config() -> Result<TalkConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or the result fails validation.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<TalkConfig, ConfigError> {
    let mut config = TalkConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::Read {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: TalkToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, |key| std::env::var(key).ok());

    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut TalkConfig, toml: &TalkToml) {
    if let Some(ref title) = toml.chat.title {
        config.title.clone_from(title);
    }
    if let Some(ref announcement) = toml.chat.announcement {
        config.announcement.clone_from(announcement);
    }
    if let Some(ref greeting) = toml.chat.greeting {
        config.greeting.clone_from(greeting);
    }
    if let Some(ms) = toml.chat.response_delay_ms {
        config.response_delay = Duration::from_millis(ms);
    }

    if toml.avatars.bot.is_some() {
        config.bot_avatar.clone_from(&toml.avatars.bot);
    }
    if toml.avatars.me.is_some() {
        config.me_avatar.clone_from(&toml.avatars.me);
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut TalkConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(delay) = var("AITALK_RESPONSE_DELAY_MS") {
        match delay.parse::<u64>() {
            Ok(ms) => {
                config.response_delay = Duration::from_millis(ms);
                config.source = ConfigSource::Env;
            }
            Err(_) => tracing::warn!(value = %delay, "Ignoring invalid AITALK_RESPONSE_DELAY_MS"),
        }
    }
    if let Some(title) = var("AITALK_TITLE") {
        config.title = title;
        config.source = ConfigSource::Env;
    }
    if let Some(path) = var("AITALK_BOT_AVATAR") {
        config.bot_avatar = Some(PathBuf::from(path));
        config.source = ConfigSource::Env;
    }
    if let Some(path) = var("AITALK_ME_AVATAR") {
        config.me_avatar = Some(PathBuf::from(path));
        config.source = ConfigSource::Env;
    }
}
