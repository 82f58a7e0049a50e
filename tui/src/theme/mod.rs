//! Theme and Colors
//!
//! The messenger's light palette: white frame, very light gray chat
//! background, near-black text and gray timestamps.

use ratatui::style::{Color, Modifier, Style};

use talk_core::AvatarImage;

// ============================================================================
// Messenger Palette
// ============================================================================

/// Frame background (white)
pub const APP_BG: Color = Color::Rgb(255, 255, 255);

/// Conversation area background
pub const CHAT_BG: Color = Color::Rgb(247, 248, 250);

/// Bot bubble fill
pub const BUBBLE: Color = Color::Rgb(255, 255, 255);

/// My bubble fill (a hair darker than the bot's)
pub const BUBBLE_ME: Color = Color::Rgb(249, 250, 251);

/// System announcement pill
pub const SYSTEM: Color = Color::Rgb(238, 242, 247);

/// Body text (almost black)
pub const TEXT: Color = Color::Rgb(17, 24, 39);

/// Header icons
pub const ICON: Color = Color::Rgb(31, 41, 55);

/// Pill text
pub const SYSTEM_TEXT: Color = Color::Rgb(55, 65, 81);

/// Timestamps and hints
pub const MUTED: Color = Color::Rgb(156, 163, 175);

/// Hairline borders
pub const BORDER: Color = Color::Rgb(229, 231, 235);

/// Empty avatar circle
pub const AVATAR_RING: Color = Color::Rgb(209, 213, 219);

// ============================================================================
// Styles
// ============================================================================

/// Bubble style for a sender
#[must_use]
pub fn bubble_style(mine: bool) -> Style {
    Style::default()
        .fg(TEXT)
        .bg(if mine { BUBBLE_ME } else { BUBBLE })
}

/// Send button style
#[must_use]
pub fn send_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(TEXT).bg(APP_BG).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(BORDER).bg(APP_BG).add_modifier(Modifier::DIM)
    }
}

/// Color for an avatar glyph
///
/// Terminals can't show the picture itself, so a loaded image is drawn as a
/// filled circle tinted by a hash of its bytes.
#[must_use]
pub fn avatar_color(image: &AvatarImage) -> Color {
    match image {
        AvatarImage::Placeholder => AVATAR_RING,
        AvatarImage::Data(data) => {
            // FNV-1a
            let hash = data
                .payload()
                .bytes()
                .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
                    (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
                });
            let channel = |shift: u32| 64 + ((hash >> shift) & 0xff) as u8 % 160;
            Color::Rgb(channel(0), channel(8), channel(16))
        }
    }
}

/// Glyph for an avatar
#[must_use]
pub fn avatar_glyph(image: &AvatarImage) -> &'static str {
    if image.is_placeholder() {
        "○"
    } else {
        "●"
    }
}
