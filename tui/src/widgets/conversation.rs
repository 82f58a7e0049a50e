//! Conversation Widget
//!
//! A borderless, scrollable list of bubbles: the system pill first, then
//! one bubble and timestamp per message. Bot bubbles hang off the left edge
//! with their avatar; mine hang off the right.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::StatefulWidget;
use unicode_width::UnicodeWidthStr;

use talk_core::{format_timestamp, AvatarStore, ChatMessage, ScrollState, Sender};

use super::bubble::Bubble;
use crate::theme;

/// Avatar glyph plus gap
const AVATAR_COLS: usize = 2;

/// Bubbles may use at most this share of the row
const MAX_BUBBLE_PERCENT: usize = 76;

/// The scrollable message list
pub struct Conversation<'a> {
    announcement: &'a str,
    messages: &'a [ChatMessage],
    avatars: &'a AvatarStore,
}

impl<'a> Conversation<'a> {
    pub fn new(announcement: &'a str, messages: &'a [ChatMessage], avatars: &'a AvatarStore) -> Self {
        Self {
            announcement,
            messages,
            avatars,
        }
    }

    /// Lay out every line for a given width
    pub fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        let pill = format!(" {} ", self.announcement);
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(width.saturating_sub(pill.width()) / 2)),
            Span::styled(pill, Style::default().fg(theme::SYSTEM_TEXT).bg(theme::SYSTEM)),
        ]));

        for message in self.messages {
            lines.push(Line::default());
            self.push_message(&mut lines, message, width);
        }

        lines
    }

    fn push_message(&self, lines: &mut Vec<Line<'static>>, message: &ChatMessage, width: usize) {
        let mine = message.sender() == Sender::Me;
        let image = self.avatars.get(message.sender());
        let avatar = Span::styled(
            theme::avatar_glyph(image),
            Style::default().fg(theme::avatar_color(image)),
        );

        let max_bubble = (width * MAX_BUBBLE_PERCENT / 100).saturating_sub(AVATAR_COLS);
        let bubble = Bubble::new(message.text(), max_bubble);

        for (i, row) in bubble.spans(theme::bubble_style(mine)).into_iter().enumerate() {
            let face = if i == 0 { avatar.clone() } else { Span::raw(" ") };
            let mut spans = Vec::with_capacity(row.len() + 3);
            if mine {
                let pad = width.saturating_sub(bubble.width() + AVATAR_COLS);
                spans.push(Span::raw(" ".repeat(pad)));
                spans.extend(row);
                spans.push(Span::raw(" "));
                spans.push(face);
            } else {
                spans.push(face);
                spans.push(Span::raw(" "));
                spans.extend(row);
            }
            lines.push(Line::from(spans));
        }

        // Bot stamps sit on the right edge, mine on the left
        let stamp = format_timestamp(&message.created_at());
        let pad = if mine {
            1
        } else {
            width.saturating_sub(stamp.width() + 1)
        };
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(pad)),
            Span::styled(stamp, Style::default().fg(theme::MUTED)),
        ]));
    }
}

impl StatefulWidget for Conversation<'_> {
    type State = ScrollState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        buf.set_style(area, Style::default().bg(theme::CHAT_BG));

        let lines = self.lines(area.width as usize);

        state.set_layout(lines.len(), area.height as usize);

        for (i, line) in lines
            .iter()
            .skip(state.first_visible())
            .take(area.height as usize)
            .enumerate()
        {
            let y = area.y + i as u16;
            buf.set_line(area.x, y, line, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use talk_core::{AvatarImage, DataUri};

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_pill_comes_first() {
        let avatars = AvatarStore::new();
        let lines = Conversation::new("AI톡과 대화를 시작합니다.", &[], &avatars).lines(40);

        assert_eq!(lines.len(), 1);
        assert!(text_of(&lines[0]).contains("AI톡과 대화를 시작합니다."));
    }

    #[test]
    fn test_sides_and_stamps() {
        let avatars = AvatarStore::new();
        let now = Local::now();
        let messages = vec![
            ChatMessage::new(Sender::Bot, "hi there", now),
            ChatMessage::new(Sender::Me, "yo", now),
        ];
        let lines = Conversation::new("pill", &messages, &avatars).lines(40);
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        let stamp = format_timestamp(&now);

        let bot_row = texts.iter().position(|t| t.contains("hi there")).unwrap();
        assert!(texts[bot_row].starts_with(' ') || texts[bot_row].starts_with('│'));
        assert!(texts[bot_row - 1].starts_with('○'));
        assert!(texts[bot_row + 2].trim_start() == stamp);
        assert_eq!(texts[bot_row + 2].width(), 39);

        let me_row = texts.iter().position(|t| t.contains("yo")).unwrap();
        assert!(texts[me_row - 1].ends_with('○'));
        assert_eq!(texts[me_row + 2], format!(" {stamp}"));
    }

    #[test]
    fn test_loaded_avatar_is_filled() {
        let mut avatars = AvatarStore::new();
        avatars.replace(Sender::Bot, AvatarImage::Data(DataUri::encode("image/png", b"x")));
        let messages = vec![ChatMessage::new(Sender::Bot, "hey", Local::now())];

        let lines = Conversation::new("pill", &messages, &avatars).lines(40);
        assert!(lines.iter().map(text_of).any(|t| t.starts_with('●')));
    }

    #[test]
    fn test_render_sets_layout_and_sticks_to_bottom() {
        let avatars = AvatarStore::new();
        let now = Local::now();
        let messages: Vec<ChatMessage> = (0..20)
            .map(|i| ChatMessage::new(Sender::Me, format!("message {i}"), now))
            .collect();

        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        let mut scroll = ScrollState::new();
        Conversation::new("pill", &messages, &avatars).render(area, &mut buf, &mut scroll);

        assert!(scroll.is_at_bottom());
        assert!(scroll.first_visible() > 0);

        // Wide characters leave a blank cell behind them; skip it
        let mut bottom = String::new();
        let mut x = 0u16;
        while x < 40 {
            let symbol = buf[(x, 9u16)].symbol();
            bottom.push_str(symbol);
            x += symbol.width().max(1) as u16;
        }
        assert!(bottom.contains(&format_timestamp(&now)));
    }
}
