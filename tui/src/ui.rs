//! Screen Layout
//!
//! One phone-sized frame centered in the terminal:
//!
//! ```text
//! ╭────────────────────────────────────────────╮
//! │ ‹               AI톡 ⓘ                 ⌂ ☰ │  header
//! │────────────────────────────────────────────│
//! │        AI톡과 대화를 시작합니다.           │
//! │ ○ ╭──────────╮                             │  conversation
//! │   │ ...      │                             │
//! │ [F2] 상대 아바타  [F3] 내 아바타           │  avatar buttons
//! │ ╭────────────────────────────────────────╮ │
//! │ │ 메시지를 입력하세요 ...              ➤ │ │  input
//! │ ╰────────────────────────────────────────╯ │
//! ╰────────────────────────────────────────────╯
//!   key hints
//! ```

use ratatui::layout::{Alignment, Constraint, Layout, Margin, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use ratatui::Frame;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use talk_core::{ChatSession, Draft, Sender};

use crate::app::AvatarPrompt;
use crate::theme;
use crate::widgets::Conversation;

/// Phone frame width in cells
pub const FRAME_WIDTH: u16 = 46;

/// Phone frame height in cells
pub const FRAME_HEIGHT: u16 = 32;

/// Most draft rows shown before the input scrolls
const MAX_INPUT_ROWS: usize = 3;

const PLACEHOLDER: &str = "메시지를 입력하세요 (Enter 전송, Shift+Enter 줄바꿈)";
const SEND: &str = "➤";
const HINTS: &str = "Enter 전송 · Shift+Enter 줄바꿈 · F2/F3 아바타 · PgUp/PgDn 스크롤 · Esc 종료";

/// Draw the whole screen
pub fn render(frame: &mut Frame, session: &mut ChatSession, prompt: Option<&AvatarPrompt>) {
    let area = frame.area();
    let phone = phone_rect(area);

    frame.render_widget(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::BORDER))
            .style(Style::default().fg(theme::TEXT).bg(theme::APP_BG)),
        phone,
    );

    let inner = phone.inner(Margin::new(1, 1));
    let text_width = inner.width.saturating_sub(6) as usize;
    let draft_rows = draft_rows(session.draft(), text_width);
    let input_height = draft_rows.len().clamp(1, MAX_INPUT_ROWS) as u16 + 2;

    let [header, divider, chat, buttons, input] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(input_height),
    ])
    .areas(inner);

    render_header(frame, header, session.title());
    frame.render_widget(
        Paragraph::new("─".repeat(divider.width as usize))
            .style(Style::default().fg(theme::BORDER)),
        divider,
    );
    render_conversation(frame, chat, session);
    render_buttons(frame, buttons);
    render_input(frame, input, session.draft(), &draft_rows, prompt.is_none());

    if let Some(prompt) = prompt {
        render_prompt(frame, phone, session, prompt);
    }

    let below = phone.y + phone.height;
    if below < area.y + area.height {
        let hints = Rect::new(area.x, below, area.width, 1);
        frame.render_widget(
            Paragraph::new(HINTS)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme::MUTED)),
            hints,
        );
    }
}

/// Where the phone frame sits in a terminal of the given size
#[must_use]
pub fn phone_rect(area: Rect) -> Rect {
    // Keep a row below the frame for hints
    let room = area.height.saturating_sub(1);
    let width = FRAME_WIDTH.min(area.width);
    let height = FRAME_HEIGHT.min(room);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (room - height) / 2,
        width,
        height,
    )
}

fn render_header(frame: &mut Frame, area: Rect, title: &str) {
    let icons = Style::default().fg(theme::ICON);

    frame.render_widget(Paragraph::new(Line::styled(" ‹", icons)), area);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(title, icons.add_modifier(Modifier::BOLD)),
            Span::styled(" ⓘ", Style::default().fg(theme::MUTED)),
        ]))
        .alignment(Alignment::Center),
        area,
    );
    frame.render_widget(
        Paragraph::new(Line::styled("⌂ ☰ ", icons)).alignment(Alignment::Right),
        area,
    );
}

fn render_conversation(frame: &mut Frame, area: Rect, session: &mut ChatSession) {
    frame.render_widget(Block::new().style(Style::default().bg(theme::CHAT_BG)), area);
    let chat = area.inner(Margin::new(1, 0));

    // The widget reads the session while it lays out the scroll state
    let mut scroll = *session.scroll();
    frame.render_stateful_widget(
        Conversation::new(session.announcement(), session.messages(), session.avatars()),
        chat,
        &mut scroll,
    );
    *session.scroll_mut() = scroll;
}

fn render_buttons(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(theme::ICON).add_modifier(Modifier::BOLD);
    let label = Style::default().fg(theme::SYSTEM_TEXT);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled("[F2]", key),
            Span::styled(" 상대 아바타  ", label),
            Span::styled("[F3]", key),
            Span::styled(" 내 아바타", label),
        ])),
        area,
    );
}

fn render_input(frame: &mut Frame, area: Rect, draft: &Draft, rows: &[String], focused: bool) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [text_area, send_area] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(2)]).areas(inner);
    let text_area = text_area.inner(Margin::new(1, 0));

    if draft.is_empty() {
        frame.render_widget(
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(theme::MUTED)),
            text_area,
        );
    } else {
        let visible = rows.len().saturating_sub(text_area.height as usize);
        let lines: Vec<Line> = rows[visible..].iter().map(|r| Line::raw(r.as_str())).collect();
        frame.render_widget(Paragraph::new(lines).style(Style::default().fg(theme::TEXT)), text_area);
    }

    frame.render_widget(
        Paragraph::new(SEND).style(theme::send_style(draft.can_submit())),
        send_area,
    );

    if focused {
        let shown = rows.len().clamp(1, text_area.height.max(1) as usize);
        let last = rows.last().map_or(0, |r| r.width());
        let x = (last + trailing_width(draft)).min(text_area.width.saturating_sub(1) as usize);

        frame.set_cursor_position(Position::new(
            text_area.x + x as u16,
            text_area.y + shown as u16 - 1,
        ));
    }
}

fn render_prompt(frame: &mut Frame, phone: Rect, session: &ChatSession, prompt: &AvatarPrompt) {
    let width = phone.width.saturating_sub(6);
    let height = 6.min(phone.height);
    let area = Rect::new(
        phone.x + (phone.width - width) / 2,
        phone.y + (phone.height - height) / 2,
        width,
        height,
    );

    let title = match prompt.slot {
        Sender::Bot => " 상대방 아바타 변경 ",
        Sender::Me => " 내 아바타 변경 ",
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::ICON))
        .title(title)
        .style(Style::default().fg(theme::TEXT).bg(theme::APP_BG));
    let inner = block.inner(area).inner(Margin::new(1, 0));

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let muted = Style::default().fg(theme::MUTED);
    let accept = session.file_input(prompt.slot).accept();
    frame.render_widget(
        Paragraph::new(vec![
            Line::styled(format!("이미지 파일 경로 ({accept})"), muted),
            Line::from(vec![Span::raw("› "), Span::raw(prompt.path.as_str())]),
            Line::default(),
            Line::styled("Enter 선택 · Esc 취소", muted),
        ]),
        inner,
    );

    let x = (2 + prompt.path.width()).min(inner.width.saturating_sub(1) as usize);
    frame.set_cursor_position(Position::new(inner.x + x as u16, inner.y + 1));
}

/// Display width of the whitespace wrapping drops from the draft's last line
fn trailing_width(draft: &Draft) -> usize {
    let line = draft.text().rsplit('\n').next().unwrap_or_default();
    line[line.trim_end().len()..].width()
}

/// Wrap the draft for the input box
fn draft_rows(draft: &Draft, width: usize) -> Vec<String> {
    if draft.is_empty() {
        return Vec::new();
    }
    wrap(draft.text(), width.max(1))
        .into_iter()
        .map(|row| row.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_is_centered() {
        let phone = phone_rect(Rect::new(0, 0, 100, 41));
        assert_eq!(phone, Rect::new(27, 4, FRAME_WIDTH, FRAME_HEIGHT));
    }

    #[test]
    fn test_phone_shrinks_to_small_terminals() {
        let phone = phone_rect(Rect::new(0, 0, 30, 12));
        assert_eq!(phone, Rect::new(0, 0, 30, 11));
    }

    #[test]
    fn test_trailing_width_counts_columns() {
        let mut draft = Draft::new();
        assert_eq!(trailing_width(&draft), 0);

        draft.set("ab  ");
        assert_eq!(trailing_width(&draft), 2);

        // Ideographic space is one char, three bytes, two columns
        draft.set("가\u{3000}");
        assert_eq!(trailing_width(&draft), 2);

        draft.set("x \nnext");
        assert_eq!(trailing_width(&draft), 0);
    }

    #[test]
    fn test_draft_rows_keep_line_breaks() {
        let mut draft = Draft::new();
        assert!(draft_rows(&draft, 20).is_empty());

        draft.set("line one\nline two");
        assert_eq!(draft_rows(&draft, 20), ["line one", "line two"]);

        draft.set("a\n");
        assert_eq!(draft_rows(&draft, 20), ["a", ""]);
    }
}
