//! Bubble Layout
//!
//! Wraps one message into a rounded box no wider than a given column count.
//! Widths are display widths, so Hangul counts as two columns.

use ratatui::style::Style;
use ratatui::text::Span;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::theme;

/// Columns taken by the border and inner padding (`│ ` + ` │`)
const CHROME: usize = 4;

/// A message laid out as a box
pub struct Bubble {
    rows: Vec<String>,
    inner_width: usize,
}

impl Bubble {
    /// Lay out `text` in at most `max_width` columns, borders included
    pub fn new(text: &str, max_width: usize) -> Self {
        let text_width = max_width.saturating_sub(CHROME).max(1);
        let text = text.replace('\t', "    ");

        let rows: Vec<String> = text
            .lines()
            .flat_map(|line| {
                if line.is_empty() {
                    vec![String::new()]
                } else {
                    wrap(line, text_width)
                        .into_iter()
                        .map(|cow| cow.to_string())
                        .collect()
                }
            })
            .collect();

        let inner_width = rows.iter().map(|r| r.width()).max().unwrap_or(0);

        Self { rows, inner_width }
    }

    /// Total width in columns, borders included
    pub fn width(&self) -> usize {
        self.inner_width + CHROME
    }

    /// Total height in rows, borders included
    pub fn height(&self) -> usize {
        self.rows.len() + 2
    }

    /// Wrapped text rows, without borders
    pub fn text_rows(&self) -> &[String] {
        &self.rows
    }

    /// Styled rows, top border first
    pub fn spans(&self, fill: Style) -> Vec<Vec<Span<'static>>> {
        let edge = fill.fg(theme::BORDER);
        let bar = "─".repeat(self.inner_width + 2);

        let mut out = Vec::with_capacity(self.height());
        out.push(vec![Span::styled(format!("╭{bar}╮"), edge)]);
        for row in &self.rows {
            let pad = " ".repeat(self.inner_width - row.width());
            out.push(vec![
                Span::styled("│ ", edge),
                Span::styled(format!("{row}{pad}"), fill),
                Span::styled(" │", edge),
            ]);
        }
        out.push(vec![Span::styled(format!("╰{bar}╯"), edge)]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_fits_on_one_row() {
        let bubble = Bubble::new("hello", 30);
        assert_eq!(bubble.text_rows(), ["hello"]);
        assert_eq!(bubble.width(), 9);
        assert_eq!(bubble.height(), 3);
    }

    #[test]
    fn test_wraps_by_display_width() {
        // Ten Hangul syllables are twenty columns
        let bubble = Bubble::new("가나다라마바사아자차", 14);
        assert!(bubble.text_rows().len() > 1);
        assert!(bubble.text_rows().iter().all(|r| r.width() <= 10));
        assert!(bubble.width() <= 14);
    }

    #[test]
    fn test_keeps_line_breaks() {
        let bubble = Bubble::new("one\n\nthree", 30);
        assert_eq!(bubble.text_rows(), ["one", "", "three"]);
    }

    #[test]
    fn test_rows_are_padded_to_the_box() {
        let bubble = Bubble::new("a\nlonger", 30);
        let widths: Vec<usize> = bubble
            .spans(Style::default())
            .iter()
            .map(|row| row.iter().map(|s| s.content.width()).sum())
            .collect();
        assert!(widths.iter().all(|w| *w == bubble.width()));
    }
}
