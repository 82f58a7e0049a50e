//! Scroll State
//!
//! Surface-agnostic scroll position for the conversation view, counted in
//! rendered lines from the bottom (0 = newest entry visible).

/// Scroll position of the conversation view
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Lines scrolled up from the bottom
    offset: usize,
    /// Total rendered lines at the last layout
    total_lines: usize,
    /// Lines visible at the last layout
    viewport: usize,
}

impl ScrollState {
    /// Create a scroll state pinned to the bottom
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines scrolled up from the bottom
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Lines visible at the last layout
    #[must_use]
    pub fn viewport(&self) -> usize {
        self.viewport
    }

    /// Whether the newest entry is in view
    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        self.offset == 0
    }

    /// Jump to the newest entry
    pub fn to_bottom(&mut self) {
        self.offset = 0;
    }

    /// Scroll toward older entries
    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.max_offset());
    }

    /// Scroll toward newer entries
    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    /// Jump to the oldest entry
    pub fn to_top(&mut self) {
        self.offset = self.max_offset();
    }

    /// Record the latest layout and clamp the offset to it
    pub fn set_layout(&mut self, total_lines: usize, viewport: usize) {
        self.total_lines = total_lines;
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Index of the first visible line for the last layout
    #[must_use]
    pub fn first_visible(&self) -> usize {
        let end = self.total_lines.saturating_sub(self.offset);
        end.saturating_sub(self.viewport)
    }

    fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_is_clamped() {
        let mut scroll = ScrollState::new();
        scroll.set_layout(30, 10);

        scroll.scroll_up(100);
        assert_eq!(scroll.offset(), 20);
        assert_eq!(scroll.first_visible(), 0);

        scroll.scroll_down(5);
        assert_eq!(scroll.offset(), 15);
        assert_eq!(scroll.first_visible(), 5);

        scroll.to_bottom();
        assert!(scroll.is_at_bottom());
        assert_eq!(scroll.first_visible(), 20);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut scroll = ScrollState::new();
        scroll.set_layout(4, 10);
        scroll.scroll_up(3);

        assert!(scroll.is_at_bottom());
        assert_eq!(scroll.first_visible(), 0);
    }

    #[test]
    fn test_layout_shrink_clamps_offset() {
        let mut scroll = ScrollState::new();
        scroll.set_layout(50, 10);
        scroll.to_top();
        assert_eq!(scroll.offset(), 40);

        scroll.set_layout(20, 10);
        assert_eq!(scroll.offset(), 10);
    }
}
