//! Dropdown scroll state.
//!
//! Keeps the highlighted row inside the visible window of the candidate panel.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget};

use crate::collaborator::RowScroller;

/// Scroll window over the dropdown rows.
///
/// # Example
///
/// ```rust
/// use tokenfield::render::ScrollState;
/// use tokenfield::RowScroller;
///
/// let mut scroll = ScrollState::new(30, 8); // 30 rows, 8 visible
///
/// scroll.scroll_row_into_view(20);
/// assert!(scroll.is_visible(20));
/// assert_eq!(scroll.offset(), 13);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    /// Total number of rows
    total: usize,
    /// Number of visible rows
    visible: usize,
    /// Current scroll offset
    offset: usize,
}

impl ScrollState {
    /// Create a new scroll state.
    pub fn new(total: usize, visible: usize) -> Self {
        Self {
            total,
            visible,
            offset: 0,
        }
    }

    /// Get the current scroll offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get the total number of rows.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Get the number of visible rows.
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Set the total number of rows.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.clamp_offset();
    }

    /// Set the number of visible rows.
    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible;
        self.clamp_offset();
    }

    /// Scroll back to the first row.
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Check if the row at `index` is currently visible.
    pub fn is_visible(&self, index: usize) -> bool {
        index >= self.offset && index < self.offset + self.visible
    }

    /// Check if a scrollbar is needed (total > visible).
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.visible
    }

    /// Range of rows currently in the window.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let start = self.offset;
        let end = (self.offset + self.visible).min(self.total);
        start..end
    }

    fn clamp_offset(&mut self) {
        if self.total <= self.visible {
            self.offset = 0;
        } else {
            self.offset = self.offset.min(self.total - self.visible);
        }
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(0, 8)
    }
}

impl RowScroller for ScrollState {
    fn scroll_row_into_view(&mut self, row: usize) {
        // Zero visible rows would underflow below
        if self.visible == 0 {
            return;
        }
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + self.visible {
            self.offset = row.saturating_sub(self.visible.saturating_sub(1));
        }
        self.clamp_offset();
    }
}

/// Render a vertical scrollbar for the given scroll state.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, scroll: &ScrollState, style: Style) {
    if !scroll.needs_scrollbar() || area.width == 0 || area.height == 0 {
        return;
    }

    let scrollable_range = scroll.total.saturating_sub(scroll.visible);
    let mut scrollbar_state = ScrollbarState::new(scrollable_range).position(scroll.offset);

    Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .track_symbol(Some("│"))
        .thumb_symbol("█")
        .thumb_style(style)
        .render(area, buf, &mut scrollbar_state);
}
