//! Dropdown visibility and highlight navigation.
//!
//! The highlight addresses rows of a [`CandidateList`], including the
//! custom-entry row when it is present. `None` means nothing is highlighted.

use crate::filter::{CandidateList, Row};
use tracing::trace;

/// Visibility and highlight state of the candidate panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropdownNavigator {
    is_open: bool,
    highlight: Option<usize>,
}

impl DropdownNavigator {
    /// Create a closed navigator with nothing highlighted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the candidate panel is visible.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// The highlighted row, if any.
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Show the candidate panel.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Hide the candidate panel.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Clear the highlight.
    pub fn reset_highlight(&mut self) {
        self.highlight = None;
    }

    /// Move the highlight down, wrapping past the last row to the first.
    ///
    /// No-op when there are no rows.
    pub fn step_down(&mut self, visible_count: usize) -> Option<usize> {
        if visible_count == 0 {
            return self.highlight;
        }
        let next = match self.highlight {
            Some(i) if i + 1 < visible_count => i + 1,
            _ => 0,
        };
        self.highlight = Some(next);
        trace!(highlight = next, "highlight down");
        self.highlight
    }

    /// Move the highlight up, wrapping from the first row (or from nothing)
    /// to the last.
    ///
    /// No-op when there are no rows.
    pub fn step_up(&mut self, visible_count: usize) -> Option<usize> {
        if visible_count == 0 {
            return self.highlight;
        }
        let next = match self.highlight {
            Some(i) if i > 0 && i < visible_count => i - 1,
            _ => visible_count - 1,
        };
        self.highlight = Some(next);
        trace!(highlight = next, "highlight up");
        self.highlight
    }

    /// The row an Enter press commits: the highlighted row, else the first
    /// candidate.
    pub fn resolve_selection(&self, candidates: &CandidateList) -> Option<Row> {
        match self.highlight {
            Some(index) => candidates.row(index),
            None => candidates.options.first().cloned().map(Row::Option),
        }
    }

    /// Drop a highlight that no longer addresses a row.
    pub(crate) fn clamp_highlight(&mut self, visible_count: usize) {
        if self.highlight.is_some_and(|i| i >= visible_count) {
            self.highlight = None;
        }
    }

    pub(crate) fn restore(&mut self, is_open: bool, highlight: Option<usize>) {
        self.is_open = is_open;
        self.highlight = highlight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(options: &[&str], custom: Option<&str>) -> CandidateList {
        CandidateList {
            options: options.iter().map(|s| s.to_string()).collect(),
            custom_entry: custom.map(str::to_string),
        }
    }

    #[test]
    fn test_open_close() {
        let mut nav = DropdownNavigator::new();
        assert!(!nav.is_open());
        nav.open();
        assert!(nav.is_open());
        nav.close();
        assert!(!nav.is_open());
    }

    #[test]
    fn test_step_down_wraps() {
        let mut nav = DropdownNavigator::new();
        assert_eq!(nav.step_down(3), Some(0));
        assert_eq!(nav.step_down(3), Some(1));
        assert_eq!(nav.step_down(3), Some(2));
        assert_eq!(nav.step_down(3), Some(0)); // Wrapped
    }

    #[test]
    fn test_step_up_wraps() {
        let mut nav = DropdownNavigator::new();
        assert_eq!(nav.step_up(3), Some(2)); // From nothing to last
        assert_eq!(nav.step_up(3), Some(1));
        assert_eq!(nav.step_up(3), Some(0));
        assert_eq!(nav.step_up(3), Some(2)); // Wrapped
    }

    #[test]
    fn test_wrap_law_for_all_sizes() {
        for count in 1..8 {
            let mut nav = DropdownNavigator::new();
            nav.restore(true, Some(count - 1));
            assert_eq!(nav.step_down(count), Some(0));
            assert_eq!(nav.step_up(count), Some(count - 1));
        }
    }

    #[test]
    fn test_single_row() {
        let mut nav = DropdownNavigator::new();
        assert_eq!(nav.step_down(1), Some(0));
        assert_eq!(nav.step_down(1), Some(0));
        assert_eq!(nav.step_up(1), Some(0));
    }

    #[test]
    fn test_empty_is_noop() {
        let mut nav = DropdownNavigator::new();
        assert_eq!(nav.step_down(0), None);
        assert_eq!(nav.step_up(0), None);
    }

    #[test]
    fn test_reset_highlight() {
        let mut nav = DropdownNavigator::new();
        nav.step_down(2);
        nav.reset_highlight();
        assert_eq!(nav.highlight(), None);
    }

    #[test]
    fn test_resolve_selection() {
        let list = candidates(&["Red", "Green"], Some("Re"));
        let mut nav = DropdownNavigator::new();
        assert_eq!(nav.resolve_selection(&list), Some(Row::Option("Red".into())));

        nav.step_down(list.visible_count());
        nav.step_down(list.visible_count());
        assert_eq!(
            nav.resolve_selection(&list),
            Some(Row::Option("Green".into()))
        );

        nav.step_down(list.visible_count());
        assert_eq!(nav.resolve_selection(&list), Some(Row::Custom("Re".into())));

        let empty = candidates(&[], None);
        assert_eq!(DropdownNavigator::new().resolve_selection(&empty), None);
    }

    #[test]
    fn test_clamp_highlight() {
        let mut nav = DropdownNavigator::new();
        nav.restore(true, Some(4));
        nav.clamp_highlight(5);
        assert_eq!(nav.highlight(), Some(4));
        nav.clamp_highlight(2);
        assert_eq!(nav.highlight(), None);
    }
}
