//! Interfaces the core consumes from the rendering layer.
//!
//! None of these affect token or highlight logic. They let a host measure
//! the text entry, keep the highlighted row visible, and answer whether a
//! focus target belongs to the control.

/// Something that can receive focus while the control is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// The single text entry.
    #[default]
    TextEntry,
    /// A selected token chip.
    Token(usize),
    /// A candidate row in the dropdown.
    Option(usize),
    /// The "add custom value" row.
    CustomEntry,
    /// Anything that is not part of the control.
    Outside,
}

/// Measures rendered text.
pub trait TextMeasure {
    /// Display width of `text` in the host's units.
    fn measure_text_width(&self, text: &str) -> usize;
}

/// Scrolls the candidate panel.
pub trait RowScroller {
    /// Make the row at `row` visible.
    fn scroll_row_into_view(&mut self, row: usize);
}

/// Answers control-containment questions for the deferred blur check.
pub trait FocusProbe {
    /// Returns true if `target` is part of the control.
    fn is_inside_control(&self, target: &FocusTarget) -> bool;
}

/// Probe that treats every target except [`FocusTarget::Outside`] as inside.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlFocus;

impl FocusProbe for ControlFocus {
    fn is_inside_control(&self, target: &FocusTarget) -> bool {
        !matches!(target, FocusTarget::Outside)
    }
}

impl<F> FocusProbe for F
where
    F: Fn(&FocusTarget) -> bool,
{
    fn is_inside_control(&self, target: &FocusTarget) -> bool {
        self(target)
    }
}
