//! Component wrapper for hosting the token field in a TUI.
//!
//! [`TokenFieldComponent`] owns an [`InteractionController`] together with the
//! dropdown [`ScrollState`], feeds it crossterm key, paste and mouse events,
//! and applies each [`Reaction`] (scrolling, refocus) on the host side.

use std::cell::Cell;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use tracing::trace;

use crate::collaborator::{ControlFocus, FocusTarget, RowScroller};
use crate::config::TokenFieldConfig;
use crate::controller::{InteractionController, Intent, Reaction};
use crate::keymap;
use crate::render::{ColorScheme, FieldLayout, Hit, ScrollState, TokenField};

/// Result of handling an event in a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentResult<T = ()> {
    /// Component handled the event, continue displaying
    Handled,
    /// Component did not handle the event, propagate to parent
    NotHandled,
    /// The value changed; carries the new value
    Changed(T),
}

impl<T> ComponentResult<T> {
    /// Returns true if the component handled the event.
    pub fn is_handled(&self) -> bool {
        matches!(self, ComponentResult::Handled | ComponentResult::Changed(_))
    }

    /// Maps the inner value if Changed.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ComponentResult<U> {
        match self {
            ComponentResult::Handled => ComponentResult::Handled,
            ComponentResult::NotHandled => ComponentResult::NotHandled,
            ComponentResult::Changed(v) => ComponentResult::Changed(f(v)),
        }
    }
}

/// Focus state of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    /// Component is not focused
    #[default]
    Unfocused,
    /// Component has focus
    Focused,
    /// Component has focus and its dropdown is open
    Editing,
}

impl FocusState {
    /// Returns true if the component has any form of focus.
    pub fn has_focus(&self) -> bool {
        !matches!(self, FocusState::Unfocused)
    }
}

/// Interface a host uses to drive an interactive widget.
pub trait Component {
    /// The value reported when it changes.
    type Output;

    /// Render the component to the buffer.
    fn render(&self, area: Rect, buf: &mut Buffer);

    /// Handle a key event.
    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<Self::Output>;

    /// Returns the current focus state of the component.
    fn focus_state(&self) -> FocusState;

    /// Set the focus state of the component.
    fn set_focus(&mut self, focused: bool);

    /// Returns key hints to display for this component.
    ///
    /// Each tuple is (key_label, description).
    fn key_hints(&self) -> Vec<(&'static str, &'static str)>;

    /// Handle pasted text. Returns true if handled.
    fn handle_paste(&mut self, _text: &str) -> bool {
        false
    }

    /// Returns the desired size of the component.
    ///
    /// Returns (min_width, min_height, max_width, max_height).
    fn desired_size(&self) -> (u16, u16, u16, u16) {
        (0, 0, u16::MAX, u16::MAX)
    }
}

/// A token field ready to be dropped into a ratatui app.
#[derive(Debug)]
pub struct TokenFieldComponent {
    controller: InteractionController,
    scroll: ScrollState,
    colors: ColorScheme,
    focused: bool,
    // Area of the last render, for mouse hit testing
    last_area: Cell<Rect>,
}

impl TokenFieldComponent {
    /// Create a component from a configuration.
    pub fn new(config: TokenFieldConfig) -> Self {
        Self::from_controller(InteractionController::new(config))
    }

    /// Wrap an existing controller.
    pub fn from_controller(controller: InteractionController) -> Self {
        let rows = controller.config().max_visible_options;
        Self {
            controller,
            scroll: ScrollState::new(0, rows),
            colors: ColorScheme::default(),
            focused: false,
            last_area: Cell::new(Rect::default()),
        }
    }

    /// Set the colors.
    pub fn with_colors(mut self, colors: ColorScheme) -> Self {
        self.colors = colors;
        self
    }

    /// The wrapped controller.
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Mutable access, for registering change handlers.
    pub fn controller_mut(&mut self) -> &mut InteractionController {
        &mut self.controller
    }

    /// Selected tokens in order.
    pub fn selected(&self) -> &[String] {
        self.controller.selected()
    }

    /// Dropdown scroll state.
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Layout for the last rendered area.
    pub fn layout(&self) -> FieldLayout {
        FieldLayout::compute(&self.controller, &self.scroll, self.last_area.get())
    }

    /// Dispatch an intent and apply the reaction.
    pub fn dispatch(&mut self, intent: Intent) -> ComponentResult<Vec<String>> {
        let reaction = self.controller.dispatch(intent);
        self.apply(reaction)
    }

    /// Handle a mouse event against the last rendered layout.
    ///
    /// A left click outside the control blurs it; the dropdown closes on the
    /// next [`Self::run_deferred`] unless focus came back in the meantime.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> ComponentResult<Vec<String>> {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return ComponentResult::NotHandled;
        }

        let Some(hit) = self.layout().hit_test(mouse.column, mouse.row) else {
            if !self.focused {
                return ComponentResult::NotHandled;
            }
            self.set_focus(false);
            return ComponentResult::Handled;
        };
        trace!(?hit, column = mouse.column, row = mouse.row, "click");

        let (target, intent) = match hit {
            Hit::Token(index) => (FocusTarget::Token(index), Some(Intent::ClickToken(index))),
            Hit::RemoveToken(index) => (FocusTarget::Token(index), Some(Intent::RemoveToken(index))),
            Hit::Row(index) => (FocusTarget::Option(index), Some(Intent::ClickOption(index))),
            Hit::CustomRow => (FocusTarget::CustomEntry, Some(Intent::ClickCustomEntry)),
            Hit::TextEntry | Hit::Field => (FocusTarget::TextEntry, None),
        };

        self.move_focus(target);
        let Some(intent) = intent else {
            return ComponentResult::Handled;
        };
        let removal = matches!(intent, Intent::RemoveToken(_));
        match self.dispatch(intent) {
            ComponentResult::NotHandled => ComponentResult::Handled,
            result => {
                // The removed chip can't hold focus
                if removal && matches!(result, ComponentResult::Changed(_)) {
                    self.controller.dispatch(Intent::Focus(FocusTarget::TextEntry));
                }
                result
            }
        }
    }

    /// Run deferred checks with control-local focus semantics.
    ///
    /// Call once per turn of the event loop. Returns true if the dropdown closed.
    pub fn run_deferred(&mut self) -> bool {
        let closed = self.controller.run_deferred(&ControlFocus);
        if closed {
            self.scroll.scroll_to_top();
        }
        closed
    }

    // Focus leaving the entry for another target blurs it first, like a
    // pointer press does in a browser.
    fn move_focus(&mut self, target: FocusTarget) {
        if self.controller.active_target() == FocusTarget::TextEntry && target != FocusTarget::TextEntry {
            self.controller.dispatch(Intent::Blur);
        }
        self.controller.dispatch(Intent::Focus(target));
        self.focused = true;
        self.sync_scroll();
    }

    fn apply(&mut self, reaction: Reaction) -> ComponentResult<Vec<String>> {
        self.sync_scroll();
        if let Some(row) = reaction.scroll_to {
            self.scroll.scroll_row_into_view(row);
        }
        if reaction.refocus {
            self.focused = true;
        }

        if reaction.changed {
            ComponentResult::Changed(self.controller.selected().to_vec())
        } else if reaction.handled {
            ComponentResult::Handled
        } else {
            ComponentResult::NotHandled
        }
    }

    fn sync_scroll(&mut self) {
        let rows = self
            .layout()
            .dropdown
            .map(|frame| frame.height.saturating_sub(2) as usize)
            .unwrap_or(self.controller.config().max_visible_options);
        self.scroll.set_visible(rows);
        self.scroll.set_total(self.controller.candidates().visible_count());
        if self.controller.highlight().is_none() {
            self.scroll.scroll_to_top();
        }
    }
}

impl Component for TokenFieldComponent {
    type Output = Vec<String>;

    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.last_area.set(area);
        TokenField::new(&self.controller, &self.scroll)
            .colors(self.colors)
            .focused(self.focused)
            .render(area, buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<Self::Output> {
        match keymap::intent_for_key(key) {
            Some(intent) => self.dispatch(intent),
            None => ComponentResult::NotHandled,
        }
    }

    fn focus_state(&self) -> FocusState {
        match (self.focused, self.controller.is_open()) {
            (false, _) => FocusState::Unfocused,
            (true, true) => FocusState::Editing,
            (true, false) => FocusState::Focused,
        }
    }

    fn set_focus(&mut self, focused: bool) {
        if focused {
            self.move_focus(FocusTarget::TextEntry);
        } else if self.focused {
            self.controller.dispatch(Intent::Blur);
            self.focused = false;
        }
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        keymap::key_hints()
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        // The entry is single-line
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        self.dispatch(Intent::Type(text)).is_handled()
    }

    fn desired_size(&self) -> (u16, u16, u16, u16) {
        let config = self.controller.config();
        let lines = u16::try_from(config.max_lines).unwrap_or(u16::MAX);
        let dropdown = u16::try_from(config.max_visible_options)
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        (10, lines, u16::MAX, lines.saturating_add(dropdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn rendered(component: &TokenFieldComponent, width: u16, height: u16) {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        component.render(area, &mut buf);
    }

    #[test]
    fn test_component_result() {
        assert!(ComponentResult::<()>::Handled.is_handled());
        assert!(ComponentResult::Changed(1).is_handled());
        assert!(!ComponentResult::<()>::NotHandled.is_handled());
        assert_eq!(ComponentResult::Changed(2).map(|v| v * 2), ComponentResult::Changed(4));
    }

    #[test]
    fn test_focus_state() {
        let mut field = TokenFieldComponent::new(TokenFieldConfig::new(["a"]));
        assert_eq!(field.focus_state(), FocusState::Unfocused);
        field.set_focus(true);
        assert_eq!(field.focus_state(), FocusState::Editing);
        field.set_focus(false);
        assert!(field.run_deferred());
        assert_eq!(field.focus_state(), FocusState::Unfocused);
    }

    #[test]
    fn test_typing_and_enter() {
        let mut field = TokenFieldComponent::new(TokenFieldConfig::new(["Red", "Green"]));
        field.set_focus(true);
        assert_eq!(field.handle_key(key(KeyCode::Char('g'))), ComponentResult::Handled);
        assert_eq!(
            field.handle_key(key(KeyCode::Enter)),
            ComponentResult::Changed(vec!["Green".to_string()])
        );
        assert_eq!(field.handle_key(key(KeyCode::Esc)), ComponentResult::NotHandled);
    }

    #[test]
    fn test_arrow_keeps_highlight_visible() {
        let mut field = TokenFieldComponent::new(
            TokenFieldConfig::new(["a", "b", "c", "d", "e"]).with_max_visible_options(2),
        );
        rendered(&field, 20, 10);
        field.set_focus(true);
        field.handle_key(key(KeyCode::Up)); // Wraps to the last row
        assert_eq!(field.controller().highlight(), Some(4));
        assert!(field.scroll().is_visible(4));
        assert_eq!(field.scroll().offset(), 3);
    }

    #[test]
    fn test_paste_strips_newlines() {
        let mut field = TokenFieldComponent::new(TokenFieldConfig::new(["a"]));
        assert!(field.handle_paste("to\nken"));
        assert_eq!(field.controller().query(), "token");
    }

    #[test]
    fn test_click_option_keeps_dropdown_open() {
        let mut field = TokenFieldComponent::new(TokenFieldConfig::new(["Red", "Green", "Blue"]));
        rendered(&field, 30, 10);
        field.set_focus(true);

        // Entry on row 0, dropdown frame from row 1, first option on row 2
        let result = field.handle_mouse(click(3, 3));
        assert_eq!(result, ComponentResult::Changed(vec!["Green".to_string()]));
        assert!(!field.run_deferred());
        assert!(field.controller().is_open());
        assert_eq!(field.controller().active_target(), FocusTarget::TextEntry);
    }

    #[test]
    fn test_click_custom_row() {
        let mut field =
            TokenFieldComponent::new(TokenFieldConfig::new(["Red"]).with_custom_options(true));
        rendered(&field, 30, 10);
        field.set_focus(true);
        field.handle_key(key(KeyCode::Char('Z')));

        // No catalog match, so the custom row is the first row
        let result = field.handle_mouse(click(3, 2));
        assert_eq!(result, ComponentResult::Changed(vec!["Z".to_string()]));
    }

    #[test]
    fn test_click_token_and_remove_mark() {
        let mut field = TokenFieldComponent::new(
            TokenFieldConfig::new(["Red", "Blue"]).with_initial_value(["Red", "Blue"]),
        );
        rendered(&field, 30, 1);

        // Entry at 0, Red at 2..7, Blue at 8..14
        assert_eq!(field.handle_mouse(click(9, 0)), ComponentResult::Handled);
        assert_eq!(field.controller().cursor(), 1);

        // The entry moved after Red, so Blue starts at 6 and Red's mark is at 4
        let result = field.handle_mouse(click(4, 0));
        assert_eq!(result, ComponentResult::Changed(vec!["Blue".to_string()]));
        assert_eq!(field.controller().active_target(), FocusTarget::TextEntry);
        assert!(!field.run_deferred());
        assert!(field.controller().is_open());
    }

    #[test]
    fn test_desired_size_saturates() {
        let field = TokenFieldComponent::new(
            TokenFieldConfig::new(["a"])
                .with_max_lines(100_000)
                .with_max_visible_options(u16::MAX as usize),
        );
        assert_eq!(field.desired_size(), (10, u16::MAX, u16::MAX, u16::MAX));
    }

    #[test]
    fn test_click_outside_closes_next_turn() {
        let mut field = TokenFieldComponent::new(TokenFieldConfig::new(["a"]));
        rendered(&field, 20, 5);
        field.set_focus(true);
        assert_eq!(field.handle_mouse(click(10, 20)), ComponentResult::Handled);
        assert!(field.controller().is_open());
        assert!(field.run_deferred());
        assert!(!field.controller().is_open());
        assert_eq!(field.handle_mouse(click(10, 20)), ComponentResult::NotHandled);
    }

    #[test]
    fn test_non_left_clicks_ignored() {
        let mut field = TokenFieldComponent::new(TokenFieldConfig::new(["a"]));
        let mut event = click(0, 0);
        event.kind = MouseEventKind::Moved;
        assert_eq!(field.handle_mouse(event), ComponentResult::NotHandled);
    }

    #[test]
    fn test_desired_size() {
        let field = TokenFieldComponent::new(TokenFieldConfig::new(["a"]).with_max_lines(2));
        assert_eq!(field.desired_size(), (10, 2, u16::MAX, 12));
    }
}
