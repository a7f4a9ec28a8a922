//! The interaction state machine.
//!
//! Every keyboard or pointer intent goes through [`InteractionController::dispatch`],
//! which is the only place token, query, and dropdown state change together.
//! Cursor clamping and highlight resets therefore happen in one spot.
//!
//! ```rust
//! use tokenfield::prelude::*;
//!
//! let config = TokenFieldConfig::new(["Red", "Green", "Blue"]);
//! let mut field = InteractionController::new(config);
//!
//! field.dispatch(Intent::Type("re".into()));
//! assert_eq!(field.candidates().options, vec!["Red".to_string(), "Green".to_string()]);
//!
//! field.dispatch(Intent::Enter);
//! assert_eq!(field.selected(), ["Red"]);
//! assert_eq!(field.cursor(), 0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use unicode_segmentation::UnicodeSegmentation;

use crate::collaborator::{FocusProbe, FocusTarget, TextMeasure};
use crate::config::TokenFieldConfig;
use crate::deferred::{DeferredCheck, DeferredQueue};
use crate::filter::{CandidateList, Row};
use crate::navigator::DropdownNavigator;
use crate::sequence::TokenSequence;

/// Columns reserved after the measured entry text for the caret.
pub const ENTRY_PADDING: usize = 1;

/// A user intent delivered to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Characters typed into the text entry.
    Type(String),
    /// Replace the whole query (paste, programmatic edit).
    SetQuery(String),
    /// Backspace in the text entry.
    Backspace,
    /// Move the entry point one token to the left.
    ArrowLeft,
    /// Move the entry point one token to the right.
    ArrowRight,
    /// Move the highlight up.
    ArrowUp,
    /// Move the highlight down.
    ArrowDown,
    /// Commit the highlighted (or first) candidate, or the query as a custom value.
    Enter,
    /// Pointer click on the token at this index.
    ClickToken(usize),
    /// Pointer click on the remove mark of the token at this index.
    RemoveToken(usize),
    /// Pointer click on the dropdown row at this index.
    ClickOption(usize),
    /// Pointer click on the "add custom value" row.
    ClickCustomEntry,
    /// Focus moved to a target.
    Focus(FocusTarget),
    /// The text entry lost focus.
    Blur,
}

/// What the host has to do after a dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reaction {
    /// The intent applied to the current state.
    pub handled: bool,
    /// The selection changed and change handlers were notified.
    pub changed: bool,
    /// Row the host should scroll into view.
    pub scroll_to: Option<usize>,
    /// Focus should return to the text entry.
    pub refocus: bool,
    /// A deferred check was scheduled; call [`InteractionController::run_deferred`]
    /// on the next turn of the event loop.
    pub deferred: bool,
}

impl Reaction {
    fn ignored() -> Self {
        Self::default()
    }

    fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }
}

/// Serializable state record of one control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Selected tokens in order.
    pub selected: Vec<String>,
    /// Entry point position in `[-1, selected.len()]`.
    pub cursor: isize,
    /// Text in the entry.
    pub query: String,
    /// Whether the dropdown is visible.
    pub is_open: bool,
    /// Highlighted dropdown row.
    pub highlight: Option<usize>,
}

/// Callback receiving the full selection after every change.
pub type ChangeHandler = Box<dyn FnMut(&[String])>;

/// Orchestrates the token sequence, the candidate filter, and the dropdown.
pub struct InteractionController {
    config: TokenFieldConfig,
    sequence: TokenSequence,
    query: String,
    navigator: DropdownNavigator,
    active: FocusTarget,
    deferred: DeferredQueue<DeferredCheck>,
    change_handlers: Vec<ChangeHandler>,
}

impl fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionController")
            .field("sequence", &self.sequence)
            .field("query", &self.query)
            .field("navigator", &self.navigator)
            .field("active", &self.active)
            .field("deferred", &self.deferred)
            .field("change_handlers", &self.change_handlers.len())
            .finish_non_exhaustive()
    }
}

impl InteractionController {
    /// Create a controller seeded from `config.initial_value`.
    pub fn new(config: TokenFieldConfig) -> Self {
        let sequence = TokenSequence::new(config.initial_value.clone());
        Self {
            config,
            sequence,
            query: String::new(),
            navigator: DropdownNavigator::new(),
            active: FocusTarget::Outside,
            deferred: DeferredQueue::new(),
            change_handlers: Vec::new(),
        }
    }

    /// Register a change handler (builder form).
    pub fn with_on_change<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&[String]) + 'static,
    {
        self.on_change(handler);
        self
    }

    /// Register a change handler.
    pub fn on_change<F>(&mut self, handler: F)
    where
        F: FnMut(&[String]) + 'static,
    {
        self.change_handlers.push(Box::new(handler));
    }

    /// The configuration this controller was built with.
    pub fn config(&self) -> &TokenFieldConfig {
        &self.config
    }

    /// Selected tokens in order.
    pub fn selected(&self) -> &[String] {
        self.sequence.tokens()
    }

    /// Entry point position in `[-1, selected.len()]`.
    pub fn cursor(&self) -> isize {
        self.sequence.cursor()
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the dropdown is visible.
    pub fn is_open(&self) -> bool {
        self.navigator.is_open()
    }

    /// Highlighted dropdown row.
    pub fn highlight(&self) -> Option<usize> {
        self.navigator.highlight()
    }

    /// Last focus target reported to the controller.
    pub fn active_target(&self) -> FocusTarget {
        self.active
    }

    /// Whether a deferred check is waiting for [`Self::run_deferred`].
    pub fn has_deferred(&self) -> bool {
        self.deferred.has_pending()
    }

    /// The candidate rows for the current state.
    pub fn candidates(&self) -> CandidateList {
        CandidateList::compute(
            &self.config.options,
            self.sequence.tokens(),
            &self.query,
            self.config.keep_options_on_select,
            self.config.allow_custom_options,
        )
    }

    /// Width the text entry needs: the query, or the placeholder when the
    /// query is empty, plus room for the caret.
    pub fn entry_width(&self, measure: &dyn TextMeasure) -> usize {
        let text = if self.query.is_empty() {
            self.config.placeholder.as_deref().unwrap_or("")
        } else {
            self.query.as_str()
        };
        measure.measure_text_width(text) + ENTRY_PADDING
    }

    /// Apply one intent.
    pub fn dispatch(&mut self, intent: Intent) -> Reaction {
        trace!(?intent, "dispatch");
        match intent {
            Intent::Type(text) => {
                if text.is_empty() {
                    return Reaction::ignored();
                }
                let mut query = std::mem::take(&mut self.query);
                query.push_str(&text);
                self.set_query(query)
            }
            Intent::SetQuery(text) => self.set_query(text),
            Intent::Backspace => self.backspace(),
            Intent::ArrowLeft => {
                if self.sequence.cursor() > -1 {
                    self.sequence.move_cursor_left();
                    Reaction::handled()
                } else {
                    Reaction::ignored()
                }
            }
            Intent::ArrowRight => {
                if self.sequence.cursor() < self.sequence.len() as isize {
                    self.sequence.move_cursor_right();
                    Reaction::handled()
                } else {
                    Reaction::ignored()
                }
            }
            Intent::ArrowDown => self.step(true),
            Intent::ArrowUp => self.step(false),
            Intent::Enter => self.enter(),
            Intent::ClickToken(index) => {
                if index >= self.sequence.len() {
                    return Reaction::ignored();
                }
                self.sequence.set_cursor(index as isize);
                self.focus_entry();
                Reaction {
                    handled: true,
                    refocus: true,
                    ..Reaction::default()
                }
            }
            Intent::RemoveToken(index) => self.remove(index),
            Intent::ClickOption(index) => match self.candidates().row(index) {
                Some(row) => self.commit(row),
                None => Reaction::ignored(),
            },
            Intent::ClickCustomEntry => match self.candidates().custom_entry {
                Some(value) => self.commit(Row::Custom(value)),
                None => Reaction::ignored(),
            },
            Intent::Focus(target) => {
                self.active = target;
                if target == FocusTarget::TextEntry {
                    self.navigator.open();
                }
                Reaction::handled()
            }
            Intent::Blur => {
                self.active = FocusTarget::Outside;
                self.deferred.schedule(DeferredCheck::BlurClose);
                Reaction {
                    handled: true,
                    deferred: true,
                    ..Reaction::default()
                }
            }
        }
    }

    /// Run the checks deferred by earlier intents.
    ///
    /// Returns true if the dropdown was closed.
    pub fn run_deferred(&mut self, probe: &dyn FocusProbe) -> bool {
        let mut closed = false;
        for check in self.deferred.drain() {
            match check {
                DeferredCheck::BlurClose => {
                    if probe.is_inside_control(&self.active) {
                        debug!(target = ?self.active, "focus stayed inside control");
                    } else if self.navigator.is_open() {
                        self.navigator.close();
                        closed = true;
                        debug!("focus left control, dropdown closed");
                    }
                }
            }
        }
        closed
    }

    /// Capture the state record.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            selected: self.sequence.tokens().to_vec(),
            cursor: self.sequence.cursor(),
            query: self.query.clone(),
            is_open: self.navigator.is_open(),
            highlight: self.navigator.highlight(),
        }
    }

    /// Replace the state with `snapshot`. Cursor and highlight are clamped
    /// to the restored data; change handlers are not notified.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.sequence = TokenSequence::new(snapshot.selected);
        self.sequence.set_cursor(snapshot.cursor);
        self.query = snapshot.query;
        self.navigator.restore(snapshot.is_open, snapshot.highlight);
        let visible = self.candidates().visible_count();
        self.navigator.clamp_highlight(visible);
    }

    fn set_query(&mut self, query: String) -> Reaction {
        self.query = query;
        self.navigator.open();
        self.navigator.reset_highlight();
        Reaction::handled()
    }

    fn backspace(&mut self) -> Reaction {
        if !self.query.is_empty() {
            let keep = self
                .query
                .grapheme_indices(true)
                .next_back()
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            let mut query = std::mem::take(&mut self.query);
            query.truncate(keep);
            return self.set_query(query);
        }
        if self.sequence.cursor() == -1 {
            return Reaction::ignored();
        }
        let removed = self.sequence.remove_before_cursor();
        let changed = removed.is_some();
        if let Some(value) = removed {
            debug!(%value, cursor = self.sequence.cursor(), "token removed by backspace");
            self.after_removal();
        }
        Reaction {
            handled: true,
            changed,
            ..Reaction::default()
        }
    }

    fn step(&mut self, down: bool) -> Reaction {
        let visible = self.candidates().visible_count();
        if !self.navigator.is_open() || visible == 0 {
            return Reaction::ignored();
        }
        let highlight = if down {
            self.navigator.step_down(visible)
        } else {
            self.navigator.step_up(visible)
        };
        Reaction {
            handled: true,
            scroll_to: highlight,
            ..Reaction::default()
        }
    }

    fn enter(&mut self) -> Reaction {
        let candidates = self.candidates();
        if self.navigator.is_open() && !candidates.options.is_empty() {
            return match self.navigator.resolve_selection(&candidates) {
                Some(row) => self.commit(row),
                None => Reaction::ignored(),
            };
        }
        match candidates.custom_entry {
            Some(value) => self.commit(Row::Custom(value)),
            None => Reaction::ignored(),
        }
    }

    fn commit(&mut self, row: Row) -> Reaction {
        let custom = row.is_custom();
        let value = match row {
            Row::Option(value) | Row::Custom(value) => value,
        };
        let index = self.sequence.insert_after_cursor(value);
        debug!(
            value = %self.sequence.tokens()[index],
            index,
            custom,
            "token committed"
        );
        self.query.clear();
        self.navigator.reset_highlight();
        self.focus_entry();
        self.notify();
        Reaction {
            handled: true,
            changed: true,
            refocus: true,
            ..Reaction::default()
        }
    }

    fn remove(&mut self, index: usize) -> Reaction {
        match self.sequence.remove_at(index) {
            Some(value) => {
                debug!(%value, index, cursor = self.sequence.cursor(), "token removed");
                self.after_removal();
                Reaction {
                    handled: true,
                    changed: true,
                    ..Reaction::default()
                }
            }
            None => Reaction::ignored(),
        }
    }

    fn after_removal(&mut self) {
        let visible = self.candidates().visible_count();
        self.navigator.clamp_highlight(visible);
        self.notify();
    }

    fn focus_entry(&mut self) {
        self.active = FocusTarget::TextEntry;
        self.navigator.open();
    }

    fn notify(&mut self) {
        let selected = self.sequence.tokens();
        for handler in &mut self.change_handlers {
            handler(selected);
        }
    }
}
