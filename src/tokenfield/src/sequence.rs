//! Ordered token storage with a single movable entry point.
//!
//! The cursor names the gap the text entry sits in:
//! - `-1` is before the first token (or the sequence is empty)
//! - `k` in `0..len` is immediately after the token at index `k`
//! - `len` is after the last token

use tracing::trace;

/// Cursor value for "before the first token".
pub const BEFORE_FIRST: isize = -1;

/// The selected tokens and the cursor that places the text entry among them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<String>,
    cursor: isize,
}

impl TokenSequence {
    /// Create a sequence seeded with `tokens`, cursor before the first token.
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            cursor: BEFORE_FIRST,
        }
    }

    /// The selected tokens in order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Current cursor position in `[-1, len]`.
    pub fn cursor(&self) -> isize {
        self.cursor
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no tokens are selected.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns true if `value` is already selected (exact match).
    pub fn contains(&self, value: &str) -> bool {
        self.tokens.iter().any(|t| t == value)
    }

    /// Insert `value` right after the cursor and move the cursor onto it.
    ///
    /// Returns the index the token was inserted at.
    pub fn insert_after_cursor(&mut self, value: impl Into<String>) -> usize {
        let index = ((self.cursor + 1).max(0) as usize).min(self.tokens.len());
        self.tokens.insert(index, value.into());
        self.cursor = index as isize;
        self.clamp();
        index
    }

    /// Remove the token at `index`. Out-of-range indices are a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        if index >= self.tokens.len() {
            return None;
        }
        let removed = self.tokens.remove(index);
        if self.cursor >= self.tokens.len() as isize {
            self.cursor = self.tokens.len() as isize - 1;
        }
        self.clamp();
        Some(removed)
    }

    /// Remove the token to the left of the entry point and keep the entry
    /// point in the same gap (cursor becomes `old_cursor - 1`).
    ///
    /// With the cursor at `len` nothing is removed; the cursor still moves left.
    pub fn remove_before_cursor(&mut self) -> Option<String> {
        if self.cursor == BEFORE_FIRST {
            return None;
        }
        let old = self.cursor;
        let removed = self.remove_at(old as usize);
        self.cursor = old - 1;
        self.clamp();
        removed
    }

    /// Move the entry point one gap to the left.
    pub fn move_cursor_left(&mut self) {
        self.cursor = (self.cursor - 1).max(BEFORE_FIRST);
        trace!(cursor = self.cursor, "cursor left");
    }

    /// Move the entry point one gap to the right.
    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.tokens.len() as isize);
        trace!(cursor = self.cursor, "cursor right");
    }

    /// Place the entry point directly after the token at `index`.
    pub fn set_cursor(&mut self, index: isize) {
        self.cursor = index;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.cursor = self.cursor.clamp(BEFORE_FIRST, self.tokens.len() as isize);
    }
}
