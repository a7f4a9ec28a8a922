//! Deferred decisions.
//!
//! A decision scheduled here runs after the event that scheduled it, and
//! after any events already dispatched in the same turn, when the host
//! drains the queue. This replaces a zero-delay timer: the blur handler
//! cannot know the new focus target yet, so the close decision waits.

use std::collections::VecDeque;

/// Checks the controller can defer to the next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredCheck {
    /// Close the dropdown unless focus ended up inside the control.
    BlurClose,
}

/// FIFO queue of scheduled decisions.
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    pending: VecDeque<T>,
}

impl<T: PartialEq> DeferredQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Schedule `task`. A task equal to one already pending is coalesced.
    ///
    /// Returns true if the task was newly queued.
    pub fn schedule(&mut self, task: T) -> bool {
        if self.pending.contains(&task) {
            return false;
        }
        self.pending.push_back(task);
        true
    }

    /// Take every task scheduled so far, oldest first.
    pub fn drain(&mut self) -> Vec<T> {
        self.pending.drain(..).collect()
    }

    /// Whether anything is waiting.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of waiting tasks.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T: PartialEq> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_and_drain() {
        let mut queue = DeferredQueue::new();
        assert!(queue.schedule(1));
        assert!(queue.schedule(2));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain(), vec![1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_duplicates_coalesce() {
        let mut queue = DeferredQueue::new();
        assert!(queue.schedule(DeferredCheck::BlurClose));
        assert!(!queue.schedule(DeferredCheck::BlurClose));
        assert_eq!(queue.drain(), vec![DeferredCheck::BlurClose]);
        assert!(!queue.has_pending());
    }
}
