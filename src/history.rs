// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Undo/redo over immutable snapshots.
//!
//! The manager is synchronous; `push` calls are applied in the order issued.
//! An async adaptation must serialize pushes through a single writer to keep
//! `past`/`future` consistent.

use std::collections::VecDeque;

/// Generic three-stack history: everything before the present, the present,
/// everything undone after it.
///
/// `T` is treated as an immutable snapshot value; the manager never mutates
/// a stored snapshot, it only moves whole values between stacks.
#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    past: VecDeque<T>,
    present: T,
    future: VecDeque<T>,
    max_past: Option<usize>,
}

impl<T: Clone + PartialEq> History<T> {
    pub fn new(initial: T) -> Self {
        Self {
            past: VecDeque::new(),
            present: initial,
            future: VecDeque::new(),
            max_past: None,
        }
    }

    /// Bound the undo depth; oldest entries are dropped past `max_past`.
    /// Unbounded when not configured.
    pub fn with_max_past(mut self, max_past: usize) -> Self {
        self.max_past = Some(max_past);
        self
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    /// Commit a new present. The old present joins `past` and any redo
    /// entries are invalidated.
    pub fn push(&mut self, state: T) {
        let previous = std::mem::replace(&mut self.present, state);
        self.past.push_back(previous);
        if let Some(max_past) = self.max_past {
            while self.past.len() > max_past {
                self.past.pop_front();
            }
        }
        self.future.clear();
    }

    /// Step back one snapshot; no-op when there is no past.
    pub fn undo(&mut self) {
        let Some(previous) = self.past.pop_back() else {
            return;
        };
        let undone = std::mem::replace(&mut self.present, previous);
        self.future.push_front(undone);
    }

    /// Step forward one undone snapshot; no-op when there is no future.
    pub fn redo(&mut self) {
        let Some(next) = self.future.pop_front() else {
            return;
        };
        let redone = std::mem::replace(&mut self.present, next);
        self.past.push_back(redone);
    }

    /// Replace the present and drop both stacks (used on load).
    pub fn reset(&mut self, state: T) {
        self.past.clear();
        self.future.clear();
        self.present = state;
    }
}

#[cfg(test)]
mod tests {
    use super::History;

    #[test]
    fn undo_cancels_the_most_recent_push_exactly() {
        let mut history = History::new(0);
        history.push(1);
        history.push(2);

        history.undo();
        assert_eq!(*history.present(), 1);
        history.undo();
        assert_eq!(*history.present(), 0);

        // bottomed out: further undo is a no-op
        history.undo();
        assert_eq!(*history.present(), 0);
        assert!(!history.can_undo());
    }

    #[test]
    fn redo_restores_the_exact_snapshot() {
        let mut history = History::new("a".to_owned());
        history.push("b".to_owned());
        history.push("c".to_owned());

        history.undo();
        history.undo();
        assert_eq!(history.present(), "a");

        history.redo();
        assert_eq!(history.present(), "b");
        history.redo();
        assert_eq!(history.present(), "c");

        history.redo();
        assert_eq!(history.present(), "c");
        assert!(!history.can_redo());
    }

    #[test]
    fn push_after_undo_discards_the_future() {
        let mut history = History::new(0);
        history.push(1);
        history.push(2);

        history.undo();
        assert!(history.can_redo());

        history.push(9);
        assert!(!history.can_redo());
        assert_eq!(*history.present(), 9);

        history.undo();
        assert_eq!(*history.present(), 1);
    }

    #[test]
    fn reset_clears_both_stacks() {
        let mut history = History::new(0);
        history.push(1);
        history.undo();
        assert!(history.can_redo());

        history.reset(7);
        assert_eq!(*history.present(), 7);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn bounded_history_drops_oldest_entries_only() {
        let mut history = History::new(0).with_max_past(2);
        history.push(1);
        history.push(2);
        history.push(3);

        assert_eq!(history.past_len(), 2);
        history.undo();
        assert_eq!(*history.present(), 2);
        history.undo();
        assert_eq!(*history.present(), 1);
        history.undo();
        // 0 was dropped by the bound
        assert_eq!(*history.present(), 1);
    }
}
