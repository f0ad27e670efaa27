//! Chat message history.
//!
//! Backs the `LAST_MESSAGE` keyword and the `{{lastMessage}}` placeholder.
//! Only the text of each message is kept; who sent it does not matter to
//! scripts.

use std::collections::VecDeque;

/// Default number of messages kept.
pub const DEFAULT_HISTSIZE: usize = 100;

// ── MessageHistory ────────────────────────────────────────────────────────────

/// Bounded buffer of chat messages.
///
/// The newest entry is at index 0.
#[derive(Debug, Clone)]
pub struct MessageHistory {
    /// Past messages, newest first.
    entries: VecDeque<String>,
    /// Maximum number of entries to keep.
    max_size: usize,
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTSIZE)
    }
}

impl MessageHistory {
    /// Create an empty history with the given capacity.
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size: max_size.max(1),
        }
    }

    /// Number of entries stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record `text` as the most recent message.
    ///
    /// Unlike input history, consecutive duplicates are kept: two identical
    /// chat messages are still two messages.
    pub fn record(&mut self, text: impl Into<String>) {
        self.entries.push_front(text.into());
        self.entries.truncate(self.max_size);
    }

    /// The most recent message, or `""` if there is none.
    pub fn last(&self) -> &str {
        self.entries.front().map(String::as_str).unwrap_or("")
    }

    /// Change the capacity, dropping the oldest entries if necessary.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size.max(1);
        self.entries.truncate(self.max_size);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(lines: &[&str]) -> MessageHistory {
        let mut h = MessageHistory::new(10);
        for l in lines {
            h.record(*l);
        }
        h
    }

    #[test]
    fn empty_last_is_blank() {
        let h = MessageHistory::default();
        assert!(h.is_empty());
        assert_eq!(h.last(), "");
    }

    #[test]
    fn last_is_newest() {
        let h = hist(&["hello", "how are you?"]);
        assert_eq!(h.last(), "how are you?");
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn duplicates_are_kept() {
        let h = hist(&["hi", "hi"]);
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut h = MessageHistory::new(2);
        h.record("a");
        h.record("b");
        h.record("c");
        assert_eq!(h.len(), 2);
        assert_eq!(h.last(), "c");
    }

    #[test]
    fn shrink_capacity() {
        let mut h = hist(&["a", "b", "c"]);
        h.set_max_size(1);
        assert_eq!(h.len(), 1);
        assert_eq!(h.last(), "c");
        h.record("d");
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn zero_capacity_clamped() {
        let mut h = MessageHistory::new(0);
        h.record("x");
        assert_eq!(h.len(), 1);
    }
}
