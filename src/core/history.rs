//! Navigable log of executed command lines.

use std::collections::VecDeque;

/// Ordered history of executed lines with a navigation cursor.
///
/// The cursor is `None` while no navigation is in progress ("fresh"), and
/// otherwise indexes the entry last returned by [`previous`](Self::previous)
/// or [`next`](Self::next). Navigation clamps at both ends and never wraps.
///
/// # Examples
///
/// ```
/// use dev_console::HistoryBuffer;
///
/// let mut history = HistoryBuffer::new();
/// history.append("help");
/// history.append("echo hi");
///
/// assert_eq!(history.previous(), "echo hi");
/// assert_eq!(history.previous(), "help");
/// assert_eq!(history.previous(), "help"); // clamped at the oldest entry
/// assert_eq!(history.next(), "echo hi");
/// assert_eq!(history.next(), "");         // back to fresh
/// ```
#[derive(Debug, Clone, Default)]
pub struct HistoryBuffer {
    entries: VecDeque<String>,
    cursor: Option<usize>,
    /// Maximum number of entries kept (0 = unbounded).
    limit: usize,
}

impl HistoryBuffer {
    /// Create an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` entries (0 = unbounded).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Append a line and reset navigation.
    ///
    /// When a limit is set, the oldest entry is dropped on overflow.
    pub fn append(&mut self, line: impl Into<String>) {
        self.entries.push_back(line.into());
        if self.limit > 0 && self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.cursor = None;
    }

    /// Step toward the oldest entry and return it.
    ///
    /// Returns an empty string if there is no history.
    pub fn previous(&mut self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }

        let index = match self.cursor {
            None => self.entries.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(index);
        self.entries[index].clone()
    }

    /// Step toward the newest entry and return it.
    ///
    /// Stepping past the newest entry returns to the fresh state and yields
    /// an empty string.
    pub fn next(&mut self) -> String {
        match self.cursor {
            Some(i) if i + 1 < self.entries.len() => {
                self.cursor = Some(i + 1);
                self.entries[i + 1].clone()
            }
            _ => {
                self.cursor = None;
                String::new()
            }
        }
    }

    /// Current cursor, `None` when fresh.
    #[inline]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Whether no navigation is in progress.
    #[inline]
    pub fn is_fresh(&self) -> bool {
        self.cursor.is_none()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configured limit (0 = unbounded).
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Entry by chronological index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Drop every entry and reset navigation.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}
