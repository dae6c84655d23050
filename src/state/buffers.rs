//! Capped, newest-first buffers for streamed log entries.
//!
//! Each buffer is a ring: appends go to the front and the oldest entry is
//! dropped once capacity is reached. Storage is shared copy-on-write so the
//! rebuild pipeline can snapshot a buffer without copying its entries.

use crate::model::{BufferedEntry, EntryId, LifecycleLogEntry, LogEntry, NetworkLogEntry};
use std::collections::VecDeque;
use std::sync::Arc;

#[cfg(test)]
#[path = "buffers_tests.rs"]
mod tests;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 500;

/// Ring buffer of entries (newest at front, oldest at back).
#[derive(Debug, Clone)]
pub struct EntryBuffer<T> {
    entries: Arc<VecDeque<T>>,
    capacity: usize,
}

impl<T: BufferedEntry> EntryBuffer<T> {
    /// Create an empty buffer.
    ///
    /// A capacity of zero stores nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(VecDeque::new()),
            capacity,
        }
    }

    /// Add an entry at the front, evicting the oldest entry when at capacity.
    pub fn append(&mut self, entry: T) {
        if self.capacity == 0 {
            return;
        }

        let entries = Arc::make_mut(&mut self.entries);
        entries.push_front(entry);
        entries.truncate(self.capacity);
    }

    /// Newest-first entries, filtered by `label` when given, at most `limit`.
    pub fn entries(&self, label: Option<&str>, limit: usize) -> Vec<T> {
        self.matching(label).take(limit).cloned().collect()
    }

    /// Number of entries matching `label` (all entries when `None`).
    pub fn count(&self, label: Option<&str>) -> usize {
        match label {
            None => self.entries.len(),
            Some(_) => self.matching(label).count(),
        }
    }

    /// Find an entry by id.
    pub fn find(&self, id: EntryId) -> Option<&T> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries = Arc::new(VecDeque::new());
    }

    fn matching<'a>(&'a self, label: Option<&'a str>) -> impl Iterator<Item = &'a T> + 'a {
        self.entries
            .iter()
            .filter(move |entry| label.is_none() || entry.label() == label)
    }
}

impl<T: BufferedEntry> Default for EntryBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// The three entry streams the panel displays.
#[derive(Debug, Clone, Default)]
pub struct LogBuffers {
    /// Free-form log messages.
    pub logs: EntryBuffer<LogEntry>,
    /// Network calls.
    pub network: EntryBuffer<NetworkLogEntry>,
    /// Component lifecycle events.
    pub lifecycle: EntryBuffer<LifecycleLogEntry>,
}

impl LogBuffers {
    /// Create buffers sharing one capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            logs: EntryBuffer::new(capacity),
            network: EntryBuffer::new(capacity),
            lifecycle: EntryBuffer::new(capacity),
        }
    }
}
