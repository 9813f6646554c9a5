use stockroom_core::{DomainError, DomainResult, ItemName};

use crate::entry::{Action, LogEntry};

/// A resolved undo request: which entry to drop and what to restore.
///
/// Produced by [`ChangeLog::undo_target`] and consumed by
/// [`ChangeLog::commit_undo`] once the inventory has been restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoTarget {
    /// Absolute position of the entry being undone.
    pub position: usize,
    pub item_name: ItemName,
    pub restore_to: u64,
}

/// Ordered, append-only sequence of log entries (oldest first).
///
/// Undo is the only path that removes an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeLog {
    entries: Vec<LogEntry>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<LogEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in chronological order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// The last `n` entries, most recent first.
    pub fn recent(&self, n: usize) -> Vec<&LogEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    /// Map an offset into the most-recent-first view to an absolute position.
    pub fn position_of(&self, offset: usize) -> DomainResult<usize> {
        let len = self.entries.len();
        if offset >= len {
            return Err(DomainError::index_out_of_range(offset, len));
        }
        Ok(len - 1 - offset)
    }

    /// Resolve an undo request without changing the log.
    pub fn undo_target(&self, offset: usize) -> DomainResult<UndoTarget> {
        let position = self.position_of(offset)?;
        let entry = &self.entries[position];
        let restore_to = entry.restorable_quantity()?;
        Ok(UndoTarget {
            position,
            item_name: entry.item_name.clone(),
            restore_to,
        })
    }

    /// Record a completed undo: append its `undo` entry and drop the original.
    ///
    /// Returns the removed entry. The target must come from `undo_target` on
    /// this log with no mutation in between.
    pub fn commit_undo(&mut self, target: &UndoTarget, undo_entry: LogEntry) -> DomainResult<LogEntry> {
        debug_assert_eq!(undo_entry.action, Action::Undo);
        let original = self
            .entries
            .get(target.position)
            .ok_or_else(|| DomainError::index_out_of_range(target.position, self.entries.len()))?;
        if original.item_name != target.item_name {
            return Err(DomainError::not_reversible(format!(
                "log changed since undo of '{}' was resolved",
                target.item_name
            )));
        }

        self.entries.push(undo_entry);
        Ok(self.entries.remove(target.position))
    }
}
