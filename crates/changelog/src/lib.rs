//! Change log: the append-only audit trail of inventory mutations.
//!
//! Entries are facts about what happened to an item. The only way an entry
//! leaves the log is by being undone, which replaces it with an `undo` entry.

pub mod entry;
pub mod event;
pub mod log;

pub use entry::{Action, Delta, LogEntry};
pub use event::ChangeEvent;
pub use log::{ChangeLog, UndoTarget};
