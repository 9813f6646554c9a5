use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, ItemName};

use crate::event::ChangeEvent;

/// Kind of mutation a log entry records.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Increase,
    Decrease,
    Delete,
    Undo,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Increase => "increase",
            Action::Decrease => "decrease",
            Action::Delete => "delete",
            Action::Undo => "undo",
        }
    }

    /// Undo entries are terminal; everything else can be reversed.
    pub fn is_reversible(&self) -> bool {
        !matches!(self, Action::Undo)
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increase" => Ok(Action::Increase),
            "decrease" => Ok(Action::Decrease),
            "delete" => Ok(Action::Delete),
            "undo" => Ok(Action::Undo),
            other => Err(DomainError::validation(format!("unknown log action '{other}'"))),
        }
    }
}

/// Quantity change recorded by a log entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delta {
    Units(i64),
    /// The whole stock of the item (deletions).
    All,
}

impl core::fmt::Display for Delta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Delta::Units(n) => write!(f, "{n}"),
            Delta::All => f.write_str("all"),
        }
    }
}

impl FromStr for Delta {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Delta::All);
        }
        s.parse::<i64>()
            .map(Delta::Units)
            .map_err(|e| DomainError::validation(format!("invalid delta '{s}': {e}")))
    }
}

/// One audit record. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub action: Action,
    pub item_name: ItemName,
    pub delta: Delta,
    /// Quantity immediately before this entry's action. Entries without it
    /// cannot be undone.
    pub previous_quantity: Option<u64>,
}

impl LogEntry {
    pub fn from_event<E: ChangeEvent>(event: &E) -> Self {
        Self {
            timestamp: event.occurred_at(),
            action: event.action(),
            item_name: event.item_name().clone(),
            delta: event.delta(),
            previous_quantity: event.previous_quantity(),
        }
    }

    /// Quantity an undo of this entry restores, if the entry is reversible.
    pub fn restorable_quantity(&self) -> Result<u64, DomainError> {
        if !self.action.is_reversible() {
            return Err(DomainError::not_reversible(format!(
                "'{}' entries for '{}' cannot be undone",
                self.action, self.item_name
            )));
        }
        self.previous_quantity.ok_or_else(|| {
            DomainError::not_reversible(format!(
                "'{}' entry for '{}' has no previous quantity",
                self.action, self.item_name
            ))
        })
    }
}
