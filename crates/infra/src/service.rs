//! Inventory service: the owned state object behind every request.
//!
//! ```text
//! request layer (authorize first)
//!   ↓
//! 1. Handle command on the in-memory inventory (pure decision, may fail)
//!   ↓
//! 2. Apply events + append one log entry per event
//!   ↓
//! 3. Rewrite the inventory file, then the log file
//! ```
//!
//! A domain failure changes nothing. A write failure is returned after the
//! in-memory change; the files catch up on the next successful write.

use chrono::Utc;

use stockroom_changelog::{ChangeLog, LogEntry};
use stockroom_core::{Aggregate, DomainError, ItemName};
use stockroom_inventory::{
    AdjustStep, AdjustStock, Inventory, InventoryCommand, InventoryEvent, InventoryItem,
    InventorySnapshot, ReceiveStock, RemoveItem, RestoreStock, ShipStock,
};

use crate::config::StockroomConfig;
use crate::error::{ServiceResult, StorageError};
use crate::storage::{CsvInventoryFile, CsvLogFile, InventoryStorage, LogStorage};

/// Stock list plus change log, each mirrored to its own storage.
///
/// Single owner: every mutation takes `&mut self`. Sharing across request
/// handlers means wrapping the service in one lock.
#[derive(Debug)]
pub struct InventoryService<I = CsvInventoryFile, L = CsvLogFile> {
    inventory: Inventory,
    log: ChangeLog,
    inventory_store: I,
    log_store: L,
}

impl InventoryService<CsvInventoryFile, CsvLogFile> {
    /// Open the CSV files named by `config`, loading whatever they hold.
    pub fn open(config: &StockroomConfig) -> ServiceResult<Self> {
        Self::with_storage(
            CsvInventoryFile::new(&config.inventory_path),
            CsvLogFile::new(&config.log_path),
        )
    }
}

impl<I, L> InventoryService<I, L>
where
    I: InventoryStorage,
    L: LogStorage,
{
    pub fn with_storage(inventory_store: I, log_store: L) -> ServiceResult<Self> {
        let inventory = inventory_store.load()?;
        let log = log_store.load()?;
        tracing::info!(items = inventory.len(), log_entries = log.len(), "inventory loaded");

        Ok(Self {
            inventory,
            log,
            inventory_store,
            log_store,
        })
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn log(&self) -> &ChangeLog {
        &self.log
    }

    pub fn get(&self, name: &str) -> Option<&InventoryItem> {
        ItemName::parse(name)
            .ok()
            .and_then(|name| self.inventory.get(&name))
    }

    pub fn items(&self) -> Vec<&InventoryItem> {
        self.inventory.items().collect()
    }

    pub fn search(&self, query: &str) -> Vec<&InventoryItem> {
        self.inventory.search(query).collect()
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        self.inventory.snapshot()
    }

    /// The last `n` log entries, most recent first.
    pub fn recent(&self, n: usize) -> Vec<&LogEntry> {
        self.log.recent(n)
    }

    /// Add `quantity` of `name`, creating the item if needed. Returns the new quantity.
    pub fn apply_receipt(&mut self, name: &str, quantity: u64, received_date: &str) -> ServiceResult<u64> {
        let item = ItemName::parse(name)?;
        let command = InventoryCommand::ReceiveStock(ReceiveStock {
            item: item.clone(),
            quantity,
            received_date: received_date.to_string(),
            occurred_at: Utc::now(),
        });

        self.commit(&command)?;
        let current = self.current(&item);
        tracing::info!(item = %item, quantity, current, "stock received");
        Ok(current)
    }

    /// Take `quantity` of `name` out, never going below zero. Returns the new quantity.
    pub fn apply_shipment(&mut self, name: &str, quantity: u64) -> ServiceResult<u64> {
        let item = ItemName::parse(name)?;
        let command = InventoryCommand::ShipStock(ShipStock {
            item: item.clone(),
            quantity,
            occurred_at: Utc::now(),
        });

        self.commit(&command)?;
        let current = self.current(&item);
        tracing::info!(item = %item, quantity, current, "stock shipped");
        Ok(current)
    }

    /// Move an existing item's stock by one unit. Returns the new quantity.
    pub fn adjust(&mut self, name: &str, step: AdjustStep) -> ServiceResult<u64> {
        let item = ItemName::parse(name)?;
        let command = InventoryCommand::AdjustStock(AdjustStock {
            item: item.clone(),
            step,
            occurred_at: Utc::now(),
        });

        self.commit(&command)?;
        let current = self.current(&item);
        tracing::info!(item = %item, step = step.delta(), current, "stock adjusted");
        Ok(current)
    }

    /// Delete an item. Returns the item as it was.
    pub fn remove(&mut self, name: &str) -> ServiceResult<InventoryItem> {
        let item = ItemName::parse(name)?;
        let removed = self
            .inventory
            .get(&item)
            .cloned()
            .ok_or_else(|| DomainError::not_found(item.as_str()))?;
        let command = InventoryCommand::RemoveItem(RemoveItem {
            item: item.clone(),
            occurred_at: Utc::now(),
        });

        self.commit(&command)?;
        tracing::info!(item = %item, quantity = removed.quantity(), "item removed");
        Ok(removed)
    }

    /// Reverse the entry at `offset` in the most-recent-first view.
    ///
    /// Restores the item's quantity (recreating a deleted item with an empty
    /// date), records an `undo` entry and drops the original entry. Offsets of
    /// older entries shift by one afterwards. Returns the restored quantity.
    pub fn undo(&mut self, offset: usize) -> ServiceResult<u64> {
        let target = self.log.undo_target(offset)?;
        let command = InventoryCommand::RestoreStock(RestoreStock {
            item: target.item_name.clone(),
            quantity: target.restore_to,
            occurred_at: Utc::now(),
        });

        let events = self.inventory.execute(&command)?;
        let undo_entry = events
            .first()
            .map(LogEntry::from_event)
            .ok_or_else(|| DomainError::not_reversible("restore produced no change"))?;
        let undone = self.log.commit_undo(&target, undo_entry)?;

        self.persist()?;
        tracing::info!(
            item = %target.item_name,
            offset,
            action = %undone.action,
            restored = target.restore_to,
            "log entry undone"
        );
        Ok(target.restore_to)
    }

    fn current(&self, item: &ItemName) -> u64 {
        self.inventory.quantity_of(item).unwrap_or(0)
    }

    fn commit(&mut self, command: &InventoryCommand) -> ServiceResult<Vec<InventoryEvent>> {
        let events = self.inventory.execute(command)?;
        for event in &events {
            self.log.append(LogEntry::from_event(event));
        }
        self.persist()?;
        Ok(events)
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.inventory_store.save(&self.inventory)?;
        self.log_store.save(&self.log)?;
        Ok(())
    }
}
