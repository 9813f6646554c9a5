//! Durable storage for the stock list and the change log.
//!
//! Both are rewritten in full on every change. The traits keep the service
//! independent of the file format so tests can swap in memory-backed stores.

pub mod csv_inventory;
pub mod csv_log;
pub mod in_memory;

use stockroom_changelog::ChangeLog;
use stockroom_inventory::Inventory;

use crate::error::StorageError;

pub use csv_inventory::CsvInventoryFile;
pub use csv_log::CsvLogFile;
pub use in_memory::{InMemoryInventoryStorage, InMemoryLogStorage};

/// Whole-inventory persistence.
pub trait InventoryStorage {
    /// Load everything. A store that was never written loads as empty.
    fn load(&self) -> Result<Inventory, StorageError>;

    /// Replace the stored inventory with `inventory`.
    fn save(&self, inventory: &Inventory) -> Result<(), StorageError>;
}

/// Whole-log persistence.
pub trait LogStorage {
    /// Load everything. A store that was never written loads as empty.
    fn load(&self) -> Result<ChangeLog, StorageError>;

    /// Replace the stored log with `log`.
    fn save(&self, log: &ChangeLog) -> Result<(), StorageError>;
}
