use std::sync::{Arc, RwLock};

use stockroom_changelog::ChangeLog;
use stockroom_inventory::Inventory;

use super::{InventoryStorage, LogStorage};
use crate::error::StorageError;

/// In-memory inventory storage.
///
/// Intended for tests/dev. Clones share the same slot, so a test can keep a
/// handle and inspect what the service last saved.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryStorage {
    slot: Arc<RwLock<Inventory>>,
}

impl InMemoryInventoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last saved inventory.
    pub fn saved(&self) -> Result<Inventory, StorageError> {
        self.load()
    }
}

impl InventoryStorage for InMemoryInventoryStorage {
    fn load(&self) -> Result<Inventory, StorageError> {
        let slot = self.slot.read().map_err(|_| StorageError::Poisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, inventory: &Inventory) -> Result<(), StorageError> {
        let mut slot = self.slot.write().map_err(|_| StorageError::Poisoned)?;
        *slot = inventory.clone();
        Ok(())
    }
}

/// In-memory change log storage. Same sharing rules as [`InMemoryInventoryStorage`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryLogStorage {
    slot: Arc<RwLock<ChangeLog>>,
}

impl InMemoryLogStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Result<ChangeLog, StorageError> {
        self.load()
    }
}

impl LogStorage for InMemoryLogStorage {
    fn load(&self) -> Result<ChangeLog, StorageError> {
        let slot = self.slot.read().map_err(|_| StorageError::Poisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, log: &ChangeLog) -> Result<(), StorageError> {
        let mut slot = self.slot.write().map_err(|_| StorageError::Poisoned)?;
        *slot = log.clone();
        Ok(())
    }
}
