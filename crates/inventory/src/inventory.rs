use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockroom_core::{Aggregate, DomainError, Entity, ItemName};

use crate::item::{
    AdjustStep, AdjustStock, InventoryCommand, InventoryEvent, InventoryItem, ItemRemoved,
    ReceiveStock, RemoveItem, RestoreStock, ShipStock, StockAdjusted, StockReceived,
    StockRestored, StockShipped,
};

/// Aggregate: the whole stock list, keyed by item name.
///
/// Items are kept in name order so listings and the persisted file are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: BTreeMap<ItemName, InventoryItem>,
}

/// Serializable view of the inventory for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub items: Vec<InventoryItem>,
    pub total_quantity: u64,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from loaded items. Later duplicates replace earlier ones.
    pub fn from_items(items: impl IntoIterator<Item = InventoryItem>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.id().clone(), item))
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, name: &ItemName) -> Option<&InventoryItem> {
        self.items.get(name)
    }

    pub fn quantity_of(&self, name: &ItemName) -> Option<u64> {
        self.items.get(name).map(InventoryItem::quantity)
    }

    /// All items in name order.
    pub fn items(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.values()
    }

    /// Items whose name contains `query`, ignoring case. A blank query matches everything.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a InventoryItem> + 'a {
        let needle = query.trim().to_lowercase();
        self.items
            .values()
            .filter(move |item| needle.is_empty() || item.name().as_str().to_lowercase().contains(&needle))
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            items: self.items.values().cloned().collect(),
            total_quantity: self
                .items
                .values()
                .map(InventoryItem::quantity)
                .fold(0u64, u64::saturating_add),
        }
    }

    fn current(&self, name: &ItemName) -> u64 {
        self.quantity_of(name).unwrap_or(0)
    }

    fn entry(&mut self, name: &ItemName) -> &mut InventoryItem {
        self.items
            .entry(name.clone())
            .or_insert_with(|| InventoryItem::new(name.clone(), 0, ""))
    }
}

impl Aggregate for Inventory {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::StockReceived(e) => {
                let item = self.entry(&e.item);
                item.set_quantity(item.quantity().saturating_add(e.quantity));
                item.set_received_date(e.received_date.clone());
            }
            InventoryEvent::StockShipped(e) => {
                let item = self.entry(&e.item);
                item.set_quantity(item.quantity().saturating_sub(e.quantity));
            }
            InventoryEvent::StockAdjusted(e) => {
                let item = self.entry(&e.item);
                let next = match e.step {
                    AdjustStep::Plus => item.quantity().saturating_add(1),
                    AdjustStep::Minus => item.quantity().saturating_sub(1),
                };
                item.set_quantity(next);
            }
            InventoryEvent::ItemRemoved(e) => {
                self.items.remove(&e.item);
            }
            InventoryEvent::StockRestored(e) => {
                // A deleted item comes back with an empty date.
                self.entry(&e.item).set_quantity(e.quantity);
            }
        }
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::ReceiveStock(cmd) => self.handle_receive(cmd),
            InventoryCommand::ShipStock(cmd) => self.handle_ship(cmd),
            InventoryCommand::AdjustStock(cmd) => self.handle_adjust(cmd),
            InventoryCommand::RemoveItem(cmd) => self.handle_remove(cmd),
            InventoryCommand::RestoreStock(cmd) => self.handle_restore(cmd),
        }
    }
}

/// Logged deltas are signed, so a single movement must fit in an `i64`.
fn check_loggable(quantity: u64) -> Result<(), DomainError> {
    if i64::try_from(quantity).is_err() {
        return Err(DomainError::validation(format!(
            "quantity {quantity} exceeds the largest loggable movement"
        )));
    }
    Ok(())
}

impl Inventory {
    fn handle_receive(&self, cmd: &ReceiveStock) -> Result<Vec<InventoryEvent>, DomainError> {
        if cmd.quantity == 0 {
            return Err(DomainError::validation("receipt quantity must be positive"));
        }
        check_loggable(cmd.quantity)?;
        let previous_quantity = self.current(&cmd.item);
        if previous_quantity.checked_add(cmd.quantity).is_none() {
            return Err(DomainError::validation(format!(
                "receipt would overflow stock of '{}'",
                cmd.item
            )));
        }

        Ok(vec![InventoryEvent::StockReceived(StockReceived {
            item: cmd.item.clone(),
            quantity: cmd.quantity,
            received_date: cmd.received_date.clone(),
            previous_quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_ship(&self, cmd: &ShipStock) -> Result<Vec<InventoryEvent>, DomainError> {
        if cmd.quantity == 0 {
            return Err(DomainError::validation("shipment quantity must be positive"));
        }
        check_loggable(cmd.quantity)?;

        // Overdraw clamps at zero in `apply`; unknown items ship from zero stock.
        Ok(vec![InventoryEvent::StockShipped(StockShipped {
            item: cmd.item.clone(),
            quantity: cmd.quantity,
            previous_quantity: self.current(&cmd.item),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_adjust(&self, cmd: &AdjustStock) -> Result<Vec<InventoryEvent>, DomainError> {
        let previous_quantity = self
            .quantity_of(&cmd.item)
            .ok_or_else(|| DomainError::not_found(cmd.item.as_str()))?;

        if cmd.step == AdjustStep::Minus && previous_quantity == 0 {
            return Err(DomainError::insufficient_stock(cmd.item.as_str()));
        }

        Ok(vec![InventoryEvent::StockAdjusted(StockAdjusted {
            item: cmd.item.clone(),
            step: cmd.step,
            previous_quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Result<Vec<InventoryEvent>, DomainError> {
        let previous_quantity = self
            .quantity_of(&cmd.item)
            .ok_or_else(|| DomainError::not_found(cmd.item.as_str()))?;

        Ok(vec![InventoryEvent::ItemRemoved(ItemRemoved {
            item: cmd.item.clone(),
            previous_quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_restore(&self, cmd: &RestoreStock) -> Result<Vec<InventoryEvent>, DomainError> {
        Ok(vec![InventoryEvent::StockRestored(StockRestored {
            item: cmd.item.clone(),
            quantity: cmd.quantity,
            previous_quantity: self.quantity_of(&cmd.item),
            occurred_at: cmd.occurred_at,
        })])
    }
}
