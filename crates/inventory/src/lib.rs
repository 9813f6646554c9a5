//! Inventory domain module.
//!
//! This crate contains business rules for stock keeping, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod inventory;
pub mod item;

pub use inventory::{Inventory, InventorySnapshot};
pub use item::{
    AdjustStep, AdjustStock, InventoryCommand, InventoryEvent, InventoryItem, ItemRemoved,
    ReceiveStock, RemoveItem, RestoreStock, ShipStock, StockAdjusted, StockReceived,
    StockRestored, StockShipped,
};
