use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_changelog::{Action, ChangeEvent, Delta};
use stockroom_core::{DomainError, Entity, ItemName};

/// A named stock line: how many are on hand and when stock last came in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    name: ItemName,
    quantity: u64,
    /// Free-form calendar date; empty when unknown.
    received_date: String,
}

impl InventoryItem {
    pub fn new(name: ItemName, quantity: u64, received_date: impl Into<String>) -> Self {
        Self {
            name,
            quantity,
            received_date: received_date.into(),
        }
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn received_date(&self) -> &str {
        &self.received_date
    }

    pub(crate) fn set_quantity(&mut self, quantity: u64) {
        self.quantity = quantity;
    }

    pub(crate) fn set_received_date(&mut self, date: impl Into<String>) {
        self.received_date = date.into();
    }
}

impl Entity for InventoryItem {
    type Id = ItemName;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}

/// Unit adjustment direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustStep {
    Plus,
    Minus,
}

impl AdjustStep {
    pub fn delta(self) -> i64 {
        match self {
            AdjustStep::Plus => 1,
            AdjustStep::Minus => -1,
        }
    }
}

impl TryFrom<i64> for AdjustStep {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AdjustStep::Plus),
            -1 => Ok(AdjustStep::Minus),
            other => Err(DomainError::validation(format!(
                "adjustment must be +1 or -1, got {other}"
            ))),
        }
    }
}

impl FromStr for AdjustStep {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "plus" | "+" | "+1" | "1" => Ok(AdjustStep::Plus),
            "minus" | "-" | "-1" => Ok(AdjustStep::Minus),
            other => Err(DomainError::validation(format!("unknown adjustment '{other}'"))),
        }
    }
}

/// Command: ReceiveStock (inbound receipt).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveStock {
    pub item: ItemName,
    pub quantity: u64,
    pub received_date: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ShipStock (outbound shipment, clamped at zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipStock {
    pub item: ItemName,
    pub quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AdjustStock (unit increment/decrement of an existing item).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustStock {
    pub item: ItemName,
    pub step: AdjustStep,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub item: ItemName,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RestoreStock (set a quantity back while undoing a log entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreStock {
    pub item: ItemName,
    pub quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    ReceiveStock(ReceiveStock),
    ShipStock(ShipStock),
    AdjustStock(AdjustStock),
    RemoveItem(RemoveItem),
    RestoreStock(RestoreStock),
}

/// Event: StockReceived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReceived {
    pub item: ItemName,
    pub quantity: u64,
    pub received_date: String,
    pub previous_quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockShipped. `quantity` is the requested amount, not the clamped one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockShipped {
    pub item: ItemName,
    pub quantity: u64,
    pub previous_quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockAdjusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjusted {
    pub item: ItemName,
    pub step: AdjustStep,
    pub previous_quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved. The received date is not kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub item: ItemName,
    pub previous_quantity: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockRestored. `previous_quantity` is `None` when the item had been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRestored {
    pub item: ItemName,
    pub quantity: u64,
    pub previous_quantity: Option<u64>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    StockReceived(StockReceived),
    StockShipped(StockShipped),
    StockAdjusted(StockAdjusted),
    ItemRemoved(ItemRemoved),
    StockRestored(StockRestored),
}

/// Receipts and shipments never exceed `i64::MAX`; only restores of huge stock saturate.
fn signed(quantity: u64) -> i64 {
    i64::try_from(quantity).unwrap_or(i64::MAX)
}

impl ChangeEvent for InventoryEvent {
    fn action(&self) -> Action {
        match self {
            InventoryEvent::StockReceived(_) => Action::Increase,
            InventoryEvent::StockShipped(_) => Action::Decrease,
            InventoryEvent::StockAdjusted(e) => match e.step {
                AdjustStep::Plus => Action::Increase,
                AdjustStep::Minus => Action::Decrease,
            },
            InventoryEvent::ItemRemoved(_) => Action::Delete,
            InventoryEvent::StockRestored(_) => Action::Undo,
        }
    }

    fn item_name(&self) -> &ItemName {
        match self {
            InventoryEvent::StockReceived(e) => &e.item,
            InventoryEvent::StockShipped(e) => &e.item,
            InventoryEvent::StockAdjusted(e) => &e.item,
            InventoryEvent::ItemRemoved(e) => &e.item,
            InventoryEvent::StockRestored(e) => &e.item,
        }
    }

    fn delta(&self) -> Delta {
        match self {
            InventoryEvent::StockReceived(e) => Delta::Units(signed(e.quantity)),
            InventoryEvent::StockShipped(e) => Delta::Units(-signed(e.quantity)),
            InventoryEvent::StockAdjusted(e) => Delta::Units(e.step.delta()),
            InventoryEvent::ItemRemoved(_) => Delta::All,
            InventoryEvent::StockRestored(e) => {
                let before = signed(e.previous_quantity.unwrap_or(0));
                Delta::Units(signed(e.quantity).saturating_sub(before))
            }
        }
    }

    fn previous_quantity(&self) -> Option<u64> {
        match self {
            InventoryEvent::StockReceived(e) => Some(e.previous_quantity),
            InventoryEvent::StockShipped(e) => Some(e.previous_quantity),
            InventoryEvent::StockAdjusted(e) => Some(e.previous_quantity),
            InventoryEvent::ItemRemoved(e) => Some(e.previous_quantity),
            InventoryEvent::StockRestored(e) => Some(e.previous_quantity.unwrap_or(0)),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::StockReceived(e) => e.occurred_at,
            InventoryEvent::StockShipped(e) => e.occurred_at,
            InventoryEvent::StockAdjusted(e) => e.occurred_at,
            InventoryEvent::ItemRemoved(e) => e.occurred_at,
            InventoryEvent::StockRestored(e) => e.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_changelog::LogEntry;

    fn name(s: &str) -> ItemName {
        ItemName::parse(s).unwrap()
    }

    #[test]
    fn adjust_step_accepts_only_unit_deltas() {
        assert_eq!(AdjustStep::try_from(1).unwrap(), AdjustStep::Plus);
        assert_eq!(AdjustStep::try_from(-1).unwrap(), AdjustStep::Minus);
        assert!(matches!(AdjustStep::try_from(2), Err(DomainError::Validation(_))));
        assert_eq!("minus".parse::<AdjustStep>().unwrap(), AdjustStep::Minus);
        assert_eq!("plus".parse::<AdjustStep>().unwrap(), AdjustStep::Plus);
    }

    #[test]
    fn shipment_logs_requested_amount_as_negative_delta() {
        let event = InventoryEvent::StockShipped(StockShipped {
            item: name("widget"),
            quantity: 10,
            previous_quantity: 3,
            occurred_at: Utc::now(),
        });

        let entry = LogEntry::from_event(&event);
        assert_eq!(entry.action, Action::Decrease);
        assert_eq!(entry.delta, Delta::Units(-10));
        assert_eq!(entry.previous_quantity, Some(3));
    }

    #[test]
    fn removal_logs_all_sentinel() {
        let event = InventoryEvent::ItemRemoved(ItemRemoved {
            item: name("widget"),
            previous_quantity: 4,
            occurred_at: Utc::now(),
        });

        let entry = LogEntry::from_event(&event);
        assert_eq!(entry.action, Action::Delete);
        assert_eq!(entry.delta, Delta::All);
        assert_eq!(entry.previous_quantity, Some(4));
    }

    #[test]
    fn restore_logs_signed_change_from_previous_quantity() {
        let event = InventoryEvent::StockRestored(StockRestored {
            item: name("widget"),
            quantity: 2,
            previous_quantity: Some(7),
            occurred_at: Utc::now(),
        });

        let entry = LogEntry::from_event(&event);
        assert_eq!(entry.action, Action::Undo);
        assert_eq!(entry.delta, Delta::Units(-5));
        assert_eq!(entry.previous_quantity, Some(7));
    }
}
