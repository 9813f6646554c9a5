use chrono::{DateTime, Utc};

use stockroom_core::ItemName;

use crate::entry::{Action, Delta};

/// A domain event that can be recorded in the change log.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - designed to be **append-only**
/// - self-describing enough to be reversed (`previous_quantity`)
pub trait ChangeEvent: Clone + core::fmt::Debug {
    /// Log action kind for this event.
    fn action(&self) -> Action;

    /// Item the event happened to.
    fn item_name(&self) -> &ItemName;

    /// Signed quantity change, or `Delta::All` for deletions.
    fn delta(&self) -> Delta;

    /// Quantity right before the event, if it can be restored.
    fn previous_quantity(&self) -> Option<u64>;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
