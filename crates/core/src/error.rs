//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. IO failures
/// are reported by the infrastructure layer, never here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (blank name, zero quantity, bad step).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation referenced an item that is not in the inventory.
    #[error("item not found: {0}")]
    NotFound(String),

    /// A unit decrement was attempted on an item already at zero.
    #[error("insufficient stock for item: {0}")]
    InsufficientStock(String),

    /// An undo offset pointed past the end of the change log.
    #[error("log offset {offset} out of range (log has {len} entries)")]
    IndexOutOfRange { offset: usize, len: usize },

    /// The targeted log entry cannot be reversed.
    #[error("log entry is not reversible: {0}")]
    NotReversible(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn insufficient_stock(name: impl Into<String>) -> Self {
        Self::InsufficientStock(name.into())
    }

    pub fn index_out_of_range(offset: usize, len: usize) -> Self {
        Self::IndexOutOfRange { offset, len }
    }

    pub fn not_reversible(msg: impl Into<String>) -> Self {
        Self::NotReversible(msg.into())
    }
}
