use thiserror::Error;

use stockroom_core::DomainError;

/// Failure to read or rewrite a durable file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

/// Error returned by every `InventoryService` operation.
///
/// Domain errors leave state untouched. Storage errors are reported after the
/// in-memory change has been made; the next successful write brings the files
/// back in line.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
