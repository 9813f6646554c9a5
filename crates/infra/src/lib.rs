//! Infrastructure layer: configuration, flat-file persistence and the
//! inventory service that keeps the stock list and change log in step.

pub mod config;
pub mod error;
pub mod service;
pub mod storage;

pub use config::{ConfigError, StockroomConfig};
pub use error::{ServiceError, ServiceResult, StorageError};
pub use service::InventoryService;
pub use storage::{
    CsvInventoryFile, CsvLogFile, InMemoryInventoryStorage, InMemoryLogStorage, InventoryStorage,
    LogStorage,
};
