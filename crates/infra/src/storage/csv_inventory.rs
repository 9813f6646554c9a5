use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use stockroom_core::ItemName;
use stockroom_inventory::{Inventory, InventoryItem};

use super::InventoryStorage;
use crate::error::StorageError;

/// Inventory kept as headerless CSV rows of `name,quantity,received_date`.
#[derive(Debug, Clone)]
pub struct CsvInventoryFile {
    path: PathBuf,
}

impl CsvInventoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InventoryStorage for CsvInventoryFile {
    fn load(&self) -> Result<Inventory, StorageError> {
        match File::open(&self.path) {
            Ok(file) => read_inventory(file),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "inventory file missing; starting empty");
                Ok(Inventory::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, inventory: &Inventory) -> Result<(), StorageError> {
        let file = File::create(&self.path)?;
        write_inventory(file, inventory)?;
        tracing::debug!(path = %self.path.display(), items = inventory.len(), "inventory file rewritten");
        Ok(())
    }
}

/// Parse inventory rows.
///
/// An unparseable quantity reads as 0 and a missing date as empty. Rows with a
/// blank name or bytes that are not UTF-8 are skipped.
pub fn read_inventory<R: Read>(reader: R) -> Result<Inventory, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut items = Vec::new();
    for (row, record) in reader.byte_records().enumerate() {
        let record = match csv::StringRecord::from_byte_record(record?) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping inventory row that is not valid UTF-8");
                continue;
            }
        };

        let name = match ItemName::parse(record.get(0).unwrap_or_default()) {
            Ok(name) => name,
            Err(_) => {
                tracing::warn!(row, "skipping inventory row without a name");
                continue;
            }
        };
        let quantity = record
            .get(1)
            .and_then(|q| q.trim().parse::<u64>().ok())
            .unwrap_or(0);
        let received_date = record.get(2).unwrap_or_default();

        items.push(InventoryItem::new(name, quantity, received_date));
    }

    Ok(Inventory::from_items(items))
}

pub fn write_inventory<W: Write>(writer: W, inventory: &Inventory) -> Result<(), StorageError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for item in inventory.items() {
        let quantity = item.quantity().to_string();
        writer.write_record([item.name().as_str(), quantity.as_str(), item.received_date()])?;
    }

    writer.flush()?;
    Ok(())
}
