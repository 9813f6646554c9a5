use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use stockroom_changelog::{Action, ChangeLog, Delta, LogEntry};
use stockroom_core::ItemName;

use super::LogStorage;
use crate::error::StorageError;

/// Older log files wrote local wall-clock seconds without an offset.
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Change log kept as headerless CSV rows of
/// `timestamp,action,name,delta,previous_quantity`.
#[derive(Debug, Clone)]
pub struct CsvLogFile {
    path: PathBuf,
}

impl CsvLogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LogStorage for CsvLogFile {
    fn load(&self) -> Result<ChangeLog, StorageError> {
        match File::open(&self.path) {
            Ok(file) => read_log(file),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "log file missing; starting empty");
                Ok(ChangeLog::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, log: &ChangeLog) -> Result<(), StorageError> {
        let file = File::create(&self.path)?;
        write_log(file, log)?;
        tracing::debug!(path = %self.path.display(), entries = log.len(), "log file rewritten");
        Ok(())
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, LEGACY_TIMESTAMP_FORMAT)
                .ok()
                .map(|ts| ts.and_utc())
        })
}

fn parse_entry(record: &csv::StringRecord) -> Result<LogEntry, String> {
    let field = |i: usize| record.get(i).unwrap_or_default();

    let timestamp =
        parse_timestamp(field(0)).ok_or_else(|| format!("bad timestamp '{}'", field(0)))?;
    let action = field(1).parse::<Action>().map_err(|e| e.to_string())?;
    let item_name = ItemName::parse(field(2)).map_err(|e| e.to_string())?;
    let delta = field(3).parse::<Delta>().map_err(|e| e.to_string())?;
    // Blank or garbled previous quantity means the entry cannot be undone.
    let previous_quantity = field(4).trim().parse::<u64>().ok();

    Ok(LogEntry {
        timestamp,
        action,
        item_name,
        delta,
        previous_quantity,
    })
}

/// Parse log rows, skipping any row that cannot be understood.
pub fn read_log<R: Read>(reader: R) -> Result<ChangeLog, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut entries = Vec::new();
    for (row, record) in reader.byte_records().enumerate() {
        let record = match csv::StringRecord::from_byte_record(record?) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping log row that is not valid UTF-8");
                continue;
            }
        };
        match parse_entry(&record) {
            Ok(entry) => entries.push(entry),
            Err(reason) => tracing::warn!(row, %reason, "skipping malformed log row"),
        }
    }

    Ok(ChangeLog::from_entries(entries))
}

pub fn write_log<W: Write>(writer: W, log: &ChangeLog) -> Result<(), StorageError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for entry in log.entries() {
        let timestamp = entry.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        let delta = entry.delta.to_string();
        let previous = entry
            .previous_quantity
            .map(|q| q.to_string())
            .unwrap_or_default();

        writer.write_record([
            timestamp.as_str(),
            entry.action.as_str(),
            entry.item_name.as_str(),
            delta.as_str(),
            previous.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
