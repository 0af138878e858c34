//! CSV record source
//!
//! Decodes a header-less timetable export into records, preserving row order.
//! Rows that fail to decode are logged and reported back, never fatal.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{trace, warn};

use crate::domain::{Record, RECORD_COLUMNS};

/// A row that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeIssue {
    /// 1-based line of the row in the input (0 when unknown)
    pub line: u64,
    pub message: String,
}

/// Result of reading a whole export.
#[derive(Debug, Clone, Default)]
pub struct Ingest {
    /// Decoded records in input order
    pub records: Vec<Record>,
    /// Rows skipped because they could not be decoded
    pub issues: Vec<DecodeIssue>,
}

impl Ingest {
    fn reject(&mut self, line: u64, message: String) {
        warn!(line, "skipping row: {}", message);
        self.issues.push(DecodeIssue { line, message });
    }
}

/// Positional CSV decoder for timetable exports.
#[derive(Debug, Clone, Default)]
pub struct CsvRecordSource {
    trim: bool,
}

impl CsvRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim surrounding whitespace from every field.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Read all rows from `input`.
    pub fn decode<R: Read>(&self, input: R) -> Ingest {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .from_reader(input);

        let mut ingest = Ingest::default();
        for result in reader.records() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    ingest.reject(line, e.to_string());
                    continue;
                }
            };

            let line = row.position().map(|p| p.line()).unwrap_or(0);
            match decode_row(&row) {
                Ok(mut record) => {
                    record.line = line;
                    trace!(line, event = %record.event_id, "decoded row");
                    ingest.records.push(record);
                }
                Err(message) => ingest.reject(line, message),
            }
        }
        ingest
    }
}

fn decode_row(row: &StringRecord) -> Result<Record, String> {
    if row.len() != RECORD_COLUMNS {
        return Err(format!(
            "expected {} columns, found {}",
            RECORD_COLUMNS,
            row.len()
        ));
    }
    row.deserialize::<Record>(None).map_err(|e| e.to_string())
}
