//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod record_source;
mod timetable;
mod tree_sink;

pub use record_source::{CsvRecordSource, DecodeIssue, Ingest};
pub use timetable::TimetableService;
pub use tree_sink::TreeSink;
