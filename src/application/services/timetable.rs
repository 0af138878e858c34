//! Timetable service
//!
//! Runs the pipeline in strict sequence: the whole export is decoded before the
//! tree is built, and the tree is complete before anything is printed or written.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::services::record_source::{CsvRecordSource, Ingest};
use crate::application::services::tree_sink::TreeSink;
use crate::application::{ApplicationError, ApplicationResult, PathContextExt};
use crate::config::Settings;
use crate::domain::{Node, Record, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Service converting a timetable export into an organisational unit tree.
pub struct TimetableService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl TimetableService {
    /// Create a new timetable service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Read and decode the whole export.
    ///
    /// A missing input is an error; undecodable rows, invalid UTF-8 included, are
    /// reported in the result. The bytes go to the CSV reader unchecked.
    #[instrument(level = "debug", skip(self))]
    pub fn ingest(&self, input: &Path) -> ApplicationResult<Ingest> {
        if !self.fs.is_file(input) {
            return Err(ApplicationError::InputNotFound(input.to_path_buf()));
        }
        let content = self.fs.read(input).with_path_context("read input", input)?;

        let ingest = CsvRecordSource::new()
            .with_trim(self.settings.trim)
            .decode(content.as_slice());
        debug!(
            records = ingest.records.len(),
            issues = ingest.issues.len(),
            "input decoded"
        );
        Ok(ingest)
    }

    /// Build the tree from decoded records.
    #[instrument(level = "debug", skip_all)]
    pub fn build(&self, records: &[Record]) -> ApplicationResult<Node> {
        let mut builder = TreeBuilder::new()
            .with_root_name(self.settings.root_name.as_str())
            .with_policy(self.settings.key_policy);
        let tree = builder.build(records)?;
        info!(nodes = tree.node_count(), parts = builder.part_counter(), "tree built");
        Ok(tree)
    }

    pub fn sink(&self) -> TreeSink {
        TreeSink::new(self.settings.outline_indent, self.settings.json_indent)
    }

    /// Print the outline of `tree` to `out`.
    pub fn print<W: Write>(&self, tree: &Node, out: &mut W) -> ApplicationResult<()> {
        self.sink()
            .print_outline(tree, out)
            .map_err(|e| ApplicationError::OperationFailed {
                context: "print outline".to_string(),
                source: Box::new(e),
            })
    }

    /// Serialize `tree` to `output`, replacing any existing file.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn export(&self, tree: &Node, output: &Path) -> ApplicationResult<()> {
        let json = self.sink().to_json(tree)?;
        self.fs
            .write(output, &json)
            .with_path_context("write tree", output)?;
        debug!(bytes = json.len(), "tree written");
        Ok(())
    }
}
