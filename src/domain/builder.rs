//! Tree builder reshaping flat timetable records into an organisational unit tree.
//!
//! The export nests part above subject; the tree nests subject above part. Part ids
//! are therefore synthesized per anchor (subject, or course when the row has no
//! subject) as `<PartId>-<counter>` so that one export part shared by several
//! subjects becomes distinct tree nodes.

use tracing::{instrument, trace, warn};

use crate::domain::entities::{Branch, EventLeaf, KeyPolicy, Node, NodeKind, Record};
use crate::domain::error::DomainError;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Name given to the root node unless configured otherwise.
pub const DEFAULT_ROOT_NAME: &str = "Timetable";

/// Constructs the organisational unit tree from timetable records.
pub struct TreeBuilder {
    root_name: String,
    policy: KeyPolicy,
    part_counter: u64,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            policy: KeyPolicy::default(),
            part_counter: 0,
        }
    }

    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }

    pub fn with_policy(mut self, policy: KeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of part ids synthesized by the last build.
    pub fn part_counter(&self) -> u64 {
        self.part_counter
    }

    /// Build the tree from records in input order.
    ///
    /// Get-or-create semantics throughout: a repeated id never overwrites the node
    /// created by the first record carrying it. The part counter restarts at zero
    /// on every call.
    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn build(&mut self, records: &[Record]) -> TreeResult<Node> {
        self.part_counter = 0;
        let mut root = Branch::new("", self.root_name.as_str());

        for record in records {
            self.absorb(&mut root, record)?;
        }

        trace!(parts = self.part_counter, "tree built");
        Ok(Node::Root(root))
    }

    fn absorb(&mut self, root: &mut Branch, record: &Record) -> TreeResult<()> {
        self.check_keys(record)?;
        let line = record.line;

        let course = descend(root, &record.course_id, line, NodeKind::Course, || {
            Node::Course(Branch::new(&record.course_id, &record.course_name))
        })?;

        // Rows without a subject hang their part directly below the course
        let anchor = match record.subject() {
            Some((id, name)) => descend(course, id, line, NodeKind::Subject, || {
                Node::Subject(Branch::new(id, name))
            })?,
            None => course,
        };

        let part_id = match anchor.find_part_by_name(&record.part_name) {
            Some(existing) => existing.to_string(),
            None => {
                self.part_counter += 1;
                let synthesized = format!("{}-{}", record.part_id, self.part_counter);
                trace!(line, part = %synthesized, "synthesized part id");
                synthesized
            }
        };
        let part = descend(anchor, &part_id, line, NodeKind::Part, || {
            Node::Part(Branch::new(&part_id, &record.part_name))
        })?;

        let module = descend(part, &record.module_id, line, NodeKind::Module, || {
            Node::Module(Branch::new(&record.module_id, &record.module_name))
        })?;

        let series = descend(module, &record.series_id, line, NodeKind::Series, || {
            Node::Series(Branch::new(&record.series_id, &record.series_name))
        })?;

        series
            .nodes
            .entry(record.event_id.clone())
            .or_insert_with(|| Node::Event(EventLeaf::from(record)));

        Ok(())
    }

    fn check_keys(&self, record: &Record) -> TreeResult<()> {
        let missing = record.missing_keys();
        let Some(&column) = missing.first() else {
            return Ok(());
        };

        match self.policy {
            KeyPolicy::Strict => Err(DomainError::MissingKey {
                line: record.line,
                column,
            }),
            KeyPolicy::Permissive => {
                warn!(line = record.line, columns = ?missing, "row has empty keys, absorbing as empty-keyed nodes");
                Ok(())
            }
        }
    }
}

/// Get-or-create the child `id` of `parent` and return its interior payload.
///
/// An existing child of another kind is never reused. Subjects and synthesized
/// parts share one id space below a course.
fn descend<'a>(
    parent: &'a mut Branch,
    id: &str,
    line: u64,
    wanted: NodeKind,
    make: impl FnOnce() -> Node,
) -> TreeResult<&'a mut Branch> {
    let node = parent.nodes.entry(id.to_string()).or_insert_with(make);
    let existing = node.kind();
    if existing != wanted {
        return Err(DomainError::KindCollision {
            line,
            id: id.to_string(),
            existing,
            wanted,
        });
    }
    node.branch_mut().ok_or_else(|| DomainError::KindCollision {
        line,
        id: id.to_string(),
        existing,
        wanted,
    })
}
