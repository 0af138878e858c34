//! Domain entities: flat timetable records and the organisational unit tree

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// One row of a timetable export.
///
/// Columns are positional (the export has no header row):
/// `TriposId, TriposName, PartId, PartName, SubPartId, SubPartName, ModuleId,
/// ModuleName, SerieId, SerieName, EventId, EventTitle, EventType,
/// EventStartDateTime, EventEndDateTime`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub course_id: String,
    pub course_name: String,
    pub part_id: String,
    pub part_name: String,
    /// SubPart in the export; optional
    pub subject_id: Option<String>,
    pub subject_name: Option<String>,
    pub module_id: String,
    pub module_name: String,
    pub series_id: String,
    pub series_name: String,
    pub event_id: String,
    pub event_title: String,
    pub event_type: String,
    pub event_start: String,
    pub event_end: String,
    /// 1-based source line, set by the record source
    #[serde(skip)]
    pub line: u64,
}

/// Number of positional columns in a timetable export row.
pub const RECORD_COLUMNS: usize = 15;

impl Record {
    /// Subject id and name, only when both are present and non-empty.
    pub fn subject(&self) -> Option<(&str, &str)> {
        match (self.subject_id.as_deref(), self.subject_name.as_deref()) {
            (Some(id), Some(name)) if !id.is_empty() && !name.is_empty() => Some((id, name)),
            _ => None,
        }
    }

    /// Export column names of required keys that are empty in this row.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        [
            ("TriposId", &self.course_id),
            ("PartId", &self.part_id),
            ("ModuleId", &self.module_id),
            ("SerieId", &self.series_id),
            ("EventId", &self.event_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(column, _)| column)
        .collect()
    }
}

/// Level of a node in the organisational unit tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Course,
    Subject,
    Part,
    Module,
    Series,
    Event,
}

impl NodeKind {
    /// Value of the `type` field in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Course => "course",
            NodeKind::Subject => "subject",
            NodeKind::Part => "part",
            NodeKind::Module => "module",
            NodeKind::Series => "series",
            NodeKind::Event => "event",
        }
    }

    /// First letter of the type, as shown in the console outline.
    pub fn initial(&self) -> char {
        self.as_str().chars().next().unwrap_or('?')
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interior node payload: children keyed by id, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub nodes: IndexMap<String, Node>,
}

impl Branch {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nodes: IndexMap::new(),
        }
    }

    /// Id of the first `Part` child whose name equals `name`.
    ///
    /// Linear scan in insertion order; this defines part matching (by name, not id).
    pub fn find_part_by_name(&self, name: &str) -> Option<&str> {
        self.nodes
            .values()
            .find(|node| node.kind() == NodeKind::Part && node.name() == name)
            .map(Node::id)
    }
}

/// Leaf payload for a single timetable event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLeaf {
    pub id: String,
    pub name: String,
    pub event_type: String,
    pub start: String,
    pub end: String,
}

impl From<&Record> for EventLeaf {
    fn from(record: &Record) -> Self {
        Self {
            id: record.event_id.clone(),
            name: record.event_title.clone(),
            event_type: record.event_type.clone(),
            start: record.event_start.clone(),
            end: record.event_end.clone(),
        }
    }
}

/// Node of the organisational unit tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Root(Branch),
    Course(Branch),
    Subject(Branch),
    Part(Branch),
    Module(Branch),
    Series(Branch),
    Event(EventLeaf),
}

impl Node {
    pub fn root(name: impl Into<String>) -> Self {
        Node::Root(Branch::new("", name))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Root(_) => NodeKind::Root,
            Node::Course(_) => NodeKind::Course,
            Node::Subject(_) => NodeKind::Subject,
            Node::Part(_) => NodeKind::Part,
            Node::Module(_) => NodeKind::Module,
            Node::Series(_) => NodeKind::Series,
            Node::Event(_) => NodeKind::Event,
        }
    }

    /// Id of the node; empty for the root.
    pub fn id(&self) -> &str {
        match self {
            Node::Event(leaf) => &leaf.id,
            _ => self.branch().map(|b| b.id.as_str()).unwrap_or_default(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Event(leaf) => &leaf.name,
            _ => self.branch().map(|b| b.name.as_str()).unwrap_or_default(),
        }
    }

    /// Interior payload; `None` for event leaves.
    pub fn branch(&self) -> Option<&Branch> {
        match self {
            Node::Root(b)
            | Node::Course(b)
            | Node::Subject(b)
            | Node::Part(b)
            | Node::Module(b)
            | Node::Series(b) => Some(b),
            Node::Event(_) => None,
        }
    }

    pub fn branch_mut(&mut self) -> Option<&mut Branch> {
        match self {
            Node::Root(b)
            | Node::Course(b)
            | Node::Subject(b)
            | Node::Part(b)
            | Node::Module(b)
            | Node::Series(b) => Some(b),
            Node::Event(_) => None,
        }
    }

    pub fn event(&self) -> Option<&EventLeaf> {
        match self {
            Node::Event(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.branch().into_iter().flat_map(|b| b.nodes.values())
    }

    /// Child with the given id.
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.branch().and_then(|b| b.nodes.get(id))
    }

    /// Number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children().map(Node::node_count).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self.children().map(Node::depth).max().unwrap_or(0)
    }

    pub fn is_leaf(&self) -> bool {
        self.children().next().is_none()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Node::Event(leaf) => {
                map.serialize_entry("id", &leaf.id)?;
                map.serialize_entry("name", &leaf.name)?;
                map.serialize_entry("type", self.kind().as_str())?;
                map.serialize_entry("event-type", &leaf.event_type)?;
                map.serialize_entry("start", &leaf.start)?;
                map.serialize_entry("end", &leaf.end)?;
            }
            Node::Root(branch) => {
                map.serialize_entry("name", &branch.name)?;
                map.serialize_entry("type", self.kind().as_str())?;
                map.serialize_entry("nodes", &branch.nodes)?;
            }
            Node::Course(branch)
            | Node::Subject(branch)
            | Node::Part(branch)
            | Node::Module(branch)
            | Node::Series(branch) => {
                map.serialize_entry("id", &branch.id)?;
                map.serialize_entry("name", &branch.name)?;
                map.serialize_entry("type", self.kind().as_str())?;
                map.serialize_entry("nodes", &branch.nodes)?;
            }
        }
        map.end()
    }
}

/// How rows with empty required keys are absorbed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPolicy {
    /// Empty keys become empty-keyed nodes (warned, not rejected)
    #[default]
    Permissive,
    /// First row with an empty key aborts the build
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subject_id: Option<&str>, subject_name: Option<&str>) -> Record {
        Record {
            course_id: "C1".into(),
            part_id: "P1".into(),
            subject_id: subject_id.map(String::from),
            subject_name: subject_name.map(String::from),
            module_id: "M1".into(),
            series_id: "S1".into(),
            event_id: "E1".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_subject_requires_id_and_name() {
        assert_eq!(
            record(Some("SP1"), Some("Physics")).subject(),
            Some(("SP1", "Physics"))
        );
        assert_eq!(record(Some("SP1"), None).subject(), None);
        assert_eq!(record(Some(""), Some("Physics")).subject(), None);
        assert_eq!(record(None, None).subject(), None);
    }

    #[test]
    fn test_missing_keys_names_export_columns() {
        let mut r = record(None, None);
        assert!(r.missing_keys().is_empty());
        r.module_id.clear();
        r.event_id.clear();
        assert_eq!(r.missing_keys(), vec!["ModuleId", "EventId"]);
    }

    #[test]
    fn test_kind_initials() {
        assert_eq!(NodeKind::Root.initial(), 'r');
        assert_eq!(NodeKind::Subject.initial(), 's');
        assert_eq!(NodeKind::Series.initial(), 's');
        assert_eq!(NodeKind::Event.initial(), 'e');
    }

    #[test]
    fn test_event_serializes_without_nodes() {
        let leaf = Node::Event(EventLeaf {
            id: "E1".into(),
            name: "Lecture 1".into(),
            event_type: "Lecture".into(),
            start: "2024-01-01T09:00".into(),
            end: "2024-01-01T10:00".into(),
        });
        let value = serde_json::to_value(&leaf).unwrap();
        assert_eq!(value["event-type"], "Lecture");
        assert_eq!(value["type"], "event");
        assert!(value.get("nodes").is_none());
    }

    #[test]
    fn test_root_serializes_without_id() {
        let value = serde_json::to_value(Node::root("Timetable")).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["name"], "Timetable");
        assert_eq!(value["type"], "root");
        assert!(value["nodes"].as_object().unwrap().is_empty());
    }
}
