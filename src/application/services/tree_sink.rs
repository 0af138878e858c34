//! Tree sink: console outline and JSON serialization
//!
//! Both consumers are read-only views over a finished tree.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Node;

/// Renders a tree for the console and for file output.
#[derive(Debug, Clone)]
pub struct TreeSink {
    outline_indent: usize,
    json_indent: usize,
}

impl Default for TreeSink {
    fn default() -> Self {
        Self::new(3, 4)
    }
}

impl TreeSink {
    pub fn new(outline_indent: usize, json_indent: usize) -> Self {
        Self {
            outline_indent,
            json_indent,
        }
    }

    /// Pre-order outline, one `<indent><name> (<type initial>)` line per node.
    pub fn render_outline(&self, tree: &Node) -> Vec<String> {
        let mut lines = Vec::new();
        let mut stack = vec![(tree, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            lines.push(format!(
                "{}{} ({})",
                " ".repeat(depth * self.outline_indent),
                node.name(),
                node.kind().initial()
            ));

            // Reversed so the first child is popped first
            let children: Vec<&Node> = node.children().collect();
            for child in children.into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }

        lines
    }

    pub fn print_outline<W: Write>(&self, tree: &Node, out: &mut W) -> io::Result<()> {
        for line in self.render_outline(tree) {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }

    /// Pretty-printed JSON using the configured indent.
    pub fn to_json(&self, tree: &Node) -> ApplicationResult<String> {
        let indent = " ".repeat(self.json_indent);
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));

        tree.serialize(&mut serializer)
            .map_err(|e| ApplicationError::OperationFailed {
                context: "serialize tree".to_string(),
                source: Box::new(e),
            })?;

        String::from_utf8(buf).map_err(|e| ApplicationError::OperationFailed {
            context: "serialize tree".to_string(),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Branch, EventLeaf};

    fn sample() -> Node {
        let mut series = Branch::new("S1", "Ser1");
        series.nodes.insert(
            "E1".into(),
            Node::Event(EventLeaf {
                id: "E1".into(),
                name: "EventA".into(),
                ..Default::default()
            }),
        );
        let mut course = Branch::new("C1", "CourseOne");
        course.nodes.insert("S1".into(), Node::Series(series));
        let mut root = Branch::new("", "Timetable");
        root.nodes.insert("C1".into(), Node::Course(course));
        Node::Root(root)
    }

    #[test]
    fn test_outline_indents_three_spaces_per_level() {
        let lines = TreeSink::default().render_outline(&sample());
        assert_eq!(
            lines,
            vec![
                "Timetable (r)",
                "   CourseOne (c)",
                "      Ser1 (s)",
                "         EventA (e)",
            ]
        );
    }

    #[test]
    fn test_json_uses_configured_indent() {
        let json = TreeSink::new(3, 2).to_json(&Node::root("Timetable")).unwrap();
        assert_eq!(
            json,
            "{\n  \"name\": \"Timetable\",\n  \"type\": \"root\",\n  \"nodes\": {}\n}"
        );
    }
}
