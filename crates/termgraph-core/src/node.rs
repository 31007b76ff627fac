//! Node and edge types.
//!
//! These are the caller-supplied records a graph is built from. Positions
//! and paths start out empty and are filled exactly once by the layout
//! step; after that the graph only hands out shared references.

use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// A vertex in the viewed graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique key.
    pub id: String,

    /// Display label shown inside the node frame.
    pub value: String,

    /// Optional secondary label, searchable but not rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// World position, assigned by layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Coordinate>,
}

impl Node {
    /// Creates an unpositioned node.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            label: None,
            position: None,
        }
    }

    /// Sets the secondary label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets a pre-computed position.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Some(Coordinate::new(x, y));
        self
    }

    /// The ordered text fields search looks at: id, value, then label.
    ///
    /// Fields are trimmed, blank ones skipped, and exact duplicates dropped
    /// while keeping the first occurrence.
    pub fn search_fields(&self) -> Vec<&str> {
        let candidates = [Some(self.id.as_str()), Some(self.value.as_str()), self.label.as_deref()];

        let mut fields: Vec<&str> = Vec::with_capacity(candidates.len());
        for field in candidates.into_iter().flatten() {
            let trimmed = field.trim();
            if !trimmed.is_empty() && !fields.contains(&trimmed) {
                fields.push(trimmed);
            }
        }
        fields
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Unique key.
    pub id: String,

    /// Id of the source node.
    pub source: String,

    /// Id of the target node.
    pub target: String,

    /// Route from source to target, assigned by layout. Empty when the
    /// engine reported no route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Coordinate>>,
}

impl Edge {
    /// Creates an edge without a route.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            path: None,
        }
    }

    /// The route assigned by layout, or an empty slice.
    pub fn route(&self) -> &[Coordinate] {
        self.path.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_fields_order_and_dedup() {
        let node = Node::new("root", "  Root ").with_label("root");
        assert_eq!(node.search_fields(), vec!["root", "Root"]);
    }

    #[test]
    fn test_search_fields_skip_blank() {
        let node = Node::new("n1", "   ").with_label("Entry");
        assert_eq!(node.search_fields(), vec!["n1", "Entry"]);
    }

    #[test]
    fn test_deserialize_import_shape() {
        let node: Node = serde_json::from_str(r#"{"id":"b1","value":"Root"}"#).unwrap();
        assert_eq!(node, Node::new("b1", "Root"));

        let edge: Edge =
            serde_json::from_str(r#"{"id":"e1","source":"b1","target":"b2"}"#).unwrap();
        assert!(edge.route().is_empty());

        let placed: Node =
            serde_json::from_str(r#"{"id":"b2","value":"Leaf","position":{"x":4,"y":7}}"#)
                .unwrap();
        assert_eq!(placed.position, Some(Coordinate::new(4, 7)));
    }
}
