//! Loading graph files and viewer configuration from disk.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use termgraph_core::{Edge, Node};
use termgraph_graph::GraphOptions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// The on-disk graph format.
///
/// ```json
/// { "nodes": [{"id": "b1", "value": "Root"}],
///   "edges": [{"id": "be1", "source": "b1", "target": "b2"}],
///   "nodeWidth": 16 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphImport {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_height: Option<i32>,
}

impl GraphImport {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        read_json(path)
    }

    /// Graph options from the file, with a command-line width taking
    /// precedence.
    pub fn options(&self, node_width: Option<i32>) -> GraphOptions {
        let defaults = GraphOptions::default();
        GraphOptions {
            node_width: node_width.or(self.node_width).unwrap_or(defaults.node_width),
            node_height: self.node_height.unwrap_or(defaults.node_height),
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_graph_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "nodes": [{{"id": "b1", "value": "Root"}}, {{"id": "b2", "value": "L1 - L"}}],
                "edges": [{{"id": "be1", "source": "b1", "target": "b2"}}],
                "nodeWidth": 20
            }}"#
        )
        .unwrap();

        let import = GraphImport::load(file.path()).unwrap();
        assert_eq!(import.nodes.len(), 2);
        assert_eq!(import.edges[0].target, "b2");

        let options = import.options(None);
        assert_eq!(options.node_width, 20);
        assert_eq!(options.node_height, termgraph_graph::DEFAULT_NODE_HEIGHT);
        assert_eq!(import.options(Some(12)).node_width, 12);
    }

    #[test]
    fn test_edges_are_optional() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"nodes": []}}"#).unwrap();
        let import = GraphImport::load(file.path()).unwrap();
        assert!(import.edges.is_empty());
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let err = GraphImport::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = GraphImport::load(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }
}
