//! Error types for the navigation engine.

use termgraph_core::LayoutError;
use thiserror::Error;

/// Errors surfaced by [`NavGraph`](crate::NavGraph) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Construction failed because the layout step failed.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// No node or edge carries the requested id.
    #[error("no node or edge with id '{0}'")]
    NotFound(String),
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
