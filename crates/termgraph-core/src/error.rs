//! Errors shared across termgraph crates.

use thiserror::Error;

/// Errors raised while obtaining a layout for a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout engine itself failed.
    #[error("layout engine failed: {0}")]
    Engine(String),

    /// The engine returned, but without a position for some nodes.
    #[error("layout returned no position for {} node(s): {}", missing.len(), missing.join(", "))]
    Incomplete { missing: Vec<String> },
}

/// Result type for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
