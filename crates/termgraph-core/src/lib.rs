//! Termgraph Core - Data model and edge routing
//!
//! This crate holds the plain data types every other termgraph crate
//! speaks: nodes, edges, coordinates and terminal sizes. It also owns the
//! geometry that turns a pair of points into an orthogonal route of
//! box-drawing glyphs.
//!
//! Nothing here knows about cameras, layout engines or terminals. Those
//! live in `termgraph-graph` and the CLI.
//!
//! # Example
//!
//! ```
//! use termgraph_core::{get_path, Coordinate};
//!
//! let cells = get_path(Coordinate::new(0, 0), Coordinate::new(4, 0));
//! assert_eq!(cells.len(), 5);
//! assert!(cells.iter().all(|cell| cell.glyph == '─'));
//! ```

mod coordinate;
mod error;
pub mod geometry;
mod node;

pub use coordinate::{Coordinate, TerminalSize};
pub use error::{LayoutError, Result};
pub use geometry::{get_path, orthogonal_path, render_path, PathCell};
pub use node::{Edge, Node};
