//! Termgraph Graph - The navigation engine
//!
//! This crate holds a laid-out graph together with the camera looking at
//! it, and answers the questions a terminal viewer asks every frame:
//! where is the camera, which node is under the crosshair, what matches
//! this search, and which glyphs go where.
//!
//! # Architecture
//!
//! - [`NavGraph`] owns nodes, edges, id lookups and the camera. Layout runs
//!   once, through a [`LayoutEngine`], while the graph is being created.
//! - `fit_view`, `search` and `focused_node` are synchronous methods over
//!   that state; only `pan`, `set_terminal_size` and `fit_view` move
//!   anything, and they only ever move the camera.
//! - [`Scene`] turns the current state into draw commands for a host.
//!
//! The graph is meant to be driven from a single task. Hosts that share it
//! across threads must serialize access themselves.
//!
//! # Example
//!
//! ```no_run
//! use termgraph_core::{Edge, Node, TerminalSize};
//! use termgraph_graph::{GraphOptions, NavGraph, SearchOptions, TreeLayout};
//!
//! # async fn run() -> termgraph_graph::Result<()> {
//! let nodes = vec![Node::new("b1", "Root"), Node::new("b2", "Leaf")];
//! let edges = vec![Edge::new("be1", "b1", "b2")];
//!
//! let mut graph = NavGraph::create(
//!     nodes,
//!     edges,
//!     TerminalSize::new(120, 40),
//!     GraphOptions::default(),
//!     &TreeLayout::default(),
//! )
//! .await?;
//!
//! graph.fit_view(None);
//! let hit = graph.search("leaf", SearchOptions::default()).all[0].id.clone();
//! graph.fit_view(Some(&hit));
//! # Ok(())
//! # }
//! ```

mod error;
mod fit;
mod focus;
mod graph;
pub mod layout;
mod options;
mod scene;
mod search_index;

pub use error::{GraphError, Result};
pub use graph::{Element, NavGraph, NodeId};
pub use layout::{LayoutEngine, LayoutRequest, LayoutResult, TreeLayout};
pub use options::{
    GraphOptions, DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, FIT_PADDING, FRAME_HEIGHT,
};
pub use scene::{status_line, DrawCommand, FrameKind, Scene, CROSSHAIR};
pub use search_index::{
    levenshtein, FuzzyMatch, SearchIndex, SearchOptions, SearchResults, SlicedMatch,
};
