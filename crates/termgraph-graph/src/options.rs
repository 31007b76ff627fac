//! Tunables shared by layout, fitting, focus and scene composition.

use serde::{Deserialize, Serialize};
use termgraph_core::Coordinate;

/// Default inner width of a node frame, in cells.
pub const DEFAULT_NODE_WIDTH: i32 = 16;

/// Approximate node height handed to the layout engine.
pub const DEFAULT_NODE_HEIGHT: i32 = 6;

/// Rows covered by a node: the id frame sits two rows above the value
/// frame, and each frame is three rows tall.
pub const FRAME_HEIGHT: i32 = 5;

/// Offset added after centering on a default anchor, so the anchor's frame
/// sits up and to the left of dead-center with room for its subtree.
pub const FIT_PADDING: Coordinate = Coordinate::new(8, 16);

/// Options fixed at graph construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphOptions {
    /// Inner width of a node frame.
    pub node_width: i32,

    /// Node height passed to the layout engine.
    pub node_height: i32,

    /// Draw the id frame above each node's value frame.
    pub render_node_id: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            node_width: DEFAULT_NODE_WIDTH,
            node_height: DEFAULT_NODE_HEIGHT,
            render_node_id: true,
        }
    }
}
