//! Focus resolution: which node sits under the terminal's center cell.

use crate::graph::NavGraph;
use crate::options::FRAME_HEIGHT;
use termgraph_core::{Coordinate, Edge, Node};

/// Extra columns covered by a frame's left and right borders.
const FRAME_BORDER_X: i32 = 2;

/// Rows the id frame extends above a node's position.
const ID_FRAME_OFFSET: i32 = 2;

impl NavGraph {
    /// The first node, in stored order, whose frame covers the center cell.
    ///
    /// This is order-dependent on purpose: overlapping frames resolve to
    /// whichever node comes first, not the nearest one.
    pub fn focused_node(&self) -> Option<&Node> {
        let center = self.terminal_size().center();
        let cursor = self.cursor();
        let width = self.node_width();

        self.nodes().iter().find(|node| {
            node.position
                .is_some_and(|position| frame_covers(position - cursor, width, center))
        })
    }

    /// Returns true if `edge` touches the focused node.
    pub fn is_edge_focused(&self, edge: &Edge, focused: Option<&Node>) -> bool {
        focused.is_some_and(|node| node.id == edge.source || node.id == edge.target)
    }
}

fn frame_covers(relative: Coordinate, width: i32, cell: Coordinate) -> bool {
    let top_left = relative - Coordinate::new(0, ID_FRAME_OFFSET);
    let bottom_right = top_left + Coordinate::new(width + FRAME_BORDER_X, FRAME_HEIGHT);
    cell.x >= top_left.x
        && cell.x <= bottom_right.x
        && cell.y >= top_left.y
        && cell.y <= bottom_right.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::placed;
    use termgraph_core::TerminalSize;

    #[test]
    fn test_no_focus_when_center_is_empty() {
        let graph = placed(
            vec![Node::new("far", "Far").at(500, 500)],
            Vec::new(),
            TerminalSize::new(80, 24),
        );
        assert!(graph.focused_node().is_none());
    }

    #[test]
    fn test_frame_bounds_are_inclusive() {
        // center cell is (40, 12)
        let cases = [
            (Coordinate::new(40, 12), true),
            (Coordinate::new(22, 12), true),  // right edge: 22 + 16 + 2
            (Coordinate::new(21, 12), false),
            (Coordinate::new(41, 12), false),
            (Coordinate::new(40, 14), true),  // id frame reaches two rows up
            (Coordinate::new(40, 15), false),
            (Coordinate::new(40, 9), true),   // bottom: 9 + 5 - 2
            (Coordinate::new(40, 8), false),
        ];
        for (position, expected) in cases {
            let graph = placed(
                vec![Node::new("n", "N").at(position.x, position.y)],
                Vec::new(),
                TerminalSize::new(80, 24),
            );
            assert_eq!(graph.focused_node().is_some(), expected, "node at {position}");
        }
    }

    #[test]
    fn test_first_match_wins_over_nearest() {
        let nodes = vec![
            Node::new("first", "First").at(25, 12),
            Node::new("second", "Second").at(40, 12),
        ];
        let graph = placed(nodes, Vec::new(), TerminalSize::new(80, 24));
        assert_eq!(graph.focused_node().unwrap().id, "first");
    }

    #[test]
    fn test_focus_follows_camera() {
        let nodes = vec![Node::new("a", "A").at(0, 0), Node::new("b", "B").at(100, 0)];
        let mut graph = placed(nodes, Vec::new(), TerminalSize::new(80, 24));

        graph.pan(-40, -12);
        assert_eq!(graph.focused_node().unwrap().id, "a");
        graph.pan(100, 0);
        assert_eq!(graph.focused_node().unwrap().id, "b");
        graph.pan(0, 50);
        assert!(graph.focused_node().is_none());
    }

    #[test]
    fn test_unpositioned_nodes_never_focus() {
        let graph = placed(
            vec![Node::new("ghost", "Ghost")],
            Vec::new(),
            TerminalSize::new(80, 24),
        );
        assert!(graph.focused_node().is_none());
    }

    #[test]
    fn test_edge_focus() {
        let graph = placed(
            vec![Node::new("a", "A").at(40, 12), Node::new("b", "B").at(0, 0)],
            vec![Edge::new("ab", "a", "b"), Edge::new("bb", "b", "b")],
            TerminalSize::new(80, 24),
        );
        let focused = graph.focused_node();
        assert!(graph.is_edge_focused(&graph.edges()[0], focused));
        assert!(!graph.is_edge_focused(&graph.edges()[1], focused));
        assert!(!graph.is_edge_focused(&graph.edges()[0], None));
    }
}
