//! Viewport fitting.
//!
//! `fit_view` picks a camera offset by walking a fixed chain of anchors and
//! taking the first that applies:
//!
//! 1. the requested focus node, if it exists and has a position
//! 2. the positioned root (in-degree 0) that is topmost, then leftmost
//! 3. the positioned node that is topmost, then leftmost
//! 4. the midpoint of the bounding box of positioned nodes
//!
//! Each step is a separate method so its tie-breaking can be tested alone.

use crate::graph::NavGraph;
use crate::options::FIT_PADDING;
use termgraph_core::{Coordinate, Node};
use tracing::debug;

impl NavGraph {
    /// Moves the camera to bring `focus_id`, or a sensible default, into
    /// view. An unknown or unpositioned focus id falls through to the
    /// defaults rather than failing.
    pub fn fit_view(&mut self, focus_id: Option<&str>) {
        let camera = focus_id
            .and_then(|id| self.fit_to_node(id))
            .or_else(|| self.fit_to_root())
            .or_else(|| self.fit_to_topmost())
            .unwrap_or_else(|| self.fit_to_bounds());

        debug!("Fit view to {:?}: camera {}", focus_id, camera);
        self.set_cursor(camera);
    }

    /// Camera that puts the node's horizontal middle and top row on the
    /// terminal center.
    pub(crate) fn fit_to_node(&self, id: &str) -> Option<Coordinate> {
        let position = self.get_node(id)?.position?;
        let center = self.terminal_size().center();
        Some(position - center + Coordinate::new(self.node_width().div_euclid(2), 0))
    }

    /// Camera anchored on the topmost, then leftmost, positioned root.
    pub(crate) fn fit_to_root(&self) -> Option<Coordinate> {
        let degrees = self.in_degrees();
        let roots = self
            .nodes()
            .iter()
            .filter(|node| degrees.get(node.id.as_str()) == Some(&0));
        topmost(roots).map(|position| self.padded_center(position))
    }

    /// Camera anchored on the topmost, then leftmost, positioned node.
    pub(crate) fn fit_to_topmost(&self) -> Option<Coordinate> {
        topmost(self.nodes().iter()).map(|position| self.padded_center(position))
    }

    /// Camera centered on the bounding box of positioned nodes, or on the
    /// origin when nothing has a position.
    pub(crate) fn fit_to_bounds(&self) -> Coordinate {
        let mut positions = self.nodes().iter().filter_map(|node| node.position);
        let midpoint = match positions.next() {
            Some(first) => {
                let (min, max) = positions.fold((first, first), |(min, max), p| {
                    (
                        Coordinate::new(min.x.min(p.x), min.y.min(p.y)),
                        Coordinate::new(max.x.max(p.x), max.y.max(p.y)),
                    )
                });
                Coordinate::new(floor_midpoint(min.x, max.x), floor_midpoint(min.y, max.y))
            }
            None => Coordinate::origin(),
        };
        self.padded_center(midpoint)
    }

    fn padded_center(&self, anchor: Coordinate) -> Coordinate {
        anchor - self.terminal_size().center() + FIT_PADDING
    }
}

fn floor_midpoint(a: i32, b: i32) -> i32 {
    // the floored midpoint of two i32s always fits back into i32
    (i64::from(a) + i64::from(b)).div_euclid(2) as i32
}

/// Smallest `y`, ties broken by smallest `x`; first wins on a full tie.
fn topmost<'a>(nodes: impl Iterator<Item = &'a Node>) -> Option<Coordinate> {
    nodes
        .filter_map(|node| node.position)
        .min_by_key(|position| (position.y, position.x))
}
