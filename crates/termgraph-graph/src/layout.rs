//! The layout seam.
//!
//! Assigning coordinates is not the navigation engine's job: a
//! [`LayoutEngine`] receives node sizes and edge endpoints and returns a
//! position per node and a bend-point route per edge. The graph calls it
//! exactly once, during construction.
//!
//! [`TreeLayout`] is a small built-in engine that stacks nodes top-down by
//! depth. It exists so the viewer works without an external engine.

use async_trait::async_trait;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, VecDeque};
use termgraph_core::{Coordinate, Edge, LayoutError, Node};
use tracing::{debug, warn};

/// Spacing between neighbouring nodes and between ranks.
pub const NODE_SPACING: i32 = 6;

/// A node as the layout engine sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutNode {
    pub id: String,
    pub width: i32,
    pub height: i32,
}

/// An edge as the layout engine sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Input to a layout run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutRequest {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

impl LayoutRequest {
    /// Builds a request giving every node the same approximate size.
    pub fn uniform<'a>(
        nodes: &[Node],
        edges: impl IntoIterator<Item = &'a Edge>,
        width: i32,
        height: i32,
    ) -> Self {
        Self {
            nodes: nodes
                .iter()
                .map(|node| LayoutNode {
                    id: node.id.clone(),
                    width,
                    height,
                })
                .collect(),
            edges: edges
                .into_iter()
                .map(|edge| LayoutEdge {
                    id: edge.id.clone(),
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                })
                .collect(),
        }
    }
}

/// Output of a layout run, keyed by node id and edge id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutResult {
    pub positions: HashMap<String, Coordinate>,
    pub routes: HashMap<String, Vec<Coordinate>>,
}

impl LayoutResult {
    /// Writes positions onto `nodes` and routes onto `edges`.
    ///
    /// Either every node receives a position or nothing is written and
    /// [`LayoutError::Incomplete`] is returned. An edge without a route gets
    /// the empty path.
    pub fn apply(mut self, nodes: &mut [Node], edges: &mut [Edge]) -> Result<(), LayoutError> {
        let missing: Vec<String> = nodes
            .iter()
            .filter(|node| !self.positions.contains_key(&node.id))
            .map(|node| node.id.clone())
            .collect();
        if !missing.is_empty() {
            return Err(LayoutError::Incomplete { missing });
        }

        for node in nodes.iter_mut() {
            node.position = self.positions.get(&node.id).copied();
        }
        for edge in edges.iter_mut() {
            let route = self.routes.remove(&edge.id).unwrap_or_default();
            if route.is_empty() {
                warn!("Layout reported no route for edge {}", edge.id);
            }
            edge.path = Some(route);
        }
        Ok(())
    }
}

/// Something that can lay out a graph.
///
/// The call may be slow and may suspend; the graph awaits it once and
/// accepts no other operation until it resolves.
#[async_trait]
pub trait LayoutEngine: Send + Sync {
    /// Computes positions and routes for `request`.
    async fn layout(&self, request: LayoutRequest) -> Result<LayoutResult, LayoutError>;
}

/// Top-down layered layout.
///
/// Each node's rank is its longest distance from a root. Ranks are stacked
/// downward and centered on the widest one; within a rank nodes keep their
/// input order. Graphs with cycles fall back to breadth-first depth.
#[derive(Debug, Clone, Copy)]
pub struct TreeLayout {
    pub spacing: i32,
}

impl Default for TreeLayout {
    fn default() -> Self {
        Self {
            spacing: NODE_SPACING,
        }
    }
}

impl TreeLayout {
    /// Runs the layout synchronously.
    pub fn compute(&self, request: &LayoutRequest) -> LayoutResult {
        let mut graph: DiGraph<usize, ()> = DiGraph::new();
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();
        for (position, node) in request.nodes.iter().enumerate() {
            let idx = graph.add_node(position);
            index.entry(node.id.as_str()).or_insert(idx);
        }
        for edge in &request.edges {
            if let (Some(&from), Some(&to)) =
                (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
            {
                graph.add_edge(from, to, ());
            }
        }

        let ranks = Self::rank(&graph);
        let positions = self.place(request, &ranks);

        let mut routes = HashMap::new();
        for edge in &request.edges {
            let (Some(from), Some(to)) =
                (positions.get(&edge.source), positions.get(&edge.target))
            else {
                continue;
            };
            let size = request
                .nodes
                .iter()
                .find(|node| node.id == edge.source)
                .map(|node| (node.width, node.height))
                .unwrap_or_default();
            routes.insert(edge.id.clone(), Self::route(*from, *to, size));
        }

        LayoutResult { positions, routes }
    }

    /// Longest-path ranks, or BFS depth when the graph has a cycle.
    fn rank(graph: &DiGraph<usize, ()>) -> Vec<usize> {
        let mut ranks = vec![0usize; graph.node_count()];

        match petgraph::algo::toposort(graph, None) {
            Ok(order) => {
                for idx in order {
                    for edge in graph.edges_directed(idx, Direction::Outgoing) {
                        let next = edge.target().index();
                        ranks[next] = ranks[next].max(ranks[idx.index()] + 1);
                    }
                }
            }
            Err(cycle) => {
                debug!("Cycle through node {:?}, ranking by BFS depth", cycle.node_id());
                let mut visited = vec![false; graph.node_count()];
                let roots = graph
                    .node_indices()
                    .filter(|&idx| graph.neighbors_directed(idx, Direction::Incoming).next().is_none());
                // Roots first, then anything a cycle left unreached.
                let seeds: Vec<NodeIndex> = roots.chain(graph.node_indices()).collect();

                for seed in seeds {
                    if visited[seed.index()] {
                        continue;
                    }
                    visited[seed.index()] = true;
                    let mut queue = VecDeque::from([seed]);
                    while let Some(current) = queue.pop_front() {
                        for next in graph.neighbors_directed(current, Direction::Outgoing) {
                            if !visited[next.index()] {
                                visited[next.index()] = true;
                                ranks[next.index()] = ranks[current.index()] + 1;
                                queue.push_back(next);
                            }
                        }
                    }
                }
            }
        }

        ranks
    }

    fn place(&self, request: &LayoutRequest, ranks: &[usize]) -> HashMap<String, Coordinate> {
        let depth = ranks.iter().copied().max().map_or(0, |max| max + 1);
        let mut layers: Vec<Vec<&LayoutNode>> = vec![Vec::new(); depth];
        for (node, &rank) in request.nodes.iter().zip(ranks) {
            layers[rank].push(node);
        }

        let layer_width = |layer: &[&LayoutNode]| -> i32 {
            let widths: i32 = layer.iter().map(|node| node.width).sum();
            widths + self.spacing * (layer.len() as i32 - 1).max(0)
        };
        let widest = layers
            .iter()
            .map(|layer| layer_width(layer.as_slice()))
            .max()
            .unwrap_or(0);

        let mut positions = HashMap::with_capacity(request.nodes.len());
        let mut y = 0;
        for layer in &layers {
            let mut x = (widest - layer_width(layer.as_slice())) / 2;
            for node in layer {
                positions
                    .entry(node.id.clone())
                    .or_insert(Coordinate::new(x, y));
                x += node.width + self.spacing;
            }
            let tallest = layer.iter().map(|node| node.height).max().unwrap_or(0);
            y += tallest + self.spacing;
        }

        positions
    }

    /// Orthogonal bend points from the source's bottom-center to the
    /// target's top-center.
    fn route(from: Coordinate, to: Coordinate, (width, height): (i32, i32)) -> Vec<Coordinate> {
        let start = Coordinate::new(from.x + width / 2, from.y + height);
        let end = Coordinate::new(to.x + width / 2, to.y);
        if start.x == end.x {
            return vec![start, end];
        }
        let mid_y = start.y + (end.y - start.y) / 2;
        vec![
            start,
            Coordinate::new(start.x, mid_y),
            Coordinate::new(end.x, mid_y),
            end,
        ]
    }
}

#[async_trait]
impl LayoutEngine for TreeLayout {
    async fn layout(&self, request: LayoutRequest) -> Result<LayoutResult, LayoutError> {
        let result = self.compute(&request);
        debug!(
            "Tree layout placed {} nodes, routed {} edges",
            result.positions.len(),
            result.routes.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(nodes: &[&str], edges: &[(&str, &str)]) -> LayoutRequest {
        let nodes: Vec<Node> = nodes.iter().map(|id| Node::new(*id, *id)).collect();
        let edges: Vec<Edge> = edges
            .iter()
            .map(|(s, t)| Edge::new(format!("{s}-{t}"), *s, *t))
            .collect();
        LayoutRequest::uniform(&nodes, &edges, 16, 6)
    }

    #[test]
    fn test_tree_layout_stacks_ranks() {
        let result = TreeLayout::default().compute(&request(
            &["root", "left", "right"],
            &[("root", "left"), ("root", "right")],
        ));

        let root = result.positions["root"];
        let left = result.positions["left"];
        let right = result.positions["right"];

        assert_eq!(root.y, 0);
        assert_eq!(left.y, 12);
        assert_eq!(right.y, 12);
        assert!(left.x < right.x);
        // root is centered over its two children
        assert_eq!(root.x, 11);
        assert_eq!(right.x - left.x, 22);
    }

    #[test]
    fn test_longest_path_rank() {
        let result = TreeLayout::default().compute(&request(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "c"), ("a", "c")],
        ));
        assert_eq!(result.positions["c"].y, 24);
    }

    #[test]
    fn test_cycle_still_places_every_node() {
        let result = TreeLayout::default().compute(&request(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "c"), ("c", "a")],
        ));
        assert_eq!(result.positions.len(), 3);
        assert_eq!(result.positions["a"].y, 0);
        assert_eq!(result.positions["b"].y, 12);
        assert_eq!(result.positions["c"].y, 24);
    }

    #[test]
    fn test_routes_are_orthogonal() {
        let result = TreeLayout::default().compute(&request(
            &["root", "left", "right"],
            &[("root", "left"), ("root", "right")],
        ));
        let route = &result.routes["root-left"];
        assert_eq!(route.len(), 4);
        for pair in route.windows(2) {
            assert!(pair[0].x == pair[1].x || pair[0].y == pair[1].y);
        }
    }

    #[test]
    fn test_apply_rejects_incomplete_layout() {
        let mut nodes = vec![Node::new("a", "A"), Node::new("b", "B")];
        let mut edges = vec![Edge::new("e1", "a", "b")];
        let mut result = LayoutResult::default();
        result.positions.insert("a".into(), Coordinate::new(1, 1));

        let err = result.apply(&mut nodes, &mut edges).unwrap_err();
        assert_eq!(
            err,
            LayoutError::Incomplete {
                missing: vec!["b".to_string()]
            }
        );
        assert!(nodes.iter().all(|node| node.position.is_none()));
    }

    #[test]
    fn test_apply_defaults_missing_routes_to_empty() {
        let mut nodes = vec![Node::new("a", "A")];
        let mut edges = vec![Edge::new("loop", "a", "a")];
        let mut result = LayoutResult::default();
        result.positions.insert("a".into(), Coordinate::new(2, 3));

        result.apply(&mut nodes, &mut edges).unwrap();
        assert_eq!(nodes[0].position, Some(Coordinate::new(2, 3)));
        assert_eq!(edges[0].path, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_engine_trait_object() {
        let engine: Box<dyn LayoutEngine> = Box::new(TreeLayout::default());
        let result = engine.layout(request(&["solo"], &[])).await.unwrap();
        assert_eq!(result.positions["solo"], Coordinate::new(0, 0));
    }
}
