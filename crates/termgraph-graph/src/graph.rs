//! The navigation graph.
//!
//! `NavGraph` owns the laid-out nodes and edges, the id lookup tables and
//! the camera. Nodes and edges are frozen once construction finishes; the
//! camera and the terminal size are the only state that changes afterwards.

use crate::error::{GraphError, Result};
use crate::layout::{LayoutEngine, LayoutRequest};
use crate::options::GraphOptions;
use crate::search_index::SearchIndex;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use termgraph_core::{Coordinate, Edge, Node, TerminalSize};
use tracing::{debug, info, warn};

/// Index of a node inside the graph.
pub type NodeId = NodeIndex;

/// A node or an edge, as returned by [`NavGraph::get_element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element<'a> {
    Node(&'a Node),
    Edge(&'a Edge),
}

/// The graph being viewed, plus the camera looking at it.
#[derive(Debug)]
pub struct NavGraph {
    /// Nodes in caller order. `NodeId(i)` addresses `nodes[i]`.
    nodes: Vec<Node>,

    /// Edges in caller order, malformed ones included.
    edges: Vec<Edge>,

    /// Adjacency of well-formed edges; edge weights index into `edges`.
    topology: DiGraph<(), usize>,

    /// Maps node ids to node indexes.
    id_index: HashMap<String, NodeId>,

    /// Maps edge ids to positions in `edges`.
    edge_index: HashMap<String, usize>,

    /// Lowercased search fields, built once.
    search_index: SearchIndex,

    options: GraphOptions,

    /// Camera offset subtracted from every absolute position.
    cursor: Coordinate,

    terminal: TerminalSize,
}

impl NavGraph {
    /// Builds a graph, running `engine` first if no node has a position.
    ///
    /// Layout happens at most once. If the engine fails, or leaves any node
    /// without a position, no graph is returned. Edges naming an unknown
    /// node are kept but never laid out, routed or rendered.
    pub async fn create<L>(
        mut nodes: Vec<Node>,
        mut edges: Vec<Edge>,
        terminal: TerminalSize,
        options: GraphOptions,
        engine: &L,
    ) -> Result<Self>
    where
        L: LayoutEngine + ?Sized,
    {
        let malformed: HashSet<usize> = {
            let known: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
            edges
                .iter()
                .enumerate()
                .filter(|(_, edge)| {
                    !known.contains(edge.source.as_str()) || !known.contains(edge.target.as_str())
                })
                .map(|(i, _)| i)
                .collect()
        };
        for &i in &malformed {
            let edge = &edges[i];
            warn!(
                "Edge {} references a missing node ({} -> {})",
                edge.id, edge.source, edge.target
            );
        }

        if !nodes.iter().any(|node| node.position.is_some()) {
            let request = LayoutRequest::uniform(
                &nodes,
                edges
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !malformed.contains(i))
                    .map(|(_, edge)| edge),
                options.node_width,
                options.node_height,
            );
            debug!(
                "Requesting layout for {} nodes, {} edges",
                request.nodes.len(),
                request.edges.len()
            );
            engine.layout(request).await?.apply(&mut nodes, &mut edges)?;
        } else {
            debug!("Nodes carry positions already, skipping layout");
        }

        let graph = Self::assemble(nodes, edges, terminal, options);
        info!(
            "Graph ready: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Builds lookup tables and adjacency over laid-out data.
    fn assemble(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        terminal: TerminalSize,
        options: GraphOptions,
    ) -> Self {
        let mut topology = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut id_index = HashMap::with_capacity(nodes.len());
        for node in &nodes {
            let index = topology.add_node(());
            if id_index.insert(node.id.clone(), index).is_some() {
                warn!("Duplicate node id {}, the later node wins lookups", node.id);
            }
        }

        let mut edge_index = HashMap::with_capacity(edges.len());
        for (position, edge) in edges.iter().enumerate() {
            edge_index.insert(edge.id.clone(), position);
            if let (Some(&from), Some(&to)) = (id_index.get(&edge.source), id_index.get(&edge.target))
            {
                topology.add_edge(from, to, position);
            }
        }

        let search_index = SearchIndex::build(&nodes);

        Self {
            nodes,
            edges,
            topology,
            id_index,
            edge_index,
            search_index,
            options,
            cursor: Coordinate::origin(),
            terminal,
        }
    }

    /// Moves the camera by a delta. The camera is never clamped.
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.cursor += Coordinate::new(dx, dy);
    }

    /// Records a new terminal size. The camera is left where it is.
    pub fn set_terminal_size(&mut self, width: i32, height: i32) {
        self.terminal = TerminalSize::new(width, height);
    }

    /// Places the camera at an absolute offset.
    pub(crate) fn set_cursor(&mut self, cursor: Coordinate) {
        self.cursor = cursor;
    }

    /// Looks up a node, then an edge, by id.
    pub fn get_element(&self, id: &str) -> Result<Element<'_>> {
        if let Some(node) = self.get_node(id) {
            return Ok(Element::Node(node));
        }
        self.edge_index
            .get(id)
            .map(|&position| Element::Edge(&self.edges[position]))
            .ok_or_else(|| GraphError::NotFound(id.to_string()))
    }

    /// Gets a node by its string id.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        let index = self.id_index.get(id)?;
        self.nodes.get(index.index())
    }

    /// Resolves both ends of an edge, or `None` if either is unknown.
    pub fn endpoints(&self, edge: &Edge) -> Option<(&Node, &Node)> {
        Some((self.get_node(&edge.source)?, self.get_node(&edge.target)?))
    }

    /// Edges entering or leaving the node with the given id.
    pub fn incident_edges(&self, id: &str) -> Vec<&Edge> {
        let Some(&index) = self.id_index.get(id) else {
            return Vec::new();
        };
        let mut positions: Vec<usize> = self
            .topology
            .edges_directed(index, Direction::Outgoing)
            .chain(self.topology.edges_directed(index, Direction::Incoming))
            .map(|edge| *edge.weight())
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions.into_iter().map(|p| &self.edges[p]).collect()
    }

    /// Number of edges pointing at each node.
    ///
    /// Every edge whose target exists is counted, even when its source
    /// does not.
    pub fn in_degrees(&self) -> HashMap<&str, usize> {
        let mut degrees: HashMap<&str, usize> =
            self.nodes.iter().map(|node| (node.id.as_str(), 0)).collect();
        for edge in &self.edges {
            if let Some(count) = degrees.get_mut(edge.target.as_str()) {
                *count += 1;
            }
        }
        degrees
    }

    /// Nodes in caller order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in caller order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The current camera offset.
    pub fn cursor(&self) -> Coordinate {
        self.cursor
    }

    /// The last terminal size reported by the host.
    pub fn terminal_size(&self) -> TerminalSize {
        self.terminal
    }

    /// Construction options.
    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Inner width of a node frame.
    pub fn node_width(&self) -> i32 {
        self.options.node_width
    }

    pub(crate) fn search_index(&self) -> &SearchIndex {
        &self.search_index
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges, malformed ones included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
