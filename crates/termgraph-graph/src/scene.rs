//! Per-frame draw commands.
//!
//! The engine does not touch the terminal. Instead, [`Scene::compose`]
//! turns the current graph and camera into a flat list of positioned draw
//! commands, already converted to terminal-relative cells and culled to the
//! screen. A host compositor paints them in order.

use crate::graph::NavGraph;
use crate::options::FRAME_HEIGHT;
use termgraph_core::{get_path, Coordinate, Node, TerminalSize};

/// Labels at least this long are shortened.
const MAX_LABEL_LEN: usize = 14;

/// Characters kept from a shortened label, before the `..` suffix.
const LABEL_SLICE_LEN: usize = 12;

/// Rows between the id frame and the value frame.
const ID_FRAME_OFFSET: i32 = 2;

/// Character drawn at the terminal center.
pub const CROSSHAIR: char = '+';

/// Which of a node's two frames a [`DrawCommand::NodeFrame`] draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Value,
    Id,
}

/// One thing to paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// A single edge glyph.
    EdgeCell {
        position: Coordinate,
        glyph: char,
        highlighted: bool,
    },
    /// A bordered box with centered text; `width` is the inner width.
    NodeFrame {
        position: Coordinate,
        width: i32,
        text: String,
        kind: FrameKind,
        highlighted: bool,
    },
    /// The center marker.
    Crosshair { position: Coordinate },
    /// The status line in the top-left corner.
    StatusLine { text: String },
}

/// Draw commands for one frame, in paint order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    pub terminal: TerminalSize,
    pub commands: Vec<DrawCommand>,
    /// Id of the focused node, if any.
    pub focused: Option<String>,
}

impl Scene {
    /// Composes the frame for the graph's current camera and terminal.
    ///
    /// Paint order is crosshair, edges, nodes, status line, so nodes cover
    /// the edge stubs running under them.
    pub fn compose(graph: &NavGraph) -> Self {
        let terminal = graph.terminal_size();
        let cursor = graph.cursor();
        let focused = graph.focused_node();
        let mut commands = vec![DrawCommand::Crosshair {
            position: crosshair(terminal),
        }];

        for edge in graph.edges() {
            let Some((source, target)) = graph.endpoints(edge) else {
                continue;
            };
            let (Some(from), Some(to)) = (
                anchor(source, graph.node_width()),
                anchor(target, graph.node_width()),
            ) else {
                continue;
            };
            let highlighted = graph.is_edge_focused(edge, focused);
            commands.extend(get_path(from, to).into_iter().filter_map(|cell| {
                let position = cell.position - cursor;
                terminal.contains(position).then_some(DrawCommand::EdgeCell {
                    position,
                    glyph: cell.glyph,
                    highlighted,
                })
            }));
        }

        let render_id = graph.options().render_node_id;
        for node in graph.nodes() {
            let Some(position) = node.position else {
                continue;
            };
            let relative = position - cursor;
            if !node_visible(relative, terminal, render_id) {
                continue;
            }
            let highlighted = focused.is_some_and(|f| f.id == node.id);

            commands.push(DrawCommand::NodeFrame {
                position: relative,
                width: graph.node_width(),
                text: shorten(&node.value),
                kind: FrameKind::Value,
                highlighted,
            });
            if render_id {
                commands.push(DrawCommand::NodeFrame {
                    position: relative - Coordinate::new(0, ID_FRAME_OFFSET),
                    width: graph.node_width(),
                    text: shorten(&node.id),
                    kind: FrameKind::Id,
                    highlighted,
                });
            }
        }

        commands.push(DrawCommand::StatusLine {
            text: status_line(graph.node_count(), graph.edge_count()),
        });

        Self {
            terminal,
            commands,
            focused: focused.map(|node| node.id.clone()),
        }
    }
}

/// Where edges attach to a node: one row down, half a frame in.
fn anchor(node: &Node, node_width: i32) -> Option<Coordinate> {
    let position = node.position?;
    Some(position + Coordinate::new((node_width + 1).div_euclid(2), 1))
}

fn crosshair(terminal: TerminalSize) -> Coordinate {
    Coordinate::new(
        (terminal.width - 1).div_euclid(2).max(0),
        terminal.height.div_euclid(2).max(0),
    )
}

/// Nodes touching the top or left edge are hidden entirely, as are nodes
/// whose id frame would not fit vertically.
fn node_visible(relative: Coordinate, terminal: TerminalSize, render_id: bool) -> bool {
    if relative.x <= 0
        || relative.x >= terminal.width
        || relative.y <= 0
        || relative.y >= terminal.height
    {
        return false;
    }
    if render_id {
        let id_row = relative.y.saturating_sub(ID_FRAME_OFFSET);
        if id_row < 0 || id_row.saturating_add(FRAME_HEIGHT) > terminal.height {
            return false;
        }
    }
    true
}

fn shorten(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() >= MAX_LABEL_LEN {
        let mut short: String = trimmed.chars().take(LABEL_SLICE_LEN).collect();
        short.push_str("..");
        short
    } else {
        trimmed.to_string()
    }
}

/// The status line text.
pub fn status_line(nodes: usize, edges: usize) -> String {
    format!(" Nodes: {nodes} | Edges: {edges} | / to search | q to exit ")
}
