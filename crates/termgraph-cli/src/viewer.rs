//! The interactive session: applies commands to a graph and redraws.

use crate::canvas::{Canvas, MAX_SIDE};
use crate::keymap::{Command, ViewerConfig};
use std::io::{self, BufRead, Write};
use termgraph_graph::{NavGraph, Scene, SearchOptions};
use tracing::{debug, warn};

/// Hits listed under the frame after a search.
const MAX_LISTED: usize = 15;

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The last search and the hit currently selected in it.
#[derive(Debug, Clone)]
struct SearchState {
    query: String,
    /// Ids from the ranked `all` list.
    hits: Vec<String>,
    selected: usize,
}

pub struct Viewer {
    graph: NavGraph,
    config: ViewerConfig,
    search: Option<SearchState>,
}

impl Viewer {
    pub fn new(graph: NavGraph, config: ViewerConfig) -> Self {
        Self {
            graph,
            config,
            search: None,
        }
    }

    pub fn graph(&self) -> &NavGraph {
        &self.graph
    }

    /// Id of the selected search hit.
    pub fn selected(&self) -> Option<&str> {
        let search = self.search.as_ref()?;
        search.hits.get(search.selected).map(String::as_str)
    }

    pub fn apply(&mut self, command: Command) -> Flow {
        debug!("Applying {:?}", command);
        match command {
            Command::Pan { dx, dy } => self.graph.pan(dx, dy),
            Command::Recenter => self.graph.fit_view(None),
            Command::Resize { width, height } => self.resize(width, height),
            Command::Search(query) => self.search(query),
            Command::NextMatch => self.step(1),
            Command::PrevMatch => self.step(-1),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn resize(&mut self, width: i32, height: i32) {
        let (w, h) = (width.clamp(0, MAX_SIDE), height.clamp(0, MAX_SIDE));
        if (w, h) != (width, height) {
            warn!("Terminal size {}x{} clamped to {}x{}", width, height, w, h);
        }
        self.graph.set_terminal_size(w, h);
    }

    /// Runs a search and selects its first hit.
    fn search(&mut self, query: String) {
        let hits = self
            .graph
            .search(&query, SearchOptions::default())
            .all
            .iter()
            .map(|node| node.id.clone())
            .collect();
        self.search = Some(SearchState {
            query,
            hits,
            selected: 0,
        });
        self.focus_selected();
    }

    /// Moves the selection by `delta`, wrapping around the hit list.
    fn step(&mut self, delta: isize) {
        let Some(search) = self.search.as_mut().filter(|s| !s.hits.is_empty()) else {
            return;
        };
        let len = search.hits.len() as isize;
        search.selected = (search.selected as isize + delta).rem_euclid(len) as usize;
        self.focus_selected();
    }

    /// Fits the camera to the selected hit, if it has a position.
    fn focus_selected(&mut self) {
        let Some(id) = self.selected().map(str::to_string) else {
            return;
        };
        if self.graph.get_node(&id).is_some_and(|node| node.position.is_some()) {
            self.graph.fit_view(Some(&id));
        } else {
            debug!("Search hit {} has no position", id);
        }
    }

    /// The search summary and hit list shown under the frame.
    pub fn message(&self) -> Option<String> {
        let search = self.search.as_ref()?;
        if search.hits.is_empty() {
            return Some(format!("No matches for \"{}\"", search.query));
        }

        let mut lines = vec![format!(
            "{} matches for \"{}\" (n/N to select)",
            search.hits.len(),
            search.query
        )];
        // keep the selection visible when it is past the listed window
        let first = (search.selected + 1).saturating_sub(MAX_LISTED);
        for (i, id) in search.hits.iter().enumerate().skip(first).take(MAX_LISTED) {
            let marker = if i == search.selected { ">" } else { " " };
            let value = self.graph.get_node(id).map_or("", |node| node.value.as_str());
            lines.push(format!("{} {} {}", marker, id, value));
        }
        Some(lines.join("\n"))
    }

    pub fn frame(&self) -> Canvas {
        Canvas::paint(&Scene::compose(&self.graph))
    }

    /// Prints a frame, then applies one command per input line until `q`
    /// or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W, color: bool) -> io::Result<()> {
        self.print(output, color)?;

        for line in input.lines() {
            let line = line?;
            let Some(command) = self.config.parse(&line) else {
                if !line.trim().is_empty() {
                    warn!("Unknown command: {}", line.trim());
                }
                continue;
            };
            if self.apply(command) == Flow::Quit {
                break;
            }
            self.print(output, color)?;
        }

        Ok(())
    }

    fn print<W: Write>(&self, output: &mut W, color: bool) -> io::Result<()> {
        let canvas = self.frame();
        let text = if color {
            canvas.to_colored()
        } else {
            canvas.to_plain()
        };
        writeln!(output, "{}", text)?;
        if let Some(message) = self.message() {
            writeln!(output, "{}", message)?;
        }
        output.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use termgraph_core::{Coordinate, Edge, Node, TerminalSize};
    use termgraph_graph::{GraphOptions, TreeLayout};

    async fn viewer() -> Viewer {
        let nodes = vec![
            Node::new("b1", "Root").at(0, 0),
            Node::new("b2", "Left leaf").at(100, 0),
        ];
        let edges = vec![Edge::new("be1", "b1", "b2")];
        let graph = NavGraph::create(
            nodes,
            edges,
            TerminalSize::new(80, 24),
            GraphOptions::default(),
            &TreeLayout::default(),
        )
        .await
        .unwrap();
        Viewer::new(graph, ViewerConfig::default())
    }

    #[tokio::test]
    async fn test_search_jumps_to_first_hit() {
        let mut viewer = viewer().await;
        assert_eq!(viewer.apply(Command::Search("left".into())), Flow::Continue);
        assert_eq!(viewer.graph().focused_node().map(|n| n.id.as_str()), Some("b2"));
        assert_eq!(viewer.selected(), Some("b2"));
        assert_eq!(
            viewer.message().as_deref(),
            Some("1 matches for \"left\" (n/N to select)\n> b2 Left leaf")
        );
    }

    #[tokio::test]
    async fn test_search_without_hits_keeps_camera() {
        let mut viewer = viewer().await;
        viewer.apply(Command::Pan { dx: 7, dy: 3 });
        viewer.apply(Command::Search("qqqqqqq".into()));
        assert_eq!(viewer.graph().cursor(), Coordinate::new(7, 3));
        assert_eq!(viewer.message().as_deref(), Some("No matches for \"qqqqqqq\""));
        assert_eq!(viewer.selected(), None);

        // stepping without hits is a no-op
        viewer.apply(Command::NextMatch);
        assert_eq!(viewer.graph().cursor(), Coordinate::new(7, 3));
    }

    #[tokio::test]
    async fn test_recenter_and_resize() {
        let mut viewer = viewer().await;
        viewer.apply(Command::Resize {
            width: 100,
            height: 30,
        });
        assert_eq!(viewer.graph().terminal_size(), TerminalSize::new(100, 30));

        // b1 is the only root
        viewer.apply(Command::Recenter);
        assert_eq!(viewer.graph().cursor(), Coordinate::new(-50 + 8, -15 + 16));
    }

    #[tokio::test]
    async fn test_demo_tree_lays_out_and_jumps() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/balanced-tree.json");
        let import = crate::import::GraphImport::load(&path).unwrap();
        let graph = NavGraph::create(
            import.nodes,
            import.edges,
            TerminalSize::new(120, 40),
            GraphOptions::default(),
            &TreeLayout::default(),
        )
        .await
        .unwrap();
        assert!(graph.nodes().iter().all(|n| n.position.is_some()));

        let mut viewer = Viewer::new(graph, ViewerConfig::default());
        viewer.apply(Command::Search("L3 - RRR".into()));
        assert_eq!(viewer.graph().focused_node().map(|n| n.id.as_str()), Some("b15"));

        // "l3 - rrl" and "l3 - rrr" both contain the query at 0; ids break the tie
        viewer.apply(Command::Search("L3 - RR".into()));
        assert_eq!(viewer.selected(), Some("b14"));
        assert_eq!(viewer.graph().focused_node().map(|n| n.id.as_str()), Some("b14"));

        viewer.apply(Command::NextMatch);
        assert_eq!(viewer.selected(), Some("b15"));
        assert_eq!(viewer.graph().focused_node().map(|n| n.id.as_str()), Some("b15"));
        assert!(viewer.message().unwrap().contains("> b15 L3 - RRR"));

        viewer.apply(Command::PrevMatch);
        assert_eq!(viewer.graph().focused_node().map(|n| n.id.as_str()), Some("b14"));
    }

    #[tokio::test]
    async fn test_selection_wraps_around() {
        let mut viewer = viewer().await;
        // "b1" is exact, "b2" is one edit away
        viewer.apply(Command::Search("b1".into()));
        assert_eq!(viewer.selected(), Some("b1"));
        viewer.apply(Command::PrevMatch);
        assert_eq!(viewer.selected(), Some("b2"));
        viewer.apply(Command::NextMatch);
        assert_eq!(viewer.selected(), Some("b1"));
    }

    #[tokio::test]
    async fn test_oversized_resize_is_clamped() {
        let mut viewer = viewer().await;
        viewer.apply(Command::Resize {
            width: 100_000,
            height: 100_000,
        });
        assert_eq!(viewer.graph().terminal_size(), TerminalSize::new(1024, 1024));
        viewer.apply(Command::Resize {
            width: -3,
            height: 20,
        });
        assert_eq!(viewer.graph().terminal_size(), TerminalSize::new(0, 20));
        assert_eq!(viewer.frame().to_plain(), "");
    }

    #[tokio::test]
    async fn test_run_stops_at_quit() {
        let mut viewer = viewer().await;
        let input = Cursor::new("j\nnonsense\n\nq\nl\n");
        let mut output = Vec::new();

        viewer.run(input, &mut output, false).unwrap();

        assert_eq!(viewer.graph().cursor(), Coordinate::new(0, 2));
        let text = String::from_utf8(output).unwrap();
        // the initial frame plus one after `j`
        assert_eq!(text.matches("Nodes: 2 | Edges: 1").count(), 2);
    }
}
