//! CLI command implementations.

use crate::canvas::Canvas;
use crate::import::GraphImport;
use crate::keymap::ViewerConfig;
use crate::viewer::Viewer;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::Path;
use std::time::Duration;
use termgraph_core::TerminalSize;
use termgraph_graph::{NavGraph, Scene, SearchOptions, TreeLayout};
use tracing::{debug, warn};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Loads a graph file and lays it out if needed.
async fn load_graph(path: &Path, terminal: TerminalSize, node_width: Option<i32>) -> Result<NavGraph> {
    let import = GraphImport::load(path)?;
    let options = import.options(node_width);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Laying out {} nodes...", import.nodes.len()));

    let graph = NavGraph::create(
        import.nodes,
        import.edges,
        terminal,
        options,
        &TreeLayout::default(),
    )
    .await;

    spinner.finish_and_clear();
    Ok(graph?)
}

/// Open the interactive viewer, reading commands from stdin.
pub async fn view(
    path: &Path,
    terminal: TerminalSize,
    node_width: Option<i32>,
    config: Option<&Path>,
) -> Result<()> {
    let config = ViewerConfig::load(config)?;
    let mut graph = load_graph(path, terminal, node_width).await?;
    graph.fit_view(None);

    println!(
        "{} Loaded {} nodes and {} edges from {}",
        "✓".green(),
        graph.node_count().to_string().cyan(),
        graph.edge_count().to_string().cyan(),
        path.display()
    );
    println!(
        "  {} pan, {} jump, {} recenter, {} search, {} quit\n",
        "h/j/k/l".cyan(),
        "H/J/K/L".cyan(),
        "c".cyan(),
        "/text".cyan(),
        "q".cyan()
    );

    let mut viewer = Viewer::new(graph, config);
    // Use blocking stdin for simplicity
    viewer.run(io::stdin().lock(), &mut io::stdout().lock(), true)?;
    debug!("Viewer closed with camera at {}", viewer.graph().cursor());

    Ok(())
}

/// Render a single frame to stdout.
pub async fn render(
    path: &Path,
    terminal: TerminalSize,
    node_width: Option<i32>,
    focus: Option<&str>,
) -> Result<()> {
    let mut graph = load_graph(path, terminal, node_width).await?;
    if let Some(Err(e)) = focus.map(|id| graph.get_element(id)) {
        warn!("{}, fitting to the default view", e);
    }
    graph.fit_view(focus);

    let scene = Scene::compose(&graph);
    println!("{}", Canvas::paint(&scene).to_colored());

    if let Some(id) = focus {
        match &scene.focused {
            Some(focused) if focused == id => {}
            _ => println!("{} \"{}\" is not in view", "⚠".yellow(), id),
        }
    }

    Ok(())
}

/// Search a graph file and list the ranked matches.
pub async fn search(path: &Path, query: &str, limit: usize, max_distance: usize) -> Result<()> {
    let graph = load_graph(path, TerminalSize::default(), None).await?;
    let results = graph.search(
        query,
        SearchOptions {
            limit,
            max_distance,
        },
    );

    if results.is_empty() {
        println!("No matches found for \"{}\"", query);
        return Ok(());
    }

    println!("Found {} matches:\n", results.all.len());

    if !results.exact.is_empty() {
        println!("{}", "Exact".green().bold());
        for node in &results.exact {
            println!("  {} {}", node.id.cyan(), node.value);
        }
    }

    if !results.sliced.is_empty() {
        println!("{}", "Contains".yellow().bold());
        for hit in &results.sliced {
            println!(
                "  {} {} {}",
                hit.node.id.cyan(),
                hit.node.value,
                format!("(\"{}\" at {})", hit.field, hit.index).dimmed()
            );
        }
    }

    if !results.fuzzy.is_empty() {
        println!("{}", "Similar".magenta().bold());
        for hit in &results.fuzzy {
            println!(
                "  {} {} {}",
                hit.node.id.cyan(),
                hit.node.value,
                format!("(\"{}\", distance {})", hit.field, hit.distance).dimmed()
            );
        }
    }

    Ok(())
}
