//! Termgraph CLI - Browse directed graphs in the terminal
//!
//! Loads a graph file, lays it out, and lets the user pan the camera,
//! search nodes and jump between them.

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use termgraph_core::TerminalSize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod canvas;
mod commands;
mod import;
mod keymap;
mod viewer;

#[derive(Parser)]
#[command(name = "termgraph")]
#[command(author = "Termgraph Contributors")]
#[command(version)]
#[command(about = "Navigate directed graphs in the terminal", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Viewport {
    /// Terminal width in cells
    #[arg(long, default_value = "120")]
    width: i32,

    /// Terminal height in cells
    #[arg(long, default_value = "40")]
    height: i32,

    /// Override the node width from the graph file
    #[arg(long)]
    node_width: Option<i32>,
}

impl Viewport {
    fn terminal(&self) -> TerminalSize {
        TerminalSize::new(self.width, self.height)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Open a graph and navigate it with commands read from stdin
    View {
        /// Graph JSON file
        file: PathBuf,

        #[command(flatten)]
        viewport: Viewport,

        /// Viewer config JSON (pan step sizes)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print a single frame
    Render {
        /// Graph JSON file
        file: PathBuf,

        #[command(flatten)]
        viewport: Viewport,

        /// Node to center the view on
        #[arg(short, long)]
        focus: Option<String>,
    },

    /// Search node ids, values and labels
    Search {
        /// Graph JSON file
        file: PathBuf,

        /// Search query
        query: String,

        /// Maximum results to return
        #[arg(short, long, default_value = "50")]
        limit: usize,

        /// Largest edit distance for similar matches
        #[arg(long, default_value = "2")]
        max_distance: usize,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::View {
            file,
            viewport,
            config,
        } => {
            commands::view(
                &file,
                viewport.terminal(),
                viewport.node_width,
                config.as_deref(),
            )
            .await
        }
        Commands::Render {
            file,
            viewport,
            focus,
        } => {
            commands::render(
                &file,
                viewport.terminal(),
                viewport.node_width,
                focus.as_deref(),
            )
            .await
        }
        Commands::Search {
            file,
            query,
            limit,
            max_distance,
        } => commands::search(&file, &query, limit, max_distance).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
