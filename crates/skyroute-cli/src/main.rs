//! SkyRoute CLI - Command-line interface for SkyRoute
//!
//! Plans delivery routes over a route network, either the built-in
//! delivery network or one loaded from a JSON file.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::HeuristicKind;

#[derive(Parser)]
#[command(name = "skyroute")]
#[command(author = "SkyRoute Contributors")]
#[command(version)]
#[command(about = "Lowest-cost route planning for drone deliveries", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Network file (JSON); defaults to the built-in delivery network
    #[arg(short, long, global = true)]
    graph: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the cheapest route between two nodes
    Route {
        /// Node to depart from
        start: String,

        /// Node to deliver to
        goal: String,

        /// Remaining-cost estimate used to guide the search
        #[arg(long, value_enum, default_value_t = HeuristicKind::Zero)]
        heuristic: HeuristicKind,

        /// Give up after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List nodes and their connections
    Nodes,

    /// Write the network to a JSON file
    Export {
        /// Output file
        #[arg(short, long, default_value = "skyroute-network.json")]
        output: PathBuf,
    },
}

fn main() {
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

    let graph = cli.graph.as_deref();
    let result = match cli.command {
        Commands::Route {
            start,
            goal,
            heuristic,
            timeout_ms,
            json,
        } => commands::route(graph, &start, &goal, heuristic, timeout_ms, json),
        Commands::Nodes => commands::nodes(graph),
        Commands::Export { output } => commands::export(graph, &output),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
