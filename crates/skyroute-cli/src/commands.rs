//! CLI command implementations.

use clap::ValueEnum;
use colored::Colorize;
use skyroute_graph::{find_path_with, Heuristic, NetworkFile, Route, SearchOptions, ZeroHeuristic};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Which remaining-cost estimate to search with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeuristicKind {
    /// No estimate; plain uniform-cost search
    Zero,
    /// Straight-line distance from the network's node positions
    Euclidean,
}

/// Loads the network file, or the built-in delivery network.
fn load_network(path: Option<&Path>) -> Result<NetworkFile> {
    match path {
        Some(path) => {
            let network = NetworkFile::load(path)?;
            info!("Loaded network from {}", path.display());
            Ok(network)
        }
        None => Ok(NetworkFile::delivery()),
    }
}

/// What the drone does at each stop.
fn waypoint_action(next: Option<&String>) -> String {
    match next {
        Some(next) => format!("Fly to {}", next),
        None => "Deliver".to_string(),
    }
}

/// Find and print the cheapest route.
pub fn route(
    graph_path: Option<&Path>,
    start: &str,
    goal: &str,
    heuristic: HeuristicKind,
    timeout_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let network = load_network(graph_path)?;
    let graph = network.build_graph()?;

    let mut options = SearchOptions::new();
    if let Some(ms) = timeout_ms {
        options = options.with_timeout(Duration::from_millis(ms));
    }

    let estimator: Box<dyn Heuristic<String>> = match heuristic {
        HeuristicKind::Zero => Box::new(ZeroHeuristic),
        HeuristicKind::Euclidean => {
            if network.positions.is_empty() {
                warn!("Network has no node positions; estimates will be zero");
            }
            Box::new(network.heuristic())
        }
    };

    match find_path_with(&graph, start, goal, estimator.as_ref(), &options) {
        Ok(route) if json => print_json(&route)?,
        Ok(route) => print_route(&route),
        Err(e) if e.is_no_path() => {
            if json {
                let output = serde_json::json!({ "start": start, "goal": goal, "route": null });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{} No route from {} to {}", "⚠".yellow(), start.cyan(), goal.cyan());
            }
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn print_route(route: &Route<String>) {
    println!(
        "{} Route {} → {}: cost {}, {} legs",
        "✓".green(),
        route.start().cyan(),
        route.goal().cyan(),
        route.cost().to_string().cyan(),
        route.hops()
    );

    for step in route.annotate(|_, next| waypoint_action(next)) {
        println!("  {} {}", step.node.yellow(), step.annotation);
    }
}

fn print_json(route: &Route<String>) -> Result<()> {
    let steps: Vec<_> = route
        .annotate(|_, next| waypoint_action(next))
        .into_iter()
        .map(|step| serde_json::json!({ "location": step.node, "action": step.annotation }))
        .collect();

    let output = serde_json::json!({
        "start": route.start(),
        "goal": route.goal(),
        "cost": route.cost(),
        "hops": route.hops(),
        "route": steps
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// List every node with its neighbors, sorted by name.
pub fn nodes(graph_path: Option<&Path>) -> Result<()> {
    let graph = load_network(graph_path)?.build_graph()?;
    let stats = graph.stats();

    println!(
        "{} nodes, {} edges\n",
        stats.node_count.to_string().cyan(),
        stats.edge_count.to_string().cyan()
    );

    let mut names: Vec<&String> = graph.nodes().collect();
    names.sort();

    for name in names {
        let mut neighbors: Vec<_> = graph.neighbors(name.as_str()).into_iter().collect();
        neighbors.sort_by(|a, b| a.0.cmp(&b.0));

        let listed: Vec<String> = neighbors
            .iter()
            .map(|(neighbor, weight)| format!("{} ({})", neighbor, weight))
            .collect();
        println!("  {} → {}", name.yellow(), listed.join(", "));
    }

    Ok(())
}

/// Write the network to a JSON file.
pub fn export(graph_path: Option<&Path>, output: &Path) -> Result<()> {
    let network = load_network(graph_path)?;
    // Round-trip through the graph to validate weights and drop duplicates
    let mut exported = NetworkFile::from_graph(&network.build_graph()?);
    exported.positions = network.positions;

    exported.save(output)?;
    println!("{} Exported to {}", "✓".green(), output.display());

    Ok(())
}
