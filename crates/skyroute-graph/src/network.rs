//! JSON network files.
//!
//! A network file lists undirected edges and, optionally, node positions
//! for the straight-line heuristic:
//!
//! ```json
//! {
//!   "edges": [{ "from": "A", "to": "B", "weight": 5.0 }],
//!   "positions": { "A": [0.0, 0.0], "B": [4.0, 3.0] }
//! }
//! ```

use crate::edge::GraphEdge;
use crate::error::GraphError;
use crate::graph::RouteGraph;
use crate::search::EuclideanHeuristic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid network file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Serializable description of a route network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkFile {
    pub edges: Vec<GraphEdge<String>>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub positions: BTreeMap<String, [f64; 2]>,
}

impl NetworkFile {
    /// The drone delivery network: six stations, eight corridors.
    pub fn delivery() -> Self {
        let edges = [
            ("A", "B", 5.0),
            ("A", "C", 7.0),
            ("B", "C", 3.0),
            ("B", "D", 9.0),
            ("C", "D", 2.0),
            ("C", "E", 8.0),
            ("D", "F", 4.0),
            ("E", "F", 6.0),
        ]
        .into_iter()
        .map(|(from, to, weight)| GraphEdge::new(from, to, weight))
        .collect();

        Self {
            edges,
            positions: BTreeMap::new(),
        }
    }

    /// Reads a network file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, NetworkError> {
        let text = fs::read_to_string(path.as_ref())?;
        let network = Self::from_json(&text)?;
        debug!(
            "Loaded {} edges from {}",
            network.edges.len(),
            path.as_ref().display()
        );
        Ok(network)
    }

    /// Writes the network as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), NetworkError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self, NetworkError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, NetworkError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Exports a graph with its edges in a stable order.
    pub fn from_graph(graph: &RouteGraph<String>) -> Self {
        let mut edges: Vec<_> = graph.edges().into_iter().map(GraphEdge::normalized).collect();
        edges.sort_by(|a, b| a.from.cmp(&b.from).then_with(|| a.to.cmp(&b.to)));

        Self {
            edges,
            positions: BTreeMap::new(),
        }
    }

    /// Builds the graph, validating every edge.
    pub fn build_graph(&self) -> Result<RouteGraph<String>, NetworkError> {
        Ok(RouteGraph::from_edges(self.edges.iter().cloned())?)
    }

    /// Builds a straight-line heuristic from the recorded positions.
    pub fn heuristic(&self) -> EuclideanHeuristic<String> {
        let mut heuristic = EuclideanHeuristic::new();
        for (node, [x, y]) in &self.positions {
            heuristic.insert(node.clone(), *x, *y);
        }
        heuristic
    }
}
