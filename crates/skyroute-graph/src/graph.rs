//! Core graph data structure.
//!
//! RouteGraph wraps an undirected petgraph graph and adds a label index
//! so callers can address nodes by their own identifiers. Every edge is
//! stored once and is visible from both endpoints, which keeps the
//! adjacency relation symmetric by construction.

use crate::edge::{validate_weight, GraphEdge};
use crate::error::GraphError;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, warn};

/// Internal node handle.
pub type NodeId = NodeIndex;

/// Anything that can identify a node: a label, an id, a coordinate key.
pub trait NodeKey: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> NodeKey for T {}

/// A weighted undirected graph of route nodes.
///
/// Nodes are created implicitly by [`RouteGraph::add_edge`]. The graph is
/// read-only while a search runs; searches borrow it immutably.
#[derive(Debug, Clone)]
pub struct RouteGraph<N> {
    /// The underlying petgraph graph. Edge weights are traversal costs.
    graph: UnGraph<N, f64>,

    /// Maps node labels to graph indexes.
    index: HashMap<N, NodeId>,
}

impl<N: NodeKey> Default for RouteGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> RouteGraph<N> {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            index: HashMap::new(),
        }
    }

    /// Builds a graph from a list of edges.
    ///
    /// Stops at the first invalid weight.
    pub fn from_edges<I>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = GraphEdge<N>>,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge.from, edge.to, edge.weight)?;
        }
        Ok(graph)
    }

    /// Inserts or overwrites the undirected edge between `u` and `v`.
    ///
    /// Missing endpoints are created. A negative or non-finite weight is
    /// rejected and the graph is left untouched.
    pub fn add_edge(
        &mut self,
        u: impl Into<N>,
        v: impl Into<N>,
        weight: f64,
    ) -> Result<(), GraphError> {
        let (u, v) = (u.into(), v.into());
        let weight = match validate_weight(&u, &v, weight) {
            Ok(w) => w,
            Err(e) => {
                warn!("Rejected edge: {}", e);
                return Err(e);
            }
        };

        let a = self.ensure_node(u);
        let b = self.ensure_node(v);
        // update_edge matches either orientation on an undirected graph
        self.graph.update_edge(a, b, weight);

        debug!("Edge {:?} - {:?} = {}", self.graph[a], self.graph[b], weight);
        Ok(())
    }

    /// Removes the edge between `u` and `v`, returning its weight.
    ///
    /// Both endpoints stay in the graph.
    pub fn remove_edge<Q>(&mut self, u: &Q, v: &Q) -> Option<f64>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let a = self.index_of(u)?;
        let b = self.index_of(v)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.remove_edge(edge)
    }

    /// Returns true if the node exists.
    pub fn has_node<Q>(&self, node: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(node)
    }

    /// Returns adjacent nodes mapped to edge weights.
    ///
    /// Empty if the node is absent or has no edges.
    pub fn neighbors<Q>(&self, node: &Q) -> HashMap<N, f64>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(index) = self.index_of(node) else {
            return HashMap::new();
        };

        self.adjacent(index)
            .map(|(other, weight)| (self.graph[other].clone(), weight))
            .collect()
    }

    /// Gets the weight of the edge between `u` and `v`.
    pub fn weight<Q>(&self, u: &Q, v: &Q) -> Option<f64>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let a = self.index_of(u)?;
        let b = self.index_of(v)?;
        self.weight_between(a, b)
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.graph.node_weights()
    }

    /// Returns every edge once, in insertion order.
    pub fn edges(&self) -> Vec<GraphEdge<N>> {
        self.graph
            .edge_references()
            .map(|edge_ref| GraphEdge {
                from: self.graph[edge_ref.source()].clone(),
                to: self.graph[edge_ref.target()].clone(),
                weight: *edge_ref.weight(),
            })
            .collect()
    }

    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
        }
    }

    /// Gets the internal index for a node label.
    pub(crate) fn index_of<Q>(&self, node: &Q) -> Option<NodeId>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(node).copied()
    }

    /// Gets the label stored at an index.
    pub(crate) fn label(&self, index: NodeId) -> &N {
        &self.graph[index]
    }

    /// Iterates over `(neighbor, weight)` pairs of a node in edge-insertion
    /// order. Removing an edge moves the newest edge into its slot.
    pub(crate) fn adjacent(&self, index: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        // petgraph walks a node's edge list newest first
        let mut edges: Vec<_> = self.graph.edges(index).collect();
        edges.sort_by_key(|edge_ref| edge_ref.id());

        edges.into_iter().map(move |edge_ref| {
            let other = if edge_ref.source() == index {
                edge_ref.target()
            } else {
                edge_ref.source()
            };
            (other, *edge_ref.weight())
        })
    }

    pub(crate) fn weight_between(&self, a: NodeId, b: NodeId) -> Option<f64> {
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge).copied()
    }

    fn ensure_node(&mut self, node: N) -> NodeId {
        if let Some(&index) = self.index.get(&node) {
            return index;
        }
        let index = self.graph.add_node(node.clone());
        self.index.insert(node, index);
        index
    }
}

/// Graph statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}
