//! Remaining-cost estimates that steer the search toward the goal.

use crate::graph::NodeKey;
use std::collections::HashMap;
use tracing::warn;

/// Estimates the cost of the cheapest path from `node` to `goal`.
///
/// For the returned route to be optimal the estimate must never exceed the
/// true remaining cost (admissible). If it also satisfies the triangle
/// inequality over edges (consistent) every node is expanded at most once.
/// Estimates must be finite and non-negative.
///
/// Any `Fn(&N, &N) -> f64` closure is a heuristic.
pub trait Heuristic<N> {
    fn estimate(&self, node: &N, goal: &N) -> f64;
}

impl<N, F> Heuristic<N> for F
where
    F: Fn(&N, &N) -> f64,
{
    fn estimate(&self, node: &N, goal: &N) -> f64 {
        self(node, goal)
    }
}

/// Always estimates zero, which turns A* into uniform-cost search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroHeuristic;

impl<N> Heuristic<N> for ZeroHeuristic {
    fn estimate(&self, _node: &N, _goal: &N) -> f64 {
        0.0
    }
}

/// Straight-line distance between known node positions.
///
/// Nodes without a position estimate zero. The estimate stays admissible
/// as long as `scale * distance` never exceeds the real edge costs, e.g.
/// when weights are at least the distance between their endpoints.
#[derive(Debug, Clone)]
pub struct EuclideanHeuristic<N> {
    positions: HashMap<N, (f64, f64)>,
    scale: f64,
}

impl<N: NodeKey> Default for EuclideanHeuristic<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> EuclideanHeuristic<N> {
    /// Creates a heuristic with no positions and a scale of 1.
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
            scale: 1.0,
        }
    }

    /// Sets the factor applied to every distance.
    ///
    /// The scale must be finite and non-negative; anything else is ignored
    /// and the previous scale is kept.
    pub fn with_scale(mut self, scale: f64) -> Self {
        if scale.is_finite() && scale >= 0.0 {
            self.scale = scale;
        } else {
            warn!("Ignoring heuristic scale {}", scale);
        }
        self
    }

    /// Records the position of a node, replacing any earlier one.
    pub fn insert(&mut self, node: N, x: f64, y: f64) {
        self.positions.insert(node, (x, y));
    }

    /// Builder form of [`EuclideanHeuristic::insert`].
    pub fn with_position(mut self, node: impl Into<N>, x: f64, y: f64) -> Self {
        self.insert(node.into(), x, y);
        self
    }

    /// Returns the number of nodes with a known position.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl<N: NodeKey> Heuristic<N> for EuclideanHeuristic<N> {
    fn estimate(&self, node: &N, goal: &N) -> f64 {
        match (self.positions.get(node), self.positions.get(goal)) {
            (Some(&(x1, y1)), Some(&(x2, y2))) => self.scale * (x2 - x1).hypot(y2 - y1),
            _ => 0.0,
        }
    }
}
