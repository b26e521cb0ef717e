//! Search results.
//!
//! A Route is immutable once produced. Callers that need to attach their
//! own data to each stop (instructions, ETAs, conditions) use
//! [`Route::annotate`].

use serde::Serialize;

/// A lowest-cost path from start to goal, both inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route<N> {
    nodes: Vec<N>,
    /// Weight of each leg; always one shorter than `nodes`.
    leg_weights: Vec<f64>,
    cost: f64,
    /// Nodes expanded by the search that produced this route.
    expanded: usize,
}

/// One hop of a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg<'a, N> {
    pub from: &'a N,
    pub to: &'a N,
    pub weight: f64,
}

/// A route stop paired with a caller-supplied annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStep<N, A> {
    pub node: N,
    pub annotation: A,
}

impl<N> Route<N> {
    pub(crate) fn new(nodes: Vec<N>, leg_weights: Vec<f64>, expanded: usize) -> Self {
        debug_assert_eq!(nodes.len(), leg_weights.len() + 1);
        let cost = leg_weights.iter().sum();
        Self {
            nodes,
            leg_weights,
            cost,
            expanded,
        }
    }

    /// A zero-cost route that never leaves `node`.
    pub(crate) fn stay(node: N) -> Self {
        Self::new(vec![node], Vec::new(), 0)
    }

    /// Nodes in travel order.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Total weight of all legs.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of legs.
    pub fn hops(&self) -> usize {
        self.leg_weights.len()
    }

    pub fn expanded(&self) -> usize {
        self.expanded
    }

    pub fn start(&self) -> &N {
        &self.nodes[0]
    }

    pub fn goal(&self) -> &N {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Iterates over consecutive pairs of stops with their edge weights.
    pub fn legs(&self) -> impl Iterator<Item = Leg<'_, N>> {
        self.nodes
            .windows(2)
            .zip(&self.leg_weights)
            .map(|(pair, &weight)| Leg {
                from: &pair[0],
                to: &pair[1],
                weight,
            })
    }

    /// Pairs each stop with an annotation.
    ///
    /// The closure receives the stop and the next stop, or `None` at the goal.
    pub fn annotate<A, F>(&self, mut f: F) -> Vec<RouteStep<N, A>>
    where
        N: Clone,
        F: FnMut(&N, Option<&N>) -> A,
    {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| RouteStep {
                node: node.clone(),
                annotation: f(node, self.nodes.get(i + 1)),
            })
            .collect()
    }
}
