//! Edge weights and the flat edge representation used for export.
//!
//! Weights are traversal costs between two directly connected nodes.
//! They have to be finite and non-negative, otherwise the search loses
//! its optimality guarantee, so every weight passes through
//! [`validate_weight`] before it reaches the graph.

use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Checks that `weight` can be stored on the edge `from - to`.
pub(crate) fn validate_weight<N: Debug>(from: &N, to: &N, weight: f64) -> Result<f64, GraphError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(GraphError::InvalidWeight {
            from: format!("{:?}", from),
            to: format!("{:?}", to),
            weight,
        })
    }
}

/// An undirected edge with its weight, for export and file formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge<N> {
    pub from: N,
    pub to: N,
    pub weight: f64,
}

impl<N> GraphEdge<N> {
    /// Creates a new edge.
    pub fn new(from: impl Into<N>, to: impl Into<N>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

impl<N: Ord> GraphEdge<N> {
    /// Orders the endpoints so that `from <= to`.
    ///
    /// Both orientations describe the same undirected edge; normalizing
    /// them gives exports a stable shape.
    pub fn normalized(self) -> Self {
        if self.from <= self.to {
            self
        } else {
            Self {
                from: self.to,
                to: self.from,
                weight: self.weight,
            }
        }
    }
}
