//! Error types for graph mutation and route search.

use std::fmt;
use thiserror::Error;

/// Errors raised while mutating a [`RouteGraph`](crate::RouteGraph).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Edge weights must be finite and non-negative.
    #[error("invalid weight {weight} for edge {from} - {to}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },
}

/// Which end of a route request an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Why a search stopped before reaching a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// The caller's [`CancelToken`](crate::CancelToken) fired.
    Token,
    /// The configured deadline passed.
    Deadline,
    /// The expansion budget ran out.
    Budget,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Token => "cancellation requested",
            Self::Deadline => "deadline exceeded",
            Self::Budget => "expansion budget exhausted",
        };
        write!(f, "{}", s)
    }
}

/// Errors returned by [`find_path`](crate::find_path).
///
/// [`SearchError::NoPathExists`] is an ordinary outcome for disconnected
/// endpoints rather than a fault; use [`SearchError::is_no_path`] to tell it
/// apart from the rest.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The start or goal node is not in the graph.
    #[error("unknown {endpoint} node {node}")]
    UnknownNode { endpoint: Endpoint, node: String },

    /// Start and goal lie in different connected components.
    #[error("no path exists between {start} and {goal}")]
    NoPathExists { start: String, goal: String },

    /// The search was stopped from outside. Retrying with a fresh call is safe.
    #[error("search cancelled: {reason}")]
    Cancelled { reason: CancelReason },

    /// The heuristic produced a negative or non-finite estimate.
    #[error("heuristic returned {value} for node {node}")]
    InvalidHeuristic { node: String, value: f64 },

    /// Every finite route was exhausted after skipping one whose total
    /// cost does not fit in an `f64`.
    #[error("route cost from {start} to {goal} overflows")]
    CostOverflow { start: String, goal: String },
}

impl SearchError {
    pub(crate) fn unknown_node(endpoint: Endpoint, node: &impl fmt::Debug) -> Self {
        Self::UnknownNode {
            endpoint,
            node: format!("{:?}", node),
        }
    }

    /// Returns true when the search finished without finding a route.
    pub fn is_no_path(&self) -> bool {
        matches!(self, Self::NoPathExists { .. })
    }

    /// Returns true when the search was cancelled, timed out, or ran out of budget.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
