//! SkyRoute Graph - weighted route networks and A* path search
//!
//! This crate holds a weighted undirected graph of route nodes and finds
//! lowest-cost routes through it. It has no I/O of its own beyond reading
//! and writing network files; callers decide how routes are presented.
//!
//! # Architecture
//!
//! - [`RouteGraph`] wraps petgraph with a label index. Edges are symmetric
//!   and their weights are validated on insert.
//! - [`find_path`] runs A* with a pluggable [`Heuristic`]. The frontier keeps
//!   stale duplicates and skips them on pop. Neighbors are relaxed in
//!   edge-insertion order, and ties on priority go to the smaller
//!   cost-so-far and then to the earlier frontier insertion.
//! - [`SharedGraph`] hands out copy-on-write snapshots so searches and
//!   writers can run on different threads.
//!
//! # Example
//!
//! ```
//! use skyroute_graph::{find_path, NetworkFile, ZeroHeuristic};
//!
//! let graph = NetworkFile::delivery().build_graph().unwrap();
//!
//! let route = find_path(&graph, "A", "F", &ZeroHeuristic).unwrap();
//! assert_eq!(route.nodes(), ["A", "C", "D", "F"]);
//! assert_eq!(route.cost(), 13.0);
//! ```

mod edge;
mod error;
mod graph;
mod network;
mod route;
mod search;
mod shared;

pub use edge::GraphEdge;
pub use error::{CancelReason, Endpoint, GraphError, SearchError};
pub use graph::{GraphStats, NodeKey, RouteGraph};
pub use network::{NetworkError, NetworkFile};
pub use route::{Leg, Route, RouteStep};
pub use search::{
    find_path, find_path_with, CancelToken, EuclideanHeuristic, Heuristic, SearchOptions,
    ZeroHeuristic,
};
pub use shared::SharedGraph;
