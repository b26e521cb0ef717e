//! Copy-on-write graph handle for concurrent readers and writers.
//!
//! Searches run against an immutable snapshot, so a writer adding edges
//! never changes the adjacency a running search sees. Writers clone the
//! graph only while older snapshots are still alive.

use crate::edge::validate_weight;
use crate::error::{GraphError, SearchError};
use crate::graph::{NodeKey, RouteGraph};
use crate::route::Route;
use crate::search::{find_path_with, Heuristic, SearchOptions};
use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

/// A cloneable, thread-safe handle to a [`RouteGraph`].
#[derive(Debug)]
pub struct SharedGraph<N> {
    current: Arc<RwLock<Arc<RouteGraph<N>>>>,
}

impl<N> Clone for SharedGraph<N> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
        }
    }
}

impl<N: NodeKey> Default for SharedGraph<N> {
    fn default() -> Self {
        Self::new(RouteGraph::new())
    }
}

impl<N: NodeKey> SharedGraph<N> {
    pub fn new(graph: RouteGraph<N>) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(graph))),
        }
    }

    /// Returns the current version of the graph.
    ///
    /// Later writes do not affect the returned snapshot.
    pub fn snapshot(&self) -> Arc<RouteGraph<N>> {
        // A panicking writer cannot leave a half-applied edge behind, so a
        // poisoned lock still guards a consistent graph.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Adds or overwrites an edge in a new version of the graph.
    pub fn add_edge(
        &self,
        u: impl Into<N>,
        v: impl Into<N>,
        weight: f64,
    ) -> Result<(), GraphError> {
        let (u, v) = (u.into(), v.into());
        // Reject before make_mut so a bad weight never forks the graph
        validate_weight(&u, &v, weight)?;

        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        Arc::make_mut(&mut *guard).add_edge(u, v, weight)
    }

    /// Removes an edge in a new version of the graph.
    pub fn remove_edge<Q>(&self, u: &Q, v: &Q) -> Option<f64>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        Arc::make_mut(&mut *guard).remove_edge(u, v)
    }

    /// Searches the current snapshot.
    pub fn find_path<Q, H>(
        &self,
        start: &Q,
        goal: &Q,
        heuristic: &H,
        options: &SearchOptions,
    ) -> Result<Route<N>, SearchError>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + std::fmt::Debug + ?Sized,
        H: Heuristic<N> + ?Sized,
    {
        let graph = self.snapshot();
        find_path_with(&*graph, start, goal, heuristic, options)
    }
}
