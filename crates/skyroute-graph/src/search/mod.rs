//! A* route search.
//!
//! Each call owns its scratch state (scores, predecessors, frontier) and
//! only reads the graph, so any number of searches can share one graph.
//!
//! A call moves through `init -> expanding -> found | exhausted`, or stops
//! early with [`SearchError::Cancelled`] when a [`SearchOptions`] limit
//! fires. With [`ZeroHeuristic`] the search is Dijkstra's algorithm.

mod frontier;
mod heuristic;
mod options;

pub use heuristic::{EuclideanHeuristic, Heuristic, ZeroHeuristic};
pub use options::{CancelToken, SearchOptions};

use crate::error::{Endpoint, SearchError};
use crate::graph::{NodeId, NodeKey, RouteGraph};
use crate::route::Route;
use frontier::Frontier;
use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Finds the lowest-cost route from `start` to `goal`.
///
/// # Errors
///
/// - [`SearchError::UnknownNode`] if either endpoint is missing; nothing is searched.
/// - [`SearchError::NoPathExists`] if the endpoints are not connected.
/// - [`SearchError::InvalidHeuristic`] if `heuristic` returns a negative or
///   non-finite estimate.
/// - [`SearchError::CostOverflow`] if the search ran out of finite routes
///   after skipping at least one whose cost overflowed `f64`.
///
/// # Example
///
/// ```
/// use skyroute_graph::{find_path, RouteGraph, ZeroHeuristic};
///
/// let mut graph: RouteGraph<String> = RouteGraph::new();
/// graph.add_edge("depot", "park", 4.0).unwrap();
/// graph.add_edge("park", "harbor", 3.0).unwrap();
///
/// let route = find_path(&graph, "depot", "harbor", &ZeroHeuristic).unwrap();
/// assert_eq!(route.nodes(), ["depot", "park", "harbor"]);
/// assert_eq!(route.cost(), 7.0);
/// ```
pub fn find_path<N, Q, H>(
    graph: &RouteGraph<N>,
    start: &Q,
    goal: &Q,
    heuristic: &H,
) -> Result<Route<N>, SearchError>
where
    N: NodeKey + Borrow<Q>,
    Q: Hash + Eq + std::fmt::Debug + ?Sized,
    H: Heuristic<N> + ?Sized,
{
    find_path_with(graph, start, goal, heuristic, &SearchOptions::default())
}

/// Like [`find_path`], honoring the limits in `options`.
///
/// # Errors
///
/// Everything [`find_path`] returns, plus [`SearchError::Cancelled`] once a
/// limit fires.
pub fn find_path_with<N, Q, H>(
    graph: &RouteGraph<N>,
    start: &Q,
    goal: &Q,
    heuristic: &H,
    options: &SearchOptions,
) -> Result<Route<N>, SearchError>
where
    N: NodeKey + Borrow<Q>,
    Q: Hash + Eq + std::fmt::Debug + ?Sized,
    H: Heuristic<N> + ?Sized,
{
    let start_idx = graph
        .index_of(start)
        .ok_or_else(|| SearchError::unknown_node(Endpoint::Start, &start))?;
    let goal_idx = graph
        .index_of(goal)
        .ok_or_else(|| SearchError::unknown_node(Endpoint::Goal, &goal))?;

    if start_idx == goal_idx {
        return Ok(Route::stay(graph.label(start_idx).clone()));
    }

    let begin = Instant::now();
    debug!("Searching route {:?} -> {:?}", start, goal);

    let result = Search::new(graph, goal_idx, heuristic).run(start_idx, options);

    match &result {
        Ok(route) => debug!(
            "Route found: {} hops, cost {}, {} expanded in {:?}",
            route.hops(),
            route.cost(),
            route.expanded(),
            begin.elapsed()
        ),
        Err(e) => debug!("Search ended without route: {}", e),
    }
    result
}

/// Scratch state for one search call.
struct Search<'g, N, H: ?Sized> {
    graph: &'g RouteGraph<N>,
    goal: NodeId,
    heuristic: &'g H,

    /// Best known cost from the start. Missing means infinite.
    g_score: HashMap<NodeId, f64>,

    /// Predecessor on the best known path.
    came_from: HashMap<NodeId, NodeId>,

    /// Nodes already expanded with their current best cost.
    closed: HashSet<NodeId>,
}

impl<'g, N, H> Search<'g, N, H>
where
    N: NodeKey,
    H: Heuristic<N> + ?Sized,
{
    fn new(graph: &'g RouteGraph<N>, goal: NodeId, heuristic: &'g H) -> Self {
        Self {
            graph,
            goal,
            heuristic,
            g_score: HashMap::new(),
            came_from: HashMap::new(),
            closed: HashSet::new(),
        }
    }

    fn run(mut self, start: NodeId, options: &SearchOptions) -> Result<Route<N>, SearchError> {
        let mut frontier = Frontier::new();
        let mut expanded = 0usize;

        self.g_score.insert(start, 0.0);
        frontier.push(self.estimate(start)?, 0.0, start);

        // Set when a relaxation leaves the f64 range; the goal may lie beyond it
        let mut overflowed = false;

        while let Some(entry) = frontier.pop() {
            options.check_interrupted()?;

            let current = entry.node;
            let g = entry.g_score.into_inner();

            // A cheaper entry for this node was pushed after this one
            if self.g_score.get(&current).is_some_and(|&best| g > best) {
                continue;
            }
            if !self.closed.insert(current) {
                continue;
            }

            if current == self.goal {
                return Ok(self.reconstruct(start, expanded));
            }
            options.check_budget(expanded)?;
            expanded += 1;

            trace!(
                "Expanding {:?} (g = {}, f = {}, frontier = {})",
                self.graph.label(current),
                g,
                entry.f_score,
                frontier.len()
            );

            for (neighbor, weight) in self.graph.adjacent(current) {
                let tentative = g + weight;
                if !tentative.is_finite() {
                    warn!(
                        "Cost to {:?} via {:?} overflows",
                        self.graph.label(neighbor),
                        self.graph.label(current)
                    );
                    overflowed = true;
                    continue;
                }

                let improves = self
                    .g_score
                    .get(&neighbor)
                    .map_or(true, |&known| tentative < known);

                if improves {
                    self.came_from.insert(neighbor, current);
                    self.g_score.insert(neighbor, tentative);
                    // Reopen: only reachable with an inconsistent heuristic
                    self.closed.remove(&neighbor);

                    let f = tentative + self.estimate(neighbor)?;
                    frontier.push(f, tentative, neighbor);
                }
            }
        }

        let start = format!("{:?}", self.graph.label(start));
        let goal = format!("{:?}", self.graph.label(self.goal));
        if overflowed {
            Err(SearchError::CostOverflow { start, goal })
        } else {
            Err(SearchError::NoPathExists { start, goal })
        }
    }

    fn estimate(&self, node: NodeId) -> Result<f64, SearchError> {
        let label = self.graph.label(node);
        let value = self.heuristic.estimate(label, self.graph.label(self.goal));
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(SearchError::InvalidHeuristic {
                node: format!("{:?}", label),
                value,
            })
        }
    }

    /// Walks predecessors back from the goal.
    fn reconstruct(&self, start: NodeId, expanded: usize) -> Route<N> {
        let mut indexes = vec![self.goal];
        let mut current = self.goal;
        while current != start {
            match self.came_from.get(&current) {
                Some(&previous) => {
                    indexes.push(previous);
                    current = previous;
                }
                None => break,
            }
        }
        indexes.reverse();

        let leg_weights = indexes
            .windows(2)
            .map(|pair| self.graph.weight_between(pair[0], pair[1]).unwrap_or(0.0))
            .collect();
        let nodes = indexes
            .into_iter()
            .map(|index| self.graph.label(index).clone())
            .collect();

        Route::new(nodes, leg_weights, expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CancelReason;

    /// The drone delivery network.
    fn delivery() -> RouteGraph<String> {
        let mut graph = RouteGraph::new();
        for (u, v, w) in [
            ("A", "B", 5.0),
            ("A", "C", 7.0),
            ("B", "C", 3.0),
            ("B", "D", 9.0),
            ("C", "D", 2.0),
            ("C", "E", 8.0),
            ("D", "F", 4.0),
            ("E", "F", 6.0),
        ] {
            graph.add_edge(u, v, w).unwrap();
        }
        graph
    }

    #[test]
    fn test_delivery_route() {
        let graph = delivery();
        let route = find_path(&graph, "A", "F", &ZeroHeuristic).unwrap();

        assert_eq!(route.nodes(), ["A", "C", "D", "F"]);
        assert_eq!(route.cost(), 13.0);
        assert_eq!(route.hops(), 3);
    }

    #[test]
    fn test_reverse_direction() {
        let graph = delivery();
        let route = find_path(&graph, "F", "A", &ZeroHeuristic).unwrap();

        assert_eq!(route.nodes(), ["F", "D", "C", "A"]);
        assert_eq!(route.cost(), 13.0);
    }

    #[test]
    fn test_start_equals_goal() {
        let graph = delivery();
        let route = find_path(&graph, "A", "A", &ZeroHeuristic).unwrap();

        assert_eq!(route.nodes(), ["A"]);
        assert_eq!(route.cost(), 0.0);
        assert_eq!(route.expanded(), 0);
    }

    #[test]
    fn test_start_equals_goal_on_isolated_node() {
        let mut graph: RouteGraph<String> = RouteGraph::new();
        graph.add_edge("A", "A", 1.0).unwrap();
        graph.remove_edge("A", "A");

        let route = find_path(&graph, "A", "A", &ZeroHeuristic).unwrap();
        assert_eq!(route.nodes(), ["A"]);
    }

    #[test]
    fn test_unknown_start() {
        let graph = delivery();
        let err = find_path(&graph, "X", "A", &ZeroHeuristic).unwrap_err();

        assert_eq!(
            err,
            SearchError::UnknownNode {
                endpoint: Endpoint::Start,
                node: "\"X\"".into()
            }
        );
    }

    #[test]
    fn test_unknown_goal() {
        let graph = delivery();
        let err = find_path(&graph, "A", "X", &ZeroHeuristic).unwrap_err();

        assert!(matches!(
            err,
            SearchError::UnknownNode {
                endpoint: Endpoint::Goal,
                ..
            }
        ));
    }

    #[test]
    fn test_disconnected_components() {
        let mut graph = delivery();
        graph.add_edge("X", "Y", 1.0).unwrap();

        let err = find_path(&graph, "A", "Y", &ZeroHeuristic).unwrap_err();
        assert!(err.is_no_path());

        // The graph is still usable afterwards
        assert!(find_path(&graph, "X", "Y", &ZeroHeuristic).is_ok());
    }

    #[test]
    fn test_zero_weight_edges() {
        let mut graph: RouteGraph<String> = RouteGraph::new();
        graph.add_edge("a", "b", 0.0).unwrap();
        graph.add_edge("b", "c", 0.0).unwrap();
        graph.add_edge("a", "c", 1.0).unwrap();

        let route = find_path(&graph, "a", "c", &ZeroHeuristic).unwrap();
        assert_eq!(route.nodes(), ["a", "b", "c"]);
        assert_eq!(route.cost(), 0.0);
    }

    #[test]
    fn test_ties_are_deterministic() {
        // Two equal-cost routes: s-a-t and s-b-t
        let mut graph: RouteGraph<String> = RouteGraph::new();
        graph.add_edge("s", "a", 1.0).unwrap();
        graph.add_edge("s", "b", 1.0).unwrap();
        graph.add_edge("a", "t", 1.0).unwrap();
        graph.add_edge("b", "t", 1.0).unwrap();

        // The neighbor whose edge was added first wins
        let first = find_path(&graph, "s", "t", &ZeroHeuristic).unwrap();
        assert_eq!(first.nodes(), ["s", "a", "t"]);
        assert_eq!(first.cost(), 2.0);
        for _ in 0..10 {
            let again = find_path(&graph, "s", "t", &ZeroHeuristic).unwrap();
            assert_eq!(again, first);
        }

        let mut flipped: RouteGraph<String> = RouteGraph::new();
        flipped.add_edge("s", "b", 1.0).unwrap();
        flipped.add_edge("s", "a", 1.0).unwrap();
        flipped.add_edge("b", "t", 1.0).unwrap();
        flipped.add_edge("a", "t", 1.0).unwrap();

        let route = find_path(&flipped, "s", "t", &ZeroHeuristic).unwrap();
        assert_eq!(route.nodes(), ["s", "b", "t"]);
    }

    #[test]
    fn test_closure_heuristic() {
        let graph = delivery();
        let h = |node: &String, goal: &String| if node == goal { 0.0 } else { 1.0 };

        let route = find_path(&graph, "A", "F", &h).unwrap();
        assert_eq!(route.nodes(), ["A", "C", "D", "F"]);
    }

    #[test]
    fn test_invalid_heuristic() {
        let graph = delivery();
        let h = |_: &String, _: &String| -1.0;

        let err = find_path(&graph, "A", "F", &h).unwrap_err();
        assert!(matches!(err, SearchError::InvalidHeuristic { .. }));
    }

    #[test]
    fn test_euclidean_expands_fewer_nodes() {
        // 10x10 grid, unit spacing, unit weights
        let mut graph: RouteGraph<(i32, i32)> = RouteGraph::new();
        let mut heuristic = EuclideanHeuristic::new();
        for x in 0..10 {
            for y in 0..10 {
                heuristic.insert((x, y), f64::from(x), f64::from(y));
                if x + 1 < 10 {
                    graph.add_edge((x, y), (x + 1, y), 1.0).unwrap();
                }
                if y + 1 < 10 {
                    graph.add_edge((x, y), (x, y + 1), 1.0).unwrap();
                }
            }
        }

        let blind = find_path(&graph, &(0, 0), &(9, 0), &ZeroHeuristic).unwrap();
        let informed = find_path(&graph, &(0, 0), &(9, 0), &heuristic).unwrap();

        assert_eq!(blind.cost(), 9.0);
        assert_eq!(informed.cost(), 9.0);
        assert!(informed.expanded() < blind.expanded());
    }

    #[test]
    fn test_cancelled_search() {
        let graph = delivery();
        let token = CancelToken::new();
        token.cancel();
        let options = SearchOptions::new().with_cancel_token(token);

        let err = find_path_with(&graph, "A", "F", &ZeroHeuristic, &options).unwrap_err();
        assert_eq!(
            err,
            SearchError::Cancelled {
                reason: CancelReason::Token
            }
        );

        // A fresh call without the token succeeds
        assert!(find_path(&graph, "A", "F", &ZeroHeuristic).is_ok());
    }

    #[test]
    fn test_expansion_budget() {
        let graph = delivery();
        let tight = SearchOptions::new().with_max_expansions(1);
        let err = find_path_with(&graph, "A", "F", &ZeroHeuristic, &tight).unwrap_err();
        assert!(err.is_cancelled());

        let roomy = SearchOptions::new().with_max_expansions(100);
        let route = find_path_with(&graph, "A", "F", &ZeroHeuristic, &roomy).unwrap();
        assert_eq!(route.cost(), 13.0);
    }

    #[test]
    fn test_budget_matches_expanded_count() {
        let mut graph: RouteGraph<String> = RouteGraph::new();
        graph.add_edge("depot", "harbor", 2.0).unwrap();

        let unlimited = find_path(&graph, "depot", "harbor", &ZeroHeuristic).unwrap();
        assert_eq!(unlimited.expanded(), 1);

        let options = SearchOptions::new().with_max_expansions(1);
        let route = find_path_with(&graph, "depot", "harbor", &ZeroHeuristic, &options).unwrap();
        assert_eq!(route.nodes(), ["depot", "harbor"]);
        assert_eq!(route.expanded(), 1);

        // A budget equal to the reported count is always enough
        let graph = delivery();
        let needed = find_path(&graph, "A", "F", &ZeroHeuristic).unwrap().expanded();
        let exact = SearchOptions::new().with_max_expansions(needed);
        assert!(find_path_with(&graph, "A", "F", &ZeroHeuristic, &exact).is_ok());
        let short = SearchOptions::new().with_max_expansions(needed - 1);
        assert!(find_path_with(&graph, "A", "F", &ZeroHeuristic, &short)
            .unwrap_err()
            .is_cancelled());
    }

    #[test]
    fn test_overflowing_cost_is_not_a_route() {
        let mut graph: RouteGraph<String> = RouteGraph::new();
        graph.add_edge("a", "b", 1e308).unwrap();
        graph.add_edge("b", "c", 1e308).unwrap();

        let err = find_path(&graph, "a", "c", &ZeroHeuristic).unwrap_err();
        assert!(matches!(err, SearchError::CostOverflow { .. }));
        assert!(!err.is_no_path());

        // A finite detour is still found
        graph.add_edge("a", "d", 1.0).unwrap();
        graph.add_edge("d", "c", 1.0).unwrap();
        let route = find_path(&graph, "a", "c", &ZeroHeuristic).unwrap();
        assert_eq!(route.nodes(), ["a", "d", "c"]);
        assert_eq!(route.cost(), 2.0);
    }

    #[test]
    fn test_legs_follow_graph_edges() {
        let graph = delivery();
        let route = find_path(&graph, "B", "E", &ZeroHeuristic).unwrap();

        assert_eq!(route.nodes(), ["B", "C", "E"]);
        for leg in route.legs() {
            assert_eq!(graph.weight(leg.from, leg.to), Some(leg.weight));
        }
        assert_eq!(route.cost(), 11.0);
    }
}
