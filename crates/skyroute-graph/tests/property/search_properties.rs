use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use proptest::prelude::*;
use skyroute_graph::{find_path, EuclideanHeuristic, RouteGraph, ZeroHeuristic};
use std::collections::HashMap;

const NODES: u32 = 10;

fn edge_list() -> impl Strategy<Value = Vec<(u32, u32, u32)>> {
    prop::collection::vec((0..NODES, 0..NODES, 0u32..20), 1..30)
}

fn build(edges: &[(u32, u32, u32)]) -> RouteGraph<u32> {
    let mut graph = RouteGraph::new();
    for &(u, v, w) in edges {
        graph.add_edge(u, v, f64::from(w)).unwrap();
    }
    graph
}

/// Plain petgraph copy of the same edges, for reference distances.
fn reference(edges: &[(u32, u32, u32)]) -> UnGraph<(), f64> {
    let mut graph = UnGraph::new_undirected();
    for _ in 0..NODES {
        graph.add_node(());
    }
    for &(u, v, w) in edges {
        graph.update_edge(NodeIndex::new(u as usize), NodeIndex::new(v as usize), f64::from(w));
    }
    graph
}

proptest! {
    #[test]
    fn zero_heuristic_matches_dijkstra(edges in edge_list(), start in 0..NODES, goal in 0..NODES) {
        let graph = build(&edges);
        prop_assume!(graph.has_node(&start) && graph.has_node(&goal));

        let reference_graph = reference(&edges);
        let distances = dijkstra(&reference_graph, NodeIndex::new(start as usize), None, |e| *e.weight());
        let expected = distances.get(&NodeIndex::new(goal as usize));

        match (find_path(&graph, &start, &goal, &ZeroHeuristic), expected) {
            (Ok(route), Some(&expected)) => {
                prop_assert_eq!(route.cost(), expected);
                prop_assert_eq!(*route.start(), start);
                prop_assert_eq!(*route.goal(), goal);
            }
            (Err(e), None) => prop_assert!(e.is_no_path(), "unexpected error: {}", e),
            (result, expected) => prop_assert!(false, "mismatch: {:?} vs {:?}", result, expected),
        }
    }

    #[test]
    fn routes_follow_edges_and_never_revisit(edges in edge_list(), start in 0..NODES, goal in 0..NODES) {
        let graph = build(&edges);
        prop_assume!(graph.has_node(&start) && graph.has_node(&goal));

        if let Ok(route) = find_path(&graph, &start, &goal, &ZeroHeuristic) {
            let mut total = 0.0;
            for leg in route.legs() {
                prop_assert_eq!(graph.weight(leg.from, leg.to), Some(leg.weight));
                total += leg.weight;
            }
            prop_assert_eq!(total, route.cost());

            let mut seen = route.nodes().to_vec();
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.len(), route.nodes().len());
        }
    }

    #[test]
    fn self_route_is_single_node(edges in edge_list()) {
        let graph = build(&edges);
        for node in graph.nodes() {
            let route = find_path(&graph, node, node, &ZeroHeuristic).unwrap();
            prop_assert_eq!(route.nodes(), std::slice::from_ref(node));
            prop_assert_eq!(route.cost(), 0.0);
        }
    }

    #[test]
    fn edges_stay_symmetric(edges in edge_list()) {
        let mut graph: RouteGraph<u32> = RouteGraph::new();
        for (u, v, w) in edges {
            graph.add_edge(u, v, f64::from(w)).unwrap();
            prop_assert_eq!(graph.neighbors(&u).get(&v).copied(), graph.neighbors(&v).get(&u).copied());
            prop_assert_eq!(graph.weight(&u, &v), Some(f64::from(w)));
        }
    }

    #[test]
    fn negative_weight_changes_nothing(edges in edge_list(), u in 0..NODES + 3, v in 0..NODES + 3, w in -100.0f64..-0.001) {
        let mut graph = build(&edges);
        let before = graph.edges();
        let nodes_before = graph.node_count();

        prop_assert!(graph.add_edge(u, v, w).is_err());
        prop_assert_eq!(graph.edges(), before);
        prop_assert_eq!(graph.node_count(), nodes_before);
    }

    #[test]
    fn straight_line_heuristic_keeps_optimality(
        positions in prop::collection::vec((0i32..20, 0i32..20), NODES as usize),
        pairs in prop::collection::vec((0..NODES, 0..NODES, 0u32..5), 1..30),
        start in 0..NODES,
        goal in 0..NODES
    ) {
        // Weights are at least the distance between endpoints, so the
        // straight line never overestimates.
        let mut heuristic = EuclideanHeuristic::new();
        let mut located = HashMap::new();
        for (node, &(x, y)) in (0..NODES).zip(&positions) {
            heuristic.insert(node, f64::from(x), f64::from(y));
            located.insert(node, (f64::from(x), f64::from(y)));
        }

        let mut graph: RouteGraph<u32> = RouteGraph::new();
        for (u, v, extra) in pairs {
            let (x1, y1) = located[&u];
            let (x2, y2) = located[&v];
            graph.add_edge(u, v, (x2 - x1).hypot(y2 - y1).ceil() + f64::from(extra)).unwrap();
        }
        prop_assume!(graph.has_node(&start) && graph.has_node(&goal));

        let blind = find_path(&graph, &start, &goal, &ZeroHeuristic);
        let informed = find_path(&graph, &start, &goal, &heuristic);

        match (blind, informed) {
            (Ok(a), Ok(b)) => {
                prop_assert!((a.cost() - b.cost()).abs() < 1e-9);
            }
            (Err(a), Err(b)) => {
                prop_assert!(a.is_no_path());
                prop_assert!(b.is_no_path());
            }
            (a, b) => prop_assert!(false, "mismatch: {:?} vs {:?}", a, b),
        }
    }
}
