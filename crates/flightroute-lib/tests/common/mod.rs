#![allow(dead_code)]

use std::collections::BTreeSet;

use flightroute_lib::{reference_graph, Cost, Graph};

pub fn reference() -> Graph {
    reference_graph().expect("reference table is valid")
}

/// Cheapest simple path between `start` and `goal`, found by trying every
/// simple path. Only usable on small graphs.
pub fn brute_force_cost(graph: &Graph, start: &str, goal: &str) -> Option<Cost> {
    let mut visited = BTreeSet::new();
    visited.insert(start.to_string());
    let mut best = None;
    explore(graph, start, goal, 0.0, &mut visited, &mut best);
    best
}

fn explore(
    graph: &Graph,
    current: &str,
    goal: &str,
    cost: Cost,
    visited: &mut BTreeSet<String>,
    best: &mut Option<Cost>,
) {
    if current == goal {
        if best.map_or(true, |b| cost < b) {
            *best = Some(cost);
        }
        return;
    }

    let neighbours = graph.neighbours(current).expect("node is in the graph");
    for (next, weight) in neighbours {
        if visited.insert(next.clone()) {
            explore(graph, next, goal, cost + weight, visited, best);
            visited.remove(next);
        }
    }
}
