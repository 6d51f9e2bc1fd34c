use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{unknown_node, Cost, Graph};

/// Best known cost from the start node for every node of the graph.
/// Unreached nodes keep `Cost::INFINITY`.
pub type DistanceMap = BTreeMap<String, Cost>;

/// Node from which each entry's best cost was last improved.
/// `None` for the start node and for unreached nodes.
pub type PredecessorMap = BTreeMap<String, Option<String>>;

/// Ordered stops from start to goal plus the accumulated cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub stops: Vec<String>,
    pub cost: Cost,
}

impl Route {
    pub fn start(&self) -> Option<&str> {
        self.stops.first().map(String::as_str)
    }

    pub fn goal(&self) -> Option<&str> {
        self.stops.last().map(String::as_str)
    }

    /// Number of flights in the route.
    pub fn hop_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    /// Consecutive `(from, to)` pairs along the route.
    pub fn legs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.stops
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

/// Result of a full single-source relaxation.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    pub start: String,
    pub distances: DistanceMap,
    pub predecessors: PredecessorMap,
}

impl ShortestPathTree {
    /// Best cost to `node`, `None` when the node is not part of the graph.
    pub fn distance(&self, node: &str) -> Option<Cost> {
        self.distances.get(node).copied()
    }

    pub fn predecessor(&self, node: &str) -> Option<&str> {
        self.predecessors.get(node)?.as_deref()
    }

    pub fn is_reachable(&self, node: &str) -> bool {
        self.distance(node).is_some_and(Cost::is_finite)
    }

    /// Number of nodes with a finite cost, including the start node.
    pub fn reachable_count(&self) -> usize {
        self.distances.values().filter(|cost| cost.is_finite()).count()
    }

    /// Reconstruct the route from the tree's start node to `end`.
    pub fn route_to(&self, end: &str) -> Result<Route> {
        reconstruct_path(&self.predecessors, &self.distances, &self.start, end)
    }

    pub fn into_parts(self) -> (DistanceMap, PredecessorMap) {
        (self.distances, self.predecessors)
    }
}

/// Find the least-cost route between `start` and `end`.
pub fn shortest_path(graph: &Graph, start: &str, end: &str) -> Result<Route> {
    let tree = compute_distances(graph, start)?;
    // Report an unknown goal against the graph before walking the tree.
    let end = graph.resolve_node(end)?;
    let route = tree.route_to(end)?;

    debug!(
        start = %tree.start,
        goal = %end,
        hops = route.hop_count(),
        cost = route.cost,
        "shortest path found"
    );
    Ok(route)
}

/// Run Dijkstra's algorithm from `start` over the whole graph.
///
/// Uses a binary heap with lazy deletion: improved nodes are pushed again and
/// stale entries are skipped when popped. Entries with equal cost pop in node
/// name order and neighbours are relaxed in name order, so the resulting
/// predecessors are deterministic.
pub fn compute_distances(graph: &Graph, start: &str) -> Result<ShortestPathTree> {
    let start = graph.resolve_node(start)?;

    let mut distances: DistanceMap = graph
        .all_nodes()
        .into_iter()
        .map(|node| (node.to_string(), Cost::INFINITY))
        .collect();
    let mut predecessors: PredecessorMap = distances
        .keys()
        .map(|node| (node.clone(), None))
        .collect();
    let mut queue = BinaryHeap::new();
    let mut settled = 0usize;

    distances.insert(start.to_string(), 0.0);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        let recorded = distances
            .get(entry.node)
            .copied()
            .unwrap_or(Cost::INFINITY);
        if entry.cost.0 > recorded {
            continue;
        }
        settled += 1;

        for (next, weight) in graph.neighbours(entry.node)? {
            let next_cost = entry.cost.0 + weight;
            let Some(best) = distances.get_mut(next.as_str()) else {
                continue;
            };
            if next_cost < *best {
                *best = next_cost;
                predecessors.insert(next.clone(), Some(entry.node.to_string()));
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    debug!(start = %start, settled, nodes = graph.node_count(), "relaxation finished");

    Ok(ShortestPathTree {
        start: start.to_string(),
        distances,
        predecessors,
    })
}

/// Walk the predecessor chain backwards from `end` and return it in travel order.
///
/// Reachability is checked first, so an unreached `end` yields
/// [`Error::NoPathExists`] instead of a one-element route. Maps that were not
/// produced from `start` (or that contain a cycle) fail the same way.
pub fn reconstruct_path(
    predecessors: &PredecessorMap,
    distances: &DistanceMap,
    start: &str,
    end: &str,
) -> Result<Route> {
    let known = |node: &str| distances.contains_key(node) && predecessors.contains_key(node);
    for node in [start, end] {
        if !known(node) {
            return Err(unknown_node(node, distances.keys().map(String::as_str)));
        }
    }

    let no_path = || Error::NoPathExists {
        start: start.to_string(),
        goal: end.to_string(),
    };

    let cost = distances.get(end).copied().unwrap_or(Cost::INFINITY);
    if !cost.is_finite() {
        return Err(no_path());
    }

    let mut stops = vec![end.to_string()];
    let mut current: &str = end;
    while let Some(Some(previous)) = predecessors.get(current) {
        if stops.len() > predecessors.len() {
            return Err(no_path());
        }
        stops.push(previous.clone());
        current = previous.as_str();
    }

    if current != start {
        return Err(no_path());
    }

    stops.reverse();
    Ok(Route { stops, cost })
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, cost: Cost) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then by name.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_route(graph: &Graph, start: &str, end: &str, stops: &[&str], cost: Cost) {
        let route = shortest_path(graph, start, end).expect("route exists");
        assert_eq!(route.stops, stops);
        assert_eq!(route.cost, cost);
    }

    fn assert_no_path(graph: &Graph, start: &str, end: &str) {
        let err = shortest_path(graph, start, end).expect_err("no route expected");
        assert!(
            matches!(err, Error::NoPathExists { .. }),
            "expected NoPathExists, got {err:?}"
        );
    }

    #[test]
    fn simple_path() {
        //      H -- I -- J
        //      |         |
        // A -- F -- G -  |
        // |         |  \ |
        // B -- C -- D -- E
        let graph = Graph::from_edges([
            ("A", "B", 1.0),
            ("B", "C", 1.0),
            ("C", "D", 1.0),
            ("D", "E", 20.0),
            ("A", "F", 5.0),
            ("F", "G", 1.0),
            ("G", "E", 20.0),
            ("G", "D", 20.0),
            ("F", "H", 5.0),
            ("H", "I", 1.0),
            ("I", "J", 1.0),
            ("J", "E", 1.0),
        ])
        .expect("valid graph");

        assert_route(&graph, "A", "E", &["A", "F", "H", "I", "J", "E"], 13.0);
        assert_route(&graph, "G", "D", &["G", "F", "A", "B", "C", "D"], 9.0);
        assert_route(&graph, "E", "E", &["E"], 0.0);
        assert_route(&graph, "B", "E", &["B", "A", "F", "H", "I", "J", "E"], 14.0);
    }

    #[test]
    fn disconnected_graph() {
        // A -- B -- C
        // D -- E -- F
        let graph = Graph::from_edges([
            ("A", "B", 1.0),
            ("B", "C", 1.0),
            ("D", "E", 3.0),
            ("E", "F", 1.0),
        ])
        .expect("valid graph");

        assert_no_path(&graph, "A", "D");
        assert_no_path(&graph, "F", "C");
        assert_route(&graph, "A", "C", &["A", "B", "C"], 2.0);
        assert_route(&graph, "D", "F", &["D", "E", "F"], 4.0);
    }

    #[test]
    fn go_around() {
        // A -- B
        // |    |
        // C -- D
        let graph = Graph::from_edges([
            ("A", "B", 10.0),
            ("A", "C", 1.0),
            ("C", "D", 1.0),
            ("D", "B", 1.0),
        ])
        .expect("valid graph");

        assert_route(&graph, "A", "B", &["A", "C", "D", "B"], 3.0);
    }

    #[test]
    fn stale_queue_entries_do_not_override_better_costs() {
        // C is first reached directly at 10, then improved through B at 2.
        let graph = Graph::from_edges([("A", "B", 1.0), ("A", "C", 10.0), ("B", "C", 1.0)])
            .expect("valid graph");

        let tree = compute_distances(&graph, "A").expect("known start");
        assert_eq!(tree.distance("C"), Some(2.0));
        assert_eq!(tree.predecessor("C"), Some("B"));
    }

    #[test]
    fn equal_costs_break_ties_by_name() {
        // Both A-B-D and A-C-D cost 2; B is settled first.
        let graph = Graph::from_edges([
            ("A", "C", 1.0),
            ("A", "B", 1.0),
            ("C", "D", 1.0),
            ("B", "D", 1.0),
        ])
        .expect("valid graph");

        assert_route(&graph, "A", "D", &["A", "B", "D"], 2.0);
    }

    #[test]
    fn unreached_nodes_keep_infinite_distance() {
        let graph = Graph::builder()
            .edge("A", "B", 2.0)
            .node("Island")
            .build()
            .expect("valid graph");

        let tree = compute_distances(&graph, "A").expect("known start");
        assert_eq!(tree.distance("A"), Some(0.0));
        assert_eq!(tree.predecessor("A"), None);
        assert_eq!(tree.distance("Island"), Some(Cost::INFINITY));
        assert_eq!(tree.predecessor("Island"), None);
        assert!(!tree.is_reachable("Island"));
        assert_eq!(tree.reachable_count(), 2);
    }

    #[test]
    fn unknown_start_and_goal_are_reported() {
        let graph = Graph::from_edges([("A", "B", 1.0)]).expect("valid graph");

        let err = compute_distances(&graph, "Z").expect_err("unknown start");
        assert!(matches!(err, Error::UnknownNode { ref name, .. } if name == "Z"));

        let err = shortest_path(&graph, "A", "Y").expect_err("unknown goal");
        assert!(matches!(err, Error::UnknownNode { ref name, .. } if name == "Y"));
    }

    #[test]
    fn reconstruct_checks_reachability_before_walking() {
        let distances = DistanceMap::from([
            ("A".to_string(), 0.0),
            ("B".to_string(), Cost::INFINITY),
        ]);
        let predecessors = PredecessorMap::from([("A".to_string(), None), ("B".to_string(), None)]);

        let err = reconstruct_path(&predecessors, &distances, "A", "B").expect_err("unreached");
        assert!(matches!(err, Error::NoPathExists { .. }));

        let err = reconstruct_path(&predecessors, &distances, "A", "C").expect_err("unknown");
        assert!(matches!(err, Error::UnknownNode { .. }));
    }

    #[test]
    fn reconstruct_rejects_chain_from_another_start() {
        let graph = Graph::from_edges([("A", "B", 1.0), ("B", "C", 1.0)]).expect("valid graph");
        let (distances, predecessors) = compute_distances(&graph, "A")
            .expect("known start")
            .into_parts();

        let err = reconstruct_path(&predecessors, &distances, "B", "C").expect_err("wrong start");
        assert!(matches!(err, Error::NoPathExists { .. }));
    }

    #[test]
    fn reconstruct_rejects_cyclic_predecessors() {
        let distances = DistanceMap::from([
            ("A".to_string(), 0.0),
            ("B".to_string(), 1.0),
            ("C".to_string(), 2.0),
        ]);
        let predecessors = PredecessorMap::from([
            ("A".to_string(), None),
            ("B".to_string(), Some("C".to_string())),
            ("C".to_string(), Some("B".to_string())),
        ]);

        let err = reconstruct_path(&predecessors, &distances, "A", "C").expect_err("cycle");
        assert!(matches!(err, Error::NoPathExists { .. }));
    }

    #[test]
    fn route_accessors() {
        let route = Route {
            stops: vec!["A".into(), "B".into(), "C".into()],
            cost: 3.0,
        };
        assert_eq!(route.start(), Some("A"));
        assert_eq!(route.goal(), Some("C"));
        assert_eq!(route.hop_count(), 2);
        assert_eq!(route.legs().collect::<Vec<_>>(), vec![("A", "B"), ("B", "C")]);
    }
}
