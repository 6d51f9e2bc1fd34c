mod common;

use flightroute_lib::{compute_distances, shortest_path, Cost, Error, Graph};

use common::{brute_force_cost, reference};

#[test]
fn new_york_to_seattle_goes_through_chicago_and_denver() {
    let graph = reference();
    let route = shortest_path(&graph, "New York", "Seattle").expect("route exists");

    assert_eq!(route.stops, ["New York", "Chicago", "Denver", "Seattle"]);
    assert_eq!(route.cost, 719.0 + 1003.0 + 1306.0);
    assert_eq!(route.cost, 3028.0);
}

#[test]
fn new_york_to_boston_uses_direct_flight() {
    let graph = reference();
    let route = shortest_path(&graph, "New York", "Boston").expect("route exists");

    assert_eq!(route.stops, ["New York", "Boston"]);
    assert_eq!(route.cost, 215.0);
}

#[test]
fn every_pair_matches_exhaustive_search() {
    let graph = reference();
    for start in graph.all_nodes() {
        for goal in graph.all_nodes() {
            let route = shortest_path(&graph, start, goal).expect("reference graph is connected");
            let oracle = brute_force_cost(&graph, start, goal).expect("some path exists");
            assert_eq!(route.cost, oracle, "{start} -> {goal}");
        }
    }
}

#[test]
fn route_cost_equals_sum_of_legs() {
    let graph = reference();
    for start in graph.all_nodes() {
        for goal in graph.all_nodes() {
            let route = shortest_path(&graph, start, goal).expect("route exists");
            let summed: Cost = route
                .legs()
                .map(|(from, to)| graph.edge_cost(from, to).expect("legs follow edges"))
                .sum();
            assert_eq!(route.cost, summed, "{start} -> {goal}");
            assert_eq!(route.start(), Some(start));
            assert_eq!(route.goal(), Some(goal));
        }
    }
}

#[test]
fn start_node_has_zero_cost_and_no_predecessor() {
    let graph = reference();
    for node in graph.all_nodes() {
        let tree = compute_distances(&graph, node).expect("known start");
        assert_eq!(tree.distance(node), Some(0.0));
        assert_eq!(tree.predecessor(node), None);
        assert_eq!(tree.distances.len(), graph.node_count());
        assert_eq!(tree.predecessors.len(), graph.node_count());
    }
}

#[test]
fn distances_satisfy_triangle_inequality() {
    let graph = reference();
    for start in graph.all_nodes() {
        let tree = compute_distances(&graph, start).expect("known start");
        for (a, b, weight) in graph.edges() {
            let da = tree.distance(a).expect("a in tree");
            let db = tree.distance(b).expect("b in tree");
            assert!(db <= da + weight, "{start}: d({b}) > d({a}) + {weight}");
            assert!(da <= db + weight, "{start}: d({a}) > d({b}) + {weight}");
        }
    }
}

#[test]
fn costs_are_symmetric() {
    let graph = reference();
    for a in graph.all_nodes() {
        for b in graph.all_nodes() {
            let forward = shortest_path(&graph, a, b).expect("route exists").cost;
            let backward = shortest_path(&graph, b, a).expect("route exists").cost;
            assert_eq!(forward, backward, "{a} <-> {b}");
        }
    }
}

#[test]
fn repeated_queries_are_identical() {
    let graph = reference();
    let first = shortest_path(&graph, "Boston", "Los Angeles").expect("route exists");
    for _ in 0..10 {
        let again = shortest_path(&graph, "Boston", "Los Angeles").expect("route exists");
        assert_eq!(again, first);
    }

    let tree = compute_distances(&graph, "Miami").expect("known start");
    assert_eq!(compute_distances(&graph, "Miami").expect("known start"), tree);
}

#[test]
fn disconnected_components_have_no_path() {
    let graph = Graph::from_edges([
        ("Honolulu", "Hilo", 120.0),
        ("Boston", "New York", 215.0),
        ("New York", "Chicago", 719.0),
    ])
    .expect("valid graph");

    let err = shortest_path(&graph, "Boston", "Hilo").expect_err("no route");
    match err {
        Error::NoPathExists { start, goal } => {
            assert_eq!(start, "Boston");
            assert_eq!(goal, "Hilo");
        }
        other => panic!("expected NoPathExists, got {other:?}"),
    }

    let tree = compute_distances(&graph, "Boston").expect("known start");
    assert_eq!(tree.distance("Honolulu"), Some(f64::INFINITY));
    assert_eq!(tree.predecessor("Honolulu"), None);
}

#[test]
fn unknown_cities_are_reported_distinctly() {
    let graph = reference();

    let err = shortest_path(&graph, "Gotham", "Boston").expect_err("unknown start");
    assert!(matches!(err, Error::UnknownNode { ref name, .. } if name == "Gotham"));

    let err = shortest_path(&graph, "Boston", "Metropolis").expect_err("unknown goal");
    assert!(matches!(err, Error::UnknownNode { ref name, .. } if name == "Metropolis"));
}

#[test]
fn same_start_and_goal_is_a_single_stop() {
    let graph = reference();
    let route = shortest_path(&graph, "Denver", "Denver").expect("trivial route");
    assert_eq!(route.stops, ["Denver"]);
    assert_eq!(route.cost, 0.0);
    assert_eq!(route.hop_count(), 0);
}

#[test]
fn graph_can_be_shared_across_threads() {
    let graph = reference();
    let handles: Vec<_> = ["Seattle", "Miami", "Toronto"]
        .into_iter()
        .map(|goal| {
            let graph = graph.clone();
            std::thread::spawn(move || {
                shortest_path(&graph, "New York", goal)
                    .expect("route exists")
                    .cost
            })
        })
        .collect();

    let costs: Vec<Cost> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread finished"))
        .collect();
    assert_eq!(costs, vec![3028.0, 1150.0, 470.0]);
}
