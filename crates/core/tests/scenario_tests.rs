use bf_core::{CycleFinder, DirectedGraph, SpfaSolver, all_simple_paths, find_negative_cycle, start_from};
use common::error::Error;
use std::collections::HashMap;

fn edges(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter().map(|&(u, v)| (u.to_string(), v.to_string())).collect()
}

fn path(list: &[&str]) -> Vec<String> {
    list.iter().map(|v| v.to_string()).collect()
}

#[test]
fn arbitrage_loop_through_doubling_edge() {
    let graph = DirectedGraph::from_edges(edges(&[
        ("a", "b"),
        ("b", "c"),
        ("c", "a"),
        ("c", "d"),
        ("d", "a"),
    ]));
    let weight: HashMap<&str, f64> = HashMap::from([
        ("a-b", -(1.0f64).ln()),
        ("b-c", -(1.0f64).ln()),
        ("c-a", -(1.0f64).ln()),
        ("c-d", -(2.0f64).ln()),
        ("d-a", -(1.0f64).ln()),
    ]);
    let weight_fn = |from: &String, to: &String| weight[format!("{}-{}", from, to).as_str()];

    let cycle = find_negative_cycle(&graph, &"a".to_string(), weight_fn).unwrap();

    let total: f64 = cycle.windows(2).map(|e| weight_fn(&e[0], &e[1])).sum();
    assert!(total < 0.0);
    assert!(cycle.windows(2).all(|e| graph.has_edge(&e[0], &e[1])));

    let rotated = start_from(&cycle, &"a".to_string()).unwrap();
    assert_eq!(rotated, path(&["a", "b", "c", "d", "a"]));
}

#[test]
fn single_vertex_negative_loop() {
    let graph = DirectedGraph::from_edges(edges(&[("a", "a")]));

    let cycle = find_negative_cycle(&graph, &"a".to_string(), |_: &String, _: &String| -1.0).unwrap();
    assert_eq!(start_from(&cycle, &"a".to_string()).unwrap(), path(&["a", "a"]));
}

#[test]
fn acyclic_chain_has_no_negative_cycle() {
    let graph = DirectedGraph::from_edges(edges(&[("a", "b"), ("b", "c")]));

    for w in [-100.0, -1.0, 0.0, 1.0] {
        let result = find_negative_cycle(&graph, &"a".to_string(), |_: &String, _: &String| w);
        assert_eq!(result, Err(Error::NotFound));
    }
}

#[test]
fn solver_seam_matches_free_function() {
    let graph = DirectedGraph::from_edges(edges(&[("x", "y"), ("y", "z"), ("z", "x")]));
    let weight = |from: &String, _: &String| if from == "z" { -4.0 } else { 1.0 };

    let via_trait = SpfaSolver::default()
        .find_negative_cycle(&graph, &"x".to_string(), weight)
        .unwrap();
    let via_fn = find_negative_cycle(&graph, &"x".to_string(), weight).unwrap();

    assert_eq!(via_trait, via_fn);
    assert_eq!(start_from(&via_fn, &"x".to_string()).unwrap(), path(&["x", "y", "z", "x"]));
}

#[test]
fn diamond_paths_include_lookahead_hits() {
    let graph = DirectedGraph::from_edges(edges(&[
        ("a", "b1"),
        ("a", "c1"),
        ("b1", "b2"),
        ("c1", "c2"),
        ("c2", "z"),
        ("c1", "z"),
        ("c1", "c1-1"),
        ("c1-1", "z"),
        ("c1-1", "c1"),
    ]));

    let mut paths: Vec<Vec<String>> =
        all_simple_paths(&graph, &"a".to_string(), &"z".to_string(), 3).collect();
    paths.sort();

    assert_eq!(
        paths,
        vec![
            path(&["a", "c1", "c1-1", "z"]),
            path(&["a", "c1", "c2", "z"]),
            path(&["a", "c1", "z"]),
        ]
    );
    assert!(paths.iter().all(|p| p.len() <= 4));
}
