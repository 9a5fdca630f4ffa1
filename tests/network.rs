
use decay_graph::algorithms::aggregation::Reducer;
use decay_graph::algorithms::decay::DecayFn;
use decay_graph::algorithms::shortest_path::all_pairs;
use decay_graph::{Error, ErrorKind, Graph, Network};

/// A six-node graph, undirected in effect (every edge present in both
/// directions), `cutoff = 1.2`.
fn sample_edges() -> Vec<(&'static str, &'static str, f64)> {
    vec![
        ("a", "b", 0.6),
        ("b", "a", 0.6),
        ("a", "c", 0.2),
        ("c", "a", 0.2),
        ("c", "d", 0.1),
        ("d", "c", 0.1),
        ("c", "e", 0.7),
        ("e", "c", 0.7),
        ("c", "f", 0.9),
        ("f", "c", 0.9),
        ("a", "d", 0.3),
        ("d", "a", 0.3),
    ]
}

#[test]
fn all_pairs_has_exactly_thirty_triples() {
    let graph = Graph::from_edges(sample_edges()).unwrap();
    let table = all_pairs(&graph, 1.2);
    assert_eq!(table.len(), 30);
}

#[test]
fn network_facade_matches_direct_aggregation_under_linear_and_no_decay() {
    let mut network = Network::new(sample_edges()).unwrap();
    network.preprocess(1.2);

    let observations = vec![("b", 1.0), ("d", 2.0), ("c", 3.0)];

    let linear = network
        .aggregate(&observations, &DecayFn::linear(0.5), &Reducer::Sum)
        .unwrap();
    assert_eq!(linear[&"a"], utility::round(2.6, 3));
    assert_eq!(linear[&"b"], 1.0);
    assert_eq!(linear[&"c"], 4.6);
    assert_eq!(linear[&"d"], 4.4);
    assert_eq!(linear[&"e"], 0.0);
    assert_eq!(linear[&"f"], 0.0);

    let no_decay = network
        .aggregate(&observations, &DecayFn::no_decay(0.5), &Reducer::Sum)
        .unwrap();
    assert_eq!(no_decay[&"a"], 5.0);
    assert_eq!(no_decay[&"b"], 1.0);
    assert_eq!(no_decay[&"c"], 5.0);
    assert_eq!(no_decay[&"d"], 5.0);
    assert_eq!(no_decay[&"e"], 0.0);
    assert_eq!(no_decay[&"f"], 0.0);
}

#[test]
fn tight_cutoff_excludes_targets_and_empty_groups_follow_convention() {
    let mut network = Network::new(sample_edges()).unwrap();
    network.preprocess(0.25);

    let observations = vec![("d", 2.0)];
    let sum = network
        .aggregate(&observations, &DecayFn::no_decay(0.25), &Reducer::Sum)
        .unwrap();
    assert_eq!(sum[&"a"], 0.0);

    let mean = network
        .aggregate(&observations, &DecayFn::no_decay(0.25), &Reducer::Mean)
        .unwrap();
    assert!(mean[&"a"].is_nan());
}

#[test]
fn weighted_mean_across_repeated_observations() {
    let mut network = Network::new(vec![("n1", "n2", 100.0), ("n2", "n1", 100.0)]).unwrap();
    network.preprocess(1500.0);

    let observations = vec![("n1", 100.0), ("n1", 200.0), ("n2", 300.0)];
    let result = network
        .aggregate(&observations, &DecayFn::no_decay(1500.0), &Reducer::Mean)
        .unwrap();
    assert_eq!(result[&"n1"], 200.0);
}

#[test]
fn all_pairs_is_deterministic_as_a_sorted_set() {
    let graph = Graph::from_edges(sample_edges()).unwrap();
    let mut first = all_pairs(&graph, 1.2);
    let mut second = all_pairs(&graph, 1.2);
    first.sort();
    second.sort();
    assert_eq!(first.triples(), second.triples());
}

#[test]
fn aggregate_before_preprocess_is_rejected() {
    let network = Network::new(sample_edges()).unwrap();
    let err: Error = network
        .aggregate(&[], &DecayFn::no_decay(1.0), &Reducer::Sum)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotPreprocessed);
}

#[test]
fn decay_cutoff_cannot_exceed_network_cutoff() {
    let mut network = Network::new(sample_edges()).unwrap();
    network.preprocess(0.5);
    let err = network
        .aggregate(&[], &DecayFn::no_decay(1.0), &Reducer::Sum)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::DecayCutoffExceedsNetworkCutoff);
}

#[test]
fn persistence_round_trip_preserves_aggregation_results() {
    let dir = tempfile::tempdir().unwrap();
    let nodes_path = dir.path().join("nodes.csv");
    let edges_path = dir.path().join("edges.csv");

    let edges: Vec<(String, String, f64)> = sample_edges()
        .into_iter()
        .map(|(u, v, c)| (u.to_string(), v.to_string(), c))
        .collect();
    let mut original: Network<String> = Network::new(edges).unwrap();
    original.write(&nodes_path, &edges_path).unwrap();

    let mut restored: Network<String> = Network::read(&nodes_path, &edges_path).unwrap();
    restored.preprocess(1.2);

    let observations = vec![
        ("b".to_string(), 1.0),
        ("d".to_string(), 2.0),
        ("c".to_string(), 3.0),
    ];
    let result = restored
        .aggregate(&observations, &DecayFn::no_decay(0.5), &Reducer::Sum)
        .unwrap();
    assert_eq!(result[&"a".to_string()], 5.0);
}

#[test]
fn generated_complete_graph_aggregates_without_decay() {
    let graph = decay_graph::generators::classic::complete_graph(4, false, 1.0).unwrap();
    let table = all_pairs(&graph, 10.0);
    let indices: Vec<u32> = (0..4).map(|id| graph.node_index(&id).unwrap()).collect();
    let observations: Vec<(u32, f64)> = indices.iter().map(|&ix| (ix, 1.0)).collect();
    let result = decay_graph::algorithms::aggregation::aggregate(
        &table,
        &observations,
        &DecayFn::no_decay(10.0),
        &Reducer::Sum,
    );
    for ix in indices {
        assert_eq!(result[&ix], 4.0);
    }
}

#[test]
fn generated_random_graph_stays_within_requested_node_count() {
    let graph =
        decay_graph::generators::random::fast_gnp_random_graph(100, 0.05, true, 5.0, Some(99))
            .unwrap();
    assert!(graph.number_of_nodes() <= 100);
    assert!(graph.number_of_edges() > 0);
}
