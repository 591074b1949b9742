//! Integration tests for Katz centrality on evolving graphs.

use lattix_evolving::{
    aggregate_graph, katz_evolving, katz_static, katz_temporal, random_evolving_graph, Error,
    EvolvingGraph, GraphConfig, KatzConfig, KatzMode, RandomGraphConfig, StaticGraph,
    TemporalKatzConfig,
};

fn scenario() -> EvolvingGraph<&'static str, u32> {
    let mut g = EvolvingGraph::new();
    g.add_bunch_of_edges([("A", "B", 1), ("A", "C", 2), ("B", "C", 3)]);
    g
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_broadcast_ranking_and_values() {
    let g = scenario();
    let result = katz_temporal(&g, &TemporalKatzConfig::default()).unwrap();
    let scores = result.scores().unwrap();

    let order: Vec<_> = scores.ranked().iter().map(|(k, _)| **k).collect();
    assert_eq!(order, vec!["A", "B", "C"]);

    // raw [1.507, 1.3, 1.0], scaled to unit norm
    assert!(close(scores.get(&"A").unwrap(), 0.6766));
    assert!(close(scores.get(&"B").unwrap(), 0.5836));
    assert!(close(scores.get(&"C").unwrap(), 0.4490));
}

#[test]
fn test_repeated_interaction_raises_broadcast() {
    let config = TemporalKatzConfig { normalize: false, ..Default::default() };
    let before = katz_temporal(&scenario(), &config).unwrap().into_scores().unwrap();

    let mut g = scenario();
    g.add_edge("A", "B", 2);
    let after = katz_temporal(&g, &config).unwrap().into_scores().unwrap();

    assert!(close(before.get(&"A").unwrap(), 1.507));
    assert!(close(after.get(&"A").unwrap(), 1.826));
    assert!(after.get(&"A").unwrap() > before.get(&"A").unwrap());
    assert!(close(after.get(&"B").unwrap(), before.get(&"B").unwrap()));
}

#[test]
fn test_receive_mode() {
    let g = scenario();
    let config = TemporalKatzConfig {
        mode: KatzMode::Receive,
        normalize: false,
        ..Default::default()
    };
    let scores = katz_temporal(&g, &config).unwrap().into_scores().unwrap();
    assert!(close(scores.get(&"A").unwrap(), 1.0));
    assert!(close(scores.get(&"B").unwrap(), 1.201));
    assert!(close(scores.get(&"C").unwrap(), 1.606));
}

#[test]
fn test_matrix_reductions_match_modes() {
    let g = scenario();
    let base = TemporalKatzConfig { normalize: false, ..Default::default() };
    let matrix = katz_temporal(&g, &TemporalKatzConfig { mode: KatzMode::Matrix, ..base })
        .unwrap()
        .into_matrix()
        .unwrap();
    let broadcast = katz_temporal(&g, &base).unwrap().into_scores().unwrap();

    let from_matrix = matrix.broadcast();
    for (key, score) in broadcast.iter() {
        assert!((from_matrix.get(key).unwrap() - score).abs() < 1e-12);
    }
    // walks never run backwards through time
    assert_eq!(matrix.get(&"C", &"A"), Some(0.0));
}

#[test]
fn test_temporal_differs_from_aggregate() {
    // C -> B happens before A -> C, so A never reaches B in time
    let mut g = EvolvingGraph::new();
    g.add_bunch_of_edges([("C", "B", 1u32), ("A", "C", 2)]);

    let config = TemporalKatzConfig { mode: KatzMode::Matrix, beta: 0.0, ..Default::default() };
    let m = katz_temporal(&g, &config).unwrap().into_matrix().unwrap();
    assert_eq!(m.get(&"A", &"B"), Some(0.0));

    let s = aggregate_graph(&g);
    let agg = katz_static(&s, &KatzConfig::default()).unwrap();
    // Aggregated: A -> C -> B, so A's static score counts the two-hop walk
    assert!((agg.get(&"A").unwrap() - (1.0 + 0.3 * 1.3)).abs() < 1e-12);
}

#[test]
fn test_katz_evolving_equals_static_of_aggregate() {
    let g = scenario();
    let a = katz_evolving(&g, &KatzConfig::default()).unwrap();
    let b = katz_static(&aggregate_graph(&g), &KatzConfig::default()).unwrap();
    assert_eq!(a.to_map(), b.to_map());
}

#[test]
fn test_isolated_nodes_keep_baseline() {
    let mut g = StaticGraph::new();
    g.add_node("lonely");
    g.add_edge("a", "b", 1.0);
    let scores = katz_static(&g, &KatzConfig::default()).unwrap();
    assert_eq!(scores.get(&"lonely"), Some(1.0));
    assert_eq!(scores.get(&"missing"), None);
}

#[test]
fn test_divergence_on_dense_timestamp() {
    let mut g = EvolvingGraph::with_config(GraphConfig::undirected()).unwrap();
    for (s, d) in [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)] {
        g.add_edge(s, d, 10u32);
    }
    // K4 has spectral radius 3
    let config = TemporalKatzConfig { alpha: 0.4, ..Default::default() };
    let err = katz_temporal(&g, &config).unwrap_err();
    match err {
        Error::NumericDivergence { spectral_radius, timestamp, .. } => {
            assert!((spectral_radius - 3.0).abs() < 1e-6);
            assert_eq!(timestamp.as_deref(), Some("10"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let ok = TemporalKatzConfig { alpha: 0.3, ..Default::default() };
    assert!(katz_temporal(&g, &ok).is_ok());
}

#[test]
fn test_random_graph_scores_are_positive() {
    let config = RandomGraphConfig {
        num_nodes: 20,
        num_timestamps: 8,
        edge_probability: 0.1,
        seed: 7,
        ..Default::default()
    };
    let g = random_evolving_graph(&config).unwrap();
    let temporal = TemporalKatzConfig { alpha: 0.05, ..Default::default() };
    let scores = katz_temporal(&g, &temporal).unwrap().into_scores().unwrap();
    assert_eq!(scores.len(), 20);
    assert!(scores.iter().all(|(_, s)| s > 0.0 && s.is_finite()));
}
