//! Property-based tests for evolving graphs.
//!
//! These tests verify invariants that should hold for any evolving graph:
//! - Edge and timestamp bookkeeping
//! - Sorting and windowing
//! - Neighbor symmetry and causality
//! - Katz score shape

use lattix_evolving::{
    aggregate_graph, bfs, katz_static, katz_temporal, EvolvingGraph, KatzConfig,
    TemporalKatzConfig, TemporalNeighbors, TimeNode,
};
use proptest::prelude::*;

prop_compose! {
    /// Up to 40 edges over 8 nodes and 6 timestamps, in arbitrary order.
    fn arb_edges()(edges in prop::collection::vec((0u8..8, 0u8..8, 0u32..6), 0..40))
        -> Vec<(u8, u8, u32)> {
        edges
    }
}

fn build(edges: &[(u8, u8, u32)]) -> EvolvingGraph<u8, u32> {
    let mut g = EvolvingGraph::new();
    g.add_bunch_of_edges(edges.iter().copied());
    g
}

mod store_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn edge_count_matches_input(edges in arb_edges()) {
            let g = build(&edges);
            prop_assert_eq!(g.num_edges(), edges.len());
            prop_assert_eq!(g.timestamps().len(), edges.len());

            let per_time: usize = g
                .unique_timestamps()
                .iter()
                .map(|t| g.edges_at(t).len())
                .sum();
            prop_assert_eq!(per_time, edges.len());
        }

        #[test]
        fn sort_is_sorted_and_idempotent(edges in arb_edges()) {
            let mut g = build(&edges);
            g.sort_timestamps();
            prop_assert!(g.is_sorted());
            prop_assert_eq!(g.num_edges(), edges.len());

            let once: Vec<_> = g.timestamps().into_iter().copied().collect();
            g.sort_timestamps();
            let twice: Vec<_> = g.timestamps().into_iter().copied().collect();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn slice_keeps_exactly_the_window(
            edges in arb_edges(),
            a in 0u32..6,
            b in 0u32..6,
        ) {
            let (lo, hi) = (a.min(b), a.max(b));
            let g = build(&edges).to_sorted();
            let s = g.slice_timestamps(&lo, &hi).unwrap();

            let expected = edges.iter().filter(|e| lo <= e.2 && e.2 <= hi).count();
            prop_assert_eq!(s.num_edges(), expected);
            prop_assert!(s.timestamps().iter().all(|t| lo <= **t && **t <= hi));
            prop_assert!(s.num_nodes() <= g.num_nodes());
            for node in s.nodes() {
                prop_assert!(g.contains_node(&node.key));
            }
        }
    }
}

mod neighbor_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn forward_and_backward_are_inverse(edges in arb_edges()) {
            let g = build(&edges);
            for node in g.nodes() {
                for t in g.active_timestamps(&node.key).unwrap() {
                    let v = TimeNode::new(node.key, *t);
                    for w in g.forward_neighbors(&v).unwrap() {
                        prop_assert!(w.timestamp >= v.timestamp);
                        prop_assert!(g.backward_neighbors(&w).unwrap().contains(&v));
                    }
                }
            }
        }

        #[test]
        fn bfs_levels_are_consistent(edges in arb_edges()) {
            prop_assume!(!edges.is_empty());
            let g = build(&edges);
            let (s, _, t) = edges[0];
            let start = TimeNode::new(s, t);
            let levels = bfs(&g, &start).unwrap();

            prop_assert_eq!(levels.get(&start), Some(&0));
            for (v, &level) in &levels {
                prop_assert!(v.timestamp >= t);
                if level > 0 {
                    let has_parent = g
                        .backward_neighbors(v)
                        .unwrap()
                        .iter()
                        .any(|p| levels.get(p) == Some(&(level - 1)));
                    prop_assert!(has_parent, "{:?} at level {} has no parent", v, level);
                }
            }
        }
    }
}

mod katz_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn static_scores_cover_every_node(edges in arb_edges()) {
            let g = build(&edges);
            // 40 edges bound every row sum, so alpha * rho < 1
            let config = KatzConfig { alpha: 0.01, ..Default::default() };
            let scores = katz_static(&aggregate_graph(&g), &config).unwrap();
            prop_assert_eq!(scores.len(), g.num_nodes());
            prop_assert!(scores.iter().all(|(_, s)| s >= 1.0 - 1e-9));
        }

        #[test]
        fn temporal_scores_are_finite(edges in arb_edges()) {
            let g = build(&edges);
            // 40 edges bound every row sum, so alpha * rho < 1
            let config = TemporalKatzConfig { alpha: 0.02, ..Default::default() };
            let result = katz_temporal(&g, &config).unwrap();
            let scores = result.scores().unwrap();
            prop_assert_eq!(scores.len(), g.num_nodes());
            prop_assert!(scores.iter().all(|(_, s)| s.is_finite() && s > 0.0));
        }
    }
}
