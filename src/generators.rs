//! Seeded random graph generators.
//!
//! Erdős–Rényi style: every candidate pair gets an edge independently with
//! probability `p`, once per timestamp for evolving graphs. The same seed
//! always yields the same graph.

use crate::graph::{EvolvingGraph, GraphConfig};
use crate::static_graph::StaticGraph;
use crate::{Error, Result};
use rand::prelude::*;
use rand_xorshift::XorShiftRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for [`random_evolving_graph`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomGraphConfig {
    /// Nodes are keyed `0..num_nodes`.
    pub num_nodes: usize,
    /// Timestamps are `1..=num_timestamps`.
    pub num_timestamps: usize,
    /// Probability of each candidate edge at each timestamp.
    pub edge_probability: f64,
    pub directed: bool,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for RandomGraphConfig {
    fn default() -> Self {
        Self {
            num_nodes: 10,
            num_timestamps: 5,
            edge_probability: 0.5,
            directed: true,
            seed: 42,
        }
    }
}

/// Random evolving graph over keys `0..n` and timestamps `1..=m`.
///
/// Every node is registered up front, so isolated nodes are kept. Self
/// loops are never generated; undirected graphs draw each pair once.
///
/// ```rust
/// use lattix_evolving::generators::{random_evolving_graph, RandomGraphConfig};
///
/// let config = RandomGraphConfig { num_nodes: 6, num_timestamps: 3, ..Default::default() };
/// let a = random_evolving_graph(&config)?;
/// let b = random_evolving_graph(&config)?;
/// assert_eq!(a.num_nodes(), 6);
/// assert_eq!(a.num_edges(), b.num_edges());
/// assert!(a.is_sorted());
/// # Ok::<(), lattix_evolving::Error>(())
/// ```
pub fn random_evolving_graph(config: &RandomGraphConfig) -> Result<EvolvingGraph<usize, usize>> {
    check_probability(config.edge_probability)?;
    let graph_config = if config.directed {
        GraphConfig::default()
    } else {
        GraphConfig::undirected()
    };

    let mut rng = XorShiftRng::seed_from_u64(config.seed);
    let mut g = EvolvingGraph::with_config(graph_config)?;
    for key in 0..config.num_nodes {
        g.add_node(key);
    }
    for t in 1..=config.num_timestamps {
        for (s, d) in candidate_pairs(config.num_nodes, config.directed) {
            if rng.gen_bool(config.edge_probability) {
                g.add_edge(s, d, t);
            }
        }
    }

    debug!(
        nodes = g.num_nodes(),
        edges = g.num_edges(),
        timestamps = config.num_timestamps,
        seed = config.seed,
        "generated random evolving graph"
    );
    Ok(g)
}

/// Random static graph over keys `0..n` with unit weights.
pub fn random_graph(n: usize, p: f64, directed: bool, seed: u64) -> Result<StaticGraph<usize>> {
    check_probability(p)?;
    let mut rng = XorShiftRng::seed_from_u64(seed);
    let mut g = StaticGraph::with_direction(directed);
    for key in 0..n {
        g.add_node(key);
    }
    for (s, d) in candidate_pairs(n, directed) {
        if rng.gen_bool(p) {
            g.add_edge(s, d, 1.0);
        }
    }
    debug!(nodes = n, edges = g.num_edges(), seed, "generated random graph");
    Ok(g)
}

fn candidate_pairs(n: usize, directed: bool) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |s| {
        let lo = if directed { 0 } else { s + 1 };
        (lo..n).filter(move |&d| d != s).map(move |d| (s, d))
    })
}

fn check_probability(p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(Error::MalformedInput(format!(
            "edge probability must be in [0, 1], got {p}"
        )))
    }
}
