//! Static graphs: a single edge set with no timestamp dimension.
//!
//! The codomain of aggregation. Uses petgraph's directed graph internally;
//! undirected graphs store each pair once and traverse it both ways.

use crate::graph::EvolvingGraph;
use crate::node::{Node, NodeKey, Timestamp};
use crate::{Error, Result};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// A weighted graph without timestamps.
///
/// Repeated edges between the same pair merge into one edge whose weight
/// is the sum of the inputs.
///
/// # Example
///
/// ```rust
/// use lattix_evolving::StaticGraph;
///
/// let mut g = StaticGraph::new();
/// g.add_edge("a", "b", 1.0);
/// g.add_edge("a", "b", 2.0);
///
/// assert_eq!(g.num_edges(), 1);
/// assert_eq!(g.edge_weight(&"a", &"b"), Some(3.0));
/// ```
#[derive(Debug, Clone)]
pub struct StaticGraph<K> {
    graph: DiGraph<Node<K>, f64>,
    node_index: HashMap<K, NodeIndex>,
    directed: bool,
}

impl<K: NodeKey> Default for StaticGraph<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey> StaticGraph<K> {
    /// Create an empty directed graph.
    pub fn new() -> Self {
        Self::with_direction(true)
    }

    /// Create an empty undirected graph.
    pub fn undirected() -> Self {
        Self::with_direction(false)
    }

    pub fn with_direction(directed: bool) -> Self {
        Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
            directed,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Register a node. Re-adding a known key returns the existing node.
    pub fn add_node(&mut self, key: K) -> &Node<K> {
        let idx = self.intern(key);
        &self.graph[idx]
    }

    /// Add `weight` to the edge `source -> target`, creating it (and any
    /// unknown node) if needed. Returns the edge's accumulated weight.
    pub fn add_edge(&mut self, source: K, target: K, weight: f64) -> f64 {
        let src = self.intern(source);
        let dst = self.intern(target);
        match self.find_edge(src, dst) {
            Some(e) => {
                self.graph[e] += weight;
                self.graph[e]
            }
            None => {
                self.graph.add_edge(src, dst, weight);
                weight
            }
        }
    }

    pub fn find_node(&self, key: &K) -> Option<&Node<K>> {
        self.node_index.get(key).map(|&idx| &self.graph[idx])
    }

    pub fn contains_node(&self, key: &K) -> bool {
        self.node_index.contains_key(key)
    }

    /// Dense index of a key.
    pub fn node_index(&self, key: &K) -> Result<usize> {
        self.node_index
            .get(key)
            .map(|idx| idx.index())
            .ok_or_else(|| Error::UnknownNode(format!("{key:?}")))
    }

    /// All nodes in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<K>> {
        self.graph.node_weights()
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Weight of the edge between two keys, if any.
    pub fn edge_weight(&self, source: &K, target: &K) -> Option<f64> {
        let src = *self.node_index.get(source)?;
        let dst = *self.node_index.get(target)?;
        self.find_edge(src, dst).map(|e| self.graph[e])
    }

    /// All edges as `(source, target, weight)`, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&K, &K, f64)> {
        self.graph.edge_references().map(|e| {
            (
                &self.graph[e.source()].key,
                &self.graph[e.target()].key,
                *e.weight(),
            )
        })
    }

    /// The underlying petgraph graph, for algorithms not provided here.
    pub fn as_petgraph(&self) -> &DiGraph<Node<K>, f64> {
        &self.graph
    }

    pub(crate) fn neighbor_keys(&self, key: &K, dir: Direction) -> Result<Vec<K>> {
        let idx = *self
            .node_index
            .get(key)
            .ok_or_else(|| Error::UnknownNode(format!("{key:?}")))?;
        // petgraph yields most recent edges first
        let mut out: Vec<NodeIndex> = self.graph.neighbors_directed(idx, dir).collect();
        out.reverse();
        if !self.directed {
            let mut back: Vec<NodeIndex> = self.graph.neighbors_directed(idx, dir.opposite()).collect();
            back.reverse();
            out.extend(back);
        }
        let mut seen = std::collections::HashSet::new();
        out.retain(|n| seen.insert(*n));
        Ok(out.into_iter().map(|n| self.graph[n].key.clone()).collect())
    }

    fn intern(&mut self, key: K) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&key) {
            return idx;
        }
        let position = self.graph.node_count();
        let idx = self.graph.add_node(Node::attached(position, key.clone()));
        self.node_index.insert(key, idx);
        idx
    }

    fn find_edge(&self, src: NodeIndex, dst: NodeIndex) -> Option<EdgeIndex> {
        if self.directed {
            self.graph.find_edge(src, dst)
        } else {
            self.graph.find_edge_undirected(src, dst).map(|(e, _)| e)
        }
    }
}

/// Collapse an evolving graph into a static graph.
///
/// Every node is carried over in index order. Edges `(u, v, *)` across all
/// timestamps merge into one static edge whose weight is their summed
/// weight (the occurrence count for unweighted graphs).
pub fn aggregate_graph<K: NodeKey, T: Timestamp>(g: &EvolvingGraph<K, T>) -> StaticGraph<K> {
    let mut s = StaticGraph::with_direction(g.is_directed());
    for node in g.nodes() {
        let idx = s.intern(node.key.clone());
        s.graph[idx].attributes = node.attributes.clone();
    }
    for e in g.records() {
        let src = g.nodes()[e.src].key.clone();
        let dst = g.nodes()[e.dst].key.clone();
        s.add_edge(src, dst, e.weight);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_repeated_edges() {
        let mut g = StaticGraph::new();
        assert_eq!(g.add_edge(1, 2, 1.0), 1.0);
        assert_eq!(g.add_edge(1, 2, 1.5), 2.5);
        g.add_edge(2, 1, 1.0);
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.edge_weight(&1, &2), Some(2.5));
        assert_eq!(g.edge_weight(&2, &1), Some(1.0));
    }

    #[test]
    fn test_undirected_merges_both_orientations() {
        let mut g = StaticGraph::undirected();
        g.add_edge("a", "b", 1.0);
        g.add_edge("b", "a", 1.0);
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.edge_weight(&"b", &"a"), Some(2.0));
    }

    #[test]
    fn test_aggregate_collapses_timestamps() {
        let mut eg = EvolvingGraph::new();
        eg.add_bunch_of_edges([(1, 2, 3u32), (2, 3, 4), (1, 2, 1)]);
        let s = aggregate_graph(&eg);
        assert_eq!(s.num_nodes(), 3);
        assert_eq!(s.num_edges(), 2);
        assert_eq!(s.edge_weight(&1, &2), Some(2.0));
        assert_eq!(s.node_index(&3).unwrap(), eg.node_index(&3).unwrap());
    }

    #[test]
    fn test_neighbor_keys() {
        let mut g = StaticGraph::new();
        g.add_edge("a", "b", 1.0);
        g.add_edge("a", "c", 1.0);
        g.add_edge("c", "a", 1.0);
        assert_eq!(g.neighbor_keys(&"a", Direction::Outgoing).unwrap(), vec!["b", "c"]);
        assert_eq!(g.neighbor_keys(&"a", Direction::Incoming).unwrap(), vec!["c"]);
        assert!(g.neighbor_keys(&"zz", Direction::Outgoing).is_err());
    }
}
