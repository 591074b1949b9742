//! Evolving graph storage.

use crate::edge::{Edge, DEFAULT_WEIGHT};
use crate::node::{Attributes, Node, NodeKey, Timestamp};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use tracing::debug;

/// Graph-level flags, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Edges only traverse source -> target. Undirected graphs project
    /// symmetric matrices and traverse both ways.
    pub directed: bool,
    /// Report every edge as `Edge::WeightedTimed`. Edges whose stored
    /// weight differs from `DEFAULT_WEIGHT` are reported weighted either way.
    pub weighted: bool,
    /// Weight for edges added without one. Must be finite.
    pub default_weight: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: true,
            weighted: false,
            default_weight: DEFAULT_WEIGHT,
        }
    }
}

impl GraphConfig {
    pub fn undirected() -> Self {
        Self {
            directed: false,
            ..Self::default()
        }
    }

    pub fn weighted() -> Self {
        Self {
            weighted: true,
            ..Self::default()
        }
    }

    /// Reject a non-finite `default_weight`.
    pub fn validate(&self) -> Result<()> {
        if self.default_weight.is_finite() {
            Ok(())
        } else {
            Err(Error::MalformedInput(format!(
                "default_weight must be finite, got {}",
                self.default_weight
            )))
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeRecord<T> {
    pub(crate) src: usize,
    pub(crate) dst: usize,
    pub(crate) weight: f64,
    pub(crate) timestamp: T,
    attributes: Option<Attributes>,
}

/// Edge indices touching one node at one timestamp.
#[derive(Debug, Clone, Default)]
pub(crate) struct Incidence {
    pub(crate) outgoing: SmallVec<[usize; 4]>,
    pub(crate) incoming: SmallVec<[usize; 4]>,
}

/// A graph whose edges are tagged with timestamps.
///
/// Nodes live in an arena with dense indices assigned at insertion; a
/// key -> index map backs lookups. Edges keep insertion order. Two
/// derived indices are maintained on every insert:
///
/// - timestamp -> edge indices (the per-timestamp partition)
/// - node -> ordered map of the timestamps it is active at, with the
///   edges touching it there (drives the neighbor relation)
///
/// # Example
///
/// ```rust
/// use lattix_evolving::EvolvingGraph;
///
/// let mut g = EvolvingGraph::new();
/// g.add_edge("A", "B", 1);
/// g.add_edge("A", "C", 2);
/// g.add_edge("B", "C", 3);
///
/// assert_eq!(g.num_nodes(), 3);
/// assert_eq!(g.num_edges(), 3);
/// assert_eq!(g.unique_timestamps(), &[1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct EvolvingGraph<K, T> {
    config: GraphConfig,
    nodes: Vec<Node<K>>,
    node_index: HashMap<K, usize>,
    edges: Vec<EdgeRecord<T>>,
    /// Unique timestamps in first-seen order.
    unique: Vec<T>,
    by_time: HashMap<T, SmallVec<[usize; 8]>>,
    incidence: Vec<BTreeMap<T, Incidence>>,
}

impl<K: NodeKey, T: Timestamp> Default for EvolvingGraph<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey, T: Timestamp> EvolvingGraph<K, T> {
    /// Create an empty directed, unweighted evolving graph.
    pub fn new() -> Self {
        Self::empty(GraphConfig::default())
    }

    /// Create an empty evolving graph with explicit flags.
    ///
    /// Fails with `MalformedInput` if the config's `default_weight` is not
    /// finite.
    pub fn with_config(config: GraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    fn empty(config: GraphConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            node_index: HashMap::new(),
            edges: Vec::new(),
            unique: Vec::new(),
            by_time: HashMap::new(),
            incidence: Vec::new(),
        }
    }

    /// Build a graph from parallel arrays.
    ///
    /// All source keys are registered first (in order), then all target
    /// keys, then the edges are added. Fails with `MalformedInput` on
    /// mismatched lengths or non-finite weights, before building anything.
    ///
    /// ```rust
    /// use lattix_evolving::{EvolvingGraph, GraphConfig};
    ///
    /// let g = EvolvingGraph::from_arrays(&[1, 2, 3], &[4, 5, 2], &[1, 1, 2], None, GraphConfig::default())?;
    /// assert_eq!(g.num_nodes(), 5);
    /// assert_eq!(g.num_edges(), 3);
    /// assert_eq!(g.num_timestamps(), 2);
    /// # Ok::<(), lattix_evolving::Error>(())
    /// ```
    pub fn from_arrays(
        sources: &[K],
        targets: &[K],
        timestamps: &[T],
        weights: Option<&[f64]>,
        config: GraphConfig,
    ) -> Result<Self> {
        config.validate()?;
        if sources.len() != targets.len() || sources.len() != timestamps.len() {
            return Err(Error::MalformedInput(format!(
                "array lengths differ: {} sources, {} targets, {} timestamps",
                sources.len(),
                targets.len(),
                timestamps.len()
            )));
        }
        if let Some(w) = weights {
            if w.len() != sources.len() {
                return Err(Error::MalformedInput(format!(
                    "{} weights for {} edges",
                    w.len(),
                    sources.len()
                )));
            }
            check_weights(w.iter().copied())?;
        }

        let mut g = Self::empty(config);
        for key in sources.iter().chain(targets) {
            g.add_node(key.clone());
        }
        for (i, ((s, d), t)) in sources.iter().zip(targets).zip(timestamps).enumerate() {
            let weight = weights.map_or(config.default_weight, |w| w[i]);
            let (src, dst) = (g.intern(s.clone()), g.intern(d.clone()));
            g.push_edge(src, dst, t.clone(), weight, None);
        }
        Ok(g)
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn is_directed(&self) -> bool {
        self.config.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.config.weighted
    }

    /// Register a node. Re-adding a known key returns the existing node.
    pub fn add_node(&mut self, key: K) -> &Node<K> {
        let idx = self.intern(key);
        &self.nodes[idx]
    }

    /// Add an edge with the default weight, registering unknown keys.
    pub fn add_edge(&mut self, source: K, target: K, timestamp: T) -> Edge<K, T> {
        let weight = self.config.default_weight;
        let (src, dst) = (self.intern(source), self.intern(target));
        let idx = self.push_edge(src, dst, timestamp, weight, None);
        self.edge_at(idx)
    }

    /// Add a weighted edge, registering unknown keys.
    pub fn add_weighted_edge(
        &mut self,
        source: K,
        target: K,
        timestamp: T,
        weight: f64,
    ) -> Result<Edge<K, T>> {
        check_weights(std::iter::once(weight))?;
        let (src, dst) = (self.intern(source), self.intern(target));
        let idx = self.push_edge(src, dst, timestamp, weight, None);
        Ok(self.edge_at(idx))
    }

    /// Add an edge between two already-registered keys.
    ///
    /// Fails with `UnknownNode` (graph untouched) if either key is missing.
    pub fn add_edge_strict(&mut self, source: &K, target: &K, timestamp: T) -> Result<Edge<K, T>> {
        let src = self.node_index(source)?;
        let dst = self.node_index(target)?;
        let weight = self.config.default_weight;
        let idx = self.push_edge(src, dst, timestamp, weight, None);
        Ok(self.edge_at(idx))
    }

    /// Add a timestamped edge carrying attributes.
    pub fn add_attributed_edge(
        &mut self,
        source: K,
        target: K,
        timestamp: T,
        attributes: Attributes,
    ) -> Edge<K, T> {
        let weight = self.config.default_weight;
        let (src, dst) = (self.intern(source), self.intern(target));
        let idx = self.push_edge(src, dst, timestamp, weight, Some(attributes));
        self.edge_at(idx)
    }

    /// Add edges in input order. Timestamps keep insertion order; nothing
    /// is sorted. Returns the number of edges added.
    pub fn add_bunch_of_edges<I>(&mut self, edges: I) -> usize
    where
        I: IntoIterator<Item = (K, K, T)>,
    {
        let before = self.edges.len();
        for (s, d, t) in edges {
            self.add_edge(s, d, t);
        }
        self.edges.len() - before
    }

    /// Weighted variant of [`add_bunch_of_edges`](Self::add_bunch_of_edges).
    ///
    /// Every weight is validated before the first edge is inserted.
    pub fn add_bunch_of_weighted_edges<I>(&mut self, edges: I) -> Result<usize>
    where
        I: IntoIterator<Item = (K, K, T, f64)>,
    {
        let edges: Vec<_> = edges.into_iter().collect();
        check_weights(edges.iter().map(|e| e.3))?;
        let count = edges.len();
        for (s, d, t, w) in edges {
            let (src, dst) = (self.intern(s), self.intern(d));
            self.push_edge(src, dst, t, w, None);
        }
        Ok(count)
    }

    /// Look up a node by key.
    pub fn find_node(&self, key: &K) -> Option<&Node<K>> {
        self.node_index.get(key).map(|&i| &self.nodes[i])
    }

    pub fn contains_node(&self, key: &K) -> bool {
        self.node_index.contains_key(key)
    }

    /// Dense index of a key.
    pub fn node_index(&self, key: &K) -> Result<usize> {
        self.node_index
            .get(key)
            .copied()
            .ok_or_else(|| Error::UnknownNode(format!("{key:?}")))
    }

    pub fn node_by_index(&self, index: usize) -> Option<&Node<K>> {
        self.nodes.get(index)
    }

    /// All nodes in index order.
    pub fn nodes(&self) -> &[Node<K>] {
        &self.nodes
    }

    /// Set a property on a registered node.
    pub fn set_node_attribute(
        &mut self,
        key: &K,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Result<()> {
        let idx = self.node_index(key)?;
        self.nodes[idx].attributes.insert(name.into(), value.into());
        Ok(())
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// One timestamp per edge, in insertion order (duplicates kept).
    pub fn timestamps(&self) -> Vec<&T> {
        self.edges.iter().map(|e| &e.timestamp).collect()
    }

    /// Distinct timestamps in first-seen order.
    pub fn unique_timestamps(&self) -> &[T] {
        &self.unique
    }

    pub fn num_timestamps(&self) -> usize {
        self.unique.len()
    }

    pub fn contains_timestamp(&self, timestamp: &T) -> bool {
        self.by_time.contains_key(timestamp)
    }

    /// Smallest and largest timestamp.
    pub fn time_range(&self) -> Option<(&T, &T)> {
        let min = self.unique.iter().min()?;
        let max = self.unique.iter().max()?;
        Some((min, max))
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<K, T>> + '_ {
        (0..self.edges.len()).map(|i| self.edge_at(i))
    }

    /// Edges active at `timestamp`, in insertion order.
    pub fn edges_at(&self, timestamp: &T) -> Vec<Edge<K, T>> {
        self.by_time
            .get(timestamp)
            .map(|ids| ids.iter().map(|&i| self.edge_at(i)).collect())
            .unwrap_or_default()
    }

    /// Nodes with at least one edge at `timestamp`, in index order.
    pub fn active_nodes(&self, timestamp: &T) -> Vec<&Node<K>> {
        self.incidence
            .iter()
            .enumerate()
            .filter(|(_, times)| times.contains_key(timestamp))
            .map(|(i, _)| &self.nodes[i])
            .collect()
    }

    /// Timestamps at which `key` is active, ascending.
    pub fn active_timestamps(&self, key: &K) -> Result<Vec<&T>> {
        let idx = self.node_index(key)?;
        Ok(self.incidence[idx].keys().collect())
    }

    pub fn is_active(&self, key: &K, timestamp: &T) -> bool {
        self.node_index
            .get(key)
            .is_some_and(|&i| self.incidence[i].contains_key(timestamp))
    }

    /// Whether edge timestamps are non-decreasing in insertion order.
    pub fn is_sorted(&self) -> bool {
        self.edges
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp)
    }

    /// Sort edges by timestamp in place (stable, idempotent).
    pub fn sort_timestamps(&mut self) {
        if self.is_sorted() {
            return;
        }
        self.edges.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        self.rebuild_indices();
        debug!(edges = self.edges.len(), "sorted evolving graph by timestamp");
    }

    /// Sorted copy; `self` is left as is.
    pub fn to_sorted(&self) -> Self {
        let mut g = self.clone();
        g.sort_timestamps();
        g
    }

    /// Copy of the window `start <= t <= end`.
    ///
    /// Requires a sorted graph. The copy keeps only nodes active in the
    /// window; their relative index order is preserved.
    pub fn slice_timestamps(&self, start: &T, end: &T) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidTimeRange {
                start: format!("{start:?}"),
                end: format!("{end:?}"),
            });
        }
        if !self.is_sorted() {
            return Err(Error::Unsorted);
        }

        let lo = self.edges.partition_point(|e| e.timestamp < *start);
        let hi = self.edges.partition_point(|e| e.timestamp <= *end);
        let window = &self.edges[lo..hi];

        let mut keep: Vec<usize> = window.iter().flat_map(|e| [e.src, e.dst]).collect();
        keep.sort_unstable();
        keep.dedup();

        let mut g = Self::empty(self.config);
        for &i in &keep {
            let new = g.intern(self.nodes[i].key.clone());
            g.nodes[new].attributes = self.nodes[i].attributes.clone();
        }
        for e in window {
            let src = g.node_index[&self.nodes[e.src].key];
            let dst = g.node_index[&self.nodes[e.dst].key];
            g.push_edge(src, dst, e.timestamp.clone(), e.weight, e.attributes.clone());
        }
        debug!(
            kept_edges = g.num_edges(),
            kept_nodes = g.num_nodes(),
            "sliced evolving graph"
        );
        Ok(g)
    }

    /// In-place variant of [`slice_timestamps`](Self::slice_timestamps).
    pub fn retain_window(&mut self, start: &T, end: &T) -> Result<()> {
        *self = self.slice_timestamps(start, end)?;
        Ok(())
    }

    // -- crate-internal accessors used by the neighbor resolver and projections --

    pub(crate) fn records(&self) -> &[EdgeRecord<T>] {
        &self.edges
    }

    pub(crate) fn edge_ids_at(&self, timestamp: &T) -> Option<&[usize]> {
        self.by_time.get(timestamp).map(|ids| ids.as_slice())
    }

    pub(crate) fn incidence_at(&self, node: usize, timestamp: &T) -> Option<&Incidence> {
        self.incidence.get(node)?.get(timestamp)
    }

    /// First timestamp after `timestamp` at which `node` is active.
    pub(crate) fn next_active(&self, node: usize, timestamp: &T) -> Option<&T> {
        self.incidence
            .get(node)?
            .range((Bound::Excluded(timestamp), Bound::Unbounded))
            .next()
            .map(|(t, _)| t)
    }

    /// Last timestamp before `timestamp` at which `node` is active.
    pub(crate) fn prev_active(&self, node: usize, timestamp: &T) -> Option<&T> {
        self.incidence
            .get(node)?
            .range((Bound::Unbounded, Bound::Excluded(timestamp)))
            .next_back()
            .map(|(t, _)| t)
    }

    fn intern(&mut self, key: K) -> usize {
        if let Some(&idx) = self.node_index.get(&key) {
            return idx;
        }
        let idx = self.nodes.len();
        self.node_index.insert(key.clone(), idx);
        self.nodes.push(Node::attached(idx, key));
        self.incidence.push(BTreeMap::new());
        idx
    }

    fn push_edge(
        &mut self,
        src: usize,
        dst: usize,
        timestamp: T,
        weight: f64,
        attributes: Option<Attributes>,
    ) -> usize {
        let idx = self.edges.len();
        self.index_edge(idx, src, dst, &timestamp);
        self.edges.push(EdgeRecord {
            src,
            dst,
            weight,
            timestamp,
            attributes,
        });
        idx
    }

    fn index_edge(&mut self, idx: usize, src: usize, dst: usize, timestamp: &T) {
        match self.by_time.get_mut(timestamp) {
            Some(ids) => ids.push(idx),
            None => {
                self.unique.push(timestamp.clone());
                self.by_time.insert(timestamp.clone(), SmallVec::from_elem(idx, 1));
            }
        }
        self.incidence[src]
            .entry(timestamp.clone())
            .or_default()
            .outgoing
            .push(idx);
        self.incidence[dst]
            .entry(timestamp.clone())
            .or_default()
            .incoming
            .push(idx);
    }

    fn rebuild_indices(&mut self) {
        self.unique.clear();
        self.by_time.clear();
        for times in &mut self.incidence {
            times.clear();
        }
        for idx in 0..self.edges.len() {
            let (src, dst) = (self.edges[idx].src, self.edges[idx].dst);
            let timestamp = self.edges[idx].timestamp.clone();
            self.index_edge(idx, src, dst, &timestamp);
        }
    }

    fn edge_at(&self, idx: usize) -> Edge<K, T> {
        let e = &self.edges[idx];
        let source = self.nodes[e.src].key.clone();
        let target = self.nodes[e.dst].key.clone();
        let timestamp = e.timestamp.clone();
        match &e.attributes {
            Some(attributes) => Edge::Attributed {
                source,
                target,
                timestamp,
                weight: e.weight,
                attributes: attributes.clone(),
            },
            // a stored weight other than the implicit one is always reported
            None if self.config.weighted || e.weight != DEFAULT_WEIGHT => {
                Edge::weighted(source, target, e.weight, timestamp)
            }
            None => Edge::timed(source, target, timestamp),
        }
    }
}

fn check_weights(weights: impl Iterator<Item = f64>) -> Result<()> {
    for (i, w) in weights.enumerate() {
        if !w.is_finite() {
            return Err(Error::MalformedInput(format!(
                "edge {i} has non-finite weight {w}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> EvolvingGraph<&'static str, u32> {
        let mut g = EvolvingGraph::new();
        g.add_bunch_of_edges([("A", "B", 1), ("A", "C", 2), ("B", "C", 3)]);
        g
    }

    #[test]
    fn test_add_node_idempotent() {
        let mut g: EvolvingGraph<&str, u32> = EvolvingGraph::new();
        assert_eq!(g.add_node("a").index, Some(0));
        assert_eq!(g.add_node("b").index, Some(1));
        assert_eq!(g.add_node("a").index, Some(0));
        assert_eq!(g.num_nodes(), 2);
    }

    #[test]
    fn test_add_edge_registers_keys() {
        let mut g = EvolvingGraph::new();
        let e = g.add_edge("x", "y", 10u32);
        assert_eq!(e, Edge::timed("x", "y", 10));
        assert_eq!(g.num_nodes(), 2);
        assert_eq!(g.find_node(&"y").and_then(|n| n.index), Some(1));
        assert!(g.find_node(&"z").is_none());
    }

    #[test]
    fn test_weighted_graph_reports_weights() {
        let mut g = EvolvingGraph::with_config(GraphConfig::weighted()).unwrap();
        let e = g.add_weighted_edge("a", "b", 1u32, 2.5).unwrap();
        assert_eq!(e.weight(), Some(2.5));
        assert_eq!(g.add_edge("b", "a", 2).weight(), Some(1.0));
        assert!(g.add_weighted_edge("a", "b", 3, f64::NAN).is_err());
        assert_eq!(g.num_edges(), 2);
    }

    #[test]
    fn test_add_edge_strict_leaves_graph_untouched() {
        let mut g = chain();
        let err = g.add_edge_strict(&"A", &"Z", 4).unwrap_err();
        assert!(matches!(err, Error::UnknownNode(_)));
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.num_timestamps(), 3);

        assert!(g.add_edge_strict(&"C", &"A", 4).is_ok());
        assert_eq!(g.num_edges(), 4);
    }

    #[test]
    fn test_bunch_of_weighted_edges_validates_first() {
        let mut g: EvolvingGraph<&str, u32> = EvolvingGraph::new();
        let res = g.add_bunch_of_weighted_edges([("a", "b", 1, 1.0), ("b", "c", 2, f64::INFINITY)]);
        assert!(matches!(res, Err(Error::MalformedInput(_))));
        assert_eq!(g.num_edges(), 0);
        assert_eq!(g.num_nodes(), 0);
    }

    #[test]
    fn test_timestamps_keep_insertion_order() {
        let mut g = EvolvingGraph::new();
        g.add_bunch_of_edges([(1, 2, 3u32), (2, 3, 1), (3, 4, 3), (1, 4, 2)]);
        assert_eq!(g.timestamps(), vec![&3, &1, &3, &2]);
        assert_eq!(g.unique_timestamps(), &[3, 1, 2]);
        assert_eq!(g.num_timestamps(), 3);
        assert!(!g.is_sorted());
    }

    #[test]
    fn test_from_arrays_rejects_mismatch() {
        let res = EvolvingGraph::from_arrays(&[1, 2], &[3], &[1, 1], None, GraphConfig::default());
        assert!(matches!(res, Err(Error::MalformedInput(_))));

        let res = EvolvingGraph::from_arrays(
            &[1, 2],
            &[3, 4],
            &[1, 1],
            Some(&[1.0]),
            GraphConfig::default(),
        );
        assert!(matches!(res, Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_from_arrays_registers_sources_then_targets() {
        let g = EvolvingGraph::from_arrays(&[1, 2, 3], &[4, 5, 2], &[1, 1, 2], None, GraphConfig::default())
            .unwrap();
        let keys: Vec<_> = g.nodes().iter().map(|n| n.key).collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5]);
        assert_eq!(g.unique_timestamps(), &[1, 2]);
    }

    #[test]
    fn test_active_nodes_and_timestamps() {
        let g = chain();
        let active: Vec<_> = g.active_nodes(&2).iter().map(|n| n.key).collect();
        assert_eq!(active, vec!["A", "C"]);
        assert_eq!(g.active_timestamps(&"C").unwrap(), vec![&2, &3]);
        assert!(g.is_active(&"B", &1));
        assert!(!g.is_active(&"B", &2));
        assert!(g.active_timestamps(&"nope").is_err());
    }

    #[test]
    fn test_sort_timestamps() {
        let mut g = EvolvingGraph::new();
        g.add_bunch_of_edges([("a", "b", 3u32), ("b", "c", 1), ("c", "d", 2)]);
        let copy = g.to_sorted();
        assert!(!g.is_sorted());
        assert!(copy.is_sorted());

        g.sort_timestamps();
        assert!(g.is_sorted());
        assert_eq!(g.unique_timestamps(), &[1, 2, 3]);
        assert_eq!(g.edges_at(&1), vec![Edge::timed("b", "c", 1)]);
        // node indices survive sorting
        assert_eq!(g.node_index(&"a").unwrap(), 0);
    }

    #[test]
    fn test_slice_requires_sorted() {
        let mut g = EvolvingGraph::new();
        g.add_bunch_of_edges([("a", "b", 3u32), ("b", "c", 1)]);
        assert!(matches!(g.slice_timestamps(&1, &3), Err(Error::Unsorted)));
        assert!(matches!(
            g.to_sorted().slice_timestamps(&3, &1),
            Err(Error::InvalidTimeRange { .. })
        ));
    }

    #[test]
    fn test_slice_window() {
        let g = chain();
        let s = g.slice_timestamps(&2, &3).unwrap();
        assert_eq!(s.num_edges(), 2);
        assert_eq!(s.unique_timestamps(), &[2, 3]);
        let keys: Vec<_> = s.nodes().iter().map(|n| n.key).collect();
        assert_eq!(keys, vec!["A", "B", "C"]);

        let s = g.slice_timestamps(&3, &3).unwrap();
        let keys: Vec<_> = s.nodes().iter().map(|n| n.key).collect();
        assert_eq!(keys, vec!["B", "C"]);

        let mut g2 = g.clone();
        g2.retain_window(&0, &1).unwrap();
        assert_eq!(g2.num_edges(), 1);
    }

    #[test]
    fn test_attributed_edges() {
        let mut g: EvolvingGraph<&str, u32> = EvolvingGraph::new();
        let mut attrs = Attributes::new();
        attrs.insert("channel".into(), "email".into());
        let e = g.add_attributed_edge("a", "b", 1, attrs);
        assert_eq!(
            e.attributes().and_then(|a| a.get("channel")),
            Some(&serde_json::Value::from("email"))
        );
        g.set_node_attribute(&"a", "role", "sender").unwrap();
        assert!(g.set_node_attribute(&"z", "role", "x").is_err());
    }

    #[test]
    fn test_time_range() {
        let mut g = EvolvingGraph::new();
        assert!(g.time_range().is_none());
        g.add_bunch_of_edges([(0, 1, 300u64), (1, 2, 100)]);
        assert_eq!(g.time_range(), Some((&100, &300)));
    }

    #[test]
    fn test_unweighted_graph_reports_stored_weights() {
        let mut g: EvolvingGraph<&str, u32> = EvolvingGraph::new();
        assert!(matches!(g.add_edge("a", "b", 1), Edge::Timed { .. }));
        let e = g.add_weighted_edge("b", "c", 1, 2.5).unwrap();
        assert_eq!(e.weight(), Some(2.5));

        let mut attrs = Attributes::new();
        attrs.insert("channel".into(), "sms".into());
        let e = g.add_attributed_edge("c", "a", 2, attrs);
        assert_eq!(e.effective_weight(), 1.0);

        let from_arrays = EvolvingGraph::from_arrays(
            &["x"],
            &["y"],
            &[1u32],
            Some(&[0.5]),
            GraphConfig::default(),
        )
        .unwrap();
        let edges: Vec<_> = from_arrays.edges().collect();
        assert_eq!(edges[0].effective_weight(), 0.5);
    }

    #[test]
    fn test_default_weight_flows_into_edges() {
        let config = GraphConfig {
            default_weight: 3.0,
            ..GraphConfig::default()
        };
        let mut g: EvolvingGraph<&str, u32> = EvolvingGraph::with_config(config).unwrap();
        assert_eq!(g.add_edge("a", "b", 1).weight(), Some(3.0));

        let mut attrs = Attributes::new();
        attrs.insert("k".into(), 1.into());
        assert_eq!(g.add_attributed_edge("b", "a", 1, attrs).weight(), Some(3.0));
    }

    #[test]
    fn test_non_finite_default_weight_rejected() {
        for bad in [f64::NAN, f64::INFINITY] {
            let config = GraphConfig {
                default_weight: bad,
                ..GraphConfig::default()
            };
            assert!(matches!(
                EvolvingGraph::<&str, u32>::with_config(config),
                Err(Error::MalformedInput(_))
            ));
            assert!(matches!(
                EvolvingGraph::from_arrays(&["a"], &["b"], &[1u32], None, config),
                Err(Error::MalformedInput(_))
            ));
        }
        assert!(GraphConfig::weighted().validate().is_ok());
    }
}
