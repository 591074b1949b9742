//! The time-respecting neighbor relation.
//!
//! For a `TimeNode` `(key, t)` in an evolving graph the forward neighbors
//! are:
//!
//! - **move**: `(other, t)` for every edge `key -> other` at `t`
//! - **wait**: `(key, t')` where `t'` is the next timestamp after `t` at
//!   which `key` is active
//!
//! Backward neighbors mirror this: incoming edges at `t`, plus the same key
//! at its previous active timestamp. A node may carry information into the
//! future but never into the past, so every forward step holds or advances
//! the timestamp.
//!
//! ```text
//! edges:  A -> B @1    A -> C @2    B -> C @3
//!
//! forward(A@1) = { B@1 (move), A@2 (wait) }
//! forward(B@1) = { B@3 (wait) }
//! forward(C@3) = { }
//! ```
//!
//! Static graphs implement the same trait with plain out/in neighbors and
//! no waiting component, so the traversal engine runs on both.

use crate::graph::EvolvingGraph;
use crate::node::{NodeKey, TimeNode, Timestamp};
use crate::static_graph::StaticGraph;
use crate::Result;
use petgraph::Direction;
use std::hash::Hash;

/// A graph exposing a successor/predecessor relation over its vertices.
pub trait TemporalNeighbors {
    /// Vertex type traversal ranges over.
    type Vertex: Clone + Eq + Hash;

    /// Whether `v` is a vertex of the (time-expanded) graph.
    fn contains_vertex(&self, v: &Self::Vertex) -> bool;

    /// Successors of `v`. `UnknownNode` if the key was never registered.
    fn forward_neighbors(&self, v: &Self::Vertex) -> Result<Vec<Self::Vertex>>;

    /// Predecessors of `v`. `UnknownNode` if the key was never registered.
    fn backward_neighbors(&self, v: &Self::Vertex) -> Result<Vec<Self::Vertex>>;
}

impl<K: NodeKey, T: Timestamp> TemporalNeighbors for EvolvingGraph<K, T> {
    type Vertex = TimeNode<K, T>;

    /// A `TimeNode` exists only where its key is active.
    fn contains_vertex(&self, v: &Self::Vertex) -> bool {
        self.is_active(&v.key, &v.timestamp)
    }

    fn forward_neighbors(&self, v: &Self::Vertex) -> Result<Vec<Self::Vertex>> {
        let idx = self.node_index(&v.key)?;
        let Some(inc) = self.incidence_at(idx, &v.timestamp) else {
            return Ok(Vec::new());
        };

        let records = self.records();
        let mut hops: Vec<usize> = inc.outgoing.iter().map(|&e| records[e].dst).collect();
        if !self.is_directed() {
            hops.extend(inc.incoming.iter().map(|&e| records[e].src));
        }

        let mut out = self.edge_hops(idx, hops, &v.timestamp);
        if let Some(next) = self.next_active(idx, &v.timestamp) {
            out.push(TimeNode::new(v.key.clone(), next.clone()));
        }
        Ok(out)
    }

    fn backward_neighbors(&self, v: &Self::Vertex) -> Result<Vec<Self::Vertex>> {
        let idx = self.node_index(&v.key)?;
        let Some(inc) = self.incidence_at(idx, &v.timestamp) else {
            return Ok(Vec::new());
        };

        let records = self.records();
        let mut hops: Vec<usize> = inc.incoming.iter().map(|&e| records[e].src).collect();
        if !self.is_directed() {
            hops.extend(inc.outgoing.iter().map(|&e| records[e].dst));
        }

        let mut out = self.edge_hops(idx, hops, &v.timestamp);
        if let Some(prev) = self.prev_active(idx, &v.timestamp) {
            out.push(TimeNode::new(v.key.clone(), prev.clone()));
        }
        Ok(out)
    }
}

impl<K: NodeKey, T: Timestamp> EvolvingGraph<K, T> {
    /// Dedupe edge hops (first occurrence wins) and drop self-loops.
    fn edge_hops(&self, from: usize, mut hops: Vec<usize>, t: &T) -> Vec<TimeNode<K, T>> {
        let mut seen = std::collections::HashSet::with_capacity(hops.len());
        hops.retain(|&n| n != from && seen.insert(n));
        hops.into_iter()
            .map(|n| TimeNode::new(self.nodes()[n].key.clone(), t.clone()))
            .collect()
    }
}

impl<K: NodeKey> TemporalNeighbors for StaticGraph<K> {
    type Vertex = K;

    fn contains_vertex(&self, v: &K) -> bool {
        self.contains_node(v)
    }

    fn forward_neighbors(&self, v: &K) -> Result<Vec<K>> {
        self.neighbor_keys(v, Direction::Outgoing)
    }

    fn backward_neighbors(&self, v: &K) -> Result<Vec<K>> {
        self.neighbor_keys(v, Direction::Incoming)
    }
}
