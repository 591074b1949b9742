// Allow minor clippy style warnings at crate level
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

//! Evolving graphs: graphs whose edges exist only at given timestamps.
//!
//! - [`EvolvingGraph`] - timestamped edge store with per-timestamp indices
//! - [`TemporalNeighbors`] - the time-respecting successor relation
//! - [`algo::traversal`] - BFS and path search that never go back in time
//! - [`adjacency_matrix`] / [`adjacency_matrix_list`] - per-timestamp projections
//! - [`algo::centrality`] - static and temporal Katz centrality
//!
//! # Why Time Matters
//!
//! Collapsing an evolving graph into one static graph loses causality:
//!
//! ```text
//! t=1: B -> C        Static view:   A -> B -> C   (A reaches C)
//! t=2: A -> B        Temporal view: A reaches B only; B's message to C
//!                                   left before A's arrived
//! ```
//!
//! Reachability, shortest paths and centrality all change once walks have
//! to respect edge order.
//!
//! # The Time-Expanded View
//!
//! Traversal runs over [`TimeNode`]s, pairs `(key, timestamp)` that exist
//! where the key has an edge at that timestamp. From `(v, t)` a walk may:
//!
//! | Step | Target | Condition |
//! |------|--------|-----------|
//! | move | `(w, t)` | edge `v -> w` at `t` |
//! | wait | `(v, t')` | `t'` is `v`'s next active timestamp |
//!
//! # Temporal Katz
//!
//! Multiplying resolvents `(I - αA_t)^-1` in time order counts exactly the
//! walks that respect time (Grindrod et al., 2011). See
//! [`algo::centrality::katz_temporal`].
//!
//! # Example
//!
//! ```rust
//! use lattix_evolving::prelude::*;
//!
//! let mut g = EvolvingGraph::new();
//! g.add_edge("A", "B", 1);
//! g.add_edge("A", "C", 2);
//! g.add_edge("B", "C", 3);
//!
//! let path = dfs_path(&g, &TimeNode::new("A", 1), &TimeNode::new("C", 3))?;
//! assert!(path.is_some());
//!
//! let scores = katz_temporal(&g, &TemporalKatzConfig::default())?;
//! assert_eq!(scores.scores().unwrap().ranked()[0].0, &"A");
//! # Ok::<(), lattix_evolving::Error>(())
//! ```

pub mod algo;
pub mod edge;
pub mod error;
pub mod formats;
pub mod generators;
pub mod graph;
mod linalg;
pub mod matrix;
pub mod neighbors;
pub mod node;
pub mod static_graph;

pub use algo::centrality::{
    katz_evolving, katz_static, katz_temporal, CommunicabilityMatrix, KatzConfig, KatzMode,
    KatzScores, TemporalKatz, TemporalKatzConfig,
};
pub use algo::traversal::{bfs, dfs_path, shortest_path, Path, TemporalPath};
pub use edge::{Edge, DEFAULT_WEIGHT};
pub use error::{Error, Result};
pub use generators::{random_evolving_graph, random_graph, RandomGraphConfig};
pub use graph::{EvolvingGraph, GraphConfig};
pub use matrix::{
    adjacency_matrix, adjacency_matrix_list, sparse_adjacency_matrix,
    sparse_adjacency_matrix_list, MatrixList, SparseMatrix, SparseMatrixList,
};
pub use neighbors::TemporalNeighbors;
pub use node::{Attributes, Node, NodeKey, TimeNode, Timestamp};
pub use static_graph::{aggregate_graph, StaticGraph};

pub use ndarray;
pub use petgraph;

/// Commonly used items.
pub mod prelude {
    pub use crate::algo::centrality::{
        katz_evolving, katz_static, katz_temporal, KatzConfig, KatzMode, TemporalKatz,
        TemporalKatzConfig,
    };
    pub use crate::algo::traversal::{bfs, dfs_path, shortest_path};
    pub use crate::{
        adjacency_matrix, adjacency_matrix_list, aggregate_graph, Edge, Error, EvolvingGraph,
        GraphConfig, Result, StaticGraph, TemporalNeighbors, TimeNode,
    };
}
