//! Adjacency matrix projections.
//!
//! A projection turns one timestamp's edge partition into an `n x n`
//! matrix over the full node registry: rows are sources, columns are
//! targets, entries are weights, and 0 means no edge. Repeated edges at
//! the same timestamp sum their weights; undirected graphs mirror every
//! entry.
//!
//! Matrix lists order their projections by ascending timestamp, whatever
//! order the timestamps were inserted in. Each list carries its own
//! timestamps so indices stay aligned.

use crate::graph::EvolvingGraph;
use crate::node::{NodeKey, Timestamp};
use crate::static_graph::StaticGraph;
use crate::{Error, Result};
use ndarray::{Array1, Array2};
use petgraph::visit::EdgeRef;

/// Square matrix in compressed sparse row form.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    n: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// Build from `(row, col, value)` triplets; duplicates are summed and
    /// explicit zeros dropped.
    ///
    /// Fails with `MalformedInput` if any row or column is `>= n`.
    pub fn from_triplets(
        n: usize,
        triplets: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self> {
        let entries: Vec<(usize, usize, f64)> = triplets.into_iter().collect();
        if let Some(&(r, c, _)) = entries.iter().find(|&&(r, c, _)| r >= n || c >= n) {
            return Err(Error::MalformedInput(format!(
                "triplet ({r}, {c}) out of bounds for a {n}x{n} matrix"
            )));
        }
        Ok(Self::from_valid_triplets(n, entries))
    }

    /// Indices already known to be `< n`.
    fn from_valid_triplets(n: usize, mut entries: Vec<(usize, usize, f64)>) -> Self {
        entries.sort_by_key(|&(r, c, _)| (r, c));

        let mut merged: Vec<(usize, usize, f64)> = Vec::with_capacity(entries.len());
        for (r, c, v) in entries {
            match merged.last_mut() {
                Some(last) if last.0 == r && last.1 == c => last.2 += v,
                _ => merged.push((r, c, v)),
            }
        }
        merged.retain(|e| e.2 != 0.0);

        let mut row_ptr = vec![0; n + 1];
        let mut col_idx = Vec::with_capacity(merged.len());
        let mut values = Vec::with_capacity(merged.len());
        for (r, c, v) in merged {
            row_ptr[r + 1] += 1;
            col_idx.push(c);
            values.push(v);
        }
        for i in 0..n {
            row_ptr[i + 1] += row_ptr[i];
        }

        Self {
            n,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Number of rows (= columns).
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Number of stored (nonzero) entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.n {
            return 0.0;
        }
        let (start, end) = (self.row_ptr[row], self.row_ptr[row + 1]);
        self.col_idx[start..end]
            .binary_search(&col)
            .map_or(0.0, |k| self.values[start + k])
    }

    /// Nonzero entries as `(row, col, value)`, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.n).flat_map(move |r| {
            (self.row_ptr[r]..self.row_ptr[r + 1]).map(move |k| (r, self.col_idx[k], self.values[k]))
        })
    }

    /// Sparse matrix-vector product `A x`.
    pub fn mul_vec(&self, x: &Array1<f64>) -> Array1<f64> {
        let mut y = Array1::zeros(self.n);
        for (r, c, v) in self.iter() {
            y[r] += v * x[c];
        }
        y
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let mut m = Array2::zeros((self.n, self.n));
        for (r, c, v) in self.iter() {
            m[[r, c]] = v;
        }
        m
    }
}

/// Dense projections in ascending timestamp order.
#[derive(Debug, Clone)]
pub struct MatrixList<T> {
    pub timestamps: Vec<T>,
    pub matrices: Vec<Array2<f64>>,
}

/// Sparse projections in ascending timestamp order.
#[derive(Debug, Clone)]
pub struct SparseMatrixList<T> {
    pub timestamps: Vec<T>,
    pub matrices: Vec<SparseMatrix>,
}

impl<T> MatrixList<T> {
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, &Array2<f64>)> {
        self.timestamps.iter().zip(&self.matrices)
    }
}

impl<T> SparseMatrixList<T> {
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, &SparseMatrix)> {
        self.timestamps.iter().zip(&self.matrices)
    }
}

/// Dense adjacency matrix of the edges active at `timestamp`.
///
/// ```rust
/// use lattix_evolving::{adjacency_matrix, EvolvingGraph};
///
/// let mut g = EvolvingGraph::new();
/// g.add_edge("a", "b", 1);
/// g.add_edge("b", "c", 2);
///
/// let a1 = adjacency_matrix(&g, &1)?;
/// assert_eq!(a1.dim(), (3, 3));
/// assert_eq!(a1[[0, 1]], 1.0);
/// assert_eq!(a1.sum(), 1.0);
/// # Ok::<(), lattix_evolving::Error>(())
/// ```
pub fn adjacency_matrix<K: NodeKey, T: Timestamp>(
    g: &EvolvingGraph<K, T>,
    timestamp: &T,
) -> Result<Array2<f64>> {
    let n = g.num_nodes();
    let mut m = Array2::zeros((n, n));
    for (r, c, w) in entries_at(g, timestamp)? {
        m[[r, c]] += w;
    }
    Ok(m)
}

/// Sparse adjacency matrix of the edges active at `timestamp`.
pub fn sparse_adjacency_matrix<K: NodeKey, T: Timestamp>(
    g: &EvolvingGraph<K, T>,
    timestamp: &T,
) -> Result<SparseMatrix> {
    Ok(SparseMatrix::from_valid_triplets(
        g.num_nodes(),
        entries_at(g, timestamp)?,
    ))
}

/// Dense projections of every timestamp, ascending.
pub fn adjacency_matrix_list<K: NodeKey, T: Timestamp>(
    g: &EvolvingGraph<K, T>,
) -> Result<MatrixList<T>> {
    let timestamps = sorted_timestamps(g);
    let matrices = timestamps
        .iter()
        .map(|t| adjacency_matrix(g, t))
        .collect::<Result<Vec<_>>>()?;
    Ok(MatrixList {
        timestamps,
        matrices,
    })
}

/// Sparse projections of every timestamp, ascending.
pub fn sparse_adjacency_matrix_list<K: NodeKey, T: Timestamp>(
    g: &EvolvingGraph<K, T>,
) -> Result<SparseMatrixList<T>> {
    let timestamps = sorted_timestamps(g);
    let matrices = timestamps
        .iter()
        .map(|t| sparse_adjacency_matrix(g, t))
        .collect::<Result<Vec<_>>>()?;
    Ok(SparseMatrixList {
        timestamps,
        matrices,
    })
}

impl<K: NodeKey> StaticGraph<K> {
    /// Dense adjacency matrix over node indices.
    pub fn adjacency_matrix(&self) -> Array2<f64> {
        let n = self.num_nodes();
        let mut m = Array2::zeros((n, n));
        for (r, c, w) in self.entries() {
            m[[r, c]] += w;
        }
        m
    }

    /// Sparse adjacency matrix over node indices.
    pub fn sparse_adjacency_matrix(&self) -> SparseMatrix {
        SparseMatrix::from_valid_triplets(self.num_nodes(), self.entries())
    }

    fn entries(&self) -> Vec<(usize, usize, f64)> {
        let mut out = Vec::with_capacity(self.num_edges() * 2);
        for e in self.as_petgraph().edge_references() {
            let (r, c, w) = (e.source().index(), e.target().index(), *e.weight());
            out.push((r, c, w));
            if !self.is_directed() && r != c {
                out.push((c, r, w));
            }
        }
        out
    }
}

pub(crate) fn sorted_timestamps<K: NodeKey, T: Timestamp>(g: &EvolvingGraph<K, T>) -> Vec<T> {
    let mut ts = g.unique_timestamps().to_vec();
    ts.sort();
    ts
}

fn entries_at<K: NodeKey, T: Timestamp>(
    g: &EvolvingGraph<K, T>,
    timestamp: &T,
) -> Result<Vec<(usize, usize, f64)>> {
    let ids = g
        .edge_ids_at(timestamp)
        .ok_or_else(|| Error::UnknownTimestamp(format!("{timestamp:?}")))?;
    let records = g.records();
    let mut out = Vec::with_capacity(ids.len() * 2);
    for &i in ids {
        let e = &records[i];
        out.push((e.src, e.dst, e.weight));
        if !g.is_directed() && e.src != e.dst {
            out.push((e.dst, e.src, e.weight));
        }
    }
    Ok(out)
}
