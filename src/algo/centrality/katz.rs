//! Katz centrality: static and time-respecting (communicability) variants.
//!
//! # Intuition
//!
//! Katz centrality counts all walks leaving a node, with longer walks
//! weighted less. Even isolated nodes keep a baseline score of 1.
//!
//! On an evolving graph a walk must also respect time: it may take one
//! step at `t1`, wait, and continue at `t2 > t1`, but never the reverse.
//! Aggregating the edges first and running static Katz counts walks that
//! could never have happened.
//!
//! # Definition
//!
//! Static:
//!
//! ```text
//! x = α A x + 1        i.e.   x = (I - α A)^-1 1
//! ```
//!
//! Temporal (running communicability), over the adjacency matrices
//! `A_1 .. A_m` in ascending timestamp order:
//!
//! ```text
//! Q_0 = I
//! Q_k = (I + e^{-β} (Q_{k-1} - I)) (I - α A_k)^-1
//! ```
//!
//! Each step multiplies in the walks available at `t_k` and discounts the
//! walks inherited from earlier timestamps by `e^{-β}`, so recent activity
//! weighs most. With `β = 0` this is exactly `Π_k (I - α A_k)^-1`.
//!
//! - **broadcast**: row sums of `Q` (influence a node projects forward)
//! - **receive**: column sums of `Q` (influence a node has absorbed)
//!
//! # Choosing α
//!
//! Each resolvent `(I - α A)^-1` exists as a walk series only when
//! `α < 1/ρ(A)` (ρ = spectral radius). Larger values are rejected with
//! [`Error::NumericDivergence`] rather than silently returning a
//! meaningless solution.
//!
//! # References
//!
//! - Katz (1953). "A new status index derived from sociometric analysis"
//! - Grindrod, Parsons, Higham, Estrada (2011). "Communicability across
//!   evolving networks"
//! - Grindrod, Higham (2013). "A dynamical systems view of network
//!   centrality"

use crate::graph::EvolvingGraph;
use crate::linalg::{shifted_identity, spectral_radius_estimate, Lu};
use crate::matrix::{adjacency_matrix, sorted_timestamps};
use crate::node::{NodeKey, Timestamp};
use crate::static_graph::{aggregate_graph, StaticGraph};
use crate::{Error, Result};
use ndarray::{Array1, Array2, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Configuration for static Katz centrality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KatzConfig {
    /// Attenuation factor per hop. Must be < 1/ρ(A).
    pub alpha: f64,
    /// Scale the score vector to unit Euclidean norm.
    pub normalize: bool,
    /// Reject `alpha >= 1/ρ(A)` up front. Singular or non-finite solves
    /// are rejected regardless.
    pub check_convergence: bool,
}

impl Default for KatzConfig {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            normalize: false,
            check_convergence: true,
        }
    }
}

/// Which reduction of the communicability matrix to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KatzMode {
    /// Row sums.
    #[default]
    Broadcast,
    /// Column sums.
    Receive,
    /// The matrix itself.
    Matrix,
}

/// Configuration for temporal Katz centrality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalKatzConfig {
    /// Attenuation per hop within a timestamp. Must be < 1/ρ(A_k) for every k.
    pub alpha: f64,
    /// Per-timestamp decay of older walks; 0 disables decay.
    pub beta: f64,
    pub mode: KatzMode,
    /// Scale broadcast/receive vectors to unit Euclidean norm.
    pub normalize: bool,
    /// See [`KatzConfig::check_convergence`].
    pub check_convergence: bool,
}

impl Default for TemporalKatzConfig {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            beta: 0.2,
            mode: KatzMode::Broadcast,
            normalize: true,
            check_convergence: true,
        }
    }
}

/// Per-node scores, in node-index order.
#[derive(Debug, Clone)]
pub struct KatzScores<K> {
    keys: Vec<K>,
    scores: Array1<f64>,
    index: HashMap<K, usize>,
}

impl<K: NodeKey> KatzScores<K> {
    fn new(keys: Vec<K>, scores: Array1<f64>) -> Self {
        let index = keys.iter().cloned().enumerate().map(|(i, k)| (k, i)).collect();
        Self {
            keys,
            scores,
            index,
        }
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Raw score vector, indexed like the graph's nodes.
    pub fn scores(&self) -> &Array1<f64> {
        &self.scores
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.index.get(key).map(|&i| self.scores[i])
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.keys.iter().zip(self.scores.iter().copied())
    }

    /// Nodes by descending score; ties keep index order.
    pub fn ranked(&self) -> Vec<(&K, f64)> {
        let mut out: Vec<_> = self.iter().collect();
        out.sort_by(|a, b| b.1.total_cmp(&a.1));
        out
    }

    pub fn to_map(&self) -> HashMap<K, f64> {
        self.iter().map(|(k, s)| (k.clone(), s)).collect()
    }

    fn normalized(mut self) -> Self {
        let norm = self.scores.dot(&self.scores).sqrt();
        if norm > 0.0 {
            self.scores /= norm;
        }
        self
    }
}

/// Communicability matrix with rows/columns labelled by node key.
#[derive(Debug, Clone)]
pub struct CommunicabilityMatrix<K> {
    keys: Vec<K>,
    matrix: Array2<f64>,
}

impl<K: NodeKey> CommunicabilityMatrix<K> {
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Entry for `source` (row) and `target` (column).
    pub fn get(&self, source: &K, target: &K) -> Option<f64> {
        let r = self.keys.iter().position(|k| k == source)?;
        let c = self.keys.iter().position(|k| k == target)?;
        Some(self.matrix[[r, c]])
    }

    /// Row sums, unnormalized.
    pub fn broadcast(&self) -> KatzScores<K> {
        KatzScores::new(self.keys.clone(), self.matrix.sum_axis(Axis(1)))
    }

    /// Column sums, unnormalized.
    pub fn receive(&self) -> KatzScores<K> {
        KatzScores::new(self.keys.clone(), self.matrix.sum_axis(Axis(0)))
    }
}

/// Result of [`katz_temporal`], shaped by [`KatzMode`].
#[derive(Debug, Clone)]
pub enum TemporalKatz<K> {
    Broadcast(KatzScores<K>),
    Receive(KatzScores<K>),
    Matrix(CommunicabilityMatrix<K>),
}

impl<K> TemporalKatz<K> {
    /// The score vector, unless the matrix was requested.
    pub fn scores(&self) -> Option<&KatzScores<K>> {
        match self {
            Self::Broadcast(s) | Self::Receive(s) => Some(s),
            Self::Matrix(_) => None,
        }
    }

    pub fn into_scores(self) -> Option<KatzScores<K>> {
        match self {
            Self::Broadcast(s) | Self::Receive(s) => Some(s),
            Self::Matrix(_) => None,
        }
    }

    pub fn into_matrix(self) -> Option<CommunicabilityMatrix<K>> {
        match self {
            Self::Matrix(m) => Some(m),
            _ => None,
        }
    }
}

/// Static Katz centrality `x = (I - αA)^-1 1`.
///
/// # Complexity
///
/// - Time: O(V³) (dense LU)
/// - Space: O(V²)
///
/// # Example
///
/// ```
/// use lattix_evolving::StaticGraph;
/// use lattix_evolving::algo::centrality::{katz_static, KatzConfig};
///
/// let mut g = StaticGraph::new();
/// // Chain: A -> B -> C
/// g.add_edge("A", "B", 1.0);
/// g.add_edge("B", "C", 1.0);
///
/// let scores = katz_static(&g, &KatzConfig::default())?;
/// // A starts walks of length 1 and 2, B of length 1, C none
/// assert!(scores.get(&"A") > scores.get(&"B"));
/// assert_eq!(scores.get(&"C"), Some(1.0));
/// # Ok::<(), lattix_evolving::Error>(())
/// ```
pub fn katz_static<K: NodeKey>(g: &StaticGraph<K>, config: &KatzConfig) -> Result<KatzScores<K>> {
    check_parameter("alpha", config.alpha)?;
    let n = g.num_nodes();
    let keys: Vec<K> = g.nodes().map(|node| node.key.clone()).collect();
    if n == 0 {
        return Ok(KatzScores::new(keys, Array1::zeros(0)));
    }

    let a = g.adjacency_matrix();
    let lu = factor_resolvent(&a, config.alpha, config.check_convergence)
        .map_err(|d| d.into_error(config.alpha, None))?;
    let x = lu.solve(&Array1::ones(n));
    if let Some(reason) = invalid_entries(&a, x.iter()) {
        return Err(Divergence::new(&a, reason).into_error(config.alpha, None));
    }

    debug!(nodes = n, alpha = config.alpha, "static katz solved");
    let scores = KatzScores::new(keys, x);
    Ok(if config.normalize {
        scores.normalized()
    } else {
        scores
    })
}

/// Static Katz centrality of the aggregated (collapsed) evolving graph.
///
/// Time ordering is discarded, so walks that run backwards through time
/// are counted. For the time-ordered resolvent product without decay use
/// [`katz_temporal`] with `TemporalKatzConfig { beta: 0.0, .. }`.
pub fn katz_evolving<K: NodeKey, T: Timestamp>(
    g: &EvolvingGraph<K, T>,
    config: &KatzConfig,
) -> Result<KatzScores<K>> {
    katz_static(&aggregate_graph(g), config)
}

/// Temporal Katz (communicability) centrality.
///
/// The per-timestamp resolvents are independent and computed in parallel,
/// one batch per pool width, then folded into the product strictly in
/// ascending timestamp order. Memory stays at a few `n x n` matrices per
/// worker however many timestamps the graph has.
///
/// # Example
///
/// ```
/// use lattix_evolving::EvolvingGraph;
/// use lattix_evolving::algo::centrality::{katz_temporal, TemporalKatzConfig};
///
/// let mut g = EvolvingGraph::new();
/// g.add_edge("A", "B", 1);
/// g.add_edge("A", "C", 2);
/// g.add_edge("B", "C", 3);
///
/// let result = katz_temporal(&g, &TemporalKatzConfig::default())?;
/// let ranked = result.scores().unwrap().ranked();
/// let order: Vec<_> = ranked.iter().map(|(k, _)| **k).collect();
/// assert_eq!(order, vec!["A", "B", "C"]);
/// # Ok::<(), lattix_evolving::Error>(())
/// ```
pub fn katz_temporal<K: NodeKey, T: Timestamp>(
    g: &EvolvingGraph<K, T>,
    config: &TemporalKatzConfig,
) -> Result<TemporalKatz<K>> {
    check_parameter("alpha", config.alpha)?;
    check_parameter("beta", config.beta)?;
    if config.beta < 0.0 {
        return Err(Error::MalformedInput(format!(
            "beta must be non-negative, got {}",
            config.beta
        )));
    }

    let n = g.num_nodes();
    let timestamps = sorted_timestamps(g);

    let eye = Array2::<f64>::eye(n);
    let decay = (-config.beta).exp();
    let mut q = eye.clone();
    // one batch of adjacency matrices and resolvents is alive at a time
    let width = rayon::current_num_threads().max(1);
    for (chunk, batch) in timestamps.chunks(width).enumerate() {
        let offset = chunk * width;
        let matrices = batch
            .iter()
            .map(|t| adjacency_matrix(g, t))
            .collect::<Result<Vec<_>>>()?;
        let resolvents = matrices
            .par_iter()
            .enumerate()
            .map(|(i, a)| {
                factor_resolvent(a, config.alpha, config.check_convergence)
                    .map(|lu| lu.inverse())
                    .and_then(|r| match invalid_entries(a, r.iter()) {
                        Some(reason) => Err(Divergence::new(a, reason)),
                        None => Ok(r),
                    })
                    .map_err(|d| (offset + i, d))
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|(k, d)| {
                d.into_error(config.alpha, Some(format!("{:?}", timestamps[k])))
            })?;
        for r in &resolvents {
            q = (&eye + &((&q - &eye) * decay)).dot(r);
        }
    }
    debug!(
        nodes = n,
        factors = timestamps.len(),
        alpha = config.alpha,
        beta = config.beta,
        "temporal katz composed"
    );

    let keys: Vec<K> = g.nodes().iter().map(|node| node.key.clone()).collect();
    let matrix = CommunicabilityMatrix { keys, matrix: q };
    let finish = |s: KatzScores<K>| if config.normalize { s.normalized() } else { s };
    Ok(match config.mode {
        KatzMode::Broadcast => TemporalKatz::Broadcast(finish(matrix.broadcast())),
        KatzMode::Receive => TemporalKatz::Receive(finish(matrix.receive())),
        KatzMode::Matrix => TemporalKatz::Matrix(matrix),
    })
}

/// Why a resolvent was rejected, before the caller attaches alpha/timestamp.
#[derive(Debug)]
struct Divergence {
    spectral_radius: f64,
    reason: String,
}

impl Divergence {
    fn new(a: &Array2<f64>, reason: impl Into<String>) -> Self {
        Self {
            spectral_radius: spectral_radius_estimate(a),
            reason: reason.into(),
        }
    }

    fn into_error(self, alpha: f64, timestamp: Option<String>) -> Error {
        Error::NumericDivergence {
            alpha,
            spectral_radius: self.spectral_radius,
            timestamp,
            reason: self.reason,
        }
    }
}

fn factor_resolvent(
    a: &Array2<f64>,
    alpha: f64,
    check_convergence: bool,
) -> std::result::Result<Lu, Divergence> {
    if check_convergence {
        let rho = spectral_radius_estimate(a);
        if alpha * rho >= 1.0 {
            return Err(Divergence {
                spectral_radius: rho,
                reason: format!("alpha must be below 1/spectral_radius = {:.6}", 1.0 / rho),
            });
        }
    }
    Lu::factor(&shifted_identity(a, alpha))
        .ok_or_else(|| Divergence::new(a, "I - alpha*A is singular"))
}

/// Reject non-finite results, and negative ones where `A >= 0` (the walk
/// series of a non-negative matrix can't go negative unless it diverged).
fn invalid_entries<'a>(a: &Array2<f64>, values: impl Iterator<Item = &'a f64>) -> Option<String> {
    let nonnegative = a.iter().all(|&v| v >= 0.0);
    for &v in values {
        if !v.is_finite() {
            return Some("solution is not finite".into());
        }
        if nonnegative && v < 0.0 {
            return Some("solution has negative entries; the walk series diverges".into());
        }
    }
    None
}

fn check_parameter(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::MalformedInput(format!("{name} must be finite, got {value}")))
    }
}
