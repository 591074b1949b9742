//! Small dense linear algebra kernels for the centrality engine.
//!
//! Matrices here are at most `num_nodes x num_nodes`, so a plain LU
//! factorization with partial pivoting is enough.

use ndarray::{Array1, Array2};

/// Pivots below this (relative to the matrix's max-abs entry) count as zero.
const SINGULAR_EPS: f64 = 1e-12;

/// LU factorization `P A = L U`, packed in one matrix.
#[derive(Debug, Clone)]
pub(crate) struct Lu {
    lu: Array2<f64>,
    perm: Vec<usize>,
}

impl Lu {
    /// Factor a square matrix. `None` if it is (numerically) singular.
    pub(crate) fn factor(a: &Array2<f64>) -> Option<Self> {
        let n = a.nrows();
        debug_assert_eq!(n, a.ncols());
        let mut lu = a.clone();
        let mut perm: Vec<usize> = (0..n).collect();
        let scale = a.iter().fold(0.0_f64, |m, v| m.max(v.abs())).max(1.0);

        for k in 0..n {
            let pivot = (k..n)
                .max_by(|&i, &j| lu[[i, k]].abs().total_cmp(&lu[[j, k]].abs()))
                .unwrap_or(k);
            if !(lu[[pivot, k]].abs() > SINGULAR_EPS * scale) {
                return None;
            }
            if pivot != k {
                for c in 0..n {
                    lu.swap([k, c], [pivot, c]);
                }
                perm.swap(k, pivot);
            }
            let diag = lu[[k, k]];
            for i in (k + 1)..n {
                let f = lu[[i, k]] / diag;
                lu[[i, k]] = f;
                if f != 0.0 {
                    for j in (k + 1)..n {
                        lu[[i, j]] -= f * lu[[k, j]];
                    }
                }
            }
        }
        Some(Self { lu, perm })
    }

    /// Solve `A x = b`.
    pub(crate) fn solve(&self, b: &Array1<f64>) -> Array1<f64> {
        let n = self.perm.len();
        let mut x: Array1<f64> = self.perm.iter().map(|&p| b[p]).collect();
        for i in 0..n {
            let mut s = x[i];
            for j in 0..i {
                s -= self.lu[[i, j]] * x[j];
            }
            x[i] = s;
        }
        for i in (0..n).rev() {
            let mut s = x[i];
            for j in (i + 1)..n {
                s -= self.lu[[i, j]] * x[j];
            }
            x[i] = s / self.lu[[i, i]];
        }
        x
    }

    /// `A^-1`, one column at a time.
    pub(crate) fn inverse(&self) -> Array2<f64> {
        let n = self.perm.len();
        let mut inv = Array2::zeros((n, n));
        let mut e = Array1::zeros(n);
        for c in 0..n {
            e[c] = 1.0;
            inv.column_mut(c).assign(&self.solve(&e));
            e[c] = 0.0;
        }
        inv
    }
}

/// `I - alpha * A`.
pub(crate) fn shifted_identity(a: &Array2<f64>, alpha: f64) -> Array2<f64> {
    Array2::eye(a.nrows()) - a * alpha
}

/// Upper estimate of the spectral radius of `|A|`.
///
/// Power iteration on `|A| + I` (the shift keeps periodic graphs from
/// oscillating), bounded by the Collatz-Wielandt ratio. For non-negative
/// weights this is the spectral radius of `A` itself.
pub(crate) fn spectral_radius_estimate(a: &Array2<f64>) -> f64 {
    const MAX_ITER: usize = 500;
    const TOL: f64 = 1e-9;

    let n = a.nrows();
    if n == 0 {
        return 0.0;
    }
    let b = a.mapv(f64::abs) + Array2::<f64>::eye(n);
    let mut x = Array1::<f64>::ones(n);
    let mut upper = f64::INFINITY;

    for _ in 0..MAX_ITER {
        let y = b.dot(&x);
        let (mut lo, mut hi) = (f64::INFINITY, 0.0_f64);
        for (yi, xi) in y.iter().zip(x.iter()) {
            if *xi > 0.0 {
                let r = yi / xi;
                lo = lo.min(r);
                hi = hi.max(r);
            }
        }
        upper = upper.min(hi);
        if hi - lo <= TOL * hi {
            break;
        }
        let norm = y.iter().fold(0.0_f64, |m, v| m.max(*v));
        if norm == 0.0 || !norm.is_finite() {
            break;
        }
        x = y / norm;
    }
    (upper - 1.0).max(0.0)
}
