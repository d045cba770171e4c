//! Gauss-Legendre quadrature on `[-1, 1]`.

use std::f64::consts::PI;
use ndarray as nd;
use crate::error::QuadratureError;

pub type QuadResult<T> = Result<T, QuadratureError>;

const NEWTON_MAXITERS: usize = 100;

// Legendre polynomial P_n and its derivative at `x` via the three-term
// recurrence
//
// requires n ≥ 1 and |x| < 1
fn legendre(n: usize, x: f64) -> (f64, f64) {
    let mut p0: f64 = 1.0;
    let mut p1: f64 = x;
    for k in 1..n {
        let k = k as f64;
        let p2 = ((2.0 * k + 1.0) * x * p1 - k * p0) / (k + 1.0);
        p0 = p1;
        p1 = p2;
    }
    let dp = n as f64 * (x * p1 - p0) / (x * x - 1.0);
    (p1, dp)
}

/// A set of quadrature points and (strictly positive) weights on `[-1, 1]`.
#[derive(Clone, Debug)]
pub struct QuadRule {
    points: nd::Array1<f64>,
    weights: nd::Array1<f64>,
}

impl QuadRule {
    /// Compute the `nq`-point Gauss-Legendre rule, exact for polynomials up to
    /// degree `2 nq - 1`.
    ///
    /// Points are returned in increasing order and are exactly symmetric about
    /// zero; odd rules contain an exact zero. Fails with
    /// [`QuadratureError::Empty`] if `nq == 0`.
    pub fn gauss_legendre(nq: usize) -> QuadResult<Self> {
        QuadratureError::check_order(nq)?;
        let mut points: nd::Array1<f64> = nd::Array1::zeros(nq);
        let mut weights: nd::Array1<f64> = nd::Array1::zeros(nq);
        let nf = nq as f64;
        for i in 0..(nq + 1) / 2 {
            let mut z: f64;
            if nq % 2 == 1 && i == nq / 2 {
                z = 0.0;
            } else {
                z = (PI * (i as f64 + 0.75) / (nf + 0.5)).cos();
                for _ in 0..NEWTON_MAXITERS {
                    let (p, dp) = legendre(nq, z);
                    let dz = p / dp;
                    z -= dz;
                    if dz.abs() <= f64::EPSILON * z.abs().max(1.0) { break; }
                }
            }
            let (_, dp) = legendre(nq, z);
            let w = 2.0 / ((1.0 - z * z) * dp * dp);
            points[i] = -z;
            points[nq - 1 - i] = z;
            weights[i] = w;
            weights[nq - 1 - i] = w;
        }
        Ok(Self { points, weights })
    }

    /// Number of points in the rule.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.points.len() }

    /// Get a reference to the quadrature points.
    pub fn points(&self) -> &nd::Array1<f64> { &self.points }

    /// Get a reference to the quadrature weights.
    pub fn weights(&self) -> &nd::Array1<f64> { &self.weights }

    /// Approximate the integral of `f` over `[-1, 1]`.
    pub fn integrate<F>(&self, mut f: F) -> f64
    where F: FnMut(f64) -> f64
    {
        self.points.iter().zip(&self.weights)
            .map(|(q, w)| f(*q) * w)
            .sum()
    }

    /// Check that this rule integrates products of two members of an
    /// `n`-function Lagrange basis (degree `2n - 2`) exactly.
    ///
    /// Fails with [`QuadratureError::Insufficient`] if fewer than `n` points
    /// are held.
    pub fn require_exact(&self, n: usize) -> QuadResult<()> {
        QuadratureError::check_exact(self.len(), n)
    }
}
