//! One-dimensional mass and stiffness matrices.
//!
//! For a Lagrange basis `{l_i}` and a quadrature rule `{(q_α, w_α)}`, with
//! `B[i, α] = l_i(q_α)` and `D[i, α] = l_i'(q_α)`:
//! ```text
//! M[i, j] = Σ_α B[i, α] B[j, α] w_α      (mass)
//! K[i, j] = Σ_α D[i, α] D[j, α] w_α      (stiffness)
//! A       = K + M
//! ```
//! With `nq ≥ n` Gauss-Legendre points both sums are exact: the integrands
//! have degree at most `2n - 2 ≤ 2 nq - 1`.

use ndarray as nd;
use crate::{
    Arr1,
    Arr2,
    basis::LagrangeBasis,
    error::{ DiscretizationError, QuadratureError, SolveError },
    quadrature::QuadRule,
};

pub type MatResult<T> = Result<T, SolveError>;

/// Compute the weighted Gram matrix `G[i, j] = Σ_α E[i, α] E[j, α] w_α`.
///
/// *Panics if `e.ncols() != w.len()`*.
pub fn gram<S, T>(e: &Arr2<S>, w: &Arr1<T>) -> nd::Array2<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let ew: nd::Array2<f64> = e * w;
    ew.dot(&e.t())
}

/// The symmetric `n × n` matrices `K`, `M`, and `A = K + M` for one coordinate
/// direction.
///
/// These are the only objects needed by either solve path; everything in
/// higher dimensions is derived from them on demand.
#[derive(Clone, Debug)]
pub struct Matrices1D {
    n: usize,
    k: nd::Array2<f64>,
    m: nd::Array2<f64>,
    a: nd::Array2<f64>,
}

impl Matrices1D {
    /// Build the matrices for `n` Chebyshev points with an `n`-point
    /// Gauss-Legendre rule.
    pub fn new(n: usize) -> MatResult<Self> {
        Self::with_quadrature(n, n)
    }

    /// Build the matrices for `n` Chebyshev points with an `nq`-point
    /// Gauss-Legendre rule.
    ///
    /// Over-integration (`nq > n`) is allowed; under-integration is rejected
    /// with [`QuadratureError::Insufficient`].
    pub fn with_quadrature(n: usize, nq: usize) -> MatResult<Self> {
        DiscretizationError::check_points(n)?;
        QuadratureError::check_exact(nq, n)?;
        let basis = LagrangeBasis::new(n)?;
        let rule = QuadRule::gauss_legendre(nq)?;
        Self::from_parts(&basis, &rule).map_err(SolveError::from)
    }

    /// Build the matrices for a given basis and quadrature rule.
    ///
    /// Fails with [`QuadratureError::Insufficient`] if `rule` cannot integrate
    /// the basis products exactly.
    pub fn from_parts(basis: &LagrangeBasis, rule: &QuadRule)
        -> Result<Self, QuadratureError>
    {
        let n = basis.len();
        rule.require_exact(n)?;
        let b = basis.eval_matrix(rule.points());
        let d = basis.deriv_matrix(rule.points());
        let m = gram(&b, rule.weights());
        let k = gram(&d, rule.weights());
        let a = &k + &m;
        log::debug!(
            "matrices::from_parts: built 1-D matrices for n = {} with {} quadrature points",
            n, rule.len(),
        );
        Ok(Self { n, k, m, a })
    }

    /// Number of basis functions per direction.
    pub fn n(&self) -> usize { self.n }

    /// Get a reference to the stiffness matrix `K`.
    pub fn k(&self) -> &nd::Array2<f64> { &self.k }

    /// Get a reference to the mass matrix `M`.
    pub fn m(&self) -> &nd::Array2<f64> { &self.m }

    /// Get a reference to the system matrix `A = K + M`.
    pub fn a(&self) -> &nd::Array2<f64> { &self.a }
}
