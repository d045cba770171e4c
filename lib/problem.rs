//! Problem assembly, solution, and error measurement for
//! ```text
//! -Δu + u = f   on [-1, 1]^d,   ∂u/∂n = 0 on the boundary
//! ```
//!
//! A [`Problem`] owns the one-dimensional ingredients (basis, assembly rule,
//! and matrices) and exposes both solve paths: a dense direct solve of the
//! assembled `n^d × n^d` system, and matrix-free conjugate gradient.
//!
//! ```
//! use chebel::{ cg::CgParams, problem::{ cosine_solution, Problem } };
//!
//! let exact = cosine_solution(2);
//! let problem = Problem::new(14, 2).unwrap();
//! let rhs = problem.rhs(|x| exact.forcing(x));
//! let params = CgParams { epsilon: Some(1e-10), ..CgParams::default() };
//! let sol = problem.solve_cg(&rhs, &params).unwrap();
//! let err = problem.l2_error(&sol.x, |x| exact.exact(x)).unwrap();
//! assert!(err < 1e-6);
//! ```

use std::f64::consts::PI;
use ndarray as nd;
use ndarray_linalg::Solve;
use crate::{
    Arr1,
    Arr2,
    basis::LagrangeBasis,
    cg::{ CgParams, CgSolution },
    error::{ ShapeMismatch, SolveError },
    matfree::{ LinearOperator, TensorOperator },
    matrices::Matrices1D,
    quadrature::QuadRule,
    tensor::{ assemble, flatten, Discretization },
    utils::contract_axis,
    ERROR_QUAD_FACTOR,
};

pub type SolveResult<T> = Result<T, SolveError>;

// values of `f` at every point of the `d`-fold tensor product of `rule`,
// alongside the product weights
fn tensor_samples<F>(rule: &QuadRule, d: usize, mut f: F)
    -> (nd::ArrayD<f64>, nd::ArrayD<f64>)
where F: FnMut(&[f64]) -> f64
{
    let shape = nd::IxDyn(&vec![rule.len(); d]);
    let q = rule.points();
    let w = rule.weights();
    let mut x: Vec<f64> = vec![0.0; d];
    let values: nd::ArrayD<f64>
        = nd::ArrayD::from_shape_fn(shape.clone(), |idx| {
            x.iter_mut().enumerate().for_each(|(a, xa)| { *xa = q[idx[a]]; });
            f(&x)
        });
    let weights: nd::ArrayD<f64>
        = nd::ArrayD::from_shape_fn(shape, |idx| {
            (0..d).map(|a| w[idx[a]]).product::<f64>()
        });
    (values, weights)
}

/// A discretized problem on `[-1, 1]^d` with `n` Chebyshev points per
/// direction.
#[derive(Clone, Debug)]
pub struct Problem {
    disc: Discretization,
    basis: LagrangeBasis,
    rule: QuadRule,
    b: nd::Array2<f64>,
    mats: Matrices1D,
}

impl Problem {
    /// Build the basis, the `n`-point Gauss-Legendre assembly rule, and the
    /// one-dimensional matrices.
    pub fn new(n: usize, d: usize) -> SolveResult<Self> {
        let disc = Discretization::new(n, d)?;
        let basis = LagrangeBasis::new(n)?;
        let rule = QuadRule::gauss_legendre(n)?;
        let b = basis.eval_matrix(rule.points());
        let mats = Matrices1D::from_parts(&basis, &rule)?;
        Ok(Self { disc, basis, rule, b, mats })
    }

    /// The discretization parameters.
    pub fn discretization(&self) -> Discretization { self.disc }

    /// Get a reference to the one-dimensional basis.
    pub fn basis(&self) -> &LagrangeBasis { &self.basis }

    /// Get a reference to the one-dimensional assembly rule.
    pub fn rule(&self) -> &QuadRule { &self.rule }

    /// Get a reference to the one-dimensional matrices.
    pub fn matrices(&self) -> &Matrices1D { &self.mats }

    /// Compute the load vector
    /// ```text
    /// F[I] = Σ_α f(q_α) Π_a w[α_a] B[I_a, α_a]
    /// ```
    /// on the tensor-product assembly rule, flattened in row-major order.
    pub fn rhs<F>(&self, f: F) -> nd::Array1<f64>
    where F: FnMut(&[f64]) -> f64
    {
        let (values, weights) = tensor_samples(&self.rule, self.disc.d(), f);
        let mut load = values * weights;
        for axis in 0..self.disc.d() {
            load = contract_axis(&self.b, &load, axis);
        }
        flatten(&load)
    }

    /// Borrow the matrix-free system operator.
    pub fn operator(&self) -> TensorOperator<'_> {
        TensorOperator::with_discretization(&self.mats, self.disc)
    }

    /// Assemble the dense system matrix.
    ///
    /// Memory grows as `n^(2d)`.
    pub fn assemble(&self) -> nd::Array2<f64> {
        assemble(self.mats.k(), self.mats.m(), self.disc.d())
    }

    /// Solve the system by assembling it densely and factorizing.
    pub fn solve_dense<S>(&self, rhs: &Arr1<S>) -> SolveResult<nd::Array1<f64>>
    where S: nd::Data<Elem = f64>
    {
        ShapeMismatch::check(&[self.disc.size()], rhs.shape())?;
        let a = self.assemble();
        let x = a.solve(rhs)?;
        log::debug!(
            "Problem::solve_dense: solved {0} × {0} system directly",
            self.disc.size(),
        );
        Ok(x)
    }

    /// Solve the system by matrix-free conjugate gradient from a zero initial
    /// guess.
    pub fn solve_cg<S>(&self, rhs: &Arr1<S>, params: &CgParams)
        -> SolveResult<CgSolution>
    where S: nd::Data<Elem = f64>
    {
        let x0: nd::Array1<f64> = nd::Array1::zeros(self.disc.size());
        let sol = self.operator().solve_cg(rhs, &x0, params)?;
        log::debug!(
            "Problem::solve_cg: converged in {} iterations; residual norm {:e}",
            sol.iters, sol.residual,
        );
        Ok(sol)
    }

    /// Evaluate the discrete solution with (flat) coefficients `coeffs` at
    /// each row of `points`, an `npts × d` array.
    pub fn evaluate<S, T>(&self, coeffs: &Arr1<S>, points: &Arr2<T>)
        -> SolveResult<nd::Array1<f64>>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        let d = self.disc.d();
        ShapeMismatch::check(&[points.nrows(), d], points.shape())?;
        let c = self.disc.reshape(coeffs)?;
        let values: nd::Array1<f64>
            = points.rows().into_iter()
            .map(|x| {
                // contract from the last axis so earlier indices stay valid
                let mut acc = c.clone();
                for (a, xa) in x.iter().enumerate().rev() {
                    let l = self.basis.eval_all(*xa).insert_axis(nd::Axis(0));
                    acc = contract_axis(&l, &acc, a).index_axis_move(nd::Axis(a), 0);
                }
                acc.sum()
            })
            .collect();
        Ok(values)
    }

    /// Compute the L² error `‖u_h - u‖` of the discrete solution against an
    /// exact solution.
    ///
    /// The integral is taken with a `2n`-point Gauss-Legendre rule per
    /// direction, independent of (and finer than) the assembly rule.
    pub fn l2_error<S, F>(&self, coeffs: &Arr1<S>, exact: F) -> SolveResult<f64>
    where
        S: nd::Data<Elem = f64>,
        F: FnMut(&[f64]) -> f64,
    {
        let d = self.disc.d();
        let mut uh = self.disc.reshape(coeffs)?;
        let rule = QuadRule::gauss_legendre(ERROR_QUAD_FACTOR * self.disc.n())?;
        let e = self.basis.eval_matrix(rule.points());
        for axis in 0..d {
            uh = contract_axis(&e.t(), &uh, axis);
        }
        let (u, weights) = tensor_samples(&rule, d, exact);
        let err2: f64
            = nd::Zip::from(&uh).and(&u).and(&weights)
            .fold(0.0, |acc, uhk, uk, wk| acc + wk * (uhk - uk).powi(2));
        Ok(err2.sqrt())
    }
}

/// The manufactured solution `u = Π_a cos(π x_a)` on `[-1, 1]^d`.
///
/// `u` satisfies the homogeneous Neumann condition, and
/// `-Δu + u = (1 + d π²) u`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CosineSolution {
    d: usize,
}

impl CosineSolution {
    /// Number of directions.
    pub fn d(&self) -> usize { self.d }

    /// Evaluate `u` at `x`.
    pub fn exact(&self, x: &[f64]) -> f64 {
        x.iter().map(|xa| (PI * xa).cos()).product()
    }

    /// Evaluate the forcing `f = (1 + d π²) u` at `x`.
    pub fn forcing(&self, x: &[f64]) -> f64 {
        (1.0 + self.d as f64 * PI * PI) * self.exact(x)
    }
}

/// Create the manufactured cosine solution in `d` dimensions.
pub fn cosine_solution(d: usize) -> CosineSolution { CosineSolution { d } }

/// Solve path used by [`convergence_study`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Path {
    /// Dense assembly and direct factorization.
    Dense,
    /// Matrix-free conjugate gradient.
    MatrixFree,
}

/// Solve the manufactured cosine problem in `d` dimensions for each point
/// count in `ns` and return `(n, L² error)` pairs.
///
/// `params` is only used by [`Path::MatrixFree`].
pub fn convergence_study<I>(ns: I, d: usize, path: Path, params: &CgParams)
    -> SolveResult<Vec<(usize, f64)>>
where I: IntoIterator<Item = usize>
{
    let exact = cosine_solution(d);
    ns.into_iter()
        .map(|n| -> SolveResult<(usize, f64)> {
            let problem = Problem::new(n, d)?;
            let rhs = problem.rhs(|x| exact.forcing(x));
            let coeffs = match path {
                Path::Dense => problem.solve_dense(&rhs)?,
                Path::MatrixFree => problem.solve_cg(&rhs, params)?.x,
            };
            let err = problem.l2_error(&coeffs, |x| exact.exact(x))?;
            log::debug!("convergence_study: n = {}, d = {}: error {:e}", n, d, err);
            Ok((n, err))
        })
        .collect()
}
