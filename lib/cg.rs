//! Matrix-free conjugate gradient for symmetric positive-definite systems.
//!
//! The solver only ever sees the operator through a `matvec` closure, so any
//! [`LinearOperator`][crate::matfree::LinearOperator], dense matrix, or
//! external backend can be used. The operator is assumed to be symmetric
//! positive-definite; this is not checked.
//!
//! ```
//! use ndarray::array;
//! use chebel::cg::{ self, CgParams };
//!
//! let a = array![[4.0, 1.0], [1.0, 3.0]];
//! let b = array![1.0, 2.0];
//! let x0 = array![0.0, 0.0];
//! let params = CgParams { epsilon: Some(1e-12), ..CgParams::default() };
//! let sol = cg::solve(|p| a.dot(p), &b, &x0, &params).unwrap();
//! assert!((sol.x[0] - 1.0 / 11.0).abs() < 1e-10);
//! assert!((sol.x[1] - 7.0 / 11.0).abs() < 1e-10);
//! ```

use std::convert::Infallible;
use ndarray as nd;
use ndarray_linalg::Norm;
use crate::{
    Arr1,
    error::{ CgError, LengthError },
    DEF_EPSILON,
    DEF_MAXITERS,
};

pub type CgResult<T> = Result<T, CgError>;

/// Specifies what the residual norm is compared against.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Criterion {
    /// Stop when `‖r‖ ≤ epsilon`.
    #[default]
    Absolute,
    /// Stop when `‖r‖ ≤ epsilon ‖r₀‖`, with `r₀` the initial residual.
    RelativeInitial,
    /// Stop when `‖r‖ ≤ epsilon ‖b‖`.
    RelativeRhs,
}

impl Criterion {
    fn threshold(&self, epsilon: f64, r0: f64, b: f64) -> f64 {
        match self {
            Self::Absolute => epsilon,
            Self::RelativeInitial => epsilon * r0,
            Self::RelativeRhs => epsilon * b,
        }
    }
}

/// Solver parameters.
#[derive(Clone, Debug, Default)]
pub struct CgParams {
    /// Residual tolerance (default: `1e-5`).
    pub epsilon: Option<f64>,
    /// Maximum number of iterations (default: `10000`).
    pub maxiters: Option<usize>,
    /// How the tolerance is applied (default: [`Criterion::Absolute`]).
    pub criterion: Criterion,
    /// If set, replace the recursively updated residual with the true residual
    /// `b - A x` every `refresh` iterations.
    pub refresh: Option<usize>,
}

/// Output of a converged solve.
#[derive(Clone, Debug)]
pub struct CgSolution {
    /// Solution vector.
    pub x: nd::Array1<f64>,
    /// True residual norm `‖b - A x‖`.
    pub residual: f64,
    /// Number of iterations performed.
    pub iters: usize,
}

/// Solve `A x = b` given only the action `p ↦ A p` of a symmetric
/// positive-definite operator.
///
/// Returns [`CgError::NonConvergence`] carrying the best iterate if
/// `maxiters` is reached first.
pub fn solve<F, S, T>(mut matvec: F, b: &Arr1<S>, x0: &Arr1<T>, params: &CgParams)
    -> CgResult<CgSolution>
where
    F: FnMut(&nd::Array1<f64>) -> nd::Array1<f64>,
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    try_solve(|p| Ok::<_, Infallible>(matvec(p)), b, x0, params)
}

// residual and its norm with a length check on the operator's output
fn true_residual<F, E, S>(matvec: &mut F, b: &Arr1<S>, x: &nd::Array1<f64>)
    -> CgResult<nd::Array1<f64>>
where
    F: FnMut(&nd::Array1<f64>) -> Result<nd::Array1<f64>, E>,
    CgError: From<E>,
    S: nd::Data<Elem = f64>,
{
    let ax = matvec(x)?;
    LengthError::check(b, &ax)?;
    Ok(b - &ax)
}

/// Like [`solve`], but for operators whose application can fail.
pub fn try_solve<F, E, S, T>(
    mut matvec: F,
    b: &Arr1<S>,
    x0: &Arr1<T>,
    params: &CgParams,
) -> CgResult<CgSolution>
where
    F: FnMut(&nd::Array1<f64>) -> Result<nd::Array1<f64>, E>,
    CgError: From<E>,
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let epsilon = params.epsilon.unwrap_or(DEF_EPSILON);
    let maxiters = params.maxiters.unwrap_or(DEF_MAXITERS);
    CgError::check_epsilon(epsilon)?;
    CgError::check_maxiters(maxiters)?;
    CgError::check_refresh(params.refresh)?;
    LengthError::check(b, x0)?;

    let mut x: nd::Array1<f64> = x0.to_owned();
    let mut r = true_residual(&mut matvec, b, &x)?;
    let mut rnorm = r.norm_l2();
    let tol = params.criterion.threshold(epsilon, rnorm, b.norm_l2());
    if rnorm <= tol {
        return Ok(CgSolution { x, residual: rnorm, iters: 0 });
    }

    let mut best: (nd::Array1<f64>, f64) = (x.clone(), rnorm);
    let mut p: nd::Array1<f64> = r.clone();
    let mut rr = r.dot(&r);
    for k in 1..=maxiters {
        let ap = matvec(&p)?;
        LengthError::check(&p, &ap)?;
        let alpha = rr / p.dot(&ap);
        x.scaled_add(alpha, &p);

        let refresh = params.refresh.is_some_and(|m| k % m == 0);
        if refresh {
            r = true_residual(&mut matvec, b, &x)?;
            log::debug!("cg::try_solve: replaced residual at iteration {}", k);
        } else {
            r.scaled_add(-alpha, &ap);
        }
        rnorm = r.norm_l2();

        if rnorm <= tol {
            // confirm against the true residual before accepting
            let rtrue = true_residual(&mut matvec, b, &x)?;
            let rtrue_norm = rtrue.norm_l2();
            if rtrue_norm <= tol {
                return Ok(CgSolution { x, residual: rtrue_norm, iters: k });
            }
            log::debug!(
                "cg::try_solve: recursive residual {:e} drifted from true residual {:e}; restarting",
                rnorm, rtrue_norm,
            );
            r = rtrue;
            rnorm = rtrue_norm;
            rr = r.dot(&r);
            p.assign(&r);
            if rnorm < best.1 { best = (x.clone(), rnorm); }
            continue;
        }
        if rnorm < best.1 { best = (x.clone(), rnorm); }

        let rr_next = r.dot(&r);
        let beta = rr_next / rr;
        rr = rr_next;
        p *= beta;
        p += &r;
    }

    let (x, _) = best;
    let residual = true_residual(&mut matvec, b, &x)?.norm_l2();
    log::warn!(
        "cg::try_solve: reached maxiters = {} with residual norm {:e} (tolerance {:e})",
        maxiters, residual, tol,
    );
    Err(CgError::NonConvergence { x, residual, iters: maxiters })
}
