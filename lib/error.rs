//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when an array does not have the shape required by a
/// discretization, e.g. a coefficient array that is not `(n,)*d`.
#[derive(Debug, Error)]
#[error("expected an array of shape {expected:?}; got {got:?}")]
pub struct ShapeMismatch {
    pub expected: Vec<usize>,
    pub got: Vec<usize>,
}

impl ShapeMismatch {
    pub(crate) fn check(expected: &[usize], got: &[usize])
        -> Result<(), Self>
    {
        (expected == got).then_some(())
            .ok_or_else(|| Self { expected: expected.to_vec(), got: got.to_vec() })
    }
}

/// Returned when a discretization cannot be built from the requested
/// parameters.
#[derive(Debug, Error)]
pub enum DiscretizationError {
    /// A cardinal basis with a derivative needs at least two nodes.
    #[error("at least 2 interpolation points are required; got {0}")]
    TooFewPoints(usize),

    /// The domain must have at least one dimension.
    #[error("dimension must be at least 1; got {0}")]
    BadDimension(usize),
}

impl DiscretizationError {
    pub(crate) fn check_points(n: usize) -> Result<(), Self> {
        (n >= 2).then_some(()).ok_or(Self::TooFewPoints(n))
    }

    pub(crate) fn check_dim(d: usize) -> Result<(), Self> {
        (d >= 1).then_some(()).ok_or(Self::BadDimension(d))
    }
}

/// Returned from quadrature construction, or when a rule would under-integrate
/// basis products.
#[derive(Debug, Error)]
pub enum QuadratureError {
    /// Quadrature order must be positive.
    #[error("quadrature order must be at least 1")]
    Empty,

    /// `nq` points cannot integrate products of degree-`(n - 1)` polynomials
    /// exactly.
    #[error("{nq}-point quadrature under-integrates a basis of {n} functions; need at least {n} points")]
    Insufficient { nq: usize, n: usize },
}

impl QuadratureError {
    pub(crate) fn check_order(nq: usize) -> Result<(), Self> {
        (nq != 0).then_some(()).ok_or(Self::Empty)
    }

    pub(crate) fn check_exact(nq: usize, n: usize) -> Result<(), Self> {
        (nq >= n).then_some(()).ok_or(Self::Insufficient { nq, n })
    }
}

/// Returned from the [conjugate gradient][crate::cg] solver.
#[derive(Debug, Error)]
pub enum CgError {
    /// Returned when a non-positive `epsilon` value is encountered.
    #[error("epsilon values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when a non-positive `maxiters` value is encountered.
    #[error("maxiters must be greater than 0; got {0}")]
    BadMaxiters(usize),

    /// Returned when a residual refresh period of zero is requested.
    #[error("residual refresh period must be greater than 0")]
    BadRefresh,

    /// Returned when `maxiters` is reached before the tolerance is met.
    ///
    /// `x` is the iterate with the smallest residual seen and `residual` is
    /// its true residual norm.
    #[error("conjugate gradient did not converge in {iters} iterations; residual norm is {residual:e}")]
    NonConvergence {
        x: nd::Array1<f64>,
        residual: f64,
        iters: usize,
    },

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`ShapeMismatch`]
    #[error("shape error: {0}")]
    Shape(#[from] ShapeMismatch),
}

impl From<std::convert::Infallible> for CgError {
    fn from(never: std::convert::Infallible) -> Self { match never { } }
}

impl CgError {
    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0).then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }

    pub(crate) fn check_maxiters(maxiters: usize) -> Result<(), Self> {
        (maxiters != 0).then_some(()).ok_or(Self::BadMaxiters(maxiters))
    }

    pub(crate) fn check_refresh(refresh: Option<usize>) -> Result<(), Self> {
        (refresh != Some(0)).then_some(()).ok_or(Self::BadRefresh)
    }
}

/// Returned from the [problem-level][crate::problem] assembly and solve
/// functions.
#[derive(Debug, Error)]
pub enum SolveError {
    /// [`DiscretizationError`]
    #[error("discretization error: {0}")]
    Discretization(#[from] DiscretizationError),

    /// [`QuadratureError`]
    #[error("quadrature error: {0}")]
    Quadrature(#[from] QuadratureError),

    /// [`ShapeMismatch`]
    #[error("shape error: {0}")]
    Shape(#[from] ShapeMismatch),

    /// [`CgError`]
    #[error("cg error: {0}")]
    Cg(#[from] CgError),

    /// [`LinalgError`].
    #[error("linalg error: {0}")]
    Linalg(#[from] LinalgError),
}
