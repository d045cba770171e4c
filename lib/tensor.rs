//! Kronecker-product extension of the one-dimensional matrices to `d`
//! dimensions.
//!
//! The `d`-dimensional system operator is the sum of `d + 1` terms, each a
//! `d`-fold Kronecker product of one-dimensional factors:
//! ```text
//! A_d = Σ_{t < d} M ⊗ .. ⊗ K ⊗ .. ⊗ M   (K in position t)
//!     + M ⊗ M ⊗ .. ⊗ M
//! ```
//! In two dimensions, indexed by `(i, j), (k, l)`, this is
//! `K[i, k] M[j, l] + M[i, k] K[j, l] + M[i, k] M[j, l]`.
//!
//! Coefficient arrays of shape `(n,)*d` are flattened in row-major order (axis
//! 0 varies slowest), which is the ordering for which the left-most factor of
//! a Kronecker product acts on axis 0.

use ndarray as nd;
use crate::{
    Arr1,
    Arr2,
    error::{ DiscretizationError, ShapeMismatch },
    utils::kron,
};

/// Number of points per direction and number of directions of a tensor
/// product discretization.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Discretization {
    n: usize,
    d: usize,
}

impl Discretization {
    /// Validate and create a new discretization.
    ///
    /// Fails if `n < 2` or `d < 1`.
    pub fn new(n: usize, d: usize) -> Result<Self, DiscretizationError> {
        DiscretizationError::check_points(n)?;
        DiscretizationError::check_dim(d)?;
        Ok(Self { n, d })
    }

    /// Points per direction.
    pub fn n(&self) -> usize { self.n }

    /// Number of directions.
    pub fn d(&self) -> usize { self.d }

    /// Shape of a coefficient array, `(n,)*d`.
    pub fn shape(&self) -> Vec<usize> { vec![self.n; self.d] }

    /// Total number of unknowns, `n^d`.
    pub fn size(&self) -> usize { self.n.pow(self.d as u32) }

    /// Flatten a coefficient array; see [`flatten`].
    pub fn flatten<S>(&self, v: &nd::ArrayBase<S, nd::IxDyn>)
        -> Result<nd::Array1<f64>, ShapeMismatch>
    where S: nd::Data<Elem = f64>
    {
        ShapeMismatch::check(&self.shape(), v.shape())?;
        Ok(flatten(v))
    }

    /// Reshape a flat vector into a coefficient array; see [`reshape`].
    pub fn reshape<S>(&self, v: &Arr1<S>)
        -> Result<nd::ArrayD<f64>, ShapeMismatch>
    where S: nd::Data<Elem = f64>
    {
        reshape(v, &self.shape())
    }
}

/// Flatten an array of any shape to a vector in row-major order.
pub fn flatten<S, D>(v: &nd::ArrayBase<S, D>) -> nd::Array1<f64>
where
    S: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    v.iter().copied().collect()
}

/// Reshape a vector into an array of the given shape, in row-major order.
///
/// This is the exact inverse of [`flatten`]. Fails if `v.len()` is not the
/// product of `shape`.
pub fn reshape<S>(v: &Arr1<S>, shape: &[usize])
    -> Result<nd::ArrayD<f64>, ShapeMismatch>
where S: nd::Data<Elem = f64>
{
    let mismatch = || ShapeMismatch {
        expected: vec![shape.iter().product()],
        got: v.shape().to_vec(),
    };
    if v.len() != shape.iter().product::<usize>() { return Err(mismatch()); }
    nd::ArrayD::from_shape_vec(nd::IxDyn(shape), v.to_vec())
        .map_err(|_| mismatch())
}

/// Iterate over the factors of the `term`-th Kronecker product in a
/// `d`-dimensional operator: `K` on axis `term`, `M` on every other axis.
///
/// `term == d` gives the pure mass term.
pub fn term_factors<'a, S>(k: &'a Arr2<S>, m: &'a Arr2<S>, d: usize, term: usize)
    -> impl Iterator<Item = &'a Arr2<S>> + 'a
where S: nd::Data<Elem = f64>
{
    (0..d).map(move |axis| if axis == term { k } else { m })
}

/// Assemble the dense `n^d × n^d` system matrix from `K` and `M`.
///
/// Memory and time grow as `n^(2d)`; this is a reference for validating the
/// [matrix-free operator][crate::matfree::TensorOperator] and for direct
/// solves of small problems.
///
/// *Panics if `K` and `M` are not square of equal size*.
pub fn assemble<S, T>(k: &Arr2<S>, m: &Arr2<T>, d: usize) -> nd::Array2<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    assert!(
        k.is_square() && k.dim() == m.dim(),
        "tensor::assemble: K and M must be square of equal size",
    );
    let k = k.view();
    let m = m.view();
    let size = k.nrows().pow(d as u32);
    let mut a: nd::Array2<f64> = nd::Array2::zeros((size, size));
    for term in 0..=d {
        let unit: nd::Array2<f64> = nd::Array2::ones((1, 1));
        let prod
            = term_factors(&k, &m, d, term)
            .fold(unit, |acc, factor| kron(&acc, factor));
        a += &prod;
    }
    a
}
