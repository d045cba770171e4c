//! Matrix-free application of the tensor-product system operator.
//!
//! Each of the `d + 1` Kronecker terms of the operator (see [`crate::tensor`])
//! acts on a coefficient array by contracting one axis at a time with a dense
//! `n × n` matrix, so that an application costs *O*(*d*² *n*^(*d*+1)) rather
//! than the *O*(*n*^(2*d*)) of a dense matrix-vector product. Partial products
//! with `M` are shared between terms: for `d = 2` the work reduces to
//! ```text
//! Mv = M along axis 0
//! w  = (K along axis 0, then M along axis 1)
//!    + (K along axis 1 of Mv)
//!    + (M along axis 1 of Mv)
//! ```

use ndarray as nd;
use crate::{
    Arr1,
    cg::{ self, CgParams, CgResult, CgSolution },
    error::{ DiscretizationError, ShapeMismatch },
    matrices::Matrices1D,
    tensor::{ flatten, reshape, Discretization },
    utils::contract_axis,
};

/// A linear operator known only through its action on flat vectors.
///
/// This is the contract shared by the [matrix-free operator][TensorOperator],
/// dense matrices, and any external backend that wants to be used with the
/// [conjugate gradient solver][crate::cg].
pub trait LinearOperator {
    /// Length of the vectors the operator acts on.
    fn size(&self) -> usize;

    /// Apply the operator to `v`.
    ///
    /// Fails if `v.len() != self.size()`.
    fn apply(&self, v: &nd::ArrayView1<f64>)
        -> Result<nd::Array1<f64>, ShapeMismatch>;

    /// Solve `A x = b` by conjugate gradient, starting from `x0`.
    fn solve_cg<S, T>(&self, b: &Arr1<S>, x0: &Arr1<T>, params: &CgParams)
        -> CgResult<CgSolution>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
        Self: Sized,
    {
        ShapeMismatch::check(&[self.size()], b.shape())?;
        cg::try_solve(|p| self.apply(&p.view()), b, x0, params)
    }
}

impl<S> LinearOperator for nd::ArrayBase<S, nd::Ix2>
where S: nd::Data<Elem = f64>
{
    fn size(&self) -> usize { self.ncols() }

    fn apply(&self, v: &nd::ArrayView1<f64>)
        -> Result<nd::Array1<f64>, ShapeMismatch>
    {
        ShapeMismatch::check(&[self.ncols()], v.shape())?;
        Ok(self.dot(v))
    }
}

/// The `d`-dimensional operator `Σ_t (⊗ K or M) + ⊗ M`, applied without ever
/// forming its matrix.
///
/// Borrows the one-dimensional `K` and `M`, which are only read; any number of
/// operators may share them.
#[derive(Copy, Clone, Debug)]
pub struct TensorOperator<'a> {
    k: nd::ArrayView2<'a, f64>,
    m: nd::ArrayView2<'a, f64>,
    disc: Discretization,
}

impl<'a> TensorOperator<'a> {
    /// Create a new operator for `d` dimensions from the one-dimensional
    /// stiffness and mass matrices.
    ///
    /// Fails if `K` and `M` are not both square with the `n` given by `disc`.
    pub fn new<S, T>(
        k: &'a nd::ArrayBase<S, nd::Ix2>,
        m: &'a nd::ArrayBase<T, nd::Ix2>,
        disc: Discretization,
    ) -> Result<Self, ShapeMismatch>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        let n = disc.n();
        ShapeMismatch::check(&[n, n], k.shape())?;
        ShapeMismatch::check(&[n, n], m.shape())?;
        Ok(Self { k: k.view(), m: m.view(), disc })
    }

    /// Create a new operator for `d` dimensions from a set of one-dimensional
    /// matrices.
    pub fn from_matrices(mats: &'a Matrices1D, d: usize)
        -> Result<Self, DiscretizationError>
    {
        let disc = Discretization::new(mats.n(), d)?;
        Ok(Self { k: mats.k().view(), m: mats.m().view(), disc })
    }

    // `mats.n()` must equal `disc.n()`
    pub(crate) fn with_discretization(mats: &'a Matrices1D, disc: Discretization)
        -> Self
    {
        debug_assert_eq!(mats.n(), disc.n());
        Self { k: mats.k().view(), m: mats.m().view(), disc }
    }

    /// The discretization this operator acts on.
    pub fn discretization(&self) -> Discretization { self.disc }

    /// Apply the operator to a coefficient array of shape `(n,)*d`.
    pub fn apply_array<S>(&self, v: &nd::ArrayBase<S, nd::IxDyn>)
        -> Result<nd::ArrayD<f64>, ShapeMismatch>
    where S: nd::Data<Elem = f64>
    {
        ShapeMismatch::check(&self.disc.shape(), v.shape())?;
        Ok(self.contract(v))
    }

    // sum over terms of the Kronecker rule; `prefix` holds M applied along
    // every axis before the current term's K axis
    fn contract<S>(&self, v: &nd::ArrayBase<S, nd::IxDyn>) -> nd::ArrayD<f64>
    where S: nd::Data<Elem = f64>
    {
        let d = self.disc.d();
        let mut w: nd::ArrayD<f64> = nd::ArrayD::zeros(v.raw_dim());
        let mut prefix: nd::ArrayD<f64> = v.to_owned();
        for t in 0..d {
            let mut term = contract_axis(&self.k, &prefix, t);
            for axis in t + 1..d {
                term = contract_axis(&self.m, &term, axis);
            }
            w += &term;
            prefix = contract_axis(&self.m, &prefix, t);
        }
        w += &prefix;
        w
    }
}

impl<'a> LinearOperator for TensorOperator<'a> {
    fn size(&self) -> usize { self.disc.size() }

    fn apply(&self, v: &nd::ArrayView1<f64>)
        -> Result<nd::Array1<f64>, ShapeMismatch>
    {
        let arr = reshape(v, &self.disc.shape())?;
        Ok(flatten(&self.contract(&arr)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_linalg::Norm;
    use crate::{
        tensor::assemble,
        utils::max_abs_diff,
    };

    // deterministic, irregular test data
    fn noise(len: usize, seed: u64) -> nd::Array1<f64> {
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        (0..len)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
            })
            .collect()
    }

    fn relative_error(a: &nd::Array1<f64>, b: &nd::Array1<f64>) -> f64 {
        (a - b).norm_l2() / b.norm_l2()
    }

    #[test]
    fn rejects_mismatched_matrices() {
        let mats = Matrices1D::new(4).unwrap();
        let disc = Discretization::new(5, 2).unwrap();
        assert!(TensorOperator::new(mats.k(), mats.m(), disc).is_err());
    }

    #[test]
    fn from_matrices() {
        let mats = Matrices1D::new(5).unwrap();
        let op = TensorOperator::from_matrices(&mats, 3).unwrap();
        assert_eq!(op.discretization(), Discretization::new(5, 3).unwrap());
        assert_eq!(op.size(), 125);
        assert!(TensorOperator::from_matrices(&mats, 0).is_err());
    }

    #[test]
    fn one_dimension_matches_a() {
        let mats = Matrices1D::new(7).unwrap();
        let disc = Discretization::new(7, 1).unwrap();
        let op = TensorOperator::new(mats.k(), mats.m(), disc).unwrap();
        let v = noise(7, 1);
        let w = op.apply(&v.view()).unwrap();
        assert!(max_abs_diff(&w, &mats.a().dot(&v)) < 1e-13);
    }

    #[test]
    fn matches_dense_operator() {
        for (n, d, seed) in [(6, 2, 2), (9, 2, 3), (5, 3, 4), (7, 3, 5), (3, 4, 6)] {
            let mats = Matrices1D::new(n).unwrap();
            let disc = Discretization::new(n, d).unwrap();
            let op = TensorOperator::new(mats.k(), mats.m(), disc).unwrap();
            let dense = assemble(mats.k(), mats.m(), d);
            assert_eq!(op.size(), dense.nrows());
            let v = noise(op.size(), seed);
            let w_free = op.apply(&v.view()).unwrap();
            let w_dense = dense.apply(&v.view()).unwrap();
            let err = relative_error(&w_free, &w_dense);
            assert!(err < 1e-10, "n = {}, d = {}: relative error {:e}", n, d, err);
        }
    }

    #[test]
    fn array_and_flat_forms_agree() {
        let mats = Matrices1D::new(5).unwrap();
        let disc = Discretization::new(5, 3).unwrap();
        let op = TensorOperator::new(mats.k(), mats.m(), disc).unwrap();
        let v = noise(disc.size(), 7);
        let arr = disc.reshape(&v).unwrap();
        let w_arr = op.apply_array(&arr).unwrap();
        let w_flat = op.apply(&v.view()).unwrap();
        assert_eq!(disc.flatten(&w_arr).unwrap(), w_flat);
    }

    #[test]
    fn deterministic() {
        let mats = Matrices1D::new(8).unwrap();
        let disc = Discretization::new(8, 3).unwrap();
        let op = TensorOperator::new(mats.k(), mats.m(), disc).unwrap();
        let v = noise(disc.size(), 8);
        let w1 = op.apply(&v.view()).unwrap();
        let w2 = op.apply(&v.view()).unwrap();
        assert_eq!(w1, w2);
    }

    #[test]
    fn linear() {
        let mats = Matrices1D::new(6).unwrap();
        let disc = Discretization::new(6, 2).unwrap();
        let op = TensorOperator::new(mats.k(), mats.m(), disc).unwrap();
        let u = noise(disc.size(), 9);
        let v = noise(disc.size(), 10);
        let combo = &u * 2.5 - &v;
        let lhs = op.apply(&combo.view()).unwrap();
        let rhs = op.apply(&u.view()).unwrap() * 2.5 - op.apply(&v.view()).unwrap();
        assert!(relative_error(&lhs, &rhs) < 1e-13);
    }

    #[test]
    fn symmetric_positive_definite() {
        let mats = Matrices1D::new(5).unwrap();
        let disc = Discretization::new(5, 3).unwrap();
        let op = TensorOperator::new(mats.k(), mats.m(), disc).unwrap();
        let u = noise(disc.size(), 11);
        let v = noise(disc.size(), 12);
        let au = op.apply(&u.view()).unwrap();
        let av = op.apply(&v.view()).unwrap();
        assert!((v.dot(&au) - u.dot(&av)).abs() < 1e-12 * au.norm_l2() * v.norm_l2());
        assert!(u.dot(&au) > 0.0);
    }

    #[test]
    fn constants_see_only_mass() {
        // K annihilates constants, so A 1 = (M ⊗ M) 1
        let mats = Matrices1D::new(6).unwrap();
        let disc = Discretization::new(6, 2).unwrap();
        let op = TensorOperator::new(mats.k(), mats.m(), disc).unwrap();
        let ones: nd::Array1<f64> = nd::Array1::ones(disc.size());
        let w = op.apply(&ones.view()).unwrap();
        let mm = crate::utils::kron(mats.m(), mats.m()).dot(&ones);
        assert!(max_abs_diff(&w, &mm) < 1e-11);
        // ∫∫ 1 = 4
        assert!((w.sum() - 4.0).abs() < 1e-11);
    }

    #[test]
    fn shape_errors() {
        let mats = Matrices1D::new(4).unwrap();
        let disc = Discretization::new(4, 2).unwrap();
        let op = TensorOperator::new(mats.k(), mats.m(), disc).unwrap();
        let short: nd::Array1<f64> = nd::Array1::zeros(15);
        assert!(op.apply(&short.view()).is_err());
        let flat: nd::ArrayD<f64> = nd::ArrayD::zeros(nd::IxDyn(&[16]));
        assert!(op.apply_array(&flat).is_err());
        assert!(mats.a().apply(&short.view()).is_err());
    }
}
