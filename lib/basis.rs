//! Lagrange cardinal bases on Chebyshev points of the second kind.
//!
//! Basis functions are held in barycentric form[^1], which is stable for the
//! polynomial orders used by spectral elements (up to a few hundred) and
//! gives both values and derivatives in *O*(*n*) per function per point.
//!
//! ```
//! use chebel::basis::{ LagrangeBasis, Polynomial };
//!
//! let basis = LagrangeBasis::new(6).unwrap();
//! let l3 = basis.get(3).unwrap();
//! let x3 = basis.nodes()[3];
//! assert_eq!(l3.eval(x3), 1.0);
//! assert_eq!(l3.eval(basis.nodes()[2]), 0.0);
//! ```
//!
//! [^1]: J.-P. Berrut and L. N. Trefethen, "Barycentric Lagrange
//! Interpolation." SIAM Review **46** 3 (2004).

use std::f64::consts::PI;
use ndarray as nd;
use crate::{
    Arr1,
    error::DiscretizationError,
};

pub type BasisResult<T> = Result<T, DiscretizationError>;

/// Generate `n` Chebyshev points of the second kind on `[-1, 1]`, in
/// increasing order.
///
/// The points are `-cos(π j / (n - 1))`, computed through a sine so that the
/// set is exactly symmetric about zero and, for odd `n`, contains an exact
/// zero.
pub fn chebyshev_points(n: usize) -> BasisResult<nd::Array1<f64>> {
    DiscretizationError::check_points(n)?;
    let m = (n - 1) as f64;
    let x: nd::Array1<f64>
        = (0..n)
        .map(|j| (PI * (2.0 * j as f64 - m) / (2.0 * m)).sin())
        .collect();
    Ok(x)
}

// barycentric weights for Chebyshev points of the second kind, up to an
// overall positive factor; the sign pattern matches the true weights
// 1 / Π_{k≠j}(x_j - x_k) for increasing nodes
fn chebyshev_weights(n: usize) -> nd::Array1<f64> {
    (0..n)
        .map(|j| {
            let sign = if (n - 1 - j) % 2 == 0 { 1.0 } else { -1.0 };
            let delta = if j == 0 || j == n - 1 { 0.5 } else { 1.0 };
            sign * delta
        })
        .collect()
}

/// Capability shared by every univariate polynomial the crate evaluates.
pub trait Polynomial {
    /// Evaluate at a single point.
    fn eval(&self, x: f64) -> f64;

    /// Evaluate the first derivative at a single point.
    fn deriv(&self, x: f64) -> f64;

    /// Evaluate at every point in an array.
    fn eval_arr<S>(&self, x: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        x.mapv(|xk| self.eval(xk))
    }

    /// Evaluate the first derivative at every point in an array.
    fn deriv_arr<S>(&self, x: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        x.mapv(|xk| self.deriv(xk))
    }
}

/// The full set of `n` Lagrange cardinal polynomials on `n` Chebyshev points.
#[derive(Clone, Debug)]
pub struct LagrangeBasis {
    nodes: nd::Array1<f64>,
    weights: nd::Array1<f64>,
}

impl LagrangeBasis {
    /// Build the basis for `n` interpolation points.
    ///
    /// Fails with [`DiscretizationError::TooFewPoints`] if `n < 2`.
    pub fn new(n: usize) -> BasisResult<Self> {
        let nodes = chebyshev_points(n)?;
        let weights = chebyshev_weights(n);
        Ok(Self { nodes, weights })
    }

    /// Number of basis functions (equivalently, of nodes).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.nodes.len() }

    /// Get a reference to the interpolation nodes.
    pub fn nodes(&self) -> &nd::Array1<f64> { &self.nodes }

    /// Get the `i`-th cardinal function, if it exists.
    pub fn get(&self, i: usize) -> Option<Cardinal<'_>> {
        (i < self.len()).then_some(Cardinal { basis: self, index: i })
    }

    /// Iterate over all cardinal functions in node order.
    pub fn iter(&self) -> impl Iterator<Item = Cardinal<'_>> + '_ {
        (0..self.len()).map(move |index| Cardinal { basis: self, index })
    }

    // index of the node exactly equal to `x`, if any
    fn node_at(&self, x: f64) -> Option<usize> {
        self.nodes.iter().position(|xk| *xk == x)
    }

    // l_j'(x_i) from the barycentric differentiation matrix
    fn node_deriv(&self, j: usize, i: usize) -> f64 {
        let xi = self.nodes[i];
        let wi = self.weights[i];
        if i != j {
            (self.weights[j] / wi) / (xi - self.nodes[j])
        } else {
            -self.nodes.iter().zip(&self.weights).enumerate()
                .filter(|(k, _)| *k != i)
                .map(|(_, (xk, wk))| (wk / wi) / (xi - xk))
                .sum::<f64>()
        }
    }

    fn value(&self, j: usize, x: f64) -> f64 {
        if let Some(i) = self.node_at(x) {
            return if i == j { 1.0 } else { 0.0 };
        }
        let denom: f64
            = self.nodes.iter().zip(&self.weights)
            .map(|(xk, wk)| wk / (x - xk))
            .sum();
        self.weights[j] / (x - self.nodes[j]) / denom
    }

    fn slope(&self, j: usize, x: f64) -> f64 {
        if let Some(i) = self.node_at(x) {
            return self.node_deriv(j, i);
        }
        let logd: f64
            = self.nodes.iter().enumerate()
            .filter(|(m, _)| *m != j)
            .map(|(_, xm)| (x - xm).recip())
            .sum();
        self.value(j, x) * logd
    }

    /// Evaluate all basis functions at a single point.
    pub fn eval_all(&self, x: f64) -> nd::Array1<f64> {
        if let Some(i) = self.node_at(x) {
            let mut e: nd::Array1<f64> = nd::Array1::zeros(self.len());
            e[i] = 1.0;
            return e;
        }
        let mut t: nd::Array1<f64>
            = nd::Zip::from(&self.nodes).and(&self.weights)
            .map_collect(|xk, wk| wk / (x - xk));
        let denom = t.sum();
        t /= denom;
        t
    }

    /// Evaluate the derivatives of all basis functions at a single point.
    pub fn deriv_all(&self, x: f64) -> nd::Array1<f64> {
        (0..self.len()).map(|j| self.slope(j, x)).collect()
    }

    /// Compute the `n × m` matrix `B[i, α] = l_i(x_α)` for `m` points `x`.
    pub fn eval_matrix<S>(&self, x: &Arr1<S>) -> nd::Array2<f64>
    where S: nd::Data<Elem = f64>
    {
        let mut b: nd::Array2<f64> = nd::Array2::zeros((self.len(), x.len()));
        b.columns_mut().into_iter().zip(x)
            .for_each(|(mut col, xa)| { col.assign(&self.eval_all(*xa)); });
        b
    }

    /// Compute the `n × m` matrix `D[i, α] = l_i'(x_α)` for `m` points `x`.
    pub fn deriv_matrix<S>(&self, x: &Arr1<S>) -> nd::Array2<f64>
    where S: nd::Data<Elem = f64>
    {
        let mut d: nd::Array2<f64> = nd::Array2::zeros((self.len(), x.len()));
        d.columns_mut().into_iter().zip(x)
            .for_each(|(mut col, xa)| { col.assign(&self.deriv_all(*xa)); });
        d
    }
}

/// A single cardinal polynomial `l_i`, borrowed from its [`LagrangeBasis`].
///
/// `l_i` has degree `n - 1`, equals 1 at node `i` and 0 at every other node.
#[derive(Copy, Clone, Debug)]
pub struct Cardinal<'a> {
    basis: &'a LagrangeBasis,
    index: usize,
}

impl<'a> Cardinal<'a> {
    /// Index of the node at which this function is 1.
    pub fn index(&self) -> usize { self.index }

    /// The node at which this function is 1.
    pub fn node(&self) -> f64 { self.basis.nodes[self.index] }
}

impl<'a> Polynomial for Cardinal<'a> {
    fn eval(&self, x: f64) -> f64 { self.basis.value(self.index, x) }

    fn deriv(&self, x: f64) -> f64 { self.basis.slope(self.index, x) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn probe_points() -> nd::Array1<f64> {
        nd::Array1::linspace(-0.987, 0.991, 37)
    }

    #[test]
    fn too_few_points() {
        assert!(matches!(
            LagrangeBasis::new(1),
            Err(DiscretizationError::TooFewPoints(1)),
        ));
        assert!(chebyshev_points(0).is_err());
    }

    #[test]
    fn nodes_are_symmetric_and_sorted() {
        for n in 2..=17 {
            let x = chebyshev_points(n).unwrap();
            assert_eq!(x[0], -1.0);
            assert_eq!(x[n - 1], 1.0);
            assert!(x.iter().zip(x.iter().skip(1)).all(|(a, b)| a < b));
            for j in 0..n {
                assert_eq!(x[j], -x[n - 1 - j]);
            }
            if n % 2 == 1 { assert_eq!(x[n / 2], 0.0); }
        }
    }

    #[test]
    fn nodes_match_cosine_form() {
        let n = 9;
        let x = chebyshev_points(n).unwrap();
        for (j, xj) in x.iter().enumerate() {
            let expected = -(PI * j as f64 / (n - 1) as f64).cos();
            assert_abs_diff_eq!(*xj, expected, epsilon = 1e-15);
        }
    }

    #[test]
    fn linear_basis() {
        let basis = LagrangeBasis::new(2).unwrap();
        let l0 = basis.get(0).unwrap();
        let l1 = basis.get(1).unwrap();
        assert!(basis.get(2).is_none());
        assert_eq!(l0.eval(-1.0), 1.0);
        assert_eq!(l0.eval(1.0), 0.0);
        assert_abs_diff_eq!(l0.eval(0.0), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(l1.eval(0.3), 0.65, epsilon = 1e-15);
        for x in [-1.0, -0.2, 0.0, 0.7, 1.0] {
            assert_abs_diff_eq!(l0.deriv(x), -0.5, epsilon = 1e-15);
            assert_abs_diff_eq!(l1.deriv(x), 0.5, epsilon = 1e-15);
        }
    }

    #[test]
    fn quadratic_basis() {
        // nodes -1, 0, 1
        let basis = LagrangeBasis::new(3).unwrap();
        let l1 = basis.get(1).unwrap();
        for x in [-1.0, -0.4, 0.0, 0.25, 1.0] {
            assert_abs_diff_eq!(l1.eval(x), 1.0 - x * x, epsilon = 1e-14);
            assert_abs_diff_eq!(l1.deriv(x), -2.0 * x, epsilon = 1e-14);
        }
        let l0 = basis.get(0).unwrap();
        assert_abs_diff_eq!(l0.deriv(-1.0), -1.5, epsilon = 1e-14);
        assert_abs_diff_eq!(l0.deriv(1.0), 0.5, epsilon = 1e-14);
    }

    #[test]
    fn cardinal_property() {
        let basis = LagrangeBasis::new(8).unwrap();
        for li in basis.iter() {
            let vals = li.eval_arr(basis.nodes());
            for (j, v) in vals.iter().enumerate() {
                assert_eq!(*v, if j == li.index() { 1.0 } else { 0.0 });
            }
            assert_eq!(li.node(), basis.nodes()[li.index()]);
        }
    }

    #[test]
    fn partition_of_unity() {
        let basis = LagrangeBasis::new(11).unwrap();
        for x in probe_points().iter().chain(basis.nodes()) {
            assert_abs_diff_eq!(basis.eval_all(*x).sum(), 1.0, epsilon = 1e-13);
            assert_abs_diff_eq!(basis.deriv_all(*x).sum(), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn reproduces_polynomials() {
        // p(x) = x³ - 2x + 1 is interpolated exactly by any basis with n ≥ 4
        let p = |x: f64| x.powi(3) - 2.0 * x + 1.0;
        let dp = |x: f64| 3.0 * x.powi(2) - 2.0;
        let basis = LagrangeBasis::new(7).unwrap();
        let coeffs = basis.nodes().mapv(p);
        for x in probe_points().iter().chain(basis.nodes()) {
            let val = coeffs.dot(&basis.eval_all(*x));
            let der = coeffs.dot(&basis.deriv_all(*x));
            assert_abs_diff_eq!(val, p(*x), epsilon = 1e-13);
            assert_abs_diff_eq!(der, dp(*x), epsilon = 1e-11);
        }
    }

    #[test]
    fn single_and_batch_agree() {
        let basis = LagrangeBasis::new(9).unwrap();
        let x = probe_points();
        let b = basis.eval_matrix(&x);
        let d = basis.deriv_matrix(&x);
        assert_eq!(b.dim(), (9, x.len()));
        for li in basis.iter() {
            let i = li.index();
            let bi = li.eval_arr(&x);
            let di = li.deriv_arr(&x);
            for a in 0..x.len() {
                assert_abs_diff_eq!(b[[i, a]], bi[a], epsilon = 1e-14);
                assert_abs_diff_eq!(d[[i, a]], di[a], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let basis = LagrangeBasis::new(6).unwrap();
        let h = 1e-6;
        for li in basis.iter() {
            for x in [-0.9, -0.33, 0.12, 0.58, 0.95] {
                let fd = (li.eval(x + h) - li.eval(x - h)) / (2.0 * h);
                assert_abs_diff_eq!(li.deriv(x), fd, epsilon = 1e-7);
            }
        }
    }
}
