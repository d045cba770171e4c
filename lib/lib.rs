//! Provides a dimension-generic spectral-element discretization and solver for
//! the screened Poisson problem with homogeneous Neumann boundary conditions,
//! ```text
//! -Δu + u = f   on [-1, 1]^d
//! ```
//! using a single element per direction: Lagrange cardinal polynomials on
//! Chebyshev points of the second kind, with Gauss-Legendre quadrature.
//!
//! Provides implementations for the following numerical routines:
//! - Barycentric Lagrange bases on Chebyshev points ([`basis`])
//! - Gauss-Legendre quadrature ([`quadrature`])
//! - One-dimensional mass and stiffness matrices ([`matrices`])
//! - Kronecker-product extension to `d` dimensions ([`tensor`])
//! - Matrix-free application of the `d`-dimensional operator ([`matfree`])
//! - Operator-only conjugate gradient ([`cg`])
//! - Right-hand side assembly, dense and matrix-free solves, and L² error
//!   measurement ([`problem`])
//!
//! ```
//! use chebel::{ cg::CgParams, problem::{ convergence_study, Path } };
//!
//! let params = CgParams { epsilon: Some(1e-10), ..CgParams::default() };
//! let errors = convergence_study([8, 16], 1, Path::MatrixFree, &params).unwrap();
//! assert!(errors[1].1 < errors[0].1);
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod basis;
pub mod quadrature;
pub mod utils;
pub mod matrices;
pub mod tensor;
pub mod matfree;
pub mod cg;
pub mod problem;

pub mod docs;

pub(crate) const DEF_EPSILON: f64 = 1e-5;
pub(crate) const DEF_MAXITERS: usize = 10000;

/// Over-resolution factor of the quadrature used to measure errors: `n` points
/// per direction in the discretization are checked against
/// `ERROR_QUAD_FACTOR · n` Gauss-Legendre points.
pub const ERROR_QUAD_FACTOR: usize = 2;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
