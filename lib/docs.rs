//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [One-dimensional matrices](#one-dimensional-matrices)
//! - [Higher dimensions](#higher-dimensions)
//! - [Matrix-free application](#matrix-free-application)
//! - [Conjugate gradient](#conjugate-gradient)
//! - [Measuring errors](#measuring-errors)
//!
//! # Background
//! We seek approximate solutions to the screened Poisson equation on the
//! hyper-cube Ω = \[-1, 1\]<sup>*d*</sup>,
//! ```text
//! -Δu + u = f   in Ω
//!   ∂u/∂n = 0   on ∂Ω
//! ```
//! Multiplying by a test function *v* and integrating by parts, the boundary
//! term vanishes by the Neumann condition and we arrive at the weak form:
//! find *u* such that
//! ```text
//! ∫ ∇u · ∇v dx + ∫ u v dx = ∫ f v dx
//! ```
//! for all *v*. Both *u* and *v* are then restricted to the space of
//! polynomials of degree at most *n* - 1 in each coordinate, spanned by
//! products of one-dimensional Lagrange cardinal polynomials
//! ```text
//!          ___   x - x[k]
//! l_i(x) = | |  ---------
//!          k≠i  x[i] - x[k]
//! ```
//! on the Chebyshev points of the second kind,
//! ```text
//! x[j] = -cos(π j / (n - 1)),   j ∊ {0, ..., n - 1}
//! ```
//! which cluster toward the ends of the interval and keep high-order
//! interpolation free of the Runge phenomenon. The cardinal property
//! *l*<sub>*i*</sub>(*x*\[*j*\]) = *δ*<sub>*ij*</sub> makes the unknown
//! coefficients equal to the values of the discrete solution at the nodes.
//!
//! The cardinal polynomials are evaluated in the second (true) barycentric
//! form[^1],
//! ```text
//!           w[i] / (x - x[i])
//! l_i(x) = -------------------
//!          Σ_k w[k] / (x - x[k])
//! ```
//! where, for Chebyshev points, the weights reduce to *w*\[*i*\] =
//! (-1)<sup>*n*-1-*i*</sup> *δ*<sub>*i*</sub> with *δ*<sub>*i*</sub> = 1/2 at
//! the two endpoints and 1 elsewhere. Derivatives at the nodes are taken from
//! the barycentric differentiation matrix,
//! ```text
//!                w[j] / w[i]
//! l_j'(x[i]) = -------------   (i ≠ j)
//!              x[i] - x[j]
//!
//! l_i'(x[i]) = -Σ_{k≠i} l_k'(x[i])
//! ```
//! and elsewhere from the logarithmic derivative of the product form.
//!
//! # One-dimensional matrices
//! With *n*<sub>*q*</sub> Gauss-Legendre points *q*\[*α*\] and weights
//! *w*<sub>*q*</sub>\[*α*\], define the evaluation matrices
//! ```text
//! B[i, α] = l_i(q[α])
//! D[i, α] = l_i'(q[α])
//! ```
//! so that the mass and stiffness matrices are weighted Gram matrices,
//! ```text
//! M = B W Bᵀ
//! K = D W Dᵀ
//! A = K + M
//! ```
//! with *W* the diagonal matrix of quadrature weights. An
//! *n*<sub>*q*</sub>-point Gauss rule is exact for polynomials of degree
//! 2 *n*<sub>*q*</sub> - 1. The integrands of *M* have degree 2 *n* - 2 and
//! those of *K* degree 2 *n* - 4, so *n*<sub>*q*</sub> = *n* already gives the
//! exact integrals and fewer points are rejected.
//!
//! *M* is positive definite (a Gram matrix of linearly independent functions
//! under a positive weight) and *K* is positive semi-definite with the
//! constants as its null space, consistent with a pure Neumann problem for
//! -Δ. The added mass term makes *A* positive definite.
//!
//! # Higher dimensions
//! In *d* dimensions the basis is the set of products
//! *l*<sub>*i*₀</sub>(*x*₀) ⋯ *l*<sub>*i*<sub>*d*-1</sub></sub>(*x*<sub>*d*-1</sub>),
//! so every integral over Ω factorizes into one-dimensional integrals. The
//! gradient term splits into one contribution per direction, and the system
//! matrix is a sum of *d* + 1 Kronecker products:
//! ```text
//! A_d = K ⊗ M ⊗ ... ⊗ M
//!     + M ⊗ K ⊗ ... ⊗ M
//!     + ...
//!     + M ⊗ M ⊗ ... ⊗ K
//!     + M ⊗ M ⊗ ... ⊗ M
//! ```
//! For *d* = 2 this reads, with multi-indices (*i*, *j*) and (*k*, *l*),
//! ```text
//! A_2[(i, j), (k, l)] = K[i, k] M[j, l] + M[i, k] K[j, l] + M[i, k] M[j, l]
//! ```
//! Coefficient arrays of shape (*n*, ..., *n*) are flattened in row-major
//! order, for which the left-most factor in each Kronecker product acts on
//! axis 0. Each term is a product of positive (semi-)definite factors and the
//! final term is strictly positive definite, so *A*<sub>*d*</sub> is symmetric
//! positive definite.
//!
//! # Matrix-free application
//! *A*<sub>*d*</sub> has *n*<sup>2*d*</sup> entries, and a product with it
//! costs as much, but a Kronecker product never needs to be formed to be
//! applied. For a coefficient array *v*,
//! ```text
//! ((X ⊗ Y ⊗ Z) v)[i, j, k] = Σ_{l,m,o} X[i, l] Y[j, m] Z[k, o] v[l, m, o]
//! ```
//! which is three successive contractions of a single axis with an *n* × *n*
//! matrix, each costing *n*<sup>*d*+1</sup> operations. Terms also share work:
//! all of them begin with *M* along a (possibly empty) run of leading axes, so
//! ```text
//! P_0 = v
//! P_t = M along axis t - 1 of P_{t-1}
//!
//! A_d v = Σ_{t<d} (K along axis t, then M along axes t + 1, ..., d - 1 of P_t)
//!       + P_d
//! ```
//! For *d* = 2 this is
//! ```text
//! Mv = M along axis 0 of v
//! w  = M along axis 1 of (K along axis 0 of v)
//!    + K along axis 1 of Mv
//!    + M along axis 1 of Mv
//! ```
//! for a total cost of *O*(*d*² *n*<sup>*d*+1</sup>) versus
//! *O*(*n*<sup>2*d*</sup>) for the assembled matrix.
//!
//! # Conjugate gradient
//! Since *A*<sub>*d*</sub> is symmetric positive definite, the system can be
//! solved with the method of conjugate gradients[^2], which needs nothing of
//! the operator but its action on a vector:
//! ```text
//! r₀ = b - A x₀
//! p₀ = r₀
//!
//! α_k     = (r_k · r_k) / (p_k · A p_k)
//! x_{k+1} = x_k + α_k p_k
//! r_{k+1} = r_k - α_k A p_k
//! β_k     = (r_{k+1} · r_{k+1}) / (r_k · r_k)
//! p_{k+1} = r_{k+1} + β_k p_k
//! ```
//! In exact arithmetic *r*<sub>*k*</sub> = *b* - *A* *x*<sub>*k*</sub>, but
//! in floating point the recursively updated residual drifts from the true
//! one over many iterations. The solver therefore checks the true residual
//! before accepting convergence (restarting from it if the two disagree),
//! and may optionally replace the recursive residual with the true one every
//! few iterations. The number of iterations grows with the condition number
//! of *A*<sub>*d*</sub>, which for this discretization grows as a power of
//! *n*.
//!
//! # Measuring errors
//! The manufactured solution
//! ```text
//! u(x) = Π_a cos(π x_a)
//! ```
//! has vanishing normal derivative on ∂Ω and satisfies -Δ*u* + *u* = (1 +
//! *d* *π*²) *u*. Errors of the discrete solution *u*<sub>*h*</sub> are
//! measured in the L² norm, approximated with a Gauss-Legendre rule of
//! [`ERROR_QUAD_FACTOR`][crate::ERROR_QUAD_FACTOR] · *n* points per direction
//! so that the measurement itself is more accurate than the discretization.
//! Since *u* is entire, the error decays faster than any power of *n*, down to
//! the level of floating-point roundoff.
//!
//! [^1]: J.-P. Berrut and L. N. Trefethen, "Barycentric Lagrange
//! Interpolation." SIAM Review **46** 3 (2004).
//!
//! [^2]: M. R. Hestenes and E. Stiefel, "Methods of Conjugate Gradients for
//! Solving Linear Systems." Journal of Research of the National Bureau of
//! Standards **49** 6 (1952).
