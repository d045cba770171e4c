//! Miscellaneous tools.

use ndarray::{ self as nd, Ix1, Ix2 };
use crate::Arr2;

/// Compute the Kronecker product `a ⊗ b`.
///
/// For `a` of shape `(p, q)` and `b` of shape `(r, s)` the result has shape
/// `(p r, q s)` with `(a ⊗ b)[[i r + k, j s + l]] = a[[i, j]] b[[k, l]]`, i.e.
/// row-major ordering in which the factor on the left owns the slowest index.
pub fn kron<S, T>(a: &Arr2<S>, b: &Arr2<T>) -> nd::Array2<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let (p, q) = a.dim();
    let (r, s) = b.dim();
    let mut out: nd::Array2<f64> = nd::Array2::zeros((p * r, q * s));
    for ((i, j), aij) in a.indexed_iter() {
        out.slice_mut(nd::s![i * r..(i + 1) * r, j * s..(j + 1) * s])
            .assign(&(b * *aij));
    }
    out
}

/// Contract `v` along `axis` with a dense matrix, i.e. compute
/// ```text
/// out[.., i, ..] = Σ_k mat[i, k] v[.., k, ..]
/// ```
/// where the summed index sits in position `axis`. The output has the shape of
/// `v` with the length of `axis` replaced by `mat.nrows()`.
///
/// Each lane along `axis` is an independent matrix-vector product, so the
/// cost is *O*(`mat.nrows()` × `v.len()`).
///
/// *Panics if `axis` is out of bounds for `v` or `mat.ncols()` does not equal
/// the length of `v` along `axis`*.
pub fn contract_axis<S, T>(
    mat: &Arr2<S>,
    v: &nd::ArrayBase<T, nd::IxDyn>,
    axis: usize,
) -> nd::ArrayD<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let ax = nd::Axis(axis);
    assert_eq!(
        mat.ncols(), v.len_of(ax),
        "utils::contract_axis: matrix columns must match the contracted axis",
    );
    let mut shape: Vec<usize> = v.shape().to_vec();
    shape[axis] = mat.nrows();
    let mut out: nd::ArrayD<f64> = nd::ArrayD::zeros(nd::IxDyn(&shape));
    nd::Zip::from(out.lanes_mut(ax)).and(v.lanes(ax))
        .for_each(|mut o, l| lane_product(mat, &l, &mut o));
    out
}

// o = mat · l
fn lane_product<S, T, U>(
    mat: &Arr2<S>,
    l: &nd::ArrayBase<T, Ix1>,
    o: &mut nd::ArrayBase<U, Ix1>,
)
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    U: nd::DataMut<Elem = f64>,
{
    nd::linalg::general_mat_vec_mul(1.0, mat, l, 0.0, o);
}

/// Return `true` if `a` is square and equal to its transpose up to an absolute
/// tolerance.
pub fn is_symmetric<S>(a: &nd::ArrayBase<S, Ix2>, tol: f64) -> bool
where S: nd::Data<Elem = f64>
{
    a.is_square()
        && a.indexed_iter().all(|((i, j), aij)| (aij - a[[j, i]]).abs() <= tol)
}

/// Largest absolute element-wise difference between two arrays of the same
/// shape.
///
/// *Panics if the shapes differ*.
pub fn max_abs_diff<S, T, D>(
    a: &nd::ArrayBase<S, D>,
    b: &nd::ArrayBase<T, D>,
) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    nd::Zip::from(a).and(b)
        .fold(0.0_f64, |acc, ak, bk| acc.max((ak - bk).abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ array, Dimension };

    #[test]
    fn kron_small() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[0.0, 5.0], [6.0, 7.0]];
        let expected = array![
            [ 0.0,  5.0,  0.0, 10.0],
            [ 6.0,  7.0, 12.0, 14.0],
            [ 0.0, 15.0,  0.0, 20.0],
            [18.0, 21.0, 24.0, 28.0],
        ];
        assert_eq!(kron(&a, &b), expected);
    }

    #[test]
    fn kron_identity_is_block_diagonal() {
        let eye: nd::Array2<f64> = nd::Array2::eye(3);
        let b = array![[1.0, 2.0], [3.0, 4.0]];
        let k = kron(&eye, &b);
        assert_eq!(k.dim(), (6, 6));
        assert_eq!(k.slice(nd::s![2..4, 2..4]), b);
        assert_eq!(k.slice(nd::s![0..2, 2..4]), nd::Array2::<f64>::zeros((2, 2)));
    }

    #[test]
    fn contract_each_axis() {
        let mat = array![[1.0, 2.0, 0.0], [0.0, -1.0, 3.0]];
        let v: nd::ArrayD<f64>
            = nd::Array::from_shape_fn(nd::IxDyn(&[3, 3, 3]), |idx| {
                (idx[0] * 9 + idx[1] * 3 + idx[2]) as f64
            });
        for axis in 0..3 {
            let out = contract_axis(&mat, &v, axis);
            let mut expected_shape = vec![3, 3, 3];
            expected_shape[axis] = 2;
            assert_eq!(out.shape(), expected_shape.as_slice());
            for (idx, o) in out.indexed_iter() {
                let mut src = idx.clone();
                let expected: f64
                    = (0..3)
                    .map(|k| {
                        src[axis] = k;
                        mat[[idx[axis], k]] * v[src.slice()]
                    })
                    .sum();
                assert_eq!(*o, expected);
            }
        }
    }

    #[test]
    fn contract_matches_matrix_product() {
        let mat = array![[2.0, 1.0], [1.0, 3.0]];
        let v = array![[1.0, -1.0], [0.5, 2.0]];
        let left = contract_axis(&mat, &v.clone().into_dyn(), 0);
        let right = contract_axis(&mat, &v.clone().into_dyn(), 1);
        assert_eq!(left, mat.dot(&v).into_dyn());
        assert_eq!(right, v.dot(&mat.t()).into_dyn());
    }

    #[test]
    #[should_panic]
    fn contract_mismatch_panics() {
        let mat: nd::Array2<f64> = nd::Array2::eye(2);
        let v: nd::ArrayD<f64> = nd::ArrayD::zeros(nd::IxDyn(&[3, 3]));
        contract_axis(&mat, &v, 0);
    }

    #[test]
    fn symmetry_check() {
        assert!(is_symmetric(&array![[1.0, 2.0], [2.0, 5.0]], 0.0));
        assert!(!is_symmetric(&array![[1.0, 2.0], [2.1, 5.0]], 1e-3));
        assert!(!is_symmetric(&array![[1.0, 2.0, 3.0], [2.0, 5.0, 6.0]], 1.0));
    }
}
