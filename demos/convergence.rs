use chebel::{
    cg::CgParams,
    problem::{ convergence_study, cosine_solution, Path, Problem },
};

// spectral convergence of the manufactured cosine solution in one through
// three dimensions, for both solve paths

fn main() {
    let params = CgParams { epsilon: Some(1e-10), ..CgParams::default() };

    for (d, ns) in [(1, 4..=24), (2, 4..=16), (3, 4..=10)] {
        println!("d = {}", d);
        println!("{:>4}  {:>12}  {:>12}", "n", "dense", "matrix-free");
        // the dense system has n^(2d) entries; skip it where it gets large
        let dense_max = if d == 3 { 8 } else { *ns.end() };
        let dense = convergence_study(
            *ns.start()..=dense_max, d, Path::Dense, &params).unwrap();
        let free = convergence_study(
            ns, d, Path::MatrixFree, &params).unwrap();
        for (k, (n, err_free)) in free.into_iter().enumerate() {
            match dense.get(k) {
                Some((_, err_dense)) => {
                    println!("{:>4}  {:>12.3e}  {:>12.3e}", n, err_dense, err_free);
                },
                None => {
                    println!("{:>4}  {:>12}  {:>12.3e}", n, "-", err_free);
                },
            }
        }
        println!();
    }

    // pointwise check of a single 2D solve
    let exact = cosine_solution(2);
    let problem = Problem::new(16, 2).unwrap();
    let rhs = problem.rhs(|x| exact.forcing(x));
    let sol = problem.solve_cg(&rhs, &params).unwrap();
    println!("2D, n = 16: {} CG iterations, residual {:.3e}", sol.iters, sol.residual);
    let points = ndarray::array![[0.0, 0.0], [0.25, -0.5], [0.9, 0.1]];
    let values = problem.evaluate(&sol.x, &points).unwrap();
    for (p, v) in points.rows().into_iter().zip(&values) {
        let u = exact.exact(&[p[0], p[1]]);
        println!("u({:+.2}, {:+.2}) = {:+.12}  (exact {:+.12})", p[0], p[1], v, u);
    }
}
