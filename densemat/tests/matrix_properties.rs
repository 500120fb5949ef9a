//! Algebraic properties checked over seeded random matrices

use approx::assert_abs_diff_eq;
use densemat::precision::{norm_2, residual};
use densemat::{Matrix, MatrixError, TwoFloatPrecision, Vector};

mod common;
use common::{hilbert, init_logger, max_abs_diff, random_matrix, random_well_conditioned, SimpleRng};

fn residual_norm(a: &Matrix, x: &Vector, b: &[f64]) -> f64 {
    let r = residual::<TwoFloatPrecision>(&a.to_rows().unwrap(), x.data(), b);
    norm_2::<TwoFloatPrecision>(&r)
}

#[test]
fn test_transpose_twice_is_identity() {
    let mut rng = SimpleRng::new(42);
    for (r, c) in [(1, 1), (2, 5), (4, 3), (6, 6)] {
        let a = random_matrix(&mut rng, r, c);
        let att = a.transposed().unwrap().transposed().unwrap();
        assert_eq!(att, a);
    }
}

#[test]
fn test_determinant_of_transpose() {
    let mut rng = SimpleRng::new(7);
    for n in 2..7 {
        let a = random_well_conditioned(&mut rng, n);
        let det = a.determinant().unwrap();
        let det_t = a.transposed().unwrap().determinant().unwrap();
        assert_abs_diff_eq!(det, det_t, epsilon = 1e-10 * det.abs().max(1.0));
    }
}

#[test]
fn test_determinant_is_multiplicative() {
    let mut rng = SimpleRng::new(11);
    let a = random_well_conditioned(&mut rng, 4);
    let b = random_well_conditioned(&mut rng, 4);
    let ab = Matrix::multiply_matrices(&a, &b).unwrap();
    let expected = a.determinant().unwrap() * b.determinant().unwrap();
    assert_abs_diff_eq!(ab.determinant().unwrap(), expected, epsilon = 1e-10 * expected.abs());
}

#[test]
fn test_multiplication_is_associative() {
    let mut rng = SimpleRng::new(1234);
    let a = random_matrix(&mut rng, 3, 4);
    let b = random_matrix(&mut rng, 4, 2);
    let c = random_matrix(&mut rng, 2, 5);

    let ab_c = Matrix::multiply_matrices(&Matrix::multiply_matrices(&a, &b).unwrap(), &c).unwrap();
    let a_bc = Matrix::multiply_matrices(&a, &Matrix::multiply_matrices(&b, &c).unwrap()).unwrap();
    assert_eq!(ab_c.size().unwrap(), (3, 5));
    assert!(max_abs_diff(&ab_c, &a_bc) < 1e-14);
}

#[test]
fn test_add_then_sub_recovers_operand() {
    let mut rng = SimpleRng::new(99);
    let a = random_matrix(&mut rng, 5, 3);
    let b = random_matrix(&mut rng, 5, 3);
    let mut c = a.clone();
    c.add(&b).unwrap();
    c.sub(&b).unwrap();
    assert!(max_abs_diff(&a, &c) <= 1e-15);
}

#[test]
fn test_inverse_times_matrix_is_identity() {
    let mut rng = SimpleRng::new(2024);
    for n in 1..7 {
        let a = random_well_conditioned(&mut rng, n);
        let inv = a.inverse().unwrap();
        let prod = Matrix::multiply_matrices(&inv, &a).unwrap();
        assert!(max_abs_diff(&prod, &Matrix::identity(n).unwrap()) < 1e-13);

        // det(A^-1) == 1 / det(A)
        let det = a.determinant().unwrap();
        assert_abs_diff_eq!(inv.cached_determinant().unwrap() * det, 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_solve_matches_inverse() {
    let mut rng = SimpleRng::new(5);
    let a = random_well_conditioned(&mut rng, 5);
    let b: Vec<f64> = (0..5).map(|_| rng.next_in(-10.0, 10.0)).collect();

    let x = Matrix::solve(&a, &Vector::new(b.clone())).unwrap();
    let y = a.inverse().unwrap().vector_multiply(&Vector::new(b)).unwrap();
    for (xi, yi) in x.data().iter().zip(y.data()) {
        assert_abs_diff_eq!(*xi, *yi, epsilon = 1e-12);
    }
}

#[test]
fn test_refinement_on_hilbert_system() {
    init_logger();
    let h = hilbert(5);
    let ones = Vector::new(vec![1.0; 5]);
    let b = h.vector_multiply(&ones).unwrap();

    let plain = Matrix::solve(&h, &b).unwrap();
    let refined = Matrix::solve_ec(&h, &b).unwrap();

    assert!(residual_norm(&h, &refined, b.data()) <= residual_norm(&h, &plain, b.data()));
    for xi in refined.data() {
        assert_abs_diff_eq!(*xi, 1.0, epsilon = 1e-8);
    }
}

#[test]
fn test_refinement_on_random_systems() {
    init_logger();
    let mut rng = SimpleRng::new(31337);
    for n in 2..8 {
        let a = random_well_conditioned(&mut rng, n);
        let b: Vec<f64> = (0..n).map(|_| rng.next_in(-1.0, 1.0)).collect();
        let plain = Matrix::solve(&a, &Vector::new(b.clone())).unwrap();
        let refined = Matrix::solve_ec(&a, &Vector::new(b.clone())).unwrap();
        assert!(residual_norm(&a, &refined, &b) <= residual_norm(&a, &plain, &b));
    }
}

#[test]
fn test_hilbert_singularity_guard() {
    // det(H_7) / |H_7| is far below the default cutoff
    let h = hilbert(7);
    assert!(matches!(h.determinant(), Err(MatrixError::Singular { .. })));
    assert!(matches!(h.inverse(), Err(MatrixError::Singular { .. })));

    // With the cutoff disabled the system is solved anyway
    let mut h = hilbert(7);
    h.set_zero_threshold(0.0).unwrap();
    let b = h.vector_multiply(&Vector::new(vec![1.0; 7])).unwrap();
    let x = Matrix::solve_ec(&h, &b).unwrap();
    for xi in x.data() {
        assert_abs_diff_eq!(*xi, 1.0, epsilon = 1e-4);
    }
}

#[test]
fn test_identity_properties() {
    for n in 1..6 {
        let i = Matrix::identity(n).unwrap();
        assert_eq!(i.determinant().unwrap(), 1.0);
        assert_eq!(i.inverse().unwrap(), i);
    }
}
