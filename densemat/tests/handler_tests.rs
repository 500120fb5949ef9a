use densemat::handlers::{self, Operand, Output};
use densemat::{MatrixError, Operation};

mod common;
use common::{init_logger, random_rows, SimpleRng};

#[test]
fn test_route_by_name() {
    init_logger();
    let a = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
    let requests: Vec<(&str, Option<Operand>, Output)> = vec![
        ("determinant", None, Output::Scalar(5.0)),
        ("transpose", None, Output::Matrix(a.clone())),
        (
            "multiply",
            Some(Operand::Matrix(vec![vec![1.0], vec![1.0]])),
            Output::Matrix(vec![vec![3.0], vec![4.0]]),
        ),
        (
            "sub",
            Some(Operand::Matrix(a.clone())),
            Output::Matrix(vec![vec![0.0, 0.0], vec![0.0, 0.0]]),
        ),
    ];
    for (name, right, expected) in requests {
        let op: Operation = name.parse().unwrap();
        assert_eq!(op.apply(&a, right.as_ref()).unwrap(), expected, "operation {}", name);
    }
}

#[test]
fn test_unknown_operation() {
    match "cholesky".parse::<Operation>() {
        Err(MatrixError::InvalidArgument(msg)) => assert!(msg.contains("cholesky")),
        other => panic!("expected invalid argument, got {:?}", other),
    }
}

#[test]
fn test_solve_handlers_agree() {
    let mut rng = SimpleRng::new(3);
    let mut a = random_rows(&mut rng, 4, 4);
    for (i, row) in a.iter_mut().enumerate() {
        row[i] += 4.0;
    }
    let b: Vec<f64> = (0..4).map(|_| rng.next_f64()).collect();
    let x = handlers::solve(&a, &b).unwrap();
    let y = handlers::solve_ec(&a, &b).unwrap();
    for (xi, yi) in x.iter().zip(&y) {
        assert!((xi - yi).abs() < 1e-13);
    }
}

#[test]
fn test_invert_twice() {
    let a = vec![vec![4.0, 7.0], vec![2.0, 6.0]];
    let back = handlers::invert(&handlers::invert(&a).unwrap()).unwrap();
    for (row, orig) in back.iter().zip(&a) {
        for (x, y) in row.iter().zip(orig) {
            assert!((x - y).abs() < 1e-13);
        }
    }
}
