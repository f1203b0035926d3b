//! Integration tests for the demo problems.
//!
//! Short runs only; the full demos use 100 steps.

use alphaq_demos::{DemoProblem, ProgressObserver, format_params};
use alphaq_qaoa::{CostHistory, Optimizer, QaoaRunner};
use approx::assert_abs_diff_eq;
use indicatif::ProgressBar;

/// Test that every built-in problem is valid and has the documented shape.
#[test]
fn test_problem_shapes() {
    let expected = [
        (DemoProblem::Simple, 2, 1, 1),
        (DemoProblem::Chain, 4, 2, 3),
        (DemoProblem::Triangle, 3, 3, 3),
    ];
    for (demo, qubits, layers, terms) in expected {
        let problem = demo.problem().unwrap();
        assert_eq!(problem.num_qubits(), qubits, "{demo}");
        assert_eq!(problem.layers(), layers, "{demo}");
        assert_eq!(problem.hamiltonian().n_terms(), terms, "{demo}");
        assert_eq!(problem.num_parameters(), 2 * layers, "{demo}");
    }
}

/// Test problem name parsing round-trips through Display.
#[test]
fn test_problem_names() {
    for demo in DemoProblem::ALL {
        assert_eq!(demo.name().parse::<DemoProblem>().unwrap(), demo);
    }
    assert!("grid".parse::<DemoProblem>().is_err());
}

/// Test a short run of every demo with both optimizers.
#[test]
fn test_demos_run() {
    for demo in DemoProblem::ALL {
        for optimizer in [Optimizer::adam(0.05), Optimizer::gradient_descent(0.1)] {
            let mut history = CostHistory::new();
            let outcome = QaoaRunner::new(demo.problem().unwrap())
                .with_optimizer(optimizer)
                .with_steps(3)
                .run_with_observer(&mut history)
                .unwrap();
            assert_eq!(history.len(), 4);
            assert!(outcome.params.iter().all(|p| p.is_finite()));
        }
    }
}

/// Test that the triangle demo yields a full-width bitstring.
#[test]
fn test_triangle_interpretation() {
    let demo = DemoProblem::Triangle;
    assert!(demo.interprets_state());
    let runner = QaoaRunner::new(demo.problem().unwrap()).with_steps(2);
    let outcome = runner.run().unwrap();
    let bits = runner
        .problem
        .most_probable_bitstring(&outcome.params)
        .unwrap();
    assert_eq!(bits.len(), 3);
    assert!(bits.chars().all(|c| c == '0' || c == '1'));
}

/// Test that the progress observer tracks the lowest cost.
#[test]
fn test_progress_observer_best() {
    let mut observer = ProgressObserver::new(ProgressBar::hidden());
    let outcome = QaoaRunner::new(DemoProblem::Simple.problem().unwrap())
        .with_steps(5)
        .run_with_observer(&mut observer)
        .unwrap();
    let lowest = outcome.history.iter().copied().fold(f64::INFINITY, f64::min);
    assert_abs_diff_eq!(observer.best(), lowest, epsilon = 1e-15);
}

#[test]
fn test_format_params() {
    assert_eq!(format_params(&[0.5, -1.25]), "[0.5000, -1.2500]");
    assert_eq!(format_params(&[]), "[]");
}
