//! Tests for Hamiltonian data structures and validation.

use alphaq_sim::SimError;
use alphaq_sim::hamiltonian::{Hamiltonian, PauliOp, PauliString, PauliTerm};

// ---------------------------------------------------------------------------
// PauliString
// ---------------------------------------------------------------------------

#[test]
fn pauli_string_sorted_by_qubit() {
    let ps = PauliString::from_ops([(3, PauliOp::X), (1, PauliOp::Z), (0, PauliOp::Y)]);
    let qubits: Vec<usize> = ps.ops().iter().map(|(q, _)| *q).collect();
    assert_eq!(qubits, vec![0, 1, 3]);
}

#[test]
fn pauli_string_empty() {
    let ps = PauliString::from_ops([] as [(usize, PauliOp); 0]);
    assert!(ps.is_empty());
    assert_eq!(ps.max_qubit(), None);
}

#[test]
fn pauli_string_max_qubit() {
    let ps = PauliString::from_ops([(0, PauliOp::X), (5, PauliOp::Z)]);
    assert_eq!(ps.max_qubit(), Some(5));
    assert_eq!(ps.weight(), 2);
}

#[test]
fn pauli_string_zz() {
    let ps = PauliString::zz([2, 0, 4]);
    let qubits: Vec<usize> = ps.ops().iter().map(|(q, _)| *q).collect();
    assert_eq!(qubits, vec![0, 2, 4]);
    assert!(ps.is_diagonal());
}

#[test]
fn pauli_string_parse_round_trips_display() {
    let ps = PauliString::parse("Y2 X0 Z1").unwrap();
    assert_eq!(ps.to_string(), "X0 Z1 Y2");
    assert_eq!(PauliString::parse(&ps.to_string()).unwrap(), ps);
}

#[test]
fn pauli_string_serde_uses_text_form() {
    let term = PauliTerm::zz(0, 1, 1.5);
    let json = serde_json::to_string(&term).unwrap();
    assert_eq!(json, r#"{"coeff":1.5,"pauli":"Z0 Z1"}"#);
    let back: PauliTerm = serde_json::from_str(&json).unwrap();
    assert_eq!(back, term);
}

#[test]
fn pauli_string_serde_rejects_unknown_axis() {
    let err = serde_json::from_str::<PauliTerm>(r#"{"coeff":1.0,"pauli":"Q0"}"#);
    assert!(err.is_err());
}

// ---------------------------------------------------------------------------
// PauliTerm shorthands
// ---------------------------------------------------------------------------

#[test]
fn term_z_shorthand() {
    let t = PauliTerm::z(3, -0.5);
    assert!((t.coeff - (-0.5)).abs() < 1e-15);
    assert_eq!(t.pauli.ops(), &[(3, PauliOp::Z)]);
}

#[test]
fn term_zz_shorthand() {
    let t = PauliTerm::zz(0, 1, 1.0);
    assert_eq!(t.pauli.ops().len(), 2);
    assert_eq!(t.pauli.ops()[0], (0, PauliOp::Z));
    assert_eq!(t.pauli.ops()[1], (1, PauliOp::Z));
}

#[test]
fn term_x_and_y_shorthand() {
    assert_eq!(PauliTerm::x(2, 0.3).pauli.ops(), &[(2, PauliOp::X)]);
    assert_eq!(PauliTerm::y(1, 0.3).pauli.ops(), &[(1, PauliOp::Y)]);
}

// ---------------------------------------------------------------------------
// Hamiltonian validation
// ---------------------------------------------------------------------------

#[test]
fn hamiltonian_accepts_valid_terms() {
    let h = Hamiltonian::new(
        3,
        vec![
            PauliTerm::zz(0, 1, 1.0),
            PauliTerm::zz(1, 2, 1.0),
            PauliTerm::x(2, -0.5),
        ],
    )
    .unwrap();
    assert_eq!(h.num_qubits(), 3);
    assert_eq!(h.n_terms(), 3);
    assert!(!h.is_diagonal());
}

#[test]
fn hamiltonian_rejects_out_of_range_qubit() {
    // A term on qubit 5 cannot live on a 2-qubit register.
    let err = Hamiltonian::new(
        2,
        vec![PauliTerm::new(1.0, PauliString::zz([0, 5]))],
    )
    .unwrap_err();
    assert_eq!(
        err,
        SimError::QubitOutOfRange {
            qubit: 5,
            n_qubits: 2
        }
    );
    assert!(err.is_configuration());
}

#[test]
fn hamiltonian_rejects_duplicate_qubit() {
    let term = PauliTerm::new(
        1.0,
        PauliString::from_ops([(1, PauliOp::Z), (1, PauliOp::X)]),
    );
    assert!(matches!(
        Hamiltonian::new(2, vec![term]),
        Err(SimError::DuplicateQubit { qubit: 1 })
    ));
}

#[test]
fn hamiltonian_rejects_empty_term() {
    let terms = vec![
        PauliTerm::z(0, 1.0),
        PauliTerm::new(1.0, PauliString::from_ops(Vec::new())),
    ];
    assert!(matches!(
        Hamiltonian::new(2, terms),
        Err(SimError::EmptyTerm { index: 1 })
    ));
}

#[test]
fn hamiltonian_rejects_nan_coefficient() {
    assert!(matches!(
        Hamiltonian::new(1, vec![PauliTerm::z(0, f64::NAN)]),
        Err(SimError::NonFiniteCoefficient { index: 0, .. })
    ));
}

#[test]
fn hamiltonian_rejects_zero_qubits() {
    assert!(matches!(
        Hamiltonian::new(0, vec![]),
        Err(SimError::InvalidQubitCount { got: 0, .. })
    ));
}

#[test]
fn unsupported_axis_is_its_own_class() {
    let err = PauliString::parse("Z0 W1").unwrap_err();
    assert!(matches!(err, SimError::UnsupportedOperator(_)));
    assert!(!err.is_configuration());
}

#[test]
fn hamiltonian_display_lists_terms() {
    let h = Hamiltonian::ising_chain(3, 1.0).unwrap();
    let text = h.to_string();
    assert!(text.contains("+1.0000 Z0 Z1"));
    assert!(text.contains("+1.0000 Z1 Z2"));
}
