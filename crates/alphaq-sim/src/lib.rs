//! `alphaq-sim`: statevector simulation of QAOA circuits.
//!
//! Provides the pieces a variational loop evaluates on every cost call:
//!
//! - [`Hamiltonian`]: a validated sum of weighted Pauli strings
//! - [`Circuit::qaoa`]: the alternating problem / mixer ansatz
//! - [`StateVector`]: the 2ⁿ complex amplitude buffer the circuit acts on
//! - [`expectation`]: single-qubit ⟨Z⟩ reductions of the final state
//!
//! # Quick start
//!
//! ```rust
//! use alphaq_sim::{Circuit, Hamiltonian, PauliTerm, expectation};
//!
//! let h = Hamiltonian::new(2, vec![PauliTerm::zz(0, 1, 1.0)]).unwrap();
//! let circuit = Circuit::qaoa(2, &h, 1, &[0.4, 0.2]).unwrap();
//! let state = circuit.run().unwrap();
//!
//! let z = expectation::evaluate_all(&state);
//! assert_eq!(z.len(), 2);
//! assert!((state.norm_sqr() - 1.0).abs() < 1e-12);
//! ```

pub mod circuit;
pub mod error;
pub mod expectation;
pub mod hamiltonian;
pub mod statevector;

pub use circuit::{Circuit, Gate, num_parameters};
pub use error::{SimError, SimResult};
pub use hamiltonian::{Hamiltonian, PauliOp, PauliString, PauliTerm};
pub use statevector::{MAX_QUBITS, PARALLEL_THRESHOLD, StateVector};
