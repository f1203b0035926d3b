//! Observable expectation values on a final statevector.
//!
//! All functions are pure reductions over the Born-rule probabilities.

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{Hamiltonian, PauliOp, PauliString};
use crate::statevector::StateVector;

/// ⟨Z_q⟩ = Σ_i |a_i|² · (+1 if bit q of i is 0, −1 otherwise).
pub fn expectation_z(state: &StateVector, qubit: usize) -> SimResult<f64> {
    if qubit >= state.num_qubits() {
        return Err(SimError::QubitOutOfRange {
            qubit,
            n_qubits: state.num_qubits(),
        });
    }
    let mask = 1usize << qubit;
    Ok(state
        .amplitudes()
        .iter()
        .enumerate()
        .map(|(i, amp)| {
            let prob = amp.norm_sqr();
            if i & mask == 0 { prob } else { -prob }
        })
        .sum())
}

/// ⟨Z_0⟩, ⟨Z_1⟩, …, ⟨Z_{n−1}⟩ in qubit order.
pub fn evaluate_all(state: &StateVector) -> Vec<f64> {
    let n = state.num_qubits();
    let mut out = vec![0.0; n];
    for (i, amp) in state.amplitudes().iter().enumerate() {
        let prob = amp.norm_sqr();
        for (q, e) in out.iter_mut().enumerate() {
            if (i >> q) & 1 == 0 {
                *e += prob;
            } else {
                *e -= prob;
            }
        }
    }
    out
}

/// ⟨P⟩ for a Z-only Pauli string (parity-weighted probability sum).
///
/// Strings containing X or Y would need a basis change before measurement
/// and are rejected.
pub fn expectation_pauli(state: &StateVector, pauli: &PauliString) -> SimResult<f64> {
    if let Some(&(_, op)) = pauli.ops().iter().find(|(_, op)| *op != PauliOp::Z) {
        return Err(SimError::unmeasurable(op));
    }
    if let Some(qubit) = pauli.max_qubit().filter(|&q| q >= state.num_qubits()) {
        return Err(SimError::QubitOutOfRange {
            qubit,
            n_qubits: state.num_qubits(),
        });
    }
    let mask = pauli.qubit_mask();
    Ok(state
        .amplitudes()
        .iter()
        .enumerate()
        .map(|(i, amp)| {
            let prob = amp.norm_sqr();
            if (i & mask).count_ones() % 2 == 0 { prob } else { -prob }
        })
        .sum())
}

/// ⟨H⟩ = Σ_k c_k ⟨P_k⟩ for a diagonal Hamiltonian.
pub fn energy(state: &StateVector, hamiltonian: &Hamiltonian) -> SimResult<f64> {
    hamiltonian
        .iter()
        .map(|term| Ok(term.coeff * expectation_pauli(state, &term.pauli)?))
        .sum()
}
