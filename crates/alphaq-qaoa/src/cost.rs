//! QAOA cost evaluation.
//!
//! The cost of a parameter vector is the sum of single-qubit ⟨Z⟩ values of
//! the prepared state. Each call builds and runs a fresh circuit, so
//! evaluations share no mutable state and can run concurrently.

use alphaq_sim::expectation::evaluate_all;
use alphaq_sim::{Circuit, Hamiltonian, SimResult, StateVector, num_parameters};

use crate::error::QaoaResult;

/// Aggregate per-qubit ⟨Z⟩ values into a scalar cost.
#[inline]
pub fn cost(expectations: &[f64]) -> f64 {
    expectations.iter().sum()
}

/// A QAOA instance: register width, problem Hamiltonian and depth.
#[derive(Debug, Clone)]
pub struct QaoaProblem {
    num_qubits: usize,
    hamiltonian: Hamiltonian,
    layers: usize,
}

impl QaoaProblem {
    /// Create a problem, rejecting zero qubits, zero layers and Hamiltonians
    /// that touch qubits outside the register.
    pub fn new(num_qubits: usize, hamiltonian: Hamiltonian, layers: usize) -> QaoaResult<Self> {
        let zeros = vec![0.0; num_parameters(layers)];
        Circuit::qaoa(num_qubits, &hamiltonian, layers, &zeros)?;
        Ok(Self {
            num_qubits,
            hamiltonian,
            layers,
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn layers(&self) -> usize {
        self.layers
    }

    pub fn hamiltonian(&self) -> &Hamiltonian {
        &self.hamiltonian
    }

    /// Length of the parameter vector, `2p`.
    pub fn num_parameters(&self) -> usize {
        num_parameters(self.layers)
    }

    /// Build the ansatz circuit for `params`.
    pub fn circuit(&self, params: &[f64]) -> SimResult<Circuit> {
        Circuit::qaoa(self.num_qubits, &self.hamiltonian, self.layers, params)
    }

    /// Prepare the final state for `params`.
    pub fn final_state(&self, params: &[f64]) -> SimResult<StateVector> {
        self.circuit(params)?.run()
    }

    /// Per-qubit ⟨Z⟩ of the final state.
    pub fn expectations(&self, params: &[f64]) -> SimResult<Vec<f64>> {
        Ok(evaluate_all(&self.final_state(params)?))
    }

    /// Cost of `params`. Deterministic for a given input.
    pub fn cost_of(&self, params: &[f64]) -> SimResult<f64> {
        Ok(cost(&self.expectations(params)?))
    }

    /// Bitstring of the most probable basis state, qubit 0 rightmost.
    pub fn most_probable_bitstring(&self, params: &[f64]) -> SimResult<String> {
        let state = self.final_state(params)?;
        Ok(state.index_to_bitstring(state.most_probable_state()))
    }
}
