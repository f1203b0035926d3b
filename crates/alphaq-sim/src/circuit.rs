//! QAOA ansatz construction.
//!
//! The circuit for `p` layers with parameters `[γ₀ … γ_{p−1}, β₀ … β_{p−1}]`:
//!
//!   |ψ(γ, β)⟩ = ∏_{l=0}^{p−1} [ ∏_q RX_q(β_l) · ∏_k exp(−i γ_l c_k P_k) ] H^⊗n |0⟩
//!
//! The problem layer is a single first-order Trotter slice: each term is
//! evolved exactly, in Hamiltonian order. The mixer rotates every qubit by
//! the same RX angle.

use serde::Serialize;
use tracing::trace;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{Hamiltonian, PauliTerm};
use crate::statevector::{MAX_QUBITS, StateVector};

/// A single gate of the QAOA ansatz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Gate {
    /// Hadamard on one qubit.
    Hadamard(usize),
    /// X rotation by `angle` radians.
    Rx {
        /// Target qubit.
        qubit: usize,
        /// Rotation angle.
        angle: f64,
    },
    /// exp(−i · angle · coeff · P).
    PauliExponential {
        /// The evolved term.
        term: PauliTerm,
        /// Evolution time scaling the term coefficient.
        angle: f64,
    },
}

/// An ordered gate list on a fixed register.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circuit {
    num_qubits: usize,
    num_layers: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Build the QAOA ansatz for `hamiltonian` with `layers` layers.
    ///
    /// `params` must hold exactly `2 * layers` values: the problem angles
    /// first, then the mixer angles.
    pub fn qaoa(
        num_qubits: usize,
        hamiltonian: &Hamiltonian,
        layers: usize,
        params: &[f64],
    ) -> SimResult<Self> {
        validate(num_qubits, hamiltonian, layers, params)?;
        let (gammas, betas) = params.split_at(layers);

        let mut gates =
            Vec::with_capacity(num_qubits + layers * (hamiltonian.n_terms() + num_qubits));
        gates.extend((0..num_qubits).map(Gate::Hadamard));

        for (&gamma, &beta) in gammas.iter().zip(betas) {
            // Problem unitary: one Trotter slice of exp(−i γ H)
            gates.extend(hamiltonian.iter().map(|term| Gate::PauliExponential {
                term: term.clone(),
                angle: gamma,
            }));
            // Mixer unitary: RX(β) on every qubit
            gates.extend((0..num_qubits).map(|qubit| Gate::Rx { qubit, angle: beta }));
        }

        trace!(
            num_qubits,
            layers,
            n_terms = hamiltonian.n_terms(),
            n_gates = gates.len(),
            "built QAOA circuit"
        );

        Ok(Self {
            num_qubits,
            num_layers: layers,
            gates,
        })
    }

    /// Execute the circuit on a freshly allocated |0...0⟩ state.
    pub fn run(&self) -> SimResult<StateVector> {
        let mut state = StateVector::new(self.num_qubits)?;
        for gate in &self.gates {
            state.apply(gate)?;
        }
        Ok(state)
    }

    /// Register width.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of QAOA layers.
    pub fn num_layers(&self) -> usize {
        self.num_layers
    }

    /// The gates, in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// True if the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

/// Number of parameters for a `layers`-layer ansatz.
pub fn num_parameters(layers: usize) -> usize {
    2 * layers
}

fn validate(
    num_qubits: usize,
    hamiltonian: &Hamiltonian,
    layers: usize,
    params: &[f64],
) -> SimResult<()> {
    if num_qubits == 0 || num_qubits > MAX_QUBITS {
        return Err(SimError::InvalidQubitCount {
            got: num_qubits,
            max: MAX_QUBITS,
        });
    }
    if layers == 0 {
        return Err(SimError::InvalidLayers(0));
    }
    if params.len() != num_parameters(layers) {
        return Err(SimError::ParameterLengthMismatch {
            expected: num_parameters(layers),
            got: params.len(),
            layers,
        });
    }
    if hamiltonian.num_qubits() > num_qubits {
        let qubit = hamiltonian
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .unwrap_or(hamiltonian.num_qubits() - 1);
        if qubit >= num_qubits {
            return Err(SimError::QubitOutOfRange {
                qubit,
                n_qubits: num_qubits,
            });
        }
    }
    Ok(())
}
