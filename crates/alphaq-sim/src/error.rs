//! Error types for the sim crate.

use thiserror::Error;

use crate::hamiltonian::PauliOp;

/// Errors produced while building Hamiltonians, circuits and statevectors.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Qubit count is zero or exceeds the addressable maximum.
    #[error("qubit count must be between 1 and {max}, got {got}")]
    InvalidQubitCount {
        /// The rejected qubit count.
        got: usize,
        /// Largest supported qubit count.
        max: usize,
    },

    /// QAOA layer count must be ≥ 1.
    #[error("layer count must be at least 1, got {0}")]
    InvalidLayers(usize),

    /// A Pauli string references a qubit index that is out of range.
    #[error("Pauli string references qubit {qubit} but register only has {n_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Number of qubits in the register.
        n_qubits: usize,
    },

    /// The same qubit carries more than one axis within a single term.
    #[error("qubit {qubit} appears more than once in a single Pauli term")]
    DuplicateQubit {
        /// The repeated qubit index.
        qubit: usize,
    },

    /// A term with no operators was supplied.
    #[error("Pauli term {index} has no operators")]
    EmptyTerm {
        /// Position of the term in the Hamiltonian.
        index: usize,
    },

    /// A term coefficient is NaN or infinite.
    #[error("Pauli term {index} has non-finite coefficient {coeff}")]
    NonFiniteCoefficient {
        /// Position of the term in the Hamiltonian.
        index: usize,
        /// The offending coefficient.
        coeff: f64,
    },

    /// Parameter vector length does not match `2 * layers`.
    #[error("expected {expected} parameters for {layers} layer(s), got {got}")]
    ParameterLengthMismatch {
        /// Required length (2p).
        expected: usize,
        /// Supplied length.
        got: usize,
        /// Layer count p.
        layers: usize,
    },

    /// Pauli axis outside {X, Y, Z}, or an operator this core cannot measure.
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),
}

impl SimError {
    /// True for the configuration family: bad register sizes, bad indices,
    /// malformed terms and parameter-length mismatches.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, SimError::UnsupportedOperator(_))
    }

    pub(crate) fn unmeasurable(op: PauliOp) -> Self {
        SimError::UnsupportedOperator(format!("cannot measure {op} in the computational basis"))
    }
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
