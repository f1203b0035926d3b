//! Statevector simulation engine.
//!
//! Amplitude `i` belongs to the computational basis state whose binary
//! encoding is `i`; qubit `q` is bit `q` of the index.
//!
//! Single-qubit kernels walk the buffer in chunks of `2 · 2^q` amplitudes:
//! the lower half of a chunk has bit `q` clear, the upper half has it set,
//! and the pair partners sit exactly `2^q` apart. Above
//! [`PARALLEL_THRESHOLD`] qubits the chunks are handed to rayon workers; each
//! worker owns its chunks exclusively.

use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::FRAC_1_SQRT_2;

use crate::circuit::Gate;
use crate::error::{SimError, SimResult};
use crate::hamiltonian::{PauliOp, PauliTerm};

/// Largest register the engine will allocate (2^30 amplitudes ≈ 16 GiB).
pub const MAX_QUBITS: usize = 30;

/// Registers at least this wide run gate kernels across worker threads.
pub const PARALLEL_THRESHOLD: usize = 14;

/// A statevector representing a pure quantum state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl StateVector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> SimResult<Self> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(SimError::InvalidQubitCount {
                got: num_qubits,
                max: MAX_QUBITS,
            });
        }
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (2^n).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Read-only view of the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Born-rule probabilities |a_i|².
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Σ |a_i|². Equals 1 for a valid state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Apply a circuit gate.
    pub fn apply(&mut self, gate: &Gate) -> SimResult<()> {
        match gate {
            Gate::Hadamard(qubit) => self.apply_h(*qubit),
            Gate::Rx { qubit, angle } => self.apply_rx(*qubit, *angle),
            Gate::PauliExponential { term, angle } => self.apply_pauli_exponential(term, *angle),
        }
    }

    /// Prepare the uniform superposition |+⟩^⊗n in one pass.
    ///
    /// Overwrites the buffer, so it is only meaningful on the freshly created
    /// |0...0⟩ state, where it equals a Hadamard on every qubit.
    pub fn apply_hadamard_all(&mut self) {
        debug_assert!(
            self.amplitudes[0] == Complex64::new(1.0, 0.0),
            "apply_hadamard_all expects the |0...0> state"
        );
        let amp = Complex64::new(1.0 / (self.dim() as f64).sqrt(), 0.0);
        self.amplitudes.fill(amp);
    }

    /// Hadamard on a single qubit.
    pub fn apply_h(&mut self, qubit: usize) -> SimResult<()> {
        self.check_qubit(qubit)?;
        self.apply_pairwise(qubit, |a, b| (FRAC_1_SQRT_2 * (a + b), FRAC_1_SQRT_2 * (a - b)));
        Ok(())
    }

    /// RX(θ) = [[cos θ/2, −i sin θ/2], [−i sin θ/2, cos θ/2]].
    pub fn apply_rx(&mut self, qubit: usize, theta: f64) -> SimResult<()> {
        self.check_qubit(qubit)?;
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        self.apply_pairwise(qubit, |a, b| (c * a + neg_i_s * b, neg_i_s * a + c * b));
        Ok(())
    }

    /// exp(−i · angle · coeff · P) for a single Pauli string.
    ///
    /// Every participating qubit is rotated into the Z basis, the parity
    /// phase is applied, and the rotations are undone:
    ///   X → H
    ///   Y → S† · H   (undone by H · S)
    ///   Z → (nothing)
    pub fn apply_pauli_exponential(&mut self, term: &PauliTerm, angle: f64) -> SimResult<()> {
        term.validate(0, self.num_qubits)?;
        let ops = term.pauli.ops();
        let theta = angle * term.coeff;

        self.basis_change(ops, false);

        let mask = term.pauli.qubit_mask();
        let even = Complex64::from_polar(1.0, -theta);
        let odd = Complex64::from_polar(1.0, theta);
        self.apply_diagonal(|i| {
            if (i & mask).count_ones() % 2 == 0 {
                even
            } else {
                odd
            }
        });

        self.basis_change(ops, true);
        Ok(())
    }

    /// Index of the most probable basis state (lowest index on ties).
    pub fn most_probable_state(&self) -> usize {
        let mut best = 0;
        let mut best_prob = f64::NEG_INFINITY;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let prob = amp.norm_sqr();
            if prob > best_prob {
                best = i;
                best_prob = prob;
            }
        }
        best
    }

    /// Render a basis index as an n-digit bitstring, qubit n−1 leftmost.
    pub fn index_to_bitstring(&self, index: usize) -> String {
        format!("{:0width$b}", index, width = self.num_qubits)
    }

    // =========================================================================
    // Kernels
    // =========================================================================

    fn check_qubit(&self, qubit: usize) -> SimResult<()> {
        if qubit >= self.num_qubits {
            return Err(SimError::QubitOutOfRange {
                qubit,
                n_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    /// Update every amplitude pair (bit `qubit` = 0, bit `qubit` = 1).
    fn apply_pairwise<F>(&mut self, qubit: usize, op: F)
    where
        F: Fn(Complex64, Complex64) -> (Complex64, Complex64) + Sync,
    {
        let stride = 1usize << qubit;
        let kernel = |chunk: &mut [Complex64]| {
            let (lo, hi) = chunk.split_at_mut(stride);
            for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
                let (na, nb) = op(*a, *b);
                *a = na;
                *b = nb;
            }
        };
        if self.num_qubits >= PARALLEL_THRESHOLD {
            self.amplitudes.par_chunks_mut(2 * stride).for_each(kernel);
        } else {
            self.amplitudes.chunks_mut(2 * stride).for_each(kernel);
        }
    }

    /// Multiply amplitude `i` by `phase(i)`.
    fn apply_diagonal<F>(&mut self, phase: F)
    where
        F: Fn(usize) -> Complex64 + Sync,
    {
        if self.num_qubits >= PARALLEL_THRESHOLD {
            self.amplitudes
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, amp)| *amp *= phase(i));
        } else {
            for (i, amp) in self.amplitudes.iter_mut().enumerate() {
                *amp *= phase(i);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, phase: Complex64) {
        let mask = 1usize << qubit;
        let one = Complex64::new(1.0, 0.0);
        self.apply_diagonal(|i| if i & mask != 0 { phase } else { one });
    }

    fn basis_change(&mut self, ops: &[(usize, PauliOp)], undo: bool) {
        let h = |a: Complex64, b: Complex64| (FRAC_1_SQRT_2 * (a + b), FRAC_1_SQRT_2 * (a - b));
        for &(q, op) in ops {
            match (op, undo) {
                (PauliOp::X, _) => self.apply_pairwise(q, h),
                (PauliOp::Y, false) => {
                    self.apply_phase(q, Complex64::new(0.0, -1.0));
                    self.apply_pairwise(q, h);
                }
                (PauliOp::Y, true) => {
                    self.apply_pairwise(q, h);
                    self.apply_phase(q, Complex64::new(0.0, 1.0));
                }
                (PauliOp::Z, _) => {}
            }
        }
    }
}
