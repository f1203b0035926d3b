//! Hamiltonian data structures.
//!
//! A problem Hamiltonian is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (X, Y, Z) on distinct qubits and c_k ∈ ℝ. Qubits not listed in a string
//! are implicitly identity.
//!
//! Validation happens once, in [`Hamiltonian::new`], so malformed input is
//! rejected before any simulation work starts.
//!
//! # Example
//!
//! ```rust
//! use alphaq_sim::hamiltonian::{Hamiltonian, PauliOp, PauliString, PauliTerm};
//!
//! // H = Z₀Z₁ + 0.5·X₀ on a 2-qubit register
//! let h = Hamiltonian::new(2, vec![
//!     PauliTerm::new(1.0, PauliString::from_ops([(0, PauliOp::Z), (1, PauliOp::Z)])),
//!     PauliTerm::x(0, 0.5),
//! ]).unwrap();
//! assert_eq!(h.n_terms(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::statevector::MAX_QUBITS;

/// Single-qubit Pauli axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// Single-letter name.
    pub fn name(&self) -> &'static str {
        match self {
            PauliOp::X => "X",
            PauliOp::Y => "Y",
            PauliOp::Z => "Z",
        }
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PauliOp {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        match s {
            "X" | "x" => Ok(PauliOp::X),
            "Y" | "y" => Ok(PauliOp::Y),
            "Z" | "z" => Ok(PauliOp::Z),
            other => Err(SimError::UnsupportedOperator(format!(
                "Pauli axis '{other}' (expected X, Y or Z)"
            ))),
        }
    }
}

/// A tensor product of Pauli operators on named qubits.
///
/// Stored as a `Vec<(qubit_index, PauliOp)>` sorted by qubit index.
/// Repeated qubits are kept so that [`Hamiltonian::new`] can report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PauliString {
    ops: Vec<(usize, PauliOp)>,
}

impl PauliString {
    /// Construct a PauliString from an iterator of (qubit, op) pairs.
    pub fn from_ops(ops: impl IntoIterator<Item = (usize, PauliOp)>) -> Self {
        let mut v: Vec<(usize, PauliOp)> = ops.into_iter().collect();
        v.sort_by_key(|(q, _)| *q);
        Self { ops: v }
    }

    /// Construct a Z⊗Z⊗...⊗Z string spanning the given qubits.
    pub fn zz(qubits: impl IntoIterator<Item = usize>) -> Self {
        Self::from_ops(qubits.into_iter().map(|q| (q, PauliOp::Z)))
    }

    /// Parse the text form used in configuration files, e.g. `"Z0 Z1"` or
    /// `"X3 Y0"`. Tokens are separated by whitespace or `*`.
    pub fn parse(text: &str) -> SimResult<Self> {
        let mut ops = Vec::new();
        for token in text
            .split(|c: char| c.is_whitespace() || c == '*')
            .filter(|t| !t.is_empty())
        {
            let split = token
                .find(|c: char| c.is_ascii_digit())
                .ok_or_else(|| malformed(token))?;
            let (axis, index) = token.split_at(split);
            let op: PauliOp = axis.parse()?;
            let qubit: usize = index.parse().map_err(|_| malformed(token))?;
            ops.push((qubit, op));
        }
        Ok(Self::from_ops(ops))
    }

    /// The (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(usize, PauliOp)] {
        &self.ops
    }

    /// True if no operators are listed.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of qubits the string acts on.
    pub fn weight(&self) -> usize {
        self.ops.len()
    }

    /// The highest qubit index referenced, or `None` for an empty string.
    pub fn max_qubit(&self) -> Option<usize> {
        self.ops.last().map(|(q, _)| *q)
    }

    /// True if every factor is Z (the string is diagonal).
    pub fn is_diagonal(&self) -> bool {
        self.ops.iter().all(|(_, op)| *op == PauliOp::Z)
    }

    /// Bitmask of the participating qubits.
    pub fn qubit_mask(&self) -> usize {
        self.ops.iter().fold(0, |mask, (q, _)| mask | (1 << q))
    }

    fn first_duplicate(&self) -> Option<usize> {
        self.ops
            .windows(2)
            .find(|w| w[0].0 == w[1].0)
            .map(|w| w[0].0)
    }
}

fn malformed(token: &str) -> SimError {
    SimError::UnsupportedOperator(format!("malformed Pauli token '{token}'"))
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (q, op)) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}{q}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for PauliString {
    type Error = SimError;

    fn try_from(value: String) -> SimResult<Self> {
        Self::parse(&value)
    }
}

impl From<PauliString> for String {
    fn from(value: PauliString) -> Self {
        value.to_string()
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl PauliTerm {
    /// Create a new term.
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(qubit: usize, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Z)]))
    }

    /// Shorthand: ZZ coupling term.
    pub fn zz(q0: usize, q1: usize, coeff: f64) -> Self {
        Self::new(
            coeff,
            PauliString::from_ops([(q0, PauliOp::Z), (q1, PauliOp::Z)]),
        )
    }

    /// Shorthand: single-qubit X term.
    pub fn x(qubit: usize, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::X)]))
    }

    /// Shorthand: single-qubit Y term.
    pub fn y(qubit: usize, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Y)]))
    }

    /// Check this term against a register of `n_qubits`.
    ///
    /// `index` is the term's position, used in error reports.
    pub fn validate(&self, index: usize, n_qubits: usize) -> SimResult<()> {
        if self.pauli.is_empty() {
            return Err(SimError::EmptyTerm { index });
        }
        if !self.coeff.is_finite() {
            return Err(SimError::NonFiniteCoefficient {
                index,
                coeff: self.coeff,
            });
        }
        if let Some(qubit) = self.pauli.first_duplicate() {
            return Err(SimError::DuplicateQubit { qubit });
        }
        match self.pauli.max_qubit() {
            Some(qubit) if qubit >= n_qubits => Err(SimError::QubitOutOfRange { qubit, n_qubits }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for PauliTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.4} {}", self.coeff, self.pauli)
    }
}

/// A validated sum-of-Pauli-strings Hamiltonian on a fixed register.
///
/// Term order is the evolution order used by the QAOA problem layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hamiltonian {
    n_qubits: usize,
    terms: Vec<PauliTerm>,
}

impl Hamiltonian {
    /// Build a Hamiltonian on `n_qubits` qubits, validating every term.
    pub fn new(n_qubits: usize, terms: Vec<PauliTerm>) -> SimResult<Self> {
        if n_qubits == 0 || n_qubits > MAX_QUBITS {
            return Err(SimError::InvalidQubitCount {
                got: n_qubits,
                max: MAX_QUBITS,
            });
        }
        for (index, term) in terms.iter().enumerate() {
            term.validate(index, n_qubits)?;
        }
        Ok(Self { n_qubits, terms })
    }

    /// Z_i Z_{i+1} couplings along an open chain of `n_qubits` qubits.
    pub fn ising_chain(n_qubits: usize, coupling: f64) -> SimResult<Self> {
        let terms = (1..n_qubits)
            .map(|q| PauliTerm::zz(q - 1, q, coupling))
            .collect();
        Self::new(n_qubits, terms)
    }

    /// Z_i Z_{i+1} couplings around a closed ring (the chain plus the
    /// wrap-around edge between the first and last qubit).
    pub fn ising_cycle(n_qubits: usize, coupling: f64) -> SimResult<Self> {
        let mut terms: Vec<PauliTerm> = (1..n_qubits)
            .map(|q| PauliTerm::zz(q - 1, q, coupling))
            .collect();
        if n_qubits > 2 {
            terms.push(PauliTerm::zz(0, n_qubits - 1, coupling));
        }
        Self::new(n_qubits, terms)
    }

    /// Register width.
    pub fn num_qubits(&self) -> usize {
        self.n_qubits
    }

    /// All terms, in evolution order.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// True if there are no terms (the problem layer is then the identity).
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// True if every term is a Z-string.
    pub fn is_diagonal(&self) -> bool {
        self.terms.iter().all(|t| t.pauli.is_diagonal())
    }

    /// Iterate over terms.
    pub fn iter(&self) -> std::slice::Iter<'_, PauliTerm> {
        self.terms.iter()
    }
}

impl<'a> IntoIterator for &'a Hamiltonian {
    type Item = &'a PauliTerm;
    type IntoIter = std::slice::Iter<'a, PauliTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl fmt::Display for Hamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hamiltonian ({} qubits, {} terms):", self.n_qubits, self.n_terms())?;
        for term in &self.terms {
            writeln!(f, "  {term}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_spaces_and_stars() {
        let a = PauliString::parse("Z0 Z1").unwrap();
        let b = PauliString::parse("Z1*Z0").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Z0 Z1");
    }

    #[test]
    fn parse_rejects_unknown_axis() {
        assert!(matches!(
            PauliString::parse("W3"),
            Err(SimError::UnsupportedOperator(_))
        ));
        assert!(matches!(
            PauliString::parse("I0"),
            Err(SimError::UnsupportedOperator(_))
        ));
    }

    #[test]
    fn parse_rejects_missing_index() {
        assert!(matches!(
            PauliString::parse("Z"),
            Err(SimError::UnsupportedOperator(_))
        ));
    }

    #[test]
    fn qubit_mask_covers_participants() {
        let ps = PauliString::from_ops([(0, PauliOp::X), (2, PauliOp::Y)]);
        assert_eq!(ps.qubit_mask(), 0b101);
    }

    #[test]
    fn cycle_closes_ring() {
        let h = Hamiltonian::ising_cycle(3, 1.0).unwrap();
        assert_eq!(h.n_terms(), 3);
        let chain = Hamiltonian::ising_chain(4, 1.0).unwrap();
        assert_eq!(chain.n_terms(), 3);
    }
}
