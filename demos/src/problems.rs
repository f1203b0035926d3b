//! Reference QAOA problems.

use std::fmt;
use std::str::FromStr;

use alphaq_qaoa::{QaoaProblem, QaoaResult};
use alphaq_sim::{Hamiltonian, PauliTerm};

/// The built-in demo problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoProblem {
    /// Z0 Z1 on 2 qubits, p = 1.
    Simple,
    /// Z0 Z1 + Z1 Z2 + Z2 Z3 on 4 qubits, p = 2.
    Chain,
    /// Z0 Z1 + Z1 Z2 + Z0 Z2 on 3 qubits, p = 3.
    Triangle,
}

impl DemoProblem {
    pub const ALL: [DemoProblem; 3] = [DemoProblem::Simple, DemoProblem::Chain, DemoProblem::Triangle];

    pub fn name(&self) -> &'static str {
        match self {
            DemoProblem::Simple => "simple",
            DemoProblem::Chain => "chain",
            DemoProblem::Triangle => "triangle",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DemoProblem::Simple => "Single ZZ coupling",
            DemoProblem::Chain => "Open ZZ chain",
            DemoProblem::Triangle => "Closed ZZ triangle",
        }
    }

    pub fn num_qubits(&self) -> usize {
        match self {
            DemoProblem::Simple => 2,
            DemoProblem::Chain => 4,
            DemoProblem::Triangle => 3,
        }
    }

    pub fn layers(&self) -> usize {
        match self {
            DemoProblem::Simple => 1,
            DemoProblem::Chain => 2,
            DemoProblem::Triangle => 3,
        }
    }

    /// Whether the demo reports the most probable final basis state.
    pub fn interprets_state(&self) -> bool {
        matches!(self, DemoProblem::Triangle)
    }

    pub fn hamiltonian(&self) -> QaoaResult<Hamiltonian> {
        let h = match self {
            DemoProblem::Simple => Hamiltonian::new(2, vec![PauliTerm::zz(0, 1, 1.0)])?,
            DemoProblem::Chain => Hamiltonian::ising_chain(4, 1.0)?,
            DemoProblem::Triangle => Hamiltonian::ising_cycle(3, 1.0)?,
        };
        Ok(h)
    }

    pub fn problem(&self) -> QaoaResult<QaoaProblem> {
        QaoaProblem::new(self.num_qubits(), self.hamiltonian()?, self.layers())
    }
}

impl fmt::Display for DemoProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoProblem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" | "zz" => Ok(DemoProblem::Simple),
            "chain" | "complex" => Ok(DemoProblem::Chain),
            "triangle" | "cycle" => Ok(DemoProblem::Triangle),
            _ => Err(format!(
                "unknown problem '{s}' (available: simple, chain, triangle)"
            )),
        }
    }
}
