//! Run configuration loaded from YAML or JSON.
//!
//! ```yaml
//! n_qubits: 4
//! layers: 2
//! seed: 42
//! optimizer:
//!   kind: adam
//!   stepsize: 0.1
//!   steps: 100
//! hamiltonian:
//!   - { coeff: 1.0, pauli: "Z0 Z1" }
//!   - { coeff: 1.0, pauli: "Z1 Z2" }
//! ```

use std::fs;
use std::path::Path;

use alphaq_sim::{Hamiltonian, PauliTerm};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cost::QaoaProblem;
use crate::error::{QaoaError, QaoaResult};
use crate::optimizer::OptimizerConfig;

fn default_layers() -> usize {
    1
}

fn default_seed() -> u64 {
    42
}

/// A complete QAOA run description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QaoaConfig {
    /// Register width.
    pub n_qubits: usize,
    /// QAOA depth p.
    #[serde(default = "default_layers")]
    pub layers: usize,
    /// Seed for the initial parameters.
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    /// Weighted Pauli terms.
    pub hamiltonian: Vec<PauliTerm>,
}

impl QaoaConfig {
    pub fn from_yaml_str(text: &str) -> QaoaResult<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> QaoaResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a config, choosing the format from the file extension.
    pub fn load(path: impl AsRef<Path>) -> QaoaResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> QaoaResult<Self> = match ext.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(QaoaError::UnknownConfigFormat(path.to_path_buf())),
        };

        let text = fs::read_to_string(path).map_err(|source| QaoaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = parse(&text)?;
        debug!(path = %path.display(), n_qubits = config.n_qubits, "loaded config");
        Ok(config)
    }

    pub fn to_yaml(&self) -> QaoaResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Validated Hamiltonian.
    pub fn hamiltonian(&self) -> QaoaResult<Hamiltonian> {
        Ok(Hamiltonian::new(self.n_qubits, self.hamiltonian.clone())?)
    }

    /// Validated problem instance.
    pub fn problem(&self) -> QaoaResult<QaoaProblem> {
        QaoaProblem::new(self.n_qubits, self.hamiltonian()?, self.layers)
    }

    /// Check every field without running anything.
    pub fn validate(&self) -> QaoaResult<()> {
        self.problem()?;
        self.optimizer.validate()
    }
}
