//! Error types for the variational loop.

use std::path::PathBuf;

use alphaq_sim::SimError;
use thiserror::Error;

/// Errors produced by the optimizer, the orchestrator and config loading.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QaoaError {
    /// Hamiltonian, circuit or statevector configuration error.
    #[error(transparent)]
    Sim(#[from] SimError),

    /// The optimization loop needs at least one step.
    #[error("optimizer steps must be at least 1, got {0}")]
    InvalidSteps(usize),

    /// Stepsize must be a positive finite number.
    #[error("optimizer stepsize must be positive and finite, got {0}")]
    InvalidStepsize(f64),

    /// The initializer returned the wrong number of parameters.
    #[error("initializer produced {got} parameters, expected {expected}")]
    InitializerLength {
        /// Required length (2p).
        expected: usize,
        /// Returned length.
        got: usize,
    },

    /// A cost value or gradient component was NaN or infinite.
    ///
    /// The failing update was not applied; `last_params` are the most
    /// recent parameters whose cost and gradient were finite.
    #[error("numerical instability at iteration {iteration}: {reason}")]
    NumericalInstability {
        /// Optimizer step at which the instability was detected (0 = initial evaluation).
        iteration: usize,
        /// Last valid parameters.
        last_params: Vec<f64>,
        /// What went non-finite.
        reason: String,
    },

    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for the expected schema.
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Config file is not valid JSON for the expected schema.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file extension is not recognised.
    #[error("unknown config format for {0} (expected .yaml, .yml or .json)")]
    UnknownConfigFormat(PathBuf),

    /// Unrecognised optimizer name.
    #[error("unknown optimizer '{0}' (expected gradient_descent or adam)")]
    UnknownOptimizer(String),
}

impl QaoaError {
    /// True for errors caused by invalid input (fatal, never retried).
    pub fn is_configuration(&self) -> bool {
        match self {
            QaoaError::Sim(e) => e.is_configuration(),
            QaoaError::InvalidSteps(_)
            | QaoaError::InvalidStepsize(_)
            | QaoaError::InitializerLength { .. }
            | QaoaError::UnknownOptimizer(_) => true,
            _ => false,
        }
    }

    /// Last valid parameters, for [`QaoaError::NumericalInstability`].
    pub fn last_params(&self) -> Option<&[f64]> {
        match self {
            QaoaError::NumericalInstability { last_params, .. } => Some(last_params),
            _ => None,
        }
    }
}

/// Result type for variational-loop operations.
pub type QaoaResult<T> = Result<T, QaoaError>;
