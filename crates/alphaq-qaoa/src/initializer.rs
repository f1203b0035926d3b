//! Starting points for the variational loop.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces the initial parameter vector.
pub trait ParameterInitializer {
    /// Return `len` starting parameters.
    fn sample(&mut self, len: usize) -> Vec<f64>;
}

/// Uniform angles in [0, 2π) from a seeded generator.
///
/// Two initializers built with the same seed yield the same sequence.
#[derive(Debug, Clone)]
pub struct UniformRandomInitializer {
    rng: StdRng,
}

impl UniformRandomInitializer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ParameterInitializer for UniformRandomInitializer {
    fn sample(&mut self, len: usize) -> Vec<f64> {
        (0..len).map(|_| self.rng.gen_range(0.0..TAU)).collect()
    }
}

/// Returns a fixed vector, e.g. parameters from a previous run.
///
/// The requested length is not enforced here; the orchestrator rejects a
/// mismatch before the first evaluation.
#[derive(Debug, Clone)]
pub struct WarmStartInitializer {
    params: Vec<f64>,
}

impl WarmStartInitializer {
    pub fn new(params: Vec<f64>) -> Self {
        Self { params }
    }
}

impl ParameterInitializer for WarmStartInitializer {
    fn sample(&mut self, _len: usize) -> Vec<f64> {
        self.params.clone()
    }
}
