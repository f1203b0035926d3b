//! The variational loop.
//!
//! `minimize` drives any cost function for a fixed number of optimizer steps;
//! `run` binds it to a [`QaoaProblem`]. There is no adaptive stopping: a run
//! ends after `steps` updates or at the first non-finite cost or gradient.

use serde::Serialize;
use tracing::debug;

use crate::config::QaoaConfig;
use crate::cost::QaoaProblem;
use crate::error::{QaoaError, QaoaResult};
use crate::initializer::{ParameterInitializer, UniformRandomInitializer};
use crate::observer::CostObserver;
use crate::optimizer::{Optimizer, OptimizerConfig, StepOptimizer};

/// Result of a completed optimization run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaoaOutcome {
    /// Final parameters, `[γ_0..γ_{p-1}, β_0..β_{p-1}]` for QAOA runs.
    pub params: Vec<f64>,
    /// Cost of `params`.
    pub cost: f64,
    /// Cost of the initial parameters.
    pub initial_cost: f64,
    /// Every reported cost, starting with the initial one.
    pub history: Vec<f64>,
    /// Optimizer steps taken.
    pub iterations: usize,
    /// Cost evaluations performed, gradient shifts included.
    pub circuit_evaluations: usize,
}

impl QaoaOutcome {
    /// Cost-operator angles (first half of `params`).
    pub fn gammas(&self) -> &[f64] {
        &self.params[..self.params.len() / 2]
    }

    /// Mixer angles (second half of `params`).
    pub fn betas(&self) -> &[f64] {
        &self.params[self.params.len() / 2..]
    }

    /// `cost − initial_cost`; negative when the run improved.
    pub fn improvement(&self) -> f64 {
        self.cost - self.initial_cost
    }
}

fn non_finite_cost(iteration: usize, last_params: &[f64], cost: f64) -> QaoaError {
    QaoaError::NumericalInstability {
        iteration,
        last_params: last_params.to_vec(),
        reason: format!("cost is {cost}"),
    }
}

/// Minimize `cost_fn` over `n_params` parameters for exactly `steps` steps.
///
/// The optimizer is reset first, so its iteration counter matches the
/// reported step numbers. Reports iteration 0 for the initial parameters,
/// then one record per step.
pub fn minimize<F, S, I, O>(
    cost_fn: &F,
    n_params: usize,
    steps: usize,
    optimizer: &mut S,
    initializer: &mut I,
    observer: &mut O,
) -> QaoaResult<QaoaOutcome>
where
    F: Fn(&[f64]) -> QaoaResult<f64> + Sync,
    S: StepOptimizer,
    I: ParameterInitializer + ?Sized,
    O: CostObserver + ?Sized,
{
    if steps == 0 {
        return Err(QaoaError::InvalidSteps(steps));
    }

    let mut params = initializer.sample(n_params);
    if params.len() != n_params {
        return Err(QaoaError::InitializerLength {
            expected: n_params,
            got: params.len(),
        });
    }

    optimizer.reset();
    debug!(n_params, steps, "starting optimization");

    let initial_cost = cost_fn(&params)?;
    if !initial_cost.is_finite() {
        return Err(non_finite_cost(0, &params, initial_cost));
    }
    observer.on_step(0, initial_cost);

    let mut history = Vec::with_capacity(steps + 1);
    history.push(initial_cost);
    let mut cost = initial_cost;
    let per_step = 2 * n_params + 1;

    for iteration in 1..=steps {
        let next = optimizer.step(cost_fn, &params).inspect_err(|e| {
            debug!(iteration, error = %e, "optimizer step failed");
        })?;

        let next_cost = cost_fn(&next)?;
        if !next_cost.is_finite() {
            debug!(iteration, "non-finite cost, stopping");
            return Err(non_finite_cost(iteration, &params, next_cost));
        }

        params = next;
        cost = next_cost;
        history.push(cost);
        observer.on_step(iteration, cost);
    }

    debug!(initial_cost, cost, steps, "optimization finished");

    Ok(QaoaOutcome {
        params,
        cost,
        initial_cost,
        history,
        iterations: steps,
        circuit_evaluations: 1 + steps * per_step,
    })
}

/// Optimize a QAOA problem.
pub fn run<S, I, O>(
    problem: &QaoaProblem,
    steps: usize,
    optimizer: &mut S,
    initializer: &mut I,
    observer: &mut O,
) -> QaoaResult<QaoaOutcome>
where
    S: StepOptimizer,
    I: ParameterInitializer + ?Sized,
    O: CostObserver + ?Sized,
{
    let cost_fn = |params: &[f64]| -> QaoaResult<f64> { Ok(problem.cost_of(params)?) };
    debug!(
        num_qubits = problem.num_qubits(),
        layers = problem.layers(),
        terms = problem.hamiltonian().n_terms(),
        "running qaoa"
    );
    minimize(
        &cost_fn,
        problem.num_parameters(),
        steps,
        optimizer,
        initializer,
        observer,
    )
}

/// Builder around [`run`] with seeded random initialization.
#[derive(Debug, Clone)]
pub struct QaoaRunner {
    /// The problem to optimize.
    pub problem: QaoaProblem,
    /// Number of optimizer steps.
    pub steps: usize,
    /// Update rule; reset at the start of every run.
    pub optimizer: Optimizer,
    /// Seed for the initial parameters.
    pub seed: u64,
}

impl QaoaRunner {
    /// Default seed for the initial parameters.
    pub const DEFAULT_SEED: u64 = 42;

    /// Create a runner with default optimizer settings (Adam, 0.01, 100 steps).
    pub fn new(problem: QaoaProblem) -> Self {
        let defaults = OptimizerConfig::default();
        Self {
            problem,
            steps: defaults.steps,
            optimizer: Optimizer::adam(defaults.stepsize),
            seed: Self::DEFAULT_SEED,
        }
    }

    /// Build from a loaded config file.
    pub fn from_config(config: &QaoaConfig) -> QaoaResult<Self> {
        let problem = config.problem()?;
        let optimizer = Optimizer::from_config(&config.optimizer)?;
        Ok(Self {
            problem,
            steps: config.optimizer.steps,
            optimizer,
            seed: config.seed,
        })
    }

    /// Set the number of optimizer steps.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Set the optimizer.
    pub fn with_optimizer(mut self, optimizer: Optimizer) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Set the initialization seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Get the number of parameters needed.
    pub fn num_parameters(&self) -> usize {
        self.problem.num_parameters()
    }

    /// Run from seeded random parameters.
    pub fn run(&self) -> QaoaResult<QaoaOutcome> {
        self.run_with_observer(&mut ())
    }

    /// Run from seeded random parameters, reporting every cost to `observer`.
    pub fn run_with_observer<O>(&self, observer: &mut O) -> QaoaResult<QaoaOutcome>
    where
        O: CostObserver + ?Sized,
    {
        let mut initializer = UniformRandomInitializer::new(self.seed);
        self.run_with_initializer(&mut initializer, observer)
    }

    /// Run from parameters supplied by `initializer`.
    pub fn run_with_initializer<I, O>(
        &self,
        initializer: &mut I,
        observer: &mut O,
    ) -> QaoaResult<QaoaOutcome>
    where
        I: ParameterInitializer + ?Sized,
        O: CostObserver + ?Sized,
    {
        let mut optimizer = self.optimizer.clone();
        run(&self.problem, self.steps, &mut optimizer, initializer, observer)
    }
}
