//! Gradient-based optimizers for the variational loop.
//!
//! Both optimizers take gradients with the parameter-shift rule:
//!
//! ```text
//! g[k] = (f(x + π/2·e_k) − f(x − π/2·e_k)) / 2
//! ```
//!
//! Each step costs `2·len(params)` cost evaluations. The shifted evaluations
//! are independent and run on the rayon pool; results are collected in
//! index order so the gradient does not depend on scheduling.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{QaoaError, QaoaResult};

/// Shift applied to each parameter when estimating its derivative.
pub const PARAMETER_SHIFT: f64 = FRAC_PI_2;

/// Parameter-shift gradient of `cost_fn` at `params`.
///
/// Errors from `cost_fn` propagate unchanged. Non-finite components are
/// returned as-is; callers decide how to treat them.
pub fn parameter_shift_gradient<F>(cost_fn: &F, params: &[f64]) -> QaoaResult<Vec<f64>>
where
    F: Fn(&[f64]) -> QaoaResult<f64> + Sync,
{
    (0..params.len())
        .into_par_iter()
        .map(|k| {
            let mut shifted = params.to_vec();
            shifted[k] = params[k] + PARAMETER_SHIFT;
            let plus = cost_fn(&shifted)?;
            shifted[k] = params[k] - PARAMETER_SHIFT;
            let minus = cost_fn(&shifted)?;
            Ok((plus - minus) / 2.0)
        })
        .collect()
}

/// Reject a gradient with NaN or infinite components.
fn check_gradient(gradient: &[f64], params: &[f64], iteration: usize) -> QaoaResult<()> {
    match gradient.iter().position(|g| !g.is_finite()) {
        Some(k) => Err(QaoaError::NumericalInstability {
            iteration,
            last_params: params.to_vec(),
            reason: format!("gradient component {k} is {}", gradient[k]),
        }),
        None => Ok(()),
    }
}

/// One step of a first-order optimizer.
pub trait StepOptimizer {
    /// Compute the next parameter vector from `params`.
    ///
    /// On error the internal state is left untouched.
    fn step<F>(&mut self, cost_fn: &F, params: &[f64]) -> QaoaResult<Vec<f64>>
    where
        F: Fn(&[f64]) -> QaoaResult<f64> + Sync;

    /// Forget all accumulated state.
    fn reset(&mut self);

    /// Number of successful steps since creation or the last reset.
    fn iteration(&self) -> usize;
}

/// Plain gradient descent: `x ← x − lr·g`.
#[derive(Debug, Clone)]
pub struct GradientDescent {
    stepsize: f64,
    iteration: usize,
}

impl GradientDescent {
    pub fn new(stepsize: f64) -> Self {
        Self {
            stepsize,
            iteration: 0,
        }
    }

    pub fn stepsize(&self) -> f64 {
        self.stepsize
    }
}

impl StepOptimizer for GradientDescent {
    fn step<F>(&mut self, cost_fn: &F, params: &[f64]) -> QaoaResult<Vec<f64>>
    where
        F: Fn(&[f64]) -> QaoaResult<f64> + Sync,
    {
        let gradient = parameter_shift_gradient(cost_fn, params)?;
        check_gradient(&gradient, params, self.iteration + 1)?;

        let next = params
            .iter()
            .zip(&gradient)
            .map(|(x, g)| x - self.stepsize * g)
            .collect();

        self.iteration += 1;
        trace!(iteration = self.iteration, ?gradient, "gradient descent step");
        Ok(next)
    }

    fn reset(&mut self) {
        self.iteration = 0;
    }

    fn iteration(&self) -> usize {
        self.iteration
    }
}

/// Adam with bias-corrected first and second moments.
#[derive(Debug, Clone)]
pub struct Adam {
    /// Learning rate.
    stepsize: f64,
    /// Decay rate of the first moment.
    beta1: f64,
    /// Decay rate of the second moment.
    beta2: f64,
    /// Denominator offset.
    eps: f64,
    /// First moment, sized on the first step.
    m: Vec<f64>,
    /// Second moment, sized on the first step.
    v: Vec<f64>,
    iteration: usize,
}

impl Adam {
    pub const DEFAULT_BETA1: f64 = 0.9;
    pub const DEFAULT_BETA2: f64 = 0.999;
    pub const DEFAULT_EPS: f64 = 1e-8;

    pub fn new(stepsize: f64) -> Self {
        Self {
            stepsize,
            beta1: Self::DEFAULT_BETA1,
            beta2: Self::DEFAULT_BETA2,
            eps: Self::DEFAULT_EPS,
            m: Vec::new(),
            v: Vec::new(),
            iteration: 0,
        }
    }

    /// Override the moment decay rates.
    pub fn with_betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    /// Override the denominator offset.
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub fn stepsize(&self) -> f64 {
        self.stepsize
    }
}

impl StepOptimizer for Adam {
    fn step<F>(&mut self, cost_fn: &F, params: &[f64]) -> QaoaResult<Vec<f64>>
    where
        F: Fn(&[f64]) -> QaoaResult<f64> + Sync,
    {
        let gradient = parameter_shift_gradient(cost_fn, params)?;
        let t = self.iteration + 1;
        check_gradient(&gradient, params, t)?;

        if self.m.len() != params.len() {
            self.m = vec![0.0; params.len()];
            self.v = vec![0.0; params.len()];
        }

        let bias1 = 1.0 - self.beta1.powi(t as i32);
        let bias2 = 1.0 - self.beta2.powi(t as i32);

        let mut next = Vec::with_capacity(params.len());
        for (k, (&x, &g)) in params.iter().zip(&gradient).enumerate() {
            self.m[k] = self.beta1 * self.m[k] + (1.0 - self.beta1) * g;
            self.v[k] = self.beta2 * self.v[k] + (1.0 - self.beta2) * g * g;
            let m_hat = self.m[k] / bias1;
            let v_hat = self.v[k] / bias2;
            next.push(x - self.stepsize * m_hat / (v_hat.sqrt() + self.eps));
        }

        self.iteration = t;
        trace!(iteration = t, ?gradient, "adam step");
        Ok(next)
    }

    fn reset(&mut self) {
        self.m.clear();
        self.v.clear();
        self.iteration = 0;
    }

    fn iteration(&self) -> usize {
        self.iteration
    }
}

/// Which optimizer to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerKind {
    GradientDescent,
    #[default]
    Adam,
}

impl OptimizerKind {
    pub fn name(&self) -> &'static str {
        match self {
            OptimizerKind::GradientDescent => "gradient_descent",
            OptimizerKind::Adam => "adam",
        }
    }
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptimizerKind {
    type Err = QaoaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "gradient_descent" | "gd" => Ok(OptimizerKind::GradientDescent),
            "adam" => Ok(OptimizerKind::Adam),
            _ => Err(QaoaError::UnknownOptimizer(s.to_string())),
        }
    }
}

/// Optimizer selection and loop length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerConfig {
    /// Update rule.
    pub kind: OptimizerKind,
    /// Learning rate, must be positive.
    pub stepsize: f64,
    /// Number of optimizer steps, at least 1.
    pub steps: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            kind: OptimizerKind::Adam,
            stepsize: 0.01,
            steps: 100,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> QaoaResult<()> {
        if !(self.stepsize.is_finite() && self.stepsize > 0.0) {
            return Err(QaoaError::InvalidStepsize(self.stepsize));
        }
        if self.steps == 0 {
            return Err(QaoaError::InvalidSteps(self.steps));
        }
        Ok(())
    }
}

/// The optimizers available to the orchestrator.
#[derive(Debug, Clone)]
pub enum Optimizer {
    GradientDescent(GradientDescent),
    Adam(Adam),
}

impl Optimizer {
    pub fn gradient_descent(stepsize: f64) -> Self {
        Optimizer::GradientDescent(GradientDescent::new(stepsize))
    }

    pub fn adam(stepsize: f64) -> Self {
        Optimizer::Adam(Adam::new(stepsize))
    }

    /// Build from a validated config.
    pub fn from_config(config: &OptimizerConfig) -> QaoaResult<Self> {
        config.validate()?;
        Ok(match config.kind {
            OptimizerKind::GradientDescent => Self::gradient_descent(config.stepsize),
            OptimizerKind::Adam => Self::adam(config.stepsize),
        })
    }

    pub fn kind(&self) -> OptimizerKind {
        match self {
            Optimizer::GradientDescent(_) => OptimizerKind::GradientDescent,
            Optimizer::Adam(_) => OptimizerKind::Adam,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn stepsize(&self) -> f64 {
        match self {
            Optimizer::GradientDescent(gd) => gd.stepsize(),
            Optimizer::Adam(adam) => adam.stepsize(),
        }
    }
}

impl StepOptimizer for Optimizer {
    fn step<F>(&mut self, cost_fn: &F, params: &[f64]) -> QaoaResult<Vec<f64>>
    where
        F: Fn(&[f64]) -> QaoaResult<f64> + Sync,
    {
        match self {
            Optimizer::GradientDescent(gd) => gd.step(cost_fn, params),
            Optimizer::Adam(adam) => adam.step(cost_fn, params),
        }
    }

    fn reset(&mut self) {
        match self {
            Optimizer::GradientDescent(gd) => gd.reset(),
            Optimizer::Adam(adam) => adam.reset(),
        }
    }

    fn iteration(&self) -> usize {
        match self {
            Optimizer::GradientDescent(gd) => gd.iteration(),
            Optimizer::Adam(adam) => adam.iteration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sinusoid(x: &[f64]) -> QaoaResult<f64> {
        Ok(x.iter().map(|v| v.sin()).sum())
    }

    #[test]
    fn test_shift_rule_exact_for_sinusoids() {
        let x = [0.3, -1.2, 2.5];
        let g = parameter_shift_gradient(&sinusoid, &x).unwrap();
        for (gk, xk) in g.iter().zip(&x) {
            assert_abs_diff_eq!(*gk, xk.cos(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gradient_order_is_stable() {
        let weighted = |x: &[f64]| -> QaoaResult<f64> {
            Ok(x.iter().enumerate().map(|(k, v)| (k as f64 + 1.0) * v.sin()).sum())
        };
        let x = vec![0.0; 16];
        let g = parameter_shift_gradient(&weighted, &x).unwrap();
        for (k, gk) in g.iter().enumerate() {
            assert_abs_diff_eq!(*gk, k as f64 + 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gradient_descent_update() {
        let mut gd = GradientDescent::new(0.5);
        let next = gd.step(&sinusoid, &[0.0]).unwrap();
        // g = cos 0 = 1
        assert_abs_diff_eq!(next[0], -0.5, epsilon = 1e-12);
        assert_eq!(gd.iteration(), 1);
    }

    #[test]
    fn test_adam_first_step_moves_by_stepsize() {
        // After bias correction m̂ = g and v̂ = g², so |Δx| ≈ lr.
        let mut adam = Adam::new(0.1);
        let next = adam.step(&sinusoid, &[0.2, 1.0]).unwrap();
        assert_abs_diff_eq!(next[0], 0.2 - 0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(next[1], 1.0 - 0.1, epsilon = 1e-6);
        assert_eq!(adam.iteration(), 1);
    }

    #[test]
    fn test_adam_state_untouched_on_instability() {
        let mut adam = Adam::new(0.1);
        adam.step(&sinusoid, &[0.2]).unwrap();
        let m_before = adam.m.clone();

        let nan = |_: &[f64]| -> QaoaResult<f64> { Ok(f64::NAN) };
        let err = adam.step(&nan, &[0.1]).unwrap_err();
        match err {
            QaoaError::NumericalInstability {
                iteration,
                last_params,
                ..
            } => {
                assert_eq!(iteration, 2);
                assert_eq!(last_params, vec![0.1]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(adam.iteration(), 1);
        assert_eq!(adam.m, m_before);
    }

    #[test]
    fn test_reset_clears_moments() {
        let mut opt = Optimizer::adam(0.1);
        let first = opt.step(&sinusoid, &[0.4]).unwrap();
        opt.step(&sinusoid, &first).unwrap();
        opt.reset();
        assert_eq!(opt.iteration(), 0);
        assert_eq!(opt.step(&sinusoid, &[0.4]).unwrap(), first);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("adam".parse::<OptimizerKind>().unwrap(), OptimizerKind::Adam);
        assert_eq!(
            "gradient-descent".parse::<OptimizerKind>().unwrap(),
            OptimizerKind::GradientDescent
        );
        assert!(matches!(
            "lbfgs".parse::<OptimizerKind>(),
            Err(QaoaError::UnknownOptimizer(_))
        ));
    }

    #[test]
    fn test_config_validation() {
        assert!(OptimizerConfig::default().validate().is_ok());
        let bad_lr = OptimizerConfig {
            stepsize: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            Optimizer::from_config(&bad_lr),
            Err(QaoaError::InvalidStepsize(_))
        ));
        let bad_steps = OptimizerConfig {
            steps: 0,
            ..Default::default()
        };
        assert!(matches!(bad_steps.validate(), Err(QaoaError::InvalidSteps(0))));
    }
}
