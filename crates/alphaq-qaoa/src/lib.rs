//! Variational QAOA loop for Alpha Quantum.
//!
//! Couples the [`alphaq_sim`] statevector engine with parameter-shift
//! gradient optimizers:
//!
//! - [`cost`]: sum of single-qubit ⟨Z⟩ over the prepared state
//! - [`optimizer`]: gradient descent and Adam
//! - [`initializer`]: seeded uniform and warm-start parameters
//! - [`orchestrator`]: the fixed-step loop and the [`QaoaRunner`] builder
//! - [`observer`]: `(iteration, cost)` reporting
//! - [`config`]: YAML/JSON run descriptions
//!
//! # Example
//!
//! ```rust
//! use alphaq_qaoa::{Optimizer, QaoaProblem, QaoaRunner};
//! use alphaq_sim::{Hamiltonian, PauliTerm};
//!
//! let h = Hamiltonian::new(2, vec![PauliTerm::zz(0, 1, 1.0)]).unwrap();
//! let problem = QaoaProblem::new(2, h, 1).unwrap();
//! let outcome = QaoaRunner::new(problem)
//!     .with_optimizer(Optimizer::adam(0.05))
//!     .with_steps(10)
//!     .run()
//!     .unwrap();
//! assert_eq!(outcome.params.len(), 2);
//! assert_eq!(outcome.history.len(), 11);
//! ```
//!
//! Library code emits `tracing` events at `debug` and `trace` level only and
//! never installs a subscriber.

pub mod config;
pub mod cost;
pub mod error;
pub mod initializer;
pub mod observer;
pub mod optimizer;
pub mod orchestrator;

pub use config::QaoaConfig;
pub use cost::{QaoaProblem, cost};
pub use error::{QaoaError, QaoaResult};
pub use initializer::{ParameterInitializer, UniformRandomInitializer, WarmStartInitializer};
pub use observer::{CostHistory, CostObserver, CostRecord, TracingObserver};
pub use optimizer::{
    Adam, GradientDescent, Optimizer, OptimizerConfig, OptimizerKind, PARAMETER_SHIFT,
    StepOptimizer, parameter_shift_gradient,
};
pub use orchestrator::{QaoaOutcome, QaoaRunner, minimize, run};
