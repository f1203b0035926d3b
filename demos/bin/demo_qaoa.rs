//! QAOA (Quantum Approximate Optimization Algorithm) Demo
//!
//! Minimizes the summed ⟨Z⟩ cost of a QAOA ansatz for one of the built-in
//! ZZ problems or a problem loaded from a YAML/JSON config.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use alphaq_demos::{
    DemoProblem, ProgressObserver, create_progress_bar, format_params, print_header, print_info,
    print_result, print_section, print_success,
};
use alphaq_qaoa::{
    Optimizer, OptimizerConfig, OptimizerKind, QaoaConfig, QaoaRunner, TracingObserver,
};

#[derive(Parser, Debug)]
#[command(name = "demo-qaoa")]
#[command(about = "Demonstrate variational QAOA on ZZ problem Hamiltonians")]
struct Args {
    /// Built-in problem (simple, chain, triangle)
    #[arg(short, long, default_value = "simple", conflicts_with = "config")]
    problem: DemoProblem,

    /// Load the problem and optimizer settings from a YAML or JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Optimizer (adam, gradient_descent)
    #[arg(short, long)]
    optimizer: Option<OptimizerKind>,

    /// Optimizer stepsize
    #[arg(long)]
    stepsize: Option<f64>,

    /// Number of optimizer steps
    #[arg(short = 'n', long)]
    steps: Option<usize>,

    /// Seed for the initial parameters
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the outcome as JSON instead of the summary
    #[arg(long)]
    json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the runner from either the config file or the built-in problem,
/// then apply command-line overrides.
fn build_runner(args: &Args) -> Result<(QaoaRunner, String, bool)> {
    let (base, label, interpret, mut optimizer_config) = match &args.config {
        Some(path) => {
            let config = QaoaConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?;
            let runner = QaoaRunner::from_config(&config)?;
            let label = path.display().to_string();
            (runner, label, true, config.optimizer)
        }
        None => {
            let problem = args.problem.problem()?;
            let runner = QaoaRunner::new(problem);
            let label = format!("{} ({})", args.problem, args.problem.description());
            (
                runner,
                label,
                args.problem.interprets_state(),
                OptimizerConfig::default(),
            )
        }
    };

    if let Some(kind) = args.optimizer {
        optimizer_config.kind = kind;
    }
    if let Some(stepsize) = args.stepsize {
        optimizer_config.stepsize = stepsize;
    }
    if let Some(steps) = args.steps {
        optimizer_config.steps = steps;
    }

    let seed = args.seed.unwrap_or(base.seed);
    let runner = base
        .with_optimizer(Optimizer::from_config(&optimizer_config)?)
        .with_steps(optimizer_config.steps)
        .with_seed(seed);

    Ok((runner, label, interpret))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let (runner, label, interpret) = build_runner(&args)?;
    let problem = &runner.problem;

    info!(
        problem = %label,
        optimizer = runner.optimizer.name(),
        steps = runner.steps,
        seed = runner.seed,
        "starting qaoa demo"
    );

    if args.json {
        let outcome = runner.run_with_observer(&mut TracingObserver)?;
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    print_header("QAOA Optimization Demo");

    print_section("Problem Setup");
    print_result("Problem", &label);
    print_result("Qubits", problem.num_qubits());
    print_result("QAOA layers (p)", problem.layers());
    print_result("Parameters", runner.num_parameters());
    println!();
    println!("  Hamiltonian:");
    for term in problem.hamiltonian() {
        println!("    {term}");
    }

    print_section("Optimizer");
    print_result("Kind", runner.optimizer.name());
    print_result("Stepsize", runner.optimizer.stepsize());
    print_result("Steps", runner.steps);
    print_result("Seed", runner.seed);
    println!();
    println!("  Each step evaluates the circuit {} times", 2 * runner.num_parameters() + 1);
    println!("  (parameter-shift gradient plus the updated cost).");

    print_section("Running QAOA Optimization");
    let bar = create_progress_bar(runner.steps as u64, "Optimizing...");
    let mut observer = ProgressObserver::new(bar);
    let outcome = runner.run_with_observer(&mut observer);
    observer.finish("Optimization complete");
    let outcome = outcome?;

    print_section("Results");
    print_result("Initial cost", format!("{:+.6}", outcome.initial_cost));
    print_result("Final cost", format!("{:+.6}", outcome.cost));
    print_result("Best cost seen", format!("{:+.6}", observer.best()));
    print_result("Improvement", format!("{:+.6}", outcome.improvement()));
    print_result("Iterations", outcome.iterations);
    print_result("Circuit evaluations", outcome.circuit_evaluations);
    println!();
    print_result("Optimal γ", format_params(outcome.gammas()));
    print_result("Optimal β", format_params(outcome.betas()));

    if interpret {
        print_section("Result Interpretation");
        let bits = problem.most_probable_bitstring(&outcome.params)?;
        let state = problem.final_state(&outcome.params)?;
        let index = state.most_probable_state();
        print_result("Most probable state", format!("|{bits}⟩"));
        print_result("Probability", format!("{:.4}", state.probabilities()[index]));
    }

    println!();
    print_success("QAOA demo complete!");
    print_info("Use -vv for per-step logging, --config for custom Hamiltonians.");
    println!();

    Ok(())
}
