//! Alpha Quantum Demo Suite
//!
//! Console helpers and the three reference QAOA problems used by the
//! `demo-qaoa` binary:
//!
//! - **simple**: one ZZ coupling on 2 qubits, p = 1
//! - **chain**: open ZZ chain on 4 qubits, p = 2
//! - **triangle**: closed ZZ triangle on 3 qubits, p = 3, with the most
//!   probable final state reported

pub mod problems;
pub mod progress;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

pub use problems::DemoProblem;
pub use progress::ProgressObserver;

/// Create a progress bar for demo operations.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let bar_style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .map(|s| s.progress_chars("#>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(bar_style);
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Format a parameter slice with fixed precision.
pub fn format_params(params: &[f64]) -> String {
    let parts: Vec<String> = params.iter().map(|p| format!("{p:.4}")).collect();
    format!("[{}]", parts.join(", "))
}
