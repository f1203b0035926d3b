//! Progress bar fed by the cost stream.

use alphaq_qaoa::CostObserver;
use indicatif::ProgressBar;
use tracing::debug;

/// Advances a progress bar once per optimizer step and shows the latest cost.
pub struct ProgressObserver {
    bar: ProgressBar,
    best: f64,
}

impl ProgressObserver {
    pub fn new(bar: ProgressBar) -> Self {
        Self {
            bar,
            best: f64::INFINITY,
        }
    }

    /// Lowest cost seen so far.
    pub fn best(&self) -> f64 {
        self.best
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

impl CostObserver for ProgressObserver {
    fn on_step(&mut self, iteration: usize, cost: f64) {
        self.best = self.best.min(cost);
        debug!(iteration, cost, "qaoa step");
        self.bar.set_position(iteration as u64);
        self.bar
            .set_message(format!("cost {cost:+.6} (best {:+.6})", self.best));
    }
}
