//! Cost observation hooks.
//!
//! The orchestrator reports `(iteration, cost)` after the initial evaluation
//! (iteration 0) and after every optimizer step. Observers run on the
//! optimizing thread and must not block.

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One observed cost value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub iteration: usize,
    pub cost: f64,
}

/// Receives the cost stream of a run.
pub trait CostObserver {
    fn on_step(&mut self, iteration: usize, cost: f64);
}

impl CostObserver for () {
    fn on_step(&mut self, _iteration: usize, _cost: f64) {}
}

impl<F> CostObserver for F
where
    F: FnMut(usize, f64),
{
    fn on_step(&mut self, iteration: usize, cost: f64) {
        self(iteration, cost)
    }
}

/// Forwards records to a channel. A dropped receiver is ignored.
impl CostObserver for Sender<CostRecord> {
    fn on_step(&mut self, iteration: usize, cost: f64) {
        let _ = self.send(CostRecord { iteration, cost });
    }
}

/// Append-only record of every observed cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostHistory {
    records: Vec<CostRecord>,
}

impl CostHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[CostRecord] {
        &self.records
    }

    /// Cost values in arrival order.
    pub fn costs(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.cost).collect()
    }

    pub fn last(&self) -> Option<&CostRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CostObserver for CostHistory {
    fn on_step(&mut self, iteration: usize, cost: f64) {
        self.records.push(CostRecord { iteration, cost });
    }
}

/// Emits every record as a `debug` tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CostObserver for TracingObserver {
    fn on_step(&mut self, iteration: usize, cost: f64) {
        debug!(iteration, cost, "qaoa cost");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_history_appends() {
        let mut history = CostHistory::new();
        history.on_step(0, 1.0);
        history.on_step(1, 0.5);
        assert_eq!(history.len(), 2);
        assert_eq!(history.costs(), vec![1.0, 0.5]);
        assert_eq!(history.last().map(|r| r.iteration), Some(1));
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut obs = |i: usize, c: f64| seen.push((i, c));
            obs.on_step(3, -0.25);
        }
        assert_eq!(seen, vec![(3, -0.25)]);
    }

    #[test]
    fn test_sender_ignores_dropped_receiver() {
        let (mut tx, rx) = mpsc::channel::<CostRecord>();
        tx.on_step(0, 2.0);
        assert_eq!(rx.recv().unwrap(), CostRecord { iteration: 0, cost: 2.0 });
        drop(rx);
        tx.on_step(1, 1.0);
    }
}
