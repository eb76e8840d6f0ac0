//! First-In-First-Out scheduling.
//!
//! # Algorithm
//!
//! 1. Order processes by arrival time (stable: input order breaks ties).
//! 2. Run each to completion in that order.
//! 3. When the next process has not arrived yet, the CPU idles until it does.
//!
//! # Complexity
//! O(n log n) for the sort, O(n) for the dispatch pass.

use super::{Algorithm, SchedulingAlgorithm};
use crate::models::{ExecutionTimeline, ProcessSet, TimelineBuilder};

/// First-In-First-Out (first come, first served).
///
/// Produces exactly one slice per process, in arrival order.
///
/// # Example
/// ```
/// use u_cpusim::algorithms::{Fifo, SchedulingAlgorithm};
/// use u_cpusim::models::ProcessSet;
///
/// let set = ProcessSet::from_tuples(&[("P1", 0, 5), ("P2", 1, 3), ("P3", 2, 1)]).unwrap();
/// let timeline = Fifo.schedule(&set);
/// assert_eq!(timeline.to_tuples(), vec![("P1", 0, 5), ("P2", 5, 8), ("P3", 8, 9)]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Fifo;

impl SchedulingAlgorithm for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn kind(&self) -> Algorithm {
        Algorithm::Fifo
    }

    fn schedule(&self, processes: &ProcessSet) -> ExecutionTimeline {
        let _span = tracing::debug_span!("fifo", processes = processes.len()).entered();

        let mut timeline = TimelineBuilder::new(Algorithm::Fifo, processes.len());
        let mut current_time = 0;

        for (id, process) in processes.arrival_order() {
            if current_time < process.arrival_time() {
                tracing::trace!(from = current_time, to = process.arrival_time(), "idle");
                current_time = process.arrival_time();
            }
            current_time = timeline.dispatch(id, process, current_time, process.burst_time());
        }

        timeline.finish()
    }

    fn description(&self) -> &'static str {
        "First-In-First-Out"
    }
}
