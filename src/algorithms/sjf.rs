//! Shortest-Job-First scheduling (non-preemptive).
//!
//! # Algorithm
//!
//! 1. Keep a pending list of processes in arrival order.
//! 2. Among pending processes that have arrived, dispatch the one with the
//!    smallest burst time and run it to completion.
//! 3. If none has arrived, advance the clock by one time unit and retry.
//!
//! Ties on burst time go to the first candidate in the pending list, i.e.
//! the earliest arrival, then input order.
//!
//! The idle step is a fixed single unit rather than a jump to the next
//! arrival. Timelines are identical either way; only the number of idle
//! iterations differs.
//!
//! # Complexity
//! O(n² + I) where I is the total idle time.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.2

use super::{Algorithm, SchedulingAlgorithm};
use crate::models::{ExecutionTimeline, ProcessDescriptor, ProcessId, ProcessSet, TimelineBuilder};

/// Shortest-Job-First, non-preemptive.
///
/// A running process is never interrupted, even if a shorter one arrives.
///
/// # Example
/// ```
/// use u_cpusim::algorithms::{SchedulingAlgorithm, Sjf};
/// use u_cpusim::models::ProcessSet;
///
/// let set = ProcessSet::from_tuples(&[("P1", 0, 5), ("P2", 1, 3), ("P3", 2, 1)]).unwrap();
/// let timeline = Sjf.schedule(&set);
/// assert_eq!(timeline.to_tuples(), vec![("P1", 0, 5), ("P3", 5, 6), ("P2", 6, 9)]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl SchedulingAlgorithm for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn kind(&self) -> Algorithm {
        Algorithm::Sjf
    }

    fn schedule(&self, processes: &ProcessSet) -> ExecutionTimeline {
        let _span = tracing::debug_span!("sjf", processes = processes.len()).entered();

        let mut timeline = TimelineBuilder::new(Algorithm::Sjf, processes.len());
        let mut pending = processes.arrival_order();
        let mut current_time = 0;

        while !pending.is_empty() {
            match select_shortest(&pending, current_time) {
                Some(slot) => {
                    let (id, process) = pending.remove(slot);
                    current_time =
                        timeline.dispatch(id, process, current_time, process.burst_time());
                }
                None => {
                    tracing::trace!(at = current_time, "idle");
                    current_time += 1;
                }
            }
        }

        timeline.finish()
    }

    fn description(&self) -> &'static str {
        "Shortest Job First (non-preemptive)"
    }
}

/// Position in `pending` of the shortest process that has arrived by `now`.
fn select_shortest(pending: &[(ProcessId, &ProcessDescriptor)], now: i64) -> Option<usize> {
    pending
        .iter()
        .enumerate()
        .filter(|(_, (_, p))| p.arrival_time() <= now)
        .min_by_key(|(_, (_, p))| p.burst_time())
        .map(|(slot, _)| slot)
}
