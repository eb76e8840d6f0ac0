//! Round Robin scheduling (preemptive, fixed quantum).
//!
//! # Algorithm
//!
//! The working list starts as every process in arrival order, each with
//! its full burst as remaining time. The scheduler then makes passes:
//!
//! 1. Walk the working list in order. Every entry that has arrived by the
//!    current clock runs for `min(remaining, quantum)`; the clock advances
//!    immediately, so later entries in the same pass see the updated time.
//! 2. After the pass, drop finished entries: dispatched at least once and
//!    no remaining time. A zero-burst entry that has not arrived yet stays
//!    until it gets its empty slice.
//! 3. If the pass dispatched nothing, advance the clock by one unit.
//!
//! The run ends when the working list is empty. With `quantum > 0` every
//! pass that dispatches strictly reduces the total remaining work.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.3

use super::{Algorithm, SchedulingAlgorithm};
use crate::error::{Result, SchedulingError};
use crate::models::{ExecutionTimeline, ProcessDescriptor, ProcessId, ProcessSet, TimelineBuilder};

/// Round Robin with a fixed, positive quantum.
///
/// # Example
/// ```
/// use u_cpusim::algorithms::{RoundRobin, SchedulingAlgorithm};
/// use u_cpusim::models::ProcessSet;
///
/// let set = ProcessSet::from_tuples(&[("P1", 0, 5), ("P2", 1, 3), ("P3", 2, 1)]).unwrap();
/// let timeline = RoundRobin::new(2).unwrap().schedule(&set);
/// assert_eq!(
///     timeline.to_tuples(),
///     vec![("P1", 0, 2), ("P2", 2, 4), ("P3", 4, 5), ("P1", 5, 7), ("P2", 7, 8), ("P1", 8, 9)]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobin {
    quantum: i64,
}

/// Per-process bookkeeping owned by one Round Robin run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RoundRobinEntry<'a> {
    process_id: ProcessId,
    process: &'a ProcessDescriptor,
    remaining_time: i64,
    dispatched: bool,
}

impl RoundRobin {
    /// Creates a Round Robin scheduler.
    ///
    /// # Errors
    /// [`SchedulingError::InvalidQuantum`] if `quantum <= 0`.
    pub fn new(quantum: i64) -> Result<Self> {
        if quantum <= 0 {
            return Err(SchedulingError::InvalidQuantum { value: quantum });
        }
        Ok(Self { quantum })
    }

    /// Maximum contiguous CPU time granted per dispatch.
    pub fn quantum(&self) -> i64 {
        self.quantum
    }
}

impl SchedulingAlgorithm for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn kind(&self) -> Algorithm {
        Algorithm::RoundRobin
    }

    fn schedule(&self, processes: &ProcessSet) -> ExecutionTimeline {
        let _span = tracing::debug_span!(
            "round_robin",
            processes = processes.len(),
            quantum = self.quantum
        )
        .entered();

        let mut timeline = TimelineBuilder::new(Algorithm::RoundRobin, processes.len());
        let mut working = working_list(processes);
        let mut current_time = 0;

        while !working.is_empty() {
            let mut dispatched = false;

            for entry in working.iter_mut() {
                if entry.process.arrival_time() > current_time {
                    continue;
                }
                let run = entry.remaining_time.min(self.quantum);
                current_time =
                    timeline.dispatch(entry.process_id, entry.process, current_time, run);
                entry.remaining_time -= run;
                entry.dispatched = true;
                dispatched = true;
            }

            drop_completed(&mut working);

            if !dispatched {
                tracing::trace!(at = current_time, "idle");
                current_time += 1;
            }
        }

        timeline.finish()
    }

    fn description(&self) -> &'static str {
        "Round Robin (fixed quantum)"
    }
}

/// Fresh working entries in arrival order.
fn working_list(processes: &ProcessSet) -> Vec<RoundRobinEntry<'_>> {
    processes
        .arrival_order()
        .into_iter()
        .map(|(process_id, process)| RoundRobinEntry {
            process_id,
            process,
            remaining_time: process.burst_time(),
            dispatched: false,
        })
        .collect()
}

/// Removes finished entries, keeping the order of the rest.
fn drop_completed(working: &mut Vec<RoundRobinEntry<'_>>) {
    working.retain(|entry| entry.remaining_time > 0 || !entry.dispatched);
}
