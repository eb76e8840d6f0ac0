//! Execution timeline (simulation output).
//!
//! A timeline is the chronological record of which process occupied the
//! CPU during which interval. It is built once per simulation run and
//! never modified afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{ProcessDescriptor, ProcessId};
use crate::algorithms::Algorithm;

/// One contiguous interval `[start_time, end_time)` on the CPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSlice {
    /// Index of the producing process in its process set.
    pub process_id: ProcessId,
    /// Process label (copied from the descriptor).
    pub process_name: String,
    /// Dispatch instant.
    pub start_time: i64,
    /// Preemption or completion instant. Equal to `start_time` only for
    /// zero-burst processes.
    pub end_time: i64,
}

impl ExecutionSlice {
    /// Creates a slice.
    pub fn new(
        process_id: ProcessId,
        process_name: impl Into<String>,
        start_time: i64,
        end_time: i64,
    ) -> Self {
        Self {
            process_id,
            process_name: process_name.into(),
            start_time,
            end_time,
        }
    }

    /// Length of the slice.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }

    /// `(name, start, end)` view.
    pub fn as_tuple(&self) -> (&str, i64, i64) {
        (&self.process_name, self.start_time, self.end_time)
    }
}

/// Slices in the order the scheduler dispatched them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionTimeline {
    algorithm: Algorithm,
    slices: Vec<ExecutionSlice>,
}

impl ExecutionTimeline {
    /// Wraps already-computed slices.
    ///
    /// Algorithms build timelines through their own dispatch loop; this
    /// constructor exists for replaying or hand-building timelines, e.g. to
    /// check them with [`crate::validation`].
    pub fn from_slices(algorithm: Algorithm, slices: Vec<ExecutionSlice>) -> Self {
        Self { algorithm, slices }
    }

    /// Algorithm that produced this timeline.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// All slices in dispatch order.
    pub fn slices(&self) -> &[ExecutionSlice] {
        &self.slices
    }

    /// Number of slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether no slice was dispatched.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// End time of the last slice (0 if empty).
    pub fn makespan(&self) -> i64 {
        self.slices.iter().map(|s| s.end_time).max().unwrap_or(0)
    }

    /// Total CPU time spent running processes.
    pub fn busy_time(&self) -> i64 {
        self.slices.iter().map(ExecutionSlice::duration).sum()
    }

    /// Slices belonging to one process, in dispatch order.
    pub fn slices_for(&self, process_id: ProcessId) -> Vec<&ExecutionSlice> {
        self.slices
            .iter()
            .filter(|s| s.process_id == process_id)
            .collect()
    }

    /// Slices whose process carries the given name.
    ///
    /// With duplicate names this covers every process sharing the label.
    pub fn slices_named(&self, name: &str) -> Vec<&ExecutionSlice> {
        self.slices
            .iter()
            .filter(|s| s.process_name == name)
            .collect()
    }

    /// Instant the process first got the CPU.
    pub fn first_start(&self, process_id: ProcessId) -> Option<i64> {
        self.slices
            .iter()
            .find(|s| s.process_id == process_id)
            .map(|s| s.start_time)
    }

    /// Instant the process finished (end of its last slice).
    pub fn completion_time(&self, process_id: ProcessId) -> Option<i64> {
        self.slices
            .iter()
            .filter(|s| s.process_id == process_id)
            .map(|s| s.end_time)
            .max()
    }

    /// Distinct process names in first-dispatch order.
    pub fn distinct_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.slices
            .iter()
            .map(|s| s.process_name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// `(name, start, end)` view of every slice.
    pub fn to_tuples(&self) -> Vec<(&str, i64, i64)> {
        self.slices.iter().map(ExecutionSlice::as_tuple).collect()
    }
}

/// Accumulates slices during a simulation run.
#[derive(Debug)]
pub(crate) struct TimelineBuilder {
    algorithm: Algorithm,
    slices: Vec<ExecutionSlice>,
}

impl TimelineBuilder {
    pub(crate) fn new(algorithm: Algorithm, capacity: usize) -> Self {
        Self {
            algorithm,
            slices: Vec::with_capacity(capacity),
        }
    }

    /// Records `[start, start + length)` for `process` and returns the end.
    pub(crate) fn dispatch(
        &mut self,
        process_id: ProcessId,
        process: &ProcessDescriptor,
        start: i64,
        length: i64,
    ) -> i64 {
        let end = start + length;
        tracing::trace!(process = process.name(), start, end, "dispatch");
        self.slices
            .push(ExecutionSlice::new(process_id, process.name(), start, end));
        end
    }

    pub(crate) fn finish(self) -> ExecutionTimeline {
        let timeline = ExecutionTimeline {
            algorithm: self.algorithm,
            slices: self.slices,
        };
        tracing::debug!(
            slices = timeline.len(),
            makespan = timeline.makespan(),
            "simulation finished"
        );
        timeline
    }
}
