//! Timeline performance metrics.
//!
//! Computes standard CPU scheduling indicators from a finished timeline
//! and the process set that produced it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | End time of the last slice |
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first dispatch - arrival |
//! | Utilization | busy time / makespan |
//! | Context switches | Adjacent slices belonging to different processes |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::Serialize;

use crate::models::{ExecutionTimeline, ProcessId, ProcessSet};

/// Per-process indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessMetrics {
    /// Process index in its set.
    pub process_id: ProcessId,
    /// Process label.
    pub name: String,
    /// Arrival time.
    pub arrival_time: i64,
    /// Burst time.
    pub burst_time: i64,
    /// First dispatch instant.
    pub first_start: i64,
    /// Completion instant.
    pub completion_time: i64,
    /// completion - arrival.
    pub turnaround_time: i64,
    /// turnaround - burst.
    pub waiting_time: i64,
    /// first_start - arrival.
    pub response_time: i64,
    /// Number of slices the process was split into.
    pub slices: usize,
}

/// Whole-timeline indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineMetrics {
    /// End time of the last slice.
    pub makespan: i64,
    /// Time spent running processes.
    pub busy_time: i64,
    /// Time in `[0, makespan)` with no process running.
    pub idle_time: i64,
    /// busy / makespan (0.0..1.0). Zero for an empty timeline.
    pub cpu_utilization: f64,
    /// Completed processes per time unit.
    pub throughput: f64,
    /// Switches between different processes on the CPU.
    pub context_switches: usize,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Per-process breakdown, in input order. Processes that never ran
    /// are omitted.
    pub processes: Vec<ProcessMetrics>,
}

impl TimelineMetrics {
    /// Computes metrics from a timeline and its input processes.
    pub fn calculate(processes: &ProcessSet, timeline: &ExecutionTimeline) -> Self {
        let makespan = timeline.makespan();
        let busy_time = timeline.busy_time();

        let per_process: Vec<ProcessMetrics> = processes
            .enumerate()
            .filter_map(|(id, process)| {
                let first_start = timeline.first_start(id)?;
                let completion_time = timeline.completion_time(id)?;
                let turnaround_time = completion_time - process.arrival_time();
                Some(ProcessMetrics {
                    process_id: id,
                    name: process.name().to_string(),
                    arrival_time: process.arrival_time(),
                    burst_time: process.burst_time(),
                    first_start,
                    completion_time,
                    turnaround_time,
                    waiting_time: turnaround_time - process.burst_time(),
                    response_time: first_start - process.arrival_time(),
                    slices: timeline.slices_for(id).len(),
                })
            })
            .collect();

        let context_switches = timeline
            .slices()
            .windows(2)
            .filter(|pair| pair[0].process_id != pair[1].process_id)
            .count();

        let mean = |f: fn(&ProcessMetrics) -> i64| -> f64 {
            if per_process.is_empty() {
                0.0
            } else {
                per_process.iter().map(f).sum::<i64>() as f64 / per_process.len() as f64
            }
        };

        let (cpu_utilization, throughput) = if makespan > 0 {
            (
                busy_time as f64 / makespan as f64,
                per_process.len() as f64 / makespan as f64,
            )
        } else {
            (0.0, 0.0)
        };

        let avg_turnaround_time = mean(|p| p.turnaround_time);
        let avg_waiting_time = mean(|p| p.waiting_time);
        let avg_response_time = mean(|p| p.response_time);

        Self {
            makespan,
            busy_time,
            idle_time: makespan - busy_time,
            cpu_utilization,
            throughput,
            context_switches,
            avg_turnaround_time,
            avg_waiting_time,
            avg_response_time,
            processes: per_process,
        }
    }

    /// Metrics for one process.
    pub fn process(&self, process_id: ProcessId) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|p| p.process_id == process_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{Fifo, RoundRobin, SchedulingAlgorithm, Sjf};

    fn classic_set() -> ProcessSet {
        ProcessSet::from_tuples(&[("P1", 0, 5), ("P2", 1, 3), ("P3", 2, 1)]).unwrap()
    }

    #[test]
    fn test_fifo_metrics() {
        let set = classic_set();
        let m = TimelineMetrics::calculate(&set, &Fifo.schedule(&set));
        assert_eq!(m.makespan, 9);
        assert_eq!(m.busy_time, 9);
        assert_eq!(m.idle_time, 0);
        assert!((m.cpu_utilization - 1.0).abs() < 1e-10);
        assert_eq!(m.context_switches, 2);
        // Turnaround: 5, 7, 7 → 19/3
        assert!((m.avg_turnaround_time - 19.0 / 3.0).abs() < 1e-10);
        // Waiting: 0, 4, 6 → 10/3
        assert!((m.avg_waiting_time - 10.0 / 3.0).abs() < 1e-10);
        assert_eq!(m.process(2).map(|p| p.waiting_time), Some(6));
    }

    #[test]
    fn test_sjf_reduces_waiting() {
        let set = classic_set();
        let fifo = TimelineMetrics::calculate(&set, &Fifo.schedule(&set));
        let sjf = TimelineMetrics::calculate(&set, &Sjf.schedule(&set));
        // SJF waiting: 0, 5, 3 → 8/3
        assert!((sjf.avg_waiting_time - 8.0 / 3.0).abs() < 1e-10);
        assert!(sjf.avg_waiting_time < fifo.avg_waiting_time);
    }

    #[test]
    fn test_round_robin_response_and_switches() {
        let set = classic_set();
        let rr = RoundRobin::new(2).unwrap();
        let m = TimelineMetrics::calculate(&set, &rr.schedule(&set));
        assert_eq!(m.context_switches, 5);
        // Response: P1 0, P2 2-1=1, P3 4-2=2 → 1.0
        assert!((m.avg_response_time - 1.0).abs() < 1e-10);
        assert_eq!(m.process(0).map(|p| p.slices), Some(3));
        assert_eq!(m.process(0).map(|p| p.completion_time), Some(9));
    }

    #[test]
    fn test_idle_time() {
        let set = ProcessSet::from_tuples(&[("A", 2, 2), ("B", 6, 2)]).unwrap();
        let m = TimelineMetrics::calculate(&set, &Fifo.schedule(&set));
        assert_eq!(m.makespan, 8);
        assert_eq!(m.busy_time, 4);
        assert_eq!(m.idle_time, 4);
        assert!((m.cpu_utilization - 0.5).abs() < 1e-10);
        assert!((m.throughput - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_zero_makespan() {
        let set = ProcessSet::from_tuples(&[("Z", 0, 0)]).unwrap();
        let m = TimelineMetrics::calculate(&set, &Fifo.schedule(&set));
        assert_eq!(m.makespan, 0);
        assert!((m.cpu_utilization - 0.0).abs() < 1e-10);
        assert_eq!(m.processes.len(), 1);
    }
}
