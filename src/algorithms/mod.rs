//! CPU scheduling algorithms.
//!
//! Provides the three classic single-CPU policies behind a common
//! [`SchedulingAlgorithm`] trait, plus an enumerated [`Algorithm`] selector
//! and the [`simulate`] entry point.
//!
//! # Usage
//!
//! ```
//! use u_cpusim::algorithms::{simulate, Algorithm, SchedulingOptions};
//! use u_cpusim::models::ProcessSet;
//!
//! let processes = ProcessSet::from_tuples(&[("P1", 0, 5), ("P2", 1, 3), ("P3", 2, 1)]).unwrap();
//! let options = SchedulingOptions::new().with_quantum(2);
//!
//! let timeline = simulate(Algorithm::RoundRobin, &processes, &options).unwrap();
//! assert_eq!(timeline.makespan(), 9);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod fifo;
mod round_robin;
mod sjf;

pub use fifo::Fifo;
pub use round_robin::RoundRobin;
pub use sjf::Sjf;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::error::{Result, SchedulingError};
use crate::models::{ExecutionTimeline, ProcessSet};

/// Quantum suggested to callers that do not pick one.
pub const DEFAULT_QUANTUM: i64 = 2;

/// A single-CPU scheduling policy.
///
/// Implementations are pure: they borrow the process set, keep all
/// bookkeeping in local working copies, and return a complete timeline.
/// The same instance can be reused and shared across threads.
pub trait SchedulingAlgorithm: Send + Sync + Debug {
    /// Short policy name (e.g., "FIFO").
    fn name(&self) -> &'static str;

    /// Selector variant for this policy.
    fn kind(&self) -> Algorithm;

    /// Runs the policy to completion over `processes`.
    fn schedule(&self, processes: &ProcessSet) -> ExecutionTimeline;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Enumerated algorithm choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// First-In-First-Out (first come, first served).
    Fifo,
    /// Shortest-Job-First, non-preemptive.
    Sjf,
    /// Round Robin with a fixed quantum.
    RoundRobin,
}

impl Algorithm {
    /// Every algorithm, in presentation order.
    pub const ALL: [Algorithm; 3] = [Algorithm::Fifo, Algorithm::Sjf, Algorithm::RoundRobin];

    /// Whether this algorithm needs `options.quantum`.
    pub fn requires_quantum(self) -> bool {
        matches!(self, Algorithm::RoundRobin)
    }

    /// Constructs the strategy for this variant.
    ///
    /// `options.quantum` is only read for Round Robin.
    ///
    /// # Errors
    /// [`SchedulingError::MissingQuantum`] or
    /// [`SchedulingError::InvalidQuantum`] for Round Robin without a
    /// positive quantum.
    pub fn build(self, options: &SchedulingOptions) -> Result<Box<dyn SchedulingAlgorithm>> {
        Ok(match self {
            Algorithm::Fifo => Box::new(Fifo),
            Algorithm::Sjf => Box::new(Sjf),
            Algorithm::RoundRobin => {
                let quantum = options.quantum.ok_or(SchedulingError::MissingQuantum)?;
                Box::new(RoundRobin::new(quantum)?)
            }
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Algorithm::Fifo => "FIFO",
            Algorithm::Sjf => "SJF",
            Algorithm::RoundRobin => "Round Robin",
        };
        f.write_str(label)
    }
}

impl FromStr for Algorithm {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "fifo" | "fcfs" | "first-come-first-served" => Ok(Algorithm::Fifo),
            "sjf" | "shortest-job-first" => Ok(Algorithm::Sjf),
            "rr" | "round-robin" => Ok(Algorithm::RoundRobin),
            _ => Err(SchedulingError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Options passed alongside the process set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingOptions {
    /// Round Robin time slice length. Required and positive only for
    /// Round Robin; ignored by the other algorithms.
    pub quantum: Option<i64>,
}

impl SchedulingOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }
}

/// Parses a quantum entered as text.
///
/// # Errors
/// [`SchedulingError::InvalidQuantumText`] if `text` is not an integer,
/// [`SchedulingError::InvalidQuantum`] if it is not positive.
pub fn parse_quantum(text: &str) -> Result<i64> {
    let quantum: i64 = text
        .trim()
        .parse()
        .map_err(|_| SchedulingError::InvalidQuantumText {
            text: text.to_string(),
        })?;
    if quantum <= 0 {
        return Err(SchedulingError::InvalidQuantum { value: quantum });
    }
    Ok(quantum)
}

/// Runs one algorithm over a process set.
///
/// Options are validated before any scheduling happens; a failure
/// produces no timeline at all.
pub fn simulate(
    algorithm: Algorithm,
    processes: &ProcessSet,
    options: &SchedulingOptions,
) -> Result<ExecutionTimeline> {
    let strategy = algorithm.build(options)?;
    Ok(strategy.schedule(processes))
}

/// Runs every algorithm over the same process set.
///
/// Each run works on its own copies, so results are independent of order.
/// Requires a quantum in `options` for the Round Robin run.
pub fn compare(processes: &ProcessSet, options: &SchedulingOptions) -> Result<Vec<ExecutionTimeline>> {
    let strategies = Algorithm::ALL
        .iter()
        .map(|algorithm| algorithm.build(options))
        .collect::<Result<Vec<_>>>()?;
    Ok(strategies.iter().map(|s| s.schedule(processes)).collect())
}

/// A complete, self-describing simulation request.
///
/// Deserializing validates the process set, so a request that parses is
/// ready to run apart from its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Algorithm to run.
    pub algorithm: Algorithm,
    /// Processes to schedule.
    pub processes: ProcessSet,
    /// Algorithm options.
    #[serde(default)]
    pub options: SchedulingOptions,
}

impl SimulationRequest {
    /// Creates a request with default options.
    pub fn new(algorithm: Algorithm, processes: ProcessSet) -> Self {
        Self {
            algorithm,
            processes,
            options: SchedulingOptions::default(),
        }
    }

    /// Sets the options.
    pub fn with_options(mut self, options: SchedulingOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the request.
    pub fn run(&self) -> Result<ExecutionTimeline> {
        simulate(self.algorithm, &self.processes, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_non_preemptive, validate_round_robin, validate_timeline};
    use crate::workload::WorkloadGenerator;

    fn classic_set() -> ProcessSet {
        ProcessSet::from_tuples(&[("P1", 0, 5), ("P2", 1, 3), ("P3", 2, 1)]).unwrap()
    }

    #[test]
    fn test_simulate_each_algorithm() {
        let set = classic_set();
        let options = SchedulingOptions::new().with_quantum(2);

        let fifo = simulate(Algorithm::Fifo, &set, &options).unwrap();
        assert_eq!(fifo.to_tuples(), vec![("P1", 0, 5), ("P2", 5, 8), ("P3", 8, 9)]);

        let sjf = simulate(Algorithm::Sjf, &set, &options).unwrap();
        assert_eq!(sjf.to_tuples(), vec![("P1", 0, 5), ("P3", 5, 6), ("P2", 6, 9)]);

        let rr = simulate(Algorithm::RoundRobin, &set, &options).unwrap();
        assert_eq!(
            rr.to_tuples(),
            vec![
                ("P1", 0, 2),
                ("P2", 2, 4),
                ("P3", 4, 5),
                ("P1", 5, 7),
                ("P2", 7, 8),
                ("P1", 8, 9),
            ]
        );
        assert_eq!(rr.algorithm(), Algorithm::RoundRobin);
    }

    #[test]
    fn test_quantum_ignored_outside_round_robin() {
        let set = classic_set();
        let options = SchedulingOptions::new().with_quantum(-4);
        assert!(simulate(Algorithm::Fifo, &set, &options).is_ok());
        assert!(simulate(Algorithm::Sjf, &set, &SchedulingOptions::new()).is_ok());
    }

    #[test]
    fn test_round_robin_quantum_required() {
        let set = classic_set();
        assert_eq!(
            simulate(Algorithm::RoundRobin, &set, &SchedulingOptions::new()),
            Err(SchedulingError::MissingQuantum)
        );
        assert_eq!(
            simulate(
                Algorithm::RoundRobin,
                &set,
                &SchedulingOptions::new().with_quantum(0)
            ),
            Err(SchedulingError::InvalidQuantum { value: 0 })
        );
    }

    #[test]
    fn test_parse_quantum() {
        assert_eq!(parse_quantum(" 3 "), Ok(3));
        assert_eq!(
            parse_quantum("0"),
            Err(SchedulingError::InvalidQuantum { value: 0 })
        );
        assert_eq!(
            parse_quantum("two"),
            Err(SchedulingError::InvalidQuantumText {
                text: "two".to_string()
            })
        );
    }

    #[test]
    fn test_algorithm_from_str_and_display() {
        assert_eq!("FIFO".parse::<Algorithm>(), Ok(Algorithm::Fifo));
        assert_eq!("fcfs".parse::<Algorithm>(), Ok(Algorithm::Fifo));
        assert_eq!("Shortest Job First".parse::<Algorithm>(), Ok(Algorithm::Sjf));
        assert_eq!("round_robin".parse::<Algorithm>(), Ok(Algorithm::RoundRobin));
        assert_eq!("RR".parse::<Algorithm>(), Ok(Algorithm::RoundRobin));
        assert!("lottery".parse::<Algorithm>().is_err());

        assert_eq!(Algorithm::RoundRobin.to_string(), "Round Robin");
        assert!(Algorithm::RoundRobin.requires_quantum());
        assert!(!Algorithm::Sjf.requires_quantum());
    }

    #[test]
    fn test_build_reports_kind_and_name() {
        let options = SchedulingOptions::new().with_quantum(3);
        for algorithm in Algorithm::ALL {
            let strategy = algorithm.build(&options).unwrap();
            assert_eq!(strategy.kind(), algorithm);
            assert!(!strategy.name().is_empty());
        }
    }

    #[test]
    fn test_compare_isolated_runs() {
        let set = classic_set();
        let before = set.clone();
        let options = SchedulingOptions::new().with_quantum(2);

        let first = compare(&set, &options).unwrap();
        let second = compare(&set, &options).unwrap();

        assert_eq!(set, before);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(first[0].algorithm(), Algorithm::Fifo);
        assert_eq!(first[2].algorithm(), Algorithm::RoundRobin);
    }

    #[test]
    fn test_compare_needs_quantum() {
        let set = classic_set();
        assert!(compare(&set, &SchedulingOptions::new()).is_err());
    }

    #[test]
    fn test_request_from_json() {
        let request: SimulationRequest = serde_json::from_str(
            r#"{
                "algorithm": "round_robin",
                "processes": [
                    {"name": "P1", "arrival_time": 0, "burst_time": 5},
                    {"name": "P2", "arrival_time": 1, "burst_time": 3},
                    {"name": "P3", "arrival_time": 2, "burst_time": 1}
                ],
                "options": {"quantum": 2}
            }"#,
        )
        .unwrap();
        let timeline = request.run().unwrap();
        assert_eq!(timeline.len(), 6);

        let fifo: SimulationRequest = serde_json::from_str(
            r#"{"algorithm": "fifo", "processes": [{"name": "A", "arrival_time": 0, "burst_time": 1}]}"#,
        )
        .unwrap();
        assert_eq!(fifo.options, SchedulingOptions::default());
        assert_eq!(fifo.run().unwrap().to_tuples(), vec![("A", 0, 1)]);
    }

    #[test]
    fn test_request_rejects_bad_processes() {
        let bad: std::result::Result<SimulationRequest, _> = serde_json::from_str(
            r#"{"algorithm": "sjf", "processes": [{"name": "A", "arrival_time": 0, "burst_time": -1}]}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_strategies_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Fifo>();
        assert_send_sync::<Sjf>();
        assert_send_sync::<RoundRobin>();
        assert_send_sync::<Box<dyn SchedulingAlgorithm>>();
    }

    #[test]
    fn test_invariants_on_generated_workloads() {
        for seed in 0..40 {
            let set = WorkloadGenerator::new()
                .with_count(1 + (seed as usize % 9))
                .with_arrival_spread(12)
                .with_burst_range(0, 7)
                .with_seed(seed)
                .generate();
            let quantum = 1 + (seed as i64 % 4);
            let options = SchedulingOptions::new().with_quantum(quantum);

            let fifo = simulate(Algorithm::Fifo, &set, &options).unwrap();
            assert_eq!(validate_timeline(&set, &fifo), Ok(()), "fifo seed {seed}");
            assert_eq!(validate_non_preemptive(&set, &fifo), Ok(()), "fifo seed {seed}");

            let sjf = simulate(Algorithm::Sjf, &set, &options).unwrap();
            assert_eq!(validate_timeline(&set, &sjf), Ok(()), "sjf seed {seed}");
            assert_eq!(validate_non_preemptive(&set, &sjf), Ok(()), "sjf seed {seed}");

            let rr = simulate(Algorithm::RoundRobin, &set, &options).unwrap();
            assert_eq!(validate_timeline(&set, &rr), Ok(()), "rr seed {seed}");
            assert_eq!(
                validate_round_robin(&set, &rr, quantum),
                Ok(()),
                "rr seed {seed}"
            );
        }
    }

    #[test]
    fn test_fifo_permutation_invariant() {
        use rand::rngs::StdRng;
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        // Distinct arrivals, so any permutation sorts back to the same order.
        let tuples = [("A", 4, 2), ("B", 0, 3), ("C", 9, 1), ("D", 2, 5), ("E", 15, 2)];
        let base = Fifo.schedule(&ProcessSet::from_tuples(&tuples).unwrap());

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let mut shuffled = tuples.to_vec();
            shuffled.shuffle(&mut rng);
            let timeline = Fifo.schedule(&ProcessSet::from_tuples(&shuffled).unwrap());
            assert_eq!(timeline.to_tuples(), base.to_tuples());
        }
    }
}
