//! Single-CPU process scheduling simulator for the U-Engine ecosystem.
//!
//! Replays how one CPU would serve a set of processes under the classic
//! FIFO, Shortest-Job-First and Round Robin policies, and produces the
//! resulting execution timeline.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ProcessDescriptor`, `ProcessSet`,
//!   `ExecutionSlice`, `ExecutionTimeline`
//! - **`algorithms`**: `Fifo`, `Sjf`, `RoundRobin` behind the
//!   `SchedulingAlgorithm` trait; `Algorithm` selector and `simulate`
//! - **`validation`**: Timeline invariant checks (coverage, overlap, quantum)
//! - **`metrics`**: Turnaround, waiting, response, utilization
//! - **`render`**: Text listings and Gantt chart layout
//! - **`workload`**: Seeded random process sets
//! - **`error`**: `SchedulingError` taxonomy
//!
//! # Example
//!
//! ```
//! use u_cpusim::{simulate, Algorithm, ProcessSet, SchedulingOptions};
//!
//! let processes = ProcessSet::from_tuples(&[("P1", 0, 5), ("P2", 1, 3), ("P3", 2, 1)])?;
//! let timeline = simulate(Algorithm::Sjf, &processes, &SchedulingOptions::new())?;
//! assert_eq!(timeline.to_tuples(), vec![("P1", 0, 5), ("P3", 5, 6), ("P2", 6, 9)]);
//! # Ok::<(), u_cpusim::SchedulingError>(())
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod algorithms;
pub mod error;
pub mod metrics;
pub mod models;
pub mod render;
pub mod validation;
pub mod workload;

pub use algorithms::{simulate, Algorithm, SchedulingAlgorithm, SchedulingOptions};
pub use error::SchedulingError;
pub use models::{ExecutionSlice, ExecutionTimeline, ProcessDescriptor, ProcessSet};
