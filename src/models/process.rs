//! Process model.
//!
//! A process is a unit of CPU work described by a name, the instant it
//! becomes eligible to run, and the CPU time it needs in total.
//!
//! # Time Representation
//! All times are integer time units relative to the simulation epoch (t=0).
//! The caller defines what one unit means.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, SchedulingError};

/// Index of a process within its [`ProcessSet`].
pub type ProcessId = usize;

/// An immutable process descriptor.
///
/// Arrival and burst times are validated to be non-negative on
/// construction and cannot change afterwards. Algorithms that need
/// remaining-time bookkeeping keep it in their own working entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProcess")]
pub struct ProcessDescriptor {
    name: String,
    arrival_time: i64,
    burst_time: i64,
}

#[derive(Deserialize)]
struct RawProcess {
    name: String,
    arrival_time: i64,
    burst_time: i64,
}

impl TryFrom<RawProcess> for ProcessDescriptor {
    type Error = SchedulingError;

    fn try_from(raw: RawProcess) -> Result<Self> {
        Self::new(raw.name, raw.arrival_time, raw.burst_time)
    }
}

impl ProcessDescriptor {
    /// Creates a validated process descriptor.
    ///
    /// # Errors
    /// [`SchedulingError::InvalidProcessInput`] if the name is blank,
    /// either time is negative, or `arrival_time + burst_time` does not fit
    /// in an `i64`.
    pub fn new(name: impl Into<String>, arrival_time: i64, burst_time: i64) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SchedulingError::invalid_process(
                name,
                "process name must not be empty",
            ));
        }
        if arrival_time < 0 || burst_time < 0 {
            return Err(SchedulingError::invalid_process(
                name,
                "arrival and burst times must be non-negative",
            ));
        }
        if arrival_time.checked_add(burst_time).is_none() {
            return Err(SchedulingError::invalid_process(
                name,
                "arrival plus burst time is out of range",
            ));
        }
        Ok(Self {
            name,
            arrival_time,
            burst_time,
        })
    }

    /// Parses a descriptor from user-entered text fields.
    ///
    /// Surrounding whitespace is ignored in the numeric fields.
    ///
    /// # Example
    /// ```
    /// use u_cpusim::models::ProcessDescriptor;
    ///
    /// let p = ProcessDescriptor::parse("P1", "0", " 5 ").unwrap();
    /// assert_eq!(p.burst_time(), 5);
    /// assert!(ProcessDescriptor::parse("P1", "zero", "5").is_err());
    /// ```
    pub fn parse(name: &str, arrival_text: &str, burst_text: &str) -> Result<Self> {
        let arrival_time = parse_time(name, "arrival time", arrival_text)?;
        let burst_time = parse_time(name, "burst time", burst_text)?;
        Self::new(name, arrival_time, burst_time)
    }

    /// Builds a descriptor from values the caller already checked.
    pub(crate) fn from_validated(name: String, arrival_time: i64, burst_time: i64) -> Self {
        debug_assert!(!name.trim().is_empty(), "process name must not be empty");
        debug_assert!(
            arrival_time >= 0 && burst_time >= 0,
            "process {name} has negative times"
        );
        debug_assert!(
            arrival_time.checked_add(burst_time).is_some(),
            "process {name} ends out of range"
        );
        Self {
            name,
            arrival_time,
            burst_time,
        }
    }

    /// Process label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instant the process becomes eligible to run.
    pub fn arrival_time(&self) -> i64 {
        self.arrival_time
    }

    /// Total CPU time the process requires.
    pub fn burst_time(&self) -> i64 {
        self.burst_time
    }
}

/// Latest arrival plus total burst must fit in an `i64`.
fn check_horizon(processes: &[ProcessDescriptor]) -> Result<()> {
    let mut horizon = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
    for p in processes {
        horizon = horizon.checked_add(p.burst_time).ok_or_else(|| {
            SchedulingError::invalid_process(p.name.as_str(), "total simulated time is out of range")
        })?;
    }
    Ok(())
}

fn parse_time(name: &str, field: &str, text: &str) -> Result<i64> {
    text.trim().parse::<i64>().map_err(|_| {
        SchedulingError::invalid_process(name, format!("{field} '{text}' is not an integer"))
    })
}

/// A validated, non-empty, ordered collection of processes.
///
/// Input order is significant: it breaks ties between processes with the
/// same arrival time, and each process is identified by its position.
/// Names may repeat; duplicates are distinct jobs sharing a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<ProcessDescriptor>",
    into = "Vec<ProcessDescriptor>"
)]
pub struct ProcessSet {
    processes: Vec<ProcessDescriptor>,
}

impl TryFrom<Vec<ProcessDescriptor>> for ProcessSet {
    type Error = SchedulingError;

    fn try_from(processes: Vec<ProcessDescriptor>) -> Result<Self> {
        Self::new(processes)
    }
}

impl From<ProcessSet> for Vec<ProcessDescriptor> {
    fn from(set: ProcessSet) -> Self {
        set.processes
    }
}

impl ProcessSet {
    /// Creates a process set.
    ///
    /// # Errors
    /// - [`SchedulingError::EmptyProcessSet`] if `processes` is empty.
    /// - [`SchedulingError::InvalidProcessInput`] if the latest arrival plus
    ///   the total burst time does not fit in an `i64`. Every simulated
    ///   instant stays within that horizon.
    pub fn new(processes: Vec<ProcessDescriptor>) -> Result<Self> {
        if processes.is_empty() {
            return Err(SchedulingError::EmptyProcessSet);
        }
        check_horizon(&processes)?;
        Ok(Self { processes })
    }

    pub(crate) fn from_validated(processes: Vec<ProcessDescriptor>) -> Self {
        debug_assert!(!processes.is_empty(), "process set must not be empty");
        debug_assert!(check_horizon(&processes).is_ok(), "process set horizon out of range");
        Self { processes }
    }

    /// Builds a set from `(name, arrival, burst)` tuples, validating each.
    ///
    /// # Example
    /// ```
    /// use u_cpusim::models::ProcessSet;
    ///
    /// let set = ProcessSet::from_tuples(&[("P1", 0, 5), ("P2", 1, 3)]).unwrap();
    /// assert_eq!(set.len(), 2);
    /// assert!(ProcessSet::from_tuples(&[("P1", -1, 5)]).is_err());
    /// ```
    pub fn from_tuples(tuples: &[(&str, i64, i64)]) -> Result<Self> {
        let processes = tuples
            .iter()
            .map(|&(name, arrival, burst)| ProcessDescriptor::new(name, arrival, burst))
            .collect::<Result<Vec<_>>>()?;
        Self::new(processes)
    }

    /// Number of processes (always at least one).
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Always false: construction rejects empty sets. Present only to pair
    /// with `len` (clippy `len_without_is_empty`).
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Process with the given id.
    pub fn get(&self, id: ProcessId) -> Option<&ProcessDescriptor> {
        self.processes.get(id)
    }

    /// Iterates processes in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProcessDescriptor> {
        self.processes.iter()
    }

    /// Iterates `(id, process)` pairs in input order.
    pub fn enumerate(&self) -> impl Iterator<Item = (ProcessId, &ProcessDescriptor)> {
        self.processes.iter().enumerate()
    }

    /// Sum of all burst times.
    pub fn total_burst(&self) -> i64 {
        self.processes.iter().map(|p| p.burst_time).sum()
    }

    /// Distinct names in first-seen order.
    pub fn distinct_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.processes
            .iter()
            .map(|p| p.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// `(id, process)` pairs sorted by arrival time.
    ///
    /// The sort is stable, so processes arriving together keep input order.
    pub fn arrival_order(&self) -> Vec<(ProcessId, &ProcessDescriptor)> {
        let mut order: Vec<_> = self.enumerate().collect();
        order.sort_by_key(|(_, p)| p.arrival_time);
        order
    }
}

impl<'a> IntoIterator for &'a ProcessSet {
    type Item = &'a ProcessDescriptor;
    type IntoIter = std::slice::Iter<'a, ProcessDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}
