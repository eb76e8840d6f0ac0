//! Timeline validation.
//!
//! Checks a finished timeline against the process set that produced it.
//! Detects:
//! - Slices referring to unknown processes or carrying the wrong name
//! - Slices that end before they start
//! - Slices starting before their process arrived
//! - Processes whose slices do not add up to their burst time
//! - Two slices occupying the CPU at the same instant
//!
//! Policy-specific checks cover non-preemption (one slice per process) and
//! Round Robin slice lengths.
//!
//! All checks accumulate: every problem found is reported, not just the first.

use std::collections::HashMap;

use crate::models::{ExecutionSlice, ExecutionTimeline, ProcessId, ProcessSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A slice references a process id not in the set, or the wrong name.
    UnknownProcess,
    /// A slice has `end_time < start_time`.
    NegativeDuration,
    /// A slice starts before its process arrived.
    StartsBeforeArrival,
    /// A process never appears in the timeline.
    MissingProcess,
    /// A process's slices do not sum to its burst time.
    BurstMismatch,
    /// Two slices overlap in time.
    Overlap,
    /// A non-preemptive run split a process into several slices.
    Preempted,
    /// A Round Robin slice is longer than the quantum.
    QuantumExceeded,
    /// A non-final Round Robin slice is shorter than the quantum.
    ShortSlice,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the invariants every policy must uphold.
///
/// Checks:
/// 1. Every slice names a process of the set, with a matching label
/// 2. `end_time >= start_time`
/// 3. `start_time >= arrival_time`
/// 4. Every process appears, and its slices sum to its burst time
/// 5. No two slices overlap (zero-length slices never overlap)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_timeline(processes: &ProcessSet, timeline: &ExecutionTimeline) -> ValidationResult {
    let mut errors = Vec::new();
    let mut served: HashMap<ProcessId, i64> = HashMap::new();

    for slice in timeline.slices() {
        let Some(process) = processes.get(slice.process_id) else {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownProcess,
                format!(
                    "Slice '{}' references unknown process #{}",
                    slice.process_name, slice.process_id
                ),
            ));
            continue;
        };

        if process.name() != slice.process_name {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownProcess,
                format!(
                    "Slice for process #{} is labeled '{}' instead of '{}'",
                    slice.process_id,
                    slice.process_name,
                    process.name()
                ),
            ));
        }

        if slice.end_time < slice.start_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDuration,
                format!(
                    "Slice '{}' ends at {} before it starts at {}",
                    slice.process_name, slice.end_time, slice.start_time
                ),
            ));
        }

        if slice.start_time < process.arrival_time() {
            errors.push(ValidationError::new(
                ValidationErrorKind::StartsBeforeArrival,
                format!(
                    "Process '{}' runs at {} but arrives at {}",
                    slice.process_name,
                    slice.start_time,
                    process.arrival_time()
                ),
            ));
        }

        *served.entry(slice.process_id).or_insert(0) += slice.duration();
    }

    for (id, process) in processes.enumerate() {
        match served.get(&id) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::MissingProcess,
                format!("Process '{}' (#{id}) never ran", process.name()),
            )),
            Some(&total) if total != process.burst_time() => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::BurstMismatch,
                    format!(
                        "Process '{}' (#{id}) ran for {total} but needs {}",
                        process.name(),
                        process.burst_time()
                    ),
                ))
            }
            Some(_) => {}
        }
    }

    if let Some(overlap) = detect_overlap(timeline.slices()) {
        errors.push(overlap);
    }

    finish(errors)
}

/// Validates that no process was split across several slices.
///
/// Holds for FIFO and SJF.
pub fn validate_non_preemptive(
    processes: &ProcessSet,
    timeline: &ExecutionTimeline,
) -> ValidationResult {
    let mut errors = Vec::new();

    for (id, process) in processes.enumerate() {
        let count = timeline.slices_for(id).len();
        if count > 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::Preempted,
                format!(
                    "Process '{}' (#{id}) was split into {count} slices",
                    process.name()
                ),
            ));
        }
    }

    finish(errors)
}

/// Validates Round Robin slice lengths.
///
/// Every slice is at most `quantum` long, and every slice of a process
/// except its last is exactly `quantum` long.
pub fn validate_round_robin(
    processes: &ProcessSet,
    timeline: &ExecutionTimeline,
    quantum: i64,
) -> ValidationResult {
    let mut errors = Vec::new();

    for (id, process) in processes.enumerate() {
        let slices = timeline.slices_for(id);
        let last = slices.len().saturating_sub(1);

        for (index, slice) in slices.iter().enumerate() {
            let length = slice.duration();
            if length > quantum {
                errors.push(ValidationError::new(
                    ValidationErrorKind::QuantumExceeded,
                    format!(
                        "Process '{}' ran {length} at {} (quantum {quantum})",
                        process.name(),
                        slice.start_time
                    ),
                ));
            } else if index < last && length != quantum {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ShortSlice,
                    format!(
                        "Process '{}' was preempted after {length} at {} (quantum {quantum})",
                        process.name(),
                        slice.start_time
                    ),
                ));
            }
        }
    }

    finish(errors)
}

/// Finds the first pair of overlapping slices.
///
/// # Algorithm
/// Sort by (start, end) and sweep, tracking the latest end seen so far.
/// A positive-length slice starting before that end overlaps.
fn detect_overlap(slices: &[ExecutionSlice]) -> Option<ValidationError> {
    let mut ordered: Vec<&ExecutionSlice> = slices.iter().filter(|s| s.duration() > 0).collect();
    ordered.sort_by_key(|s| (s.start_time, s.end_time));

    let mut previous: Option<&ExecutionSlice> = None;
    for slice in ordered {
        if let Some(prev) = previous {
            if slice.start_time < prev.end_time {
                return Some(ValidationError::new(
                    ValidationErrorKind::Overlap,
                    format!(
                        "'{}' [{}, {}) overlaps '{}' [{}, {})",
                        slice.process_name,
                        slice.start_time,
                        slice.end_time,
                        prev.process_name,
                        prev.start_time,
                        prev.end_time
                    ),
                ));
            }
            if slice.end_time <= prev.end_time {
                continue;
            }
        }
        previous = Some(slice);
    }

    None
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
