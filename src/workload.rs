//! Synthetic workload generation.
//!
//! Produces random process sets for experiments and randomized tests.
//! Arrival and burst times are drawn uniformly from configurable ranges;
//! a fixed seed makes the output reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{ProcessDescriptor, ProcessSet};

/// Random process set generator.
///
/// # Example
/// ```
/// use u_cpusim::workload::WorkloadGenerator;
///
/// let set = WorkloadGenerator::new()
///     .with_count(4)
///     .with_burst_range(1, 3)
///     .with_seed(42)
///     .generate();
/// assert_eq!(set.len(), 4);
/// assert!(set.iter().all(|p| (1..=3).contains(&p.burst_time())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadGenerator {
    count: usize,
    arrival_spread: i64,
    min_burst: i64,
    max_burst: i64,
    name_prefix: String,
    seed: u64,
}

impl WorkloadGenerator {
    /// Creates a generator: 5 processes, arrivals in `0..=10`, bursts in
    /// `1..=8`, names `P1`, `P2`, ...
    pub fn new() -> Self {
        Self {
            count: 5,
            arrival_spread: 10,
            min_burst: 1,
            max_burst: 8,
            name_prefix: "P".to_string(),
            seed: 0,
        }
    }

    /// Sets the number of processes (at least one).
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count.max(1);
        self
    }

    /// Sets the latest possible arrival time.
    pub fn with_arrival_spread(mut self, spread: i64) -> Self {
        self.arrival_spread = spread.max(0);
        self
    }

    /// Sets the inclusive burst time range.
    pub fn with_burst_range(mut self, min: i64, max: i64) -> Self {
        self.min_burst = min.max(0);
        self.max_burst = max.max(self.min_burst);
        self
    }

    /// Sets the process name prefix.
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Sets the RNG seed used by [`generate`](Self::generate).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generates a process set from the configured seed.
    pub fn generate(&self) -> ProcessSet {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.generate_with(&mut rng)
    }

    /// Generates a process set from the given RNG.
    ///
    /// Bursts are capped so the whole set still fits the simulated time
    /// range, whatever the configured ranges.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> ProcessSet {
        let count = i64::try_from(self.count).unwrap_or(i64::MAX);
        let max_burst = self
            .max_burst
            .min((i64::MAX - self.arrival_spread) / count);
        let min_burst = self.min_burst.min(max_burst);

        let prefix = if self.name_prefix.trim().is_empty() {
            "P"
        } else {
            self.name_prefix.as_str()
        };

        let processes = (0..self.count)
            .map(|i| {
                ProcessDescriptor::from_validated(
                    format!("{prefix}{}", i + 1),
                    rng.random_range(0..=self.arrival_spread),
                    rng.random_range(min_burst..=max_burst),
                )
            })
            .collect();

        ProcessSet::from_validated(processes)
    }
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let set = WorkloadGenerator::new().generate();
        assert_eq!(set.len(), 5);
        assert_eq!(set.get(0).map(|p| p.name()), Some("P1"));
        assert!(set
            .iter()
            .all(|p| (0..=10).contains(&p.arrival_time()) && (1..=8).contains(&p.burst_time())));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = WorkloadGenerator::new().with_seed(9).generate();
        let b = WorkloadGenerator::new().with_seed(9).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ranges_are_clamped() {
        let set = WorkloadGenerator::new()
            .with_count(0)
            .with_arrival_spread(-5)
            .with_burst_range(-3, -7)
            .generate();
        assert_eq!(set.len(), 1);
        let p = set.get(0).unwrap();
        assert_eq!(p.arrival_time(), 0);
        assert_eq!(p.burst_time(), 0);
    }

    #[test]
    fn test_extreme_ranges_stay_in_range() {
        let set = WorkloadGenerator::new()
            .with_count(3)
            .with_arrival_spread(i64::MAX / 2)
            .with_burst_range(i64::MAX, i64::MAX)
            .with_seed(1)
            .generate();
        assert_eq!(set.len(), 3);
        assert_eq!(ProcessSet::new(set.iter().cloned().collect()), Ok(set));
    }

    #[test]
    fn test_name_prefix() {
        let set = WorkloadGenerator::new()
            .with_count(2)
            .with_name_prefix("job-")
            .generate();
        assert_eq!(set.distinct_names(), vec!["job-1", "job-2"]);

        let blank = WorkloadGenerator::new().with_count(1).with_name_prefix(" ").generate();
        assert_eq!(blank.get(0).map(|p| p.name()), Some("P1"));
    }

    #[test]
    fn test_generate_with_external_rng() {
        let mut rng = StdRng::seed_from_u64(3);
        let set = WorkloadGenerator::new().with_count(3).generate_with(&mut rng);
        assert_eq!(set.len(), 3);
    }
}
