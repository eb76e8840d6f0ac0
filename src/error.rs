//! Error types for simulation input.
//!
//! Every error here is a local validation failure raised before an
//! algorithm runs. None of them are transient, so nothing is retried.

use thiserror::Error;

/// Result alias for fallible simulation entry points.
pub type Result<T> = std::result::Result<T, SchedulingError>;

/// Errors raised while building or running a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    /// A process field is negative, empty, or not an integer.
    #[error("invalid process '{name}': {reason}")]
    InvalidProcessInput { name: String, reason: String },

    /// Scheduling was requested with zero processes.
    #[error("please add at least one process")]
    EmptyProcessSet,

    /// Round Robin quantum is zero or negative.
    #[error("quantum must be a positive integer, got {value}")]
    InvalidQuantum { value: i64 },

    /// Round Robin quantum text could not be parsed.
    #[error("quantum must be a positive integer, got '{text}'")]
    InvalidQuantumText { text: String },

    /// Round Robin was selected without a quantum.
    #[error("round robin requires a quantum")]
    MissingQuantum,

    /// Algorithm name not recognized.
    #[error("unknown scheduling algorithm '{0}'")]
    UnknownAlgorithm(String),
}

impl SchedulingError {
    pub(crate) fn invalid_process(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProcessInput {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error concerns process data (as opposed to options).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidProcessInput { .. } | Self::EmptyProcessSet
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SchedulingError::invalid_process("P1", "burst time must be non-negative");
        assert_eq!(
            err.to_string(),
            "invalid process 'P1': burst time must be non-negative"
        );
        assert_eq!(
            SchedulingError::InvalidQuantum { value: 0 }.to_string(),
            "quantum must be a positive integer, got 0"
        );
    }

    #[test]
    fn test_is_input_error() {
        assert!(SchedulingError::EmptyProcessSet.is_input_error());
        assert!(SchedulingError::invalid_process("P", "x").is_input_error());
        assert!(!SchedulingError::MissingQuantum.is_input_error());
    }
}
