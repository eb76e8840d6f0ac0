//! Simulation domain models.
//!
//! Provides the input and output types of a scheduling run: the validated
//! process set fed to an algorithm and the execution timeline it returns.
//!
//! # Domain Mappings
//!
//! | u-cpusim | Operating System | Batch Queue | Job Shop |
//! |----------|------------------|-------------|----------|
//! | ProcessDescriptor | Process/Thread | Batch Job | Job |
//! | ExecutionSlice | CPU Burst | Run Segment | Operation Slot |
//! | ExecutionTimeline | Dispatch Trace | Run Log | Machine Schedule |

mod process;
mod timeline;

pub use process::{ProcessDescriptor, ProcessId, ProcessSet};
pub use timeline::{ExecutionSlice, ExecutionTimeline};

pub(crate) use timeline::TimelineBuilder;
