use super::state::{ProcessSlot, Quantum, Ticks};
use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

/// Every variant aborts the current run; nothing is retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("Negative allocation: {quantum} ticks requested for process {id}")]
    NegativeAllocation { id: String, quantum: Quantum },

    #[error("Empty allocation: zero ticks requested for process {id}")]
    EmptyAllocation { id: String },

    #[error("No runnable process at t={time} while {unfinished} process(es) remain unfinished")]
    NoRunnableProcess { time: Ticks, unfinished: usize },

    #[error("Invalid policy configuration: {0}")]
    InvalidPolicyConfiguration(String),

    #[error("Invalid process {id}: {reason}")]
    InvalidProcess { id: String, reason: String },

    #[error("Duplicate process id: {0}")]
    DuplicateProcessId(String),

    #[error("Policy selected unknown process slot {0}")]
    UnknownProcess(ProcessSlot),

    #[error("Policy selected process {id}, which is not runnable at t={time}")]
    NotRunnable { id: String, time: Ticks },

    #[error("Step limit exceeded: {0}")]
    StepLimitExceeded(usize),
}
